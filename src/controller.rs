use std::sync::Arc;

use chrono::Local;
use tokio::sync::watch;

use crate::advice::{AdviceClient, AdviceState};
use crate::error::AppResult;
use crate::mapper;
use crate::models::mood::{Mood, MoodCount, MoodEntry, MoodRecord, NewMood};
use crate::store::MoodStore;

/// Fixed user-facing message for a failed advice fetch. The underlying cause
/// goes to the log, never to the client.
pub const ADVICE_ERROR_MESSAGE: &str = "Could not load advice";

/// Bridges the store and the advice client to the presentation layer.
///
/// Owns two observables: the live mood-entry list (the store's live query
/// projected through the mapper) and the tri-state advice view. Cloning is
/// cheap; all clones share the same underlying state.
#[derive(Clone)]
pub struct MoodController {
    store: MoodStore,
    advice_client: AdviceClient,
    list_rx: watch::Receiver<Vec<MoodEntry>>,
    advice_tx: Arc<watch::Sender<AdviceState>>,
}

impl MoodController {
    pub fn new(store: MoodStore, advice_client: AdviceClient) -> Self {
        let mut store_rx = store.observe_all();
        let initial = project(&store_rx.borrow_and_update());
        let (list_tx, list_rx) = watch::channel(initial);

        // Forward store snapshots through the mapper for as long as both the
        // store and at least one list subscriber are alive.
        tokio::spawn(async move {
            while store_rx.changed().await.is_ok() {
                let records = store_rx.borrow_and_update().clone();
                if list_tx.send(project(&records)).is_err() {
                    break;
                }
            }
        });

        let (advice_tx, _) = watch::channel(AdviceState::default());

        Self {
            store,
            advice_client,
            list_rx,
            advice_tx: Arc::new(advice_tx),
        }
    }

    /// Live ordered mood-entry list; current contents available immediately.
    pub fn mood_list(&self) -> watch::Receiver<Vec<MoodEntry>> {
        self.list_rx.clone()
    }

    /// Live tri-state advice view.
    pub fn advice(&self) -> watch::Receiver<AdviceState> {
        self.advice_tx.subscribe()
    }

    /// Record a mood for today. The list update arrives via [`mood_list`].
    ///
    /// [`mood_list`]: MoodController::mood_list
    pub async fn add_mood(&self, mood: Mood, note: String) -> AppResult<()> {
        let record = NewMood {
            date_string: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            mood_name: mood.name().to_string(),
            note,
        };
        self.store.insert(record).await
    }

    pub async fn delete_mood(&self, id: i64) -> AppResult<()> {
        self.store.delete_one(id).await
    }

    pub async fn delete_all_moods(&self) -> AppResult<()> {
        self.store.delete_all().await
    }

    /// Run one advice refresh cycle and return the settled state.
    ///
    /// Sets `loading` and clears `error` up front, keeping any previous text;
    /// on failure the stale text stays visible alongside the fixed error
    /// message. Concurrent refreshes are last-write-wins.
    pub async fn refresh_advice(&self) -> AdviceState {
        self.advice_tx.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.advice_client.fetch_advice().await {
            Ok(text) => {
                self.advice_tx.send_modify(|state| {
                    state.loading = false;
                    state.text = Some(text);
                    state.error = None;
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Advice fetch failed");
                self.advice_tx.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(ADVICE_ERROR_MESSAGE.to_string());
                });
            }
        }

        self.advice_tx.borrow().clone()
    }
}

/// Per-mood entry counts in vocabulary order; zero-count moods are omitted.
pub fn mood_counts(entries: &[MoodEntry]) -> Vec<MoodCount> {
    Mood::ALL
        .iter()
        .filter_map(|&mood| {
            let count = entries.iter().filter(|e| e.mood == mood).count();
            (count > 0).then(|| MoodCount {
                mood,
                emoji: mood.emoji(),
                label: mood.label(),
                count,
            })
        })
        .collect()
}

fn project(records: &[MoodRecord]) -> Vec<MoodEntry> {
    records
        .iter()
        .filter_map(|record| match mapper::to_entry(record) {
            Ok(entry) => Some(entry),
            Err(e) => {
                // Data-integrity problem, distinct from the silent mood-name
                // fallback inside the mapper.
                tracing::error!(id = record.id, error = %e, "Dropping mood record with corrupt date");
                None
            }
        })
        .collect()
}
