use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::{watch, Mutex};

use crate::error::AppResult;
use crate::models::mood::{MoodRecord, NewMood};

/// Durable mood store with a live ordered query.
///
/// Every effective mutation republishes the full ordered result set on a
/// watch channel, so subscribers always see a complete snapshot and late
/// subscribers immediately see current contents. Mutation and notification
/// run under a single writer lock; concurrent writes never interleave
/// partial effects.
#[derive(Clone)]
pub struct MoodStore {
    pool: SqlitePool,
    snapshot_tx: Arc<watch::Sender<Vec<MoodRecord>>>,
    write_lock: Arc<Mutex<()>>,
}

impl MoodStore {
    pub async fn new(pool: SqlitePool) -> AppResult<Self> {
        let initial = query_all(&pool).await?;
        let (snapshot_tx, _) = watch::channel(initial);
        Ok(Self {
            pool,
            snapshot_tx: Arc::new(snapshot_tx),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Live query over all records, ordered by `dateString DESC, id DESC`.
    /// The receiver holds the current contents immediately on subscription.
    pub fn observe_all(&self) -> watch::Receiver<Vec<MoodRecord>> {
        self.snapshot_tx.subscribe()
    }

    /// Insert a new record; the store assigns the id. Notifies subscribers.
    pub async fn insert(&self, new: NewMood) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        sqlx::query("INSERT INTO moods (dateString, moodName, note) VALUES (?1, ?2, ?3)")
            .bind(&new.date_string)
            .bind(&new.mood_name)
            .bind(&new.note)
            .execute(&self.pool)
            .await?;

        self.publish().await
    }

    /// Delete the record with the given id. Absence is a no-op: no error,
    /// no subscriber notification.
    pub async fn delete_one(&self, id: i64) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let result = sqlx::query("DELETE FROM moods WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(id, "delete_one target not found, skipping notification");
            return Ok(());
        }

        self.publish().await
    }

    /// Delete every record. Notifies subscribers with the empty set.
    pub async fn delete_all(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        sqlx::query("DELETE FROM moods").execute(&self.pool).await?;

        self.publish().await
    }

    // Caller must hold the write lock.
    async fn publish(&self) -> AppResult<()> {
        let records = query_all(&self.pool).await?;
        self.snapshot_tx.send_replace(records);
        Ok(())
    }
}

async fn query_all(pool: &SqlitePool) -> AppResult<Vec<MoodRecord>> {
    let records = sqlx::query_as::<_, MoodRecord>(
        "SELECT id, dateString, moodName, note FROM moods ORDER BY dateString DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(records)
}
