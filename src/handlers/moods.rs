use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::controller::mood_counts;
use crate::error::AppResult;
use crate::models::mood::{CreateMoodRequest, MoodCount, MoodEntry};
use crate::AppState;

pub async fn list_moods(State(state): State<AppState>) -> Json<Vec<MoodEntry>> {
    Json(state.controller.mood_list().borrow().clone())
}

pub async fn create_mood(
    State(state): State<AppState>,
    Json(body): Json<CreateMoodRequest>,
) -> AppResult<StatusCode> {
    state
        .controller
        .add_mood(body.mood, body.note.unwrap_or_default())
        .await?;
    Ok(StatusCode::CREATED)
}

/// 204 whether or not the row existed; an absent target is not an error.
pub async fn delete_mood(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.controller.delete_mood(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all_moods(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.controller.delete_all_moods().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mood_summary(State(state): State<AppState>) -> Json<Vec<MoodCount>> {
    Json(mood_counts(&state.controller.mood_list().borrow()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::AdviceClient;
    use crate::controller::MoodController;
    use crate::models::mood::Mood;
    use crate::store::MoodStore;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn test_app() -> (Router, AppState) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");

        let store = MoodStore::new(pool.clone()).await.expect("store");
        // Unroutable port; these tests never touch the advice endpoint.
        let advice_client =
            AdviceClient::new("http://127.0.0.1:9/advice", Duration::from_secs(1)).unwrap();
        let controller = MoodController::new(store, advice_client);

        let state = AppState {
            db: pool,
            config: std::sync::Arc::new(crate::config::Config::from_env()),
            controller,
        };

        let app = Router::new()
            .route(
                "/api/moods",
                get(list_moods).post(create_mood).delete(delete_all_moods),
            )
            .route("/api/moods/summary", get(mood_summary))
            .route("/api/moods/:id", axum::routing::delete(delete_mood))
            .with_state(state.clone());

        (app, state)
    }

    fn post_mood(mood: &str, note: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/moods")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(
                "{{\"mood\":\"{mood}\",\"note\":\"{note}\"}}"
            )))
            .unwrap()
    }

    async fn wait_for_len(state: &AppState, len: usize) {
        let mut rx = state.controller.mood_list();
        while rx.borrow().len() != len {
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_create_and_list_moods() {
        let (app, state) = test_app().await;

        let response = app.clone().oneshot(post_mood("SAD", "rough day")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        wait_for_len(&state, 1).await;

        let response = app
            .oneshot(Request::builder().uri("/api/moods").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let entries: Vec<MoodEntry> = serde_json::from_slice(&body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, Mood::Sad);
        assert_eq!(entries[0].note, "rough day");
    }

    #[tokio::test]
    async fn test_unknown_mood_in_request_is_rejected() {
        let (app, _state) = test_app().await;

        // The request body speaks the closed vocabulary; fallback applies
        // only to stored data, not to commands.
        let response = app.oneshot(post_mood("EXCITED", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_delete_absent_mood_returns_no_content() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/api/moods/12345")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_all_then_list_is_empty() {
        let (app, state) = test_app().await;

        app.clone().oneshot(post_mood("HAPPY", "")).await.unwrap();
        app.clone().oneshot(post_mood("TIRED", "")).await.unwrap();
        wait_for_len(&state, 2).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/api/moods")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        wait_for_len(&state, 0).await;
    }

    #[tokio::test]
    async fn test_summary_counts_by_mood() {
        let (app, state) = test_app().await;

        app.clone().oneshot(post_mood("SAD", "")).await.unwrap();
        app.clone().oneshot(post_mood("SAD", "")).await.unwrap();
        app.clone().oneshot(post_mood("HAPPY", "")).await.unwrap();
        wait_for_len(&state, 3).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/moods/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let counts: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let counts = counts.as_array().unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0]["mood"], "HAPPY");
        assert_eq!(counts[0]["count"], 1);
        assert_eq!(counts[1]["mood"], "SAD");
        assert_eq!(counts[1]["count"], 2);
    }
}
