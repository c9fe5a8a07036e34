use axum::{extract::State, Json};

use crate::advice::AdviceState;
use crate::AppState;

pub async fn get_advice(State(state): State<AppState>) -> Json<AdviceState> {
    Json(state.controller.advice().borrow().clone())
}

/// Runs one refresh cycle and returns the settled state. Intermediate
/// loading/settled transitions are observable via `GET /api/advice` and the
/// advice watch channel.
pub async fn refresh_advice(State(state): State<AppState>) -> Json<AdviceState> {
    Json(state.controller.refresh_advice().await)
}
