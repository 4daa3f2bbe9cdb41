//! App metadata handler

use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// Describe this app and its declared input/output types
#[utoipa::path(
    get,
    path = "/",
    tag = "app",
    responses(
        (status = 200, description = "App metadata")
    )
)]
pub async fn get_metadata(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.increment_requests();
    Json(state.app.metadata().clone())
}
