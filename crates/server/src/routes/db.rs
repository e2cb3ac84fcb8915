use crate::state::AppState;
use axum::{Json, extract::State};
use database::Dataset;

/// Returns every collection at once
#[utoipa::path(
    get,
    path = "/db",
    responses(
        (status = 200, description = "The whole mock database, keyed by collection name")
    ),
    tag = "Database"
)]
pub async fn snapshot(State(state): State<AppState>) -> Json<Dataset> {
    Json(state.db.snapshot().await)
}
