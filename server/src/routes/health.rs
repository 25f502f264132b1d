//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether a collection has been imported or generated
    pub dataset_loaded: bool,
}

/// Create health routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
}

/// GET /health - Liveness plus whether the editor has data.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let dataset_loaded = state.workspace.read().await.store.is_loaded();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        dataset_loaded,
    })
}

async fn root() -> &'static str {
    "Shelf Book Editor"
}
