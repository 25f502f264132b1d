//! Record endpoint routes.

use axum::{
    extract::{Path, State},
    routing::{patch, post},
    Json, Router,
};
use shelf_engine::RecordId;

use crate::error::Result;
use crate::handlers::{self, BulkEditEntry, BulkEditResponse, EditRequest, EditResponse};
use crate::AppState;

/// Create record routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/records/bulk", post(bulk_handler))
        .route("/records/{id}", patch(edit_handler))
}

/// PATCH /records/{id} - Edit one cell.
async fn edit_handler(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(request): Json<EditRequest>,
) -> Result<Json<EditResponse>> {
    let response = handlers::handle_edit(&state.workspace, id, request).await?;
    Ok(Json(response))
}

/// POST /records/bulk - Apply a batch of edits.
async fn bulk_handler(
    State(state): State<AppState>,
    Json(entries): Json<Vec<BulkEditEntry>>,
) -> Result<Json<BulkEditResponse>> {
    let response = handlers::handle_bulk_edit(&state.workspace, entries).await?;
    Ok(Json(response))
}
