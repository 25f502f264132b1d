//! View endpoint routes.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::handlers::{view, ViewUpdate};
use crate::AppState;

/// Create view routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/view",
        get(get_handler).patch(update_handler).delete(clear_handler),
    )
}

// Rendered views borrow the collection, so responses are serialized under the lock.

/// GET /view - Render the current page.
async fn get_handler(State(state): State<AppState>) -> Response {
    let ws = state.workspace.read().await;
    Json(view::render(&ws, state.config.page_size)).into_response()
}

/// PATCH /view - Change search, genre, sort or page.
async fn update_handler(
    State(state): State<AppState>,
    Json(update): Json<ViewUpdate>,
) -> Result<Response> {
    let mut ws = state.workspace.write().await;
    view::apply_update(&mut ws, update)?;
    Ok(Json(view::render(&ws, state.config.page_size)).into_response())
}

/// DELETE /view - Clear every filter.
async fn clear_handler(State(state): State<AppState>) -> Response {
    let mut ws = state.workspace.write().await;
    view::clear(&mut ws);
    Json(view::render(&ws, state.config.page_size)).into_response()
}
