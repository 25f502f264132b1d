//! HTTP route definitions.

mod dataset;
mod health;
mod records;
mod view;

use crate::AppState;
use axum::Router;

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(dataset::routes())
        .merge(view::routes())
        .merge(records::routes())
}
