//! Shelf Server - HTTP service around the book record editor engine.
//!
//! The server owns one editing workspace: a collection imported from CSV or
//! generated, the pristine copy it can be reset to, the current view
//! parameters and the last import error. Browser clients drive it through
//! JSON endpoints and download the edited collection as CSV.

mod config;
mod error;
mod handlers;
mod routes;
mod state;

use crate::config::Config;
use crate::state::{SharedWorkspace, Workspace};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub workspace: SharedWorkspace,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            workspace: Workspace::shared(),
            config: Arc::new(config),
        }
    }
}

/// Build the router with its middleware stack.
pub fn build_app(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .merge(routes::create_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shelf_server=debug,shelf_engine=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Shelf Server on {}:{}", config.host, config.port);
    tracing::debug!(
        page_size = config.page_size,
        synthetic_count = config.synthetic_count,
        max_synthetic_count = config.max_synthetic_count,
        max_upload_bytes = config.max_upload_bytes,
        "Loaded configuration"
    );

    let addr = format!("{}:{}", config.host, config.port);
    let app = build_app(AppState::new(config));

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
