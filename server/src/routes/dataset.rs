//! Dataset endpoint routes.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderName},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use shelf_engine::RecordDiff;

use crate::error::{AppError, Result};
use crate::handlers::{self, ExportQuery, GenerateRequest};
use crate::state::DatasetSummary;
use crate::AppState;

/// Create dataset routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dataset", get(summary_handler))
        .route("/dataset/import", post(import_handler))
        .route("/dataset/generate", post(generate_handler))
        .route("/dataset/reset", post(reset_handler))
        .route("/dataset/error", delete(clear_error_handler))
        .route("/dataset/diff", get(diff_handler))
        .route("/dataset/export", get(export_handler))
        .route("/dataset/genres", get(genres_handler))
}

/// POST /dataset/import - Replace the collection with an uploaded CSV.
async fn import_handler(State(state): State<AppState>, body: Bytes) -> Result<Json<DatasetSummary>> {
    let summary = handlers::handle_import(&state.workspace, body.to_vec()).await?;
    Ok(Json(summary))
}

/// POST /dataset/generate - Replace the collection with synthetic records.
async fn generate_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DatasetSummary>> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        GenerateRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?
    };

    let summary = handlers::handle_generate(&state.workspace, request, &state.config).await?;
    Ok(Json(summary))
}

/// GET /dataset - Load metadata, statistics and stored error.
async fn summary_handler(State(state): State<AppState>) -> Json<DatasetSummary> {
    Json(handlers::handle_summary(&state.workspace).await)
}

/// POST /dataset/reset - Discard all edits.
async fn reset_handler(State(state): State<AppState>) -> Json<DatasetSummary> {
    Json(handlers::handle_reset(&state.workspace).await)
}

/// DELETE /dataset/error - Dismiss the stored error.
async fn clear_error_handler(State(state): State<AppState>) -> Json<DatasetSummary> {
    Json(handlers::handle_clear_error(&state.workspace).await)
}

/// GET /dataset/diff - Field changes against the pristine snapshot.
async fn diff_handler(State(state): State<AppState>) -> Json<Vec<RecordDiff>> {
    Json(handlers::handle_diff(&state.workspace).await)
}

/// GET /dataset/genres - Distinct genres, sorted.
async fn genres_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(handlers::handle_genres(&state.workspace).await)
}

/// GET /dataset/export - Download the edited collection as CSV.
async fn export_handler(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let file =
        handlers::handle_export(&state.workspace, query, &state.config.export_filename).await?;

    let headers: [(HeaderName, String); 2] = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ),
    ];
    Ok((headers, file.contents))
}
