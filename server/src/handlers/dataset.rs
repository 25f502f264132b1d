//! Dataset handlers - import, generation, reset and export.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::state::{DatasetSource, DatasetSummary, SharedWorkspace};
use serde::Deserialize;
use shelf_engine::{generate, import, query, Field, RecordDiff};

/// Request body for synthetic generation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Number of records (server default when absent)
    pub count: Option<usize>,
}

/// Query parameters for export.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub filename: Option<String>,
}

/// A finished export, ready to send as a download.
#[derive(Debug)]
pub struct ExportFile {
    pub filename: String,
    pub contents: String,
}

/// Parse an uploaded CSV body and install it.
///
/// Parsing runs off the lock; only the finished collection is installed, so
/// concurrent imports resolve to whichever finished last.
pub async fn handle_import(workspace: &SharedWorkspace, body: Vec<u8>) -> Result<DatasetSummary> {
    let bytes = body.len();
    let parsed = tokio::task::spawn_blocking(move || import::import_csv(body.as_slice()))
        .await
        .map_err(|e| AppError::Internal(format!("import task failed: {e}")))?;

    let mut ws = workspace.write().await;
    match parsed {
        Ok(books) => {
            tracing::info!(bytes, records = books.len(), "Imported CSV upload");
            ws.install(books, DatasetSource::Upload)?;
            Ok(ws.summary())
        }
        Err(e) => {
            ws.store.set_error(e.to_string());
            Err(e.into())
        }
    }
}

/// Generate synthetic records and install them.
pub async fn handle_generate(
    workspace: &SharedWorkspace,
    request: GenerateRequest,
    config: &Config,
) -> Result<DatasetSummary> {
    let count = request.count.unwrap_or(config.synthetic_count);
    if count == 0 {
        return Err(AppError::BadRequest("count must be at least 1".to_string()));
    }
    if count > config.max_synthetic_count {
        return Err(AppError::BadRequest(format!(
            "count must be at most {}",
            config.max_synthetic_count
        )));
    }

    let books = tokio::task::spawn_blocking(move || generate::generate_synthetic(count))
        .await
        .map_err(|e| AppError::Internal(format!("generate task failed: {e}")))?;

    let mut ws = workspace.write().await;
    ws.install(books, DatasetSource::Synthetic)?;
    Ok(ws.summary())
}

pub async fn handle_summary(workspace: &SharedWorkspace) -> DatasetSummary {
    workspace.read().await.summary()
}

/// Discard every edit since the last load.
pub async fn handle_reset(workspace: &SharedWorkspace) -> DatasetSummary {
    let mut ws = workspace.write().await;
    ws.store.reset();
    ws.summary()
}

pub async fn handle_clear_error(workspace: &SharedWorkspace) -> DatasetSummary {
    let mut ws = workspace.write().await;
    ws.store.clear_error();
    ws.summary()
}

pub async fn handle_diff(workspace: &SharedWorkspace) -> Vec<RecordDiff> {
    workspace.read().await.store.diff()
}

pub async fn handle_genres(workspace: &SharedWorkspace) -> Vec<String> {
    let ws = workspace.read().await;
    query::unique_values(ws.store.records(), Field::Genre)
}

/// Serialize the live collection to CSV.
pub async fn handle_export(
    workspace: &SharedWorkspace,
    query: ExportQuery,
    default_filename: &str,
) -> Result<ExportFile> {
    let filename = match query.filename {
        Some(name) => sanitize_filename(&name)?,
        None => default_filename.to_string(),
    };

    let rows = workspace.read().await.store.export();
    let contents = import::to_csv_string(&rows)?;
    tracing::debug!(rows = rows.len(), %filename, "Exported CSV");

    Ok(ExportFile { filename, contents })
}

/// Keep download names to a single safe path component.
fn sanitize_filename(name: &str) -> Result<String> {
    let name = name.trim();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' '))
        && !name.starts_with('.');

    if valid {
        Ok(name.to_string())
    } else {
        Err(AppError::BadRequest(format!("invalid filename: {name}")))
    }
}
