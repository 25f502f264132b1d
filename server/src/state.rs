//! The editing workspace shared by all requests.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shelf_engine::{query, Book, RecordStore, Statistics, ViewState};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Workspace behind the lock every handler goes through.
pub type SharedWorkspace = Arc<RwLock<Workspace>>;

/// Where the current collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSource {
    Upload,
    Synthetic,
}

/// Metadata for one successful load.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub load_id: Uuid,
    pub loaded_at: DateTime<Utc>,
    pub source: DatasetSource,
}

/// Summary returned by the dataset endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Absent until the first successful load
    pub dataset: Option<DatasetInfo>,
    pub statistics: Statistics,
    pub has_modifications: bool,
    pub error: Option<String>,
}

/// Live store, view parameters and load metadata, mutated together.
#[derive(Debug, Default)]
pub struct Workspace {
    pub store: RecordStore,
    pub view: ViewState,
    pub info: Option<DatasetInfo>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedWorkspace {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Replace the collection. On failure nothing changes except the stored error.
    pub fn install(
        &mut self,
        books: Vec<Book>,
        source: DatasetSource,
    ) -> shelf_engine::error::Result<&DatasetInfo> {
        if let Err(e) = self.store.load(books) {
            self.store.set_error(e.to_string());
            return Err(e);
        }

        let info = self.info.insert(DatasetInfo {
            load_id: Uuid::new_v4(),
            loaded_at: Utc::now(),
            source,
        });
        tracing::info!(
            load_id = %info.load_id,
            records = self.store.len(),
            "Installed {:?} dataset",
            source
        );
        Ok(info)
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            dataset: self.info.clone(),
            statistics: query::statistics(self.store.records()),
            has_modifications: self.store.has_modifications(),
            error: self.store.last_error().map(str::to_string),
        }
    }
}
