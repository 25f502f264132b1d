//! Store - the in-memory record container.
//!
//! The store holds the live, editable collection together with the pristine
//! snapshot taken when the collection was loaded. Every mutation goes
//! through the store; callers only ever see shared references to records.

use crate::{
    error::Result,
    import::{export_rows, ExportRow},
    Book, Error, Field, FieldValue, RecordId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A batch entry for [`RecordStore::bulk_edit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdate {
    /// Target record
    pub id: RecordId,
    /// New values by field
    pub changes: BTreeMap<Field, FieldValue>,
}

impl BulkUpdate {
    /// Create an update with no changes.
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            changes: BTreeMap::new(),
        }
    }

    /// Builder-style method to add a change.
    pub fn with_change(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.changes.insert(field, value.into());
        self
    }
}

/// One field that differs between the live record and its pristine copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: Field,
    pub before: String,
    pub after: String,
}

/// Differences for one modified record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDiff {
    pub id: RecordId,
    /// Empty when the record is flagged modified but holds its original values
    pub changes: Vec<FieldChange>,
}

/// The live collection plus its pristine snapshot.
///
/// Both halves are replaced together by [`load`](Self::load); the live
/// half is restored from the snapshot by [`reset`](Self::reset). The two
/// never share record storage.
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Editable records in load order
    live: Vec<Book>,
    /// Records exactly as loaded
    pristine: Arc<[Book]>,
    /// Position of each id in both `live` and `pristine`
    index: HashMap<RecordId, usize>,
    /// Message of the last failure reported to the user
    error: Option<String>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            live: Vec::new(),
            pristine: Arc::from(Vec::new()),
            index: HashMap::new(),
            error: None,
        }
    }

    /// Replace the live collection and the snapshot with `records`.
    ///
    /// Fails without touching the current state if `records` is empty or
    /// contains the same id twice. A successful load clears the error state.
    pub fn load(&mut self, records: Vec<Book>) -> Result<()> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id, pos).is_some() {
                return Err(Error::DuplicateId(record.id));
            }
        }

        self.pristine = Arc::from(records.clone());
        self.live = records;
        self.index = index;
        self.error = None;

        tracing::debug!(records = self.live.len(), "collection loaded");
        Ok(())
    }

    /// Set `field` of record `id` to `value` and mark it modified.
    ///
    /// Returns `false` and changes nothing when no record has that id.
    pub fn edit(&mut self, id: RecordId, field: Field, value: impl Into<FieldValue>) -> bool {
        self.apply_edit(id, field, &value.into())
    }

    /// Apply a batch of edits in order.
    ///
    /// Several updates for one id accumulate. Returns the number of
    /// updates that matched a record.
    pub fn bulk_edit(&mut self, updates: &[BulkUpdate]) -> usize {
        let mut applied = 0;
        for update in updates {
            let Some(&pos) = self.index.get(&update.id) else {
                tracing::trace!(id = update.id, "bulk update ignored: unknown record id");
                continue;
            };
            let record = &mut self.live[pos];
            for (field, value) in &update.changes {
                record.apply(*field, value);
            }
            // A matched update with no changes still counts as an edit
            record.modified = true;
            applied += 1;
        }
        applied
    }

    fn apply_edit(&mut self, id: RecordId, field: Field, value: &FieldValue) -> bool {
        match self.index.get(&id) {
            Some(&pos) => {
                self.live[pos].apply(field, value);
                true
            }
            None => {
                tracing::trace!(id, %field, "edit ignored: unknown record id");
                false
            }
        }
    }

    /// Restore the live collection from the snapshot and clear the error.
    pub fn reset(&mut self) {
        self.live = self.pristine.to_vec();
        self.error = None;
        tracing::debug!(records = self.live.len(), "collection reset to snapshot");
    }

    /// Whether any live record is marked modified.
    pub fn has_modifications(&self) -> bool {
        self.live.iter().any(|r| r.modified)
    }

    /// Number of live records marked modified.
    pub fn modified_count(&self) -> usize {
        self.live.iter().filter(|r| r.modified).count()
    }

    /// The live collection with bookkeeping fields stripped.
    pub fn export(&self) -> Vec<ExportRow> {
        export_rows(&self.live)
    }

    /// Field-level differences of every modified record against the snapshot.
    pub fn diff(&self) -> Vec<RecordDiff> {
        self.live
            .iter()
            .zip(self.pristine.iter())
            .filter(|(live, _)| live.modified)
            .map(|(live, original)| RecordDiff {
                id: live.id,
                changes: Field::ALL
                    .into_iter()
                    .filter_map(|field| {
                        let before = original.text(field);
                        let after = live.text(field);
                        (before != after).then(|| FieldChange {
                            field,
                            before: before.into_owned(),
                            after: after.into_owned(),
                        })
                    })
                    .collect(),
            })
            .collect()
    }

    /// The live records in load order.
    pub fn records(&self) -> &[Book] {
        &self.live
    }

    /// The records as they were loaded.
    pub fn pristine(&self) -> &[Book] {
        &self.pristine
    }

    /// A shared handle to the snapshot.
    pub fn pristine_shared(&self) -> Arc<[Book]> {
        Arc::clone(&self.pristine)
    }

    /// Get a live record by id.
    pub fn get(&self, id: RecordId) -> Option<&Book> {
        self.index.get(&id).map(|&pos| &self.live[pos])
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether a collection has been loaded.
    pub fn is_loaded(&self) -> bool {
        !self.pristine.is_empty()
    }

    /// The last error recorded for the user, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Record an error message for the user.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Forget the recorded error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
