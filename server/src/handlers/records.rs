//! Record handlers - inline and bulk edits.

use crate::error::Result;
use crate::state::SharedWorkspace;
use serde::{Deserialize, Serialize};
use shelf_engine::{Book, BulkUpdate, Field, FieldValue, RecordId};
use std::collections::BTreeMap;

/// Request body for an inline edit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    /// Column name, e.g. `"PublishedYear"`
    pub field: String,
    pub value: FieldValue,
}

/// One entry of a bulk edit request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEditEntry {
    pub id: RecordId,
    pub changes: BTreeMap<String, FieldValue>,
}

/// Response for an inline edit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    /// False when no record has the id
    pub applied: bool,
    pub record: Option<Book>,
    pub has_modifications: bool,
}

/// Response for a bulk edit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEditResponse {
    pub requested: usize,
    pub applied: usize,
    pub has_modifications: bool,
}

/// Edit one cell of one record.
pub async fn handle_edit(
    workspace: &SharedWorkspace,
    id: RecordId,
    request: EditRequest,
) -> Result<EditResponse> {
    let field: Field = request.field.parse()?;

    let mut ws = workspace.write().await;
    let applied = ws.store.edit(id, field, request.value);

    Ok(EditResponse {
        applied,
        record: ws.store.get(id).cloned(),
        has_modifications: ws.store.has_modifications(),
    })
}

/// Apply a batch of edits under one lock acquisition.
///
/// Every field name is checked before anything is applied.
pub async fn handle_bulk_edit(
    workspace: &SharedWorkspace,
    entries: Vec<BulkEditEntry>,
) -> Result<BulkEditResponse> {
    let updates = entries
        .into_iter()
        .map(|entry| -> Result<BulkUpdate> {
            let mut update = BulkUpdate::new(entry.id);
            for (name, value) in entry.changes {
                update.changes.insert(name.parse()?, value);
            }
            Ok(update)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut ws = workspace.write().await;
    let applied = ws.store.bulk_edit(&updates);
    tracing::debug!(requested = updates.len(), applied, "Bulk edit");

    Ok(BulkEditResponse {
        requested: updates.len(),
        applied,
        has_modifications: ws.store.has_modifications(),
    })
}
