//! View handlers - the current filter, sort and page selection.

use crate::error::{AppError, Result};
use crate::state::Workspace;
use serde::{Deserialize, Serialize};
use shelf_engine::{Field, SortOrder, View};

/// Partial update of the view parameters.
///
/// `sortField` distinguishes "absent" (unchanged) from `null` (clear the sort).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewUpdate {
    pub search: Option<String>,
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub sort_field: Option<Option<String>>,
    pub sort_order: Option<String>,
    pub page: Option<usize>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// A rendered view plus the derived display text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse<'a> {
    #[serde(flatten)]
    pub view: View<'a>,
    /// 1-based inclusive range of visible records, when any
    pub showing: Option<(usize, usize)>,
}

/// Render the view for the current collection.
pub fn render(ws: &Workspace, page_size: usize) -> ViewResponse<'_> {
    let view = ws.view.render(ws.store.records(), page_size);
    let showing = view.page.showing();
    ViewResponse { view, showing }
}

/// Apply `update` in place. Parsed before mutating so a bad value changes nothing.
pub fn apply_update(ws: &mut Workspace, update: ViewUpdate) -> Result<()> {
    let sort_field = match update.sort_field {
        Some(Some(name)) if !name.is_empty() => Some(Some(name.parse::<Field>()?)),
        Some(_) => Some(None),
        None => None,
    };
    let sort_order = update
        .sort_order
        .map(|raw| raw.parse::<SortOrder>())
        .transpose()?;
    if update.page == Some(0) {
        return Err(AppError::BadRequest("page must be at least 1".to_string()));
    }

    let view = &mut ws.view;
    if let Some(search) = update.search {
        view.set_search(search);
    }
    if let Some(genre) = update.genre {
        view.set_genre(genre);
    }
    if let Some(field) = sort_field {
        view.set_sort_field(field);
    }
    if let Some(order) = sort_order {
        view.set_sort_order(order);
    }
    // Applied last so an explicit page survives the reset the other setters do
    if let Some(page) = update.page {
        view.set_page(page);
    }

    tracing::debug!(?view, "View updated");
    Ok(())
}

pub fn clear(ws: &mut Workspace) {
    ws.view.clear();
}
