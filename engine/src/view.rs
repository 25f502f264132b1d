//! View state: the search, filter, sort and page a user is looking at.
//!
//! The displayed view is always
//! `paginate(sort(filter(records, search, genre), field, order), page, size)`.
//! Changing what is shown (search, genre, sort field) moves back to page 1;
//! changing only the direction or the page does not.

use crate::{
    query::{self, Page, PageLink, SortOrder, DEFAULT_PAGE_DELTA},
    Book, Field,
};
use serde::{Deserialize, Serialize};

/// Current view parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    search: String,
    genre: String,
    sort_field: Option<Field>,
    sort_order: SortOrder,
    page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            genre: String::new(),
            sort_field: None,
            sort_order: SortOrder::Asc,
            page: 1,
        }
    }
}

impl ViewState {
    /// The initial view: everything, unsorted, first page.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn sort_field(&self) -> Option<Field> {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Set the free-text search and return to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Set the genre filter and return to page 1.
    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.genre = genre.into();
        self.page = 1;
    }

    /// Set the sort column and return to page 1.
    pub fn set_sort_field(&mut self, field: Option<Field>) {
        self.sort_field = field;
        self.page = 1;
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    /// Jump to `page`. Pages past the end render empty.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Drop all filters and sorting.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Compute the visible page of `records`.
    pub fn render<'a>(&self, records: &'a [Book], page_size: usize) -> View<'a> {
        let filtered = query::filter(records, &self.search, &self.genre);
        let sorted = query::sort(&filtered, self.sort_field, self.sort_order);
        let page = query::paginate(&sorted, self.page, page_size);
        let links = query::page_links(self.page, page.total_pages, DEFAULT_PAGE_DELTA);

        View {
            state: self.clone(),
            page,
            links,
            genres: query::unique_values(records, Field::Genre),
        }
    }
}

/// A rendered view, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View<'a> {
    /// Parameters the view was rendered with
    pub state: ViewState,
    /// Visible records; `total_items` is the filtered count
    pub page: Page<&'a Book>,
    /// Numbered page buttons
    pub links: Vec<PageLink>,
    /// Genre choices for the filter, across all records
    pub genres: Vec<String>,
}
