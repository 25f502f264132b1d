//! # Shelf Engine
//!
//! The in-memory core of a spreadsheet-like editor for book records.
//!
//! This crate holds a collection of books imported from CSV (or generated),
//! lets callers edit it cell by cell, derives filtered, sorted and paginated
//! views from it, remembers which records changed since the import, and
//! writes the edited collection back to CSV.
//!
//! ## Design Principles
//!
//! - **No IO of its own**: callers hand in readers and writers
//! - **Stable identity**: record ids are assigned once at load and never change
//! - **Pure queries**: views are computed from a collection and never alter it
//! - **Atomic mutations**: every store operation is fully applied or not at all
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Book`] has a sequential id, five editable [`Field`]s and a
//! `modified` flag that the first edit sets.
//!
//! ### Store
//!
//! The [`RecordStore`] keeps the live collection next to the pristine
//! snapshot taken at load time. [`RecordStore::reset`] throws away every
//! edit; [`RecordStore::diff`] lists them.
//!
//! ### Queries
//!
//! The [`query`] module filters, sorts and paginates. [`ViewState`] holds
//! the parameters a user picked and composes them in the fixed order
//! filter → sort → paginate.
//!
//! ## Quick Start
//!
//! ```rust
//! use shelf_engine::{import, Field, RecordStore, ViewState};
//!
//! let csv = "Title,Author,Genre,PublishedYear,ISBN\n\
//!            A,X,Fiction,1999,111\n\
//!            B,Y,Fiction,2001,222\n";
//!
//! // 1. Import
//! let books = import::import_csv(csv.as_bytes()).unwrap();
//!
//! // 2. Load
//! let mut store = RecordStore::new();
//! store.load(books).unwrap();
//!
//! // 3. Edit
//! store.edit(1, Field::Title, "Z");
//! assert!(store.has_modifications());
//!
//! // 4. View
//! let view = ViewState::new().render(store.records(), 50);
//! assert_eq!(view.page.items[0].title, "Z");
//!
//! // 5. Export
//! let out = import::to_csv_string(&store.export()).unwrap();
//! assert!(out.starts_with("Title,Author,Genre,PublishedYear,ISBN"));
//! ```

pub mod error;
pub mod generate;
pub mod import;
pub mod query;
pub mod record;
pub mod store;
pub mod view;

// Re-export main types at crate root
pub use error::{Error, ErrorKind};
pub use import::{ExportRow, RawRow};
pub use query::{Page, PageLink, SortOrder, Statistics};
pub use record::{Book, Field, FieldValue};
pub use store::{BulkUpdate, FieldChange, RecordDiff, RecordStore};
pub use view::{View, ViewState};

/// Type aliases for clarity
pub type RecordId = u64;
pub type Year = i32;
