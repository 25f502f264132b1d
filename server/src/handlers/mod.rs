//! Request handlers for dataset, view and record operations.

mod dataset;
mod records;
pub mod view;

pub use dataset::*;
pub use records::*;
pub use view::ViewUpdate;
