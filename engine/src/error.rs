//! Error types for the Shelf engine.
//!
//! Edits addressed to an id that is not in the collection are not errors:
//! the store ignores them, because a view may still show a row that a newer
//! load has replaced. There is therefore no "record not found" variant.

use crate::{Field, RecordId};
use thiserror::Error;

/// Broad category of an [`Error`], used by callers to pick a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was well-formed but structurally incomplete.
    Validation,
    /// The input could not be interpreted.
    Parse,
    /// Reading or writing the underlying stream failed.
    Io,
}

/// All possible errors from the Shelf engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Validation errors
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("row {row} is missing required field: {field}")]
    MissingRequiredField { row: usize, field: Field },

    #[error("duplicate record id: {0}")]
    DuplicateId(RecordId),

    // Parse errors
    #[error("malformed csv: {0}")]
    Parse(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("invalid sort order: {0} (expected 'asc' or 'desc')")]
    InvalidSortOrder(String),

    // Stream errors
    #[error("i/o error: {0}")]
    Io(String),
}

impl Error {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyDataset
            | Error::MissingColumn(_)
            | Error::MissingRequiredField { .. }
            | Error::DuplicateId(_) => ErrorKind::Validation,
            Error::Parse(_) | Error::UnknownField(_) | Error::InvalidSortOrder(_) => {
                ErrorKind::Parse
            }
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Error::Io(err.to_string())
        } else {
            Error::Parse(err.to_string())
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
