//! Record types: the book entity and its editable fields.

use crate::{error::Result, Error, RecordId, Year};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// One of the five editable columns of a book record.
///
/// The serialized form is the exact CSV column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Title,
    Author,
    Genre,
    PublishedYear,
    #[serde(rename = "ISBN")]
    Isbn,
}

impl Field {
    /// All fields in canonical column order.
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Author,
        Field::Genre,
        Field::PublishedYear,
        Field::Isbn,
    ];

    /// The exact column name used in CSV headers and JSON.
    pub fn column(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Genre => "Genre",
            Field::PublishedYear => "PublishedYear",
            Field::Isbn => "ISBN",
        }
    }

    /// Whether values of this field are integers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Field::PublishedYear)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// A value submitted for a field by an edit.
///
/// Editors may send either text or a number; how it is stored depends on
/// the target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    /// The value as text, as a text field would store it.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Int(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(s) => Cow::Borrowed(s.trim()),
        }
    }

    /// The value as a year, or `None` if it does not parse.
    pub fn to_year(&self) -> Option<Year> {
        match self {
            FieldValue::Int(n) => Year::try_from(*n).ok(),
            FieldValue::Text(s) => parse_year(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

/// Parse the leading integer of `input`.
///
/// Leading whitespace and one sign character are accepted, then as many
/// ASCII digits as follow; trailing text is ignored (`"1999 (reprint)"` is
/// 1999). Returns `None` when no digit is found or the value does not fit.
pub fn parse_year(input: &str) -> Option<Year> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    Year::try_from(value).ok()
}

/// A book record in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Load-time sequence number
    pub id: RecordId,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "PublishedYear")]
    pub published_year: Year,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    /// Edited since load
    pub modified: bool,
}

impl Book {
    /// Create an unmodified record. Text fields are trimmed.
    pub fn new(
        id: RecordId,
        title: &str,
        author: &str,
        genre: &str,
        published_year: Year,
        isbn: &str,
    ) -> Self {
        Self {
            id,
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            genre: genre.trim().to_string(),
            published_year,
            isbn: isbn.trim().to_string(),
            modified: false,
        }
    }

    /// The text form of a field, as search and text sorting see it.
    pub fn text(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::Title => Cow::Borrowed(&self.title),
            Field::Author => Cow::Borrowed(&self.author),
            Field::Genre => Cow::Borrowed(&self.genre),
            Field::PublishedYear => Cow::Owned(self.published_year.to_string()),
            Field::Isbn => Cow::Borrowed(&self.isbn),
        }
    }

    /// Write `value` into `field` and mark the record modified.
    ///
    /// A year that does not parse leaves the stored year untouched; the
    /// record is still marked modified.
    pub fn apply(&mut self, field: Field, value: &FieldValue) {
        match field {
            Field::PublishedYear => {
                if let Some(year) = value.to_year() {
                    self.published_year = year;
                }
            }
            Field::Title => self.title = value.to_text().into_owned(),
            Field::Author => self.author = value.to_text().into_owned(),
            Field::Genre => self.genre = value.to_text().into_owned(),
            Field::Isbn => self.isbn = value.to_text().into_owned(),
        }
        self.modified = true;
    }
}
