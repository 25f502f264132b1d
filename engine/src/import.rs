//! Import/export adapter between CSV rows and book records.
//!
//! Import happens in two steps. [`parse_csv`] reads the file into
//! [`RawRow`]s, keeping track of which fields were actually present.
//! [`import_rows`] then validates those rows and turns them into records
//! with sequential ids. Export drops the bookkeeping fields and writes the
//! five columns in canonical order.

use crate::{error::Result, record::parse_year, Book, Error, Field, RecordId, Year};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Default file name offered for downloads.
pub const DEFAULT_EXPORT_FILENAME: &str = "edited_books.csv";

/// One data row of an imported file, before normalization.
///
/// A field is `None` when the row had no cell for it (a short row), and
/// `Some("")` when the cell was present but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub published_year: Option<String>,
    pub isbn: Option<String>,
}

impl RawRow {
    /// Builder used by tests and callers that already hold cell values.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        *self.slot(field) = Some(value.into());
        self
    }

    /// Build a row with all five cells present.
    pub fn complete(title: &str, author: &str, genre: &str, year: &str, isbn: &str) -> Self {
        RawRow::default()
            .with(Field::Title, title)
            .with(Field::Author, author)
            .with(Field::Genre, genre)
            .with(Field::PublishedYear, year)
            .with(Field::Isbn, isbn)
    }

    /// The raw cell for `field`, if the row had one.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::Author => self.author.as_deref(),
            Field::Genre => self.genre.as_deref(),
            Field::PublishedYear => self.published_year.as_deref(),
            Field::Isbn => self.isbn.as_deref(),
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Genre => &mut self.genre,
            Field::PublishedYear => &mut self.published_year,
            Field::Isbn => &mut self.isbn,
        }
    }

    /// Normalize into a record: trim text, coerce the year (0 on failure).
    pub fn into_book(self, id: RecordId) -> Book {
        let year = self
            .published_year
            .as_deref()
            .and_then(parse_year)
            .unwrap_or(0);
        Book::new(
            id,
            self.title.as_deref().unwrap_or_default(),
            self.author.as_deref().unwrap_or_default(),
            self.genre.as_deref().unwrap_or_default(),
            year,
            self.isbn.as_deref().unwrap_or_default(),
        )
    }
}

/// A record as written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
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
}

impl From<&Book> for ExportRow {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            published_year: book.published_year,
            isbn: book.isbn.clone(),
        }
    }
}

/// Read CSV text into raw rows.
///
/// The header must name all five columns exactly; other columns are
/// ignored. Blank lines are skipped and short rows are kept with their
/// missing cells set to `None`.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut columns = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        let position = headers
            .iter()
            .position(|h| h == field.column())
            .ok_or_else(|| Error::MissingColumn(field.column().to_string()))?;
        columns.push((field, position));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = RawRow::default();
        for &(field, position) in &columns {
            *row.slot(field) = record.get(position).map(str::to_string);
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Check that there is at least one row and every row has all five cells.
pub fn validate_rows(rows: &[RawRow]) -> Result<()> {
    if rows.is_empty() {
        return Err(Error::EmptyDataset);
    }

    for (pos, row) in rows.iter().enumerate() {
        if let Some(field) = Field::ALL.into_iter().find(|f| row.get(*f).is_none()) {
            return Err(Error::MissingRequiredField {
                row: pos + 1,
                field,
            });
        }
    }

    Ok(())
}

/// Validate raw rows and convert them to records with ids `1..=n`.
pub fn import_rows(rows: Vec<RawRow>) -> Result<Vec<Book>> {
    validate_rows(&rows)?;

    Ok(rows
        .into_iter()
        .zip(1..)
        .map(|(row, id)| row.into_book(id))
        .collect())
}

/// Parse and import in one step.
pub fn import_csv<R: Read>(reader: R) -> Result<Vec<Book>> {
    import_rows(parse_csv(reader)?)
}

/// Strip the bookkeeping fields from every record.
pub fn export_rows(records: &[Book]) -> Vec<ExportRow> {
    records.iter().map(ExportRow::from).collect()
}

/// Write rows as CSV: header first (always), CRLF line endings, fields
/// quoted only when needed.
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(Field::ALL.iter().map(|f| f.column()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| Error::Io(e.to_string()))?;

    Ok(())
}

/// Render rows as a CSV string.
pub fn to_csv_string(rows: &[ExportRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::Io(e.to_string()))
}
