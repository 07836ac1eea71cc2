//! Query results as typed cells.

use std::fmt;

use room_inspector_core::ColumnValue;
use serde::{Serialize, Serializer};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// Text shown for a NULL cell.
pub const NULL_TEXT: &str = "NULL";

/// One decoded value.
///
/// INTEGER and REAL values are kept in their decimal text form, which
/// SQLite converts back through column affinity when compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// SQL NULL.
    Null,
    /// INTEGER, REAL or TEXT value.
    Text(String),
    /// BLOB value.
    Blob(Vec<u8>),
}

impl Cell {
    /// The text of a [`Cell::Text`] value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Null | Self::Blob(_) => None,
        }
    }

    /// Returns true for SQL NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str(NULL_TEXT),
            Self::Text(text) => f.write_str(text),
            Self::Blob(bytes) => f.write_str(&blob_literal(bytes)),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Blob(bytes) => serializer.serialize_str(&blob_literal(bytes)),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Pairs each column with its cell, leaving out NULL and BLOB cells.
///
/// An equality filter on the result selects the row the cells came from
/// (and any duplicates): NULL never compares equal and blobs have no text
/// literal form.
pub fn row_filter<'a, C: AsRef<str>>(columns: &'a [C], cells: &'a [Cell]) -> Vec<ColumnValue<'a>> {
    columns
        .iter()
        .zip(cells)
        .filter_map(|(column, cell)| {
            cell.as_text()
                .map(|text| ColumnValue::new(column.as_ref(), text))
        })
        .collect()
}

/// Column names plus rows of decoded cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    /// Column names, in result order.
    pub columns: Vec<String>,
    /// Rows, each aligned with `columns`.
    pub rows: Vec<Vec<Cell>>,
}

impl ResultSet {
    /// Creates a result set.
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`, if any.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Builds a result set from driver rows. Column names are taken from
    /// the first row, so an empty result has no columns.
    pub(crate) fn from_rows(rows: &[SqliteRow]) -> sqlx::Result<Self> {
        let columns: Vec<String> = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        let rows = rows
            .iter()
            .map(render_row)
            .collect::<sqlx::Result<Vec<_>>>()?;
        Ok(Self { columns, rows })
    }
}

/// Outcome of a free-form statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The statement returned rows.
    Rows(ResultSet),
    /// The statement changed the database.
    Affected {
        /// Number of rows changed.
        rows: u64,
    },
}

/// Decodes every cell of `row`.
pub(crate) fn render_row(row: &SqliteRow) -> sqlx::Result<Vec<Cell>> {
    (0..row.len()).map(|i| render_cell(row, i)).collect()
}

/// Decodes one cell according to its storage class.
fn render_cell(row: &SqliteRow, index: usize) -> sqlx::Result<Cell> {
    let storage = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Cell::Null);
        }
        raw.type_info().name().to_string()
    };

    let cell = match storage.as_str() {
        "INTEGER" => Cell::Text(row.try_get_unchecked::<i64, _>(index)?.to_string()),
        "REAL" => Cell::Text(row.try_get_unchecked::<f64, _>(index)?.to_string()),
        "BLOB" => Cell::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        _ => Cell::Text(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(cell)
}

/// `x'..'` hex form of a blob.
fn blob_literal(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|byte| format!("{byte:02X}")).collect();
    format!("x'{hex}'")
}
