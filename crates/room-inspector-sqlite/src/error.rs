//! Error types for the inspector.

use room_inspector_core::ArityMismatch;

/// Errors that can occur while inspecting a database.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// Error raised by the database driver, passed through untouched.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Columns and values could not be paired.
    #[error("Column/value mismatch: {0}")]
    ArityMismatch(#[from] ArityMismatch),

    /// A row was targeted with no column values to match on.
    #[error("Cannot target a row without any column values")]
    EmptyRow,

    /// The table has no columns, i.e. it does not exist.
    #[error("Table not found: {0}")]
    UnknownTable(String),

    /// A column the table does not have.
    #[error("Table {table} has no column {column}")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// Nothing matched the row that was read.
    #[error("Row {index} of {table} could not be matched; nothing changed")]
    NoRowAffected {
        /// Table name.
        table: String,
        /// Positional index of the row.
        index: usize,
    },

    /// A row index past the end of the table.
    #[error("Row {index} out of range for a table of {len} rows")]
    RowOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of rows.
        len: usize,
    },
}

/// Result type for inspector operations.
pub type Result<T> = std::result::Result<T, InspectError>;
