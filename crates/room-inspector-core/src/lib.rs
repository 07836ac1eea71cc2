//! # room-inspector-core
//!
//! SQL statement builder behind the room-inspector tools.
//!
//! Every function in this crate is pure: it takes table, column and value
//! names and returns SQL text. Nothing is executed, cached or validated
//! against a schema. Execution lives in `room-inspector-sqlite`.
//!
//! ```rust
//! use room_inspector_core::{Assignment, ColumnValue, statement};
//!
//! assert_eq!(
//!     statement::insert_row("users", &["1", "Alice"]),
//!     "INSERT INTO users VALUES('1','Alice')"
//! );
//!
//! let sql = statement::update_row(
//!     "users",
//!     &[Assignment::new("name", "Alice", "Alicia")],
//! );
//! assert_eq!(sql, "UPDATE users SET name = 'Alicia' WHERE name = 'Alice'");
//!
//! let sql = statement::delete_row("users", &[ColumnValue::new("id", "1")]);
//! assert_eq!(sql, "DELETE FROM users WHERE id = '1'");
//! ```
//!
//! ## Known limitations
//!
//! - Table and column names are interpolated verbatim. They are expected to
//!   come from the database's own catalog, never from free-form input.
//! - Rows are targeted by their full value tuple, not by a key. When a table
//!   holds duplicate rows, an update or delete hits every one of them.
//! - With [`Quoting::Verbatim`] a value containing `'` produces broken or
//!   altered SQL. The default, [`Quoting::Escaped`], doubles the quote.

pub mod literal;
pub mod pairs;
pub mod statement;

pub use literal::Quoting;
pub use pairs::{zip_assignments, zip_columns, ArityMismatch, Assignment, ColumnValue};
pub use statement::{StatementBuilder, LIST_TABLES};
