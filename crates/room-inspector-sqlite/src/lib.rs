//! # room-inspector-sqlite
//!
//! Runs the statements of `room-inspector-core` against a live SQLite
//! database through `sqlx`, and decodes what comes back as text.
//!
//! ```rust,no_run
//! use room_inspector_sqlite::{Inspector, InspectorOptions};
//!
//! # async fn example() -> room_inspector_sqlite::Result<()> {
//! let inspector = Inspector::connect("sqlite:app.db", &InspectorOptions::default()).await?;
//!
//! for table in inspector.tables().await? {
//!     let rows = inspector.rows(&table).await?;
//!     println!("{table}: {} rows", rows.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Rows are edited by value: [`Inspector::update_row`] and
//! [`Inspector::delete_row`] match every given column.
//! [`Inspector::update_at`] and [`Inspector::delete_at`] match a listed row
//! on its non-NULL, non-BLOB cells. Duplicate rows are all affected.

pub mod error;
pub mod inspector;
pub mod options;
pub mod result;
pub mod schema;

pub use error::{InspectError, Result};
pub use inspector::Inspector;
pub use options::InspectorOptions;
pub use result::{row_filter, Cell, QueryOutcome, ResultSet, NULL_TEXT};
pub use schema::{column_names, ColumnInfo};
