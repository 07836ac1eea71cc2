//! # room-inspector
//!
//! Terminal browser for the tables of an Android Room (or any SQLite)
//! database: list tables, page through rows, edit or delete a single row,
//! clear or drop a table and run free-form statements.
//!
//! The crate glues [`room_inspector_sqlite::Inspector`] to a screen flow
//! ([`session`]) and a tabular display ([`view`]).
//!
//! ```rust,no_run
//! use room_inspector::session::{explore, Reply};
//! use room_inspector_sqlite::InspectorOptions;
//!
//! # async fn run() -> room_inspector::session::Result<()> {
//! let mut session = explore("sqlite:app.db", "AppDatabase", &InspectorOptions::default()).await?;
//! if let Reply::Output(text) = session.handle_line("open notes").await? {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod session;
pub mod view;

pub use config::{DatabaseArgs, OutputFormat, QuotingMode};
pub use session::{explore, Command, Reply, Screen, Session, SessionError};
pub use view::TableView;
