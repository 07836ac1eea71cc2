//! Command-line configuration shared by every subcommand.

use clap::{Args, ValueEnum};
use room_inspector_core::Quoting;
use room_inspector_sqlite::InspectorOptions;

/// How tables are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Padded text grid.
    #[default]
    Text,
    /// HTML `<table>`.
    Html,
    /// JSON object with `columns` and `rows`.
    Json,
}

/// Literal quoting policy, as chosen on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum QuotingMode {
    /// Double embedded single quotes.
    #[default]
    Escaped,
    /// Leave values untouched.
    Verbatim,
}

impl From<QuotingMode> for Quoting {
    fn from(mode: QuotingMode) -> Self {
        match mode {
            QuotingMode::Escaped => Self::Escaped,
            QuotingMode::Verbatim => Self::Verbatim,
        }
    }
}

/// Which database to open, and how.
#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:app.db")]
    pub database: String,

    /// Display name of the database.
    #[arg(short, long, env = "ROOM_INSPECTOR_NAME")]
    pub name: Option<String>,

    /// Maximum pooled connections.
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    /// Create the database file if it does not exist.
    #[arg(long)]
    pub create: bool,

    /// Quoting applied to values in generated statements.
    #[arg(long, value_enum, default_value_t = QuotingMode::Escaped)]
    pub quoting: QuotingMode,
}

impl DatabaseArgs {
    /// Options for [`room_inspector_sqlite::Inspector::connect`].
    #[must_use]
    pub fn options(&self) -> InspectorOptions {
        InspectorOptions::new()
            .max_connections(self.max_connections)
            .create_if_missing(self.create)
            .quoting(self.quoting.into())
    }

    /// The display name, falling back to the database URL.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.database)
    }
}
