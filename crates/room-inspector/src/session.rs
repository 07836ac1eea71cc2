//! Interactive screen flow: tables → rows → row, plus a query screen.
//!
//! A [`Session`] keeps a stack of [`Screen`]s. Commands act on the screen at
//! the top; `back` pops it. The tables screen is the root and never pops.

use std::fmt;
use std::str::FromStr;

use room_inspector_sqlite::{InspectError, Inspector, InspectorOptions, QueryOutcome};
use thiserror::Error;
use tracing::debug;

use crate::config::OutputFormat;
use crate::view::TableView;

/// Help text listing the session commands.
pub const HELP: &str = "\
Commands:
  tables                     list tables
  open <table>               show the rows of a table
  schema                     show the columns of the open table
  row <n>                    select row n of the open table
  set <column>=<value> ...   change fields of the selected row
  insert <value> ...         insert a row into the open table
  delete                     delete the selected row
  clear                      delete every row of the open table
  drop                       drop the open table
  query <sql>                run a statement
  back                       return to the previous screen
  help                       show this text
  quit                       leave the session
Values containing spaces can be wrapped in double quotes.";

static ROOT: Screen = Screen::Tables;

/// Errors raised while handling a command.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The inspector failed.
    #[error(transparent)]
    Inspect(#[from] InspectError),

    /// The command word is not known.
    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    /// The command's arguments are malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The command needs an open table.
    #[error("No table is open (use `open <table>`)")]
    NoTableSelected,

    /// The command needs a selected row.
    #[error("No row is selected (use `row <n>`)")]
    NoRowSelected,

    /// Rendering the output failed.
    #[error("Rendering error: {0}")]
    Render(#[from] serde_json::Error),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// One screen of the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Every table of the database.
    Tables,
    /// The rows of one table.
    Rows {
        /// Table name.
        table: String,
    },
    /// A single row, ready for editing.
    Row {
        /// Table name.
        table: String,
        /// Positional index of the row.
        index: usize,
    },
    /// Free-form statements.
    Query,
}

impl Screen {
    /// The table this screen is about, if any.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::Rows { table } | Self::Row { table, .. } => Some(table),
            Self::Tables | Self::Query => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tables => f.write_str("tables"),
            Self::Rows { table } => write!(f, "{table}"),
            Self::Row { table, index } => write!(f, "{table}[{index}]"),
            Self::Query => f.write_str("query"),
        }
    }
}

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Go to the tables screen.
    Tables,
    /// Open a table.
    Open(String),
    /// Show the schema of the open table.
    Schema,
    /// Select a row by index.
    Row(usize),
    /// Change fields of the selected row.
    Set(Vec<(String, String)>),
    /// Insert a row.
    Insert(Vec<String>),
    /// Delete the selected row.
    Delete,
    /// Clear the open table.
    Clear,
    /// Drop the open table.
    Drop,
    /// Run a statement.
    Query(String),
    /// Pop the current screen.
    Back,
    /// Show help.
    Help,
    /// End the session.
    Quit,
}

impl FromStr for Command {
    type Err = SessionError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "tables" | "ls" => Self::Tables,
            "open" | "cd" => Self::Open(single_argument(rest, "open <table>")?),
            "schema" => Self::Schema,
            "row" => {
                let index = single_argument(rest, "row <n>")?;
                let index = index
                    .parse()
                    .map_err(|_| SessionError::InvalidArgument(format!("not a row index: {index}")))?;
                Self::Row(index)
            }
            "set" => {
                let assignments = split_arguments(rest)?
                    .into_iter()
                    .map(|arg| {
                        arg.split_once('=')
                            .map(|(c, v)| (c.to_string(), v.to_string()))
                            .ok_or_else(|| {
                                SessionError::InvalidArgument(format!("expected column=value, got {arg}"))
                            })
                    })
                    .collect::<Result<Vec<_>>>()?;
                if assignments.is_empty() {
                    return Err(SessionError::InvalidArgument(String::from(
                        "usage: set <column>=<value> ...",
                    )));
                }
                Self::Set(assignments)
            }
            "insert" => Self::Insert(split_arguments(rest)?),
            "delete" | "rm" => Self::Delete,
            "clear" => Self::Clear,
            "drop" => Self::Drop,
            "query" | "sql" => {
                if rest.is_empty() {
                    return Err(SessionError::InvalidArgument(String::from("usage: query <sql>")));
                }
                Self::Query(rest.to_string())
            }
            "back" | ".." => Self::Back,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(SessionError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text.
    Output(String),
    /// End the session.
    Quit,
}

/// An open database walked screen by screen.
#[derive(Debug)]
pub struct Session {
    inspector: Inspector,
    name: String,
    format: OutputFormat,
    stack: Vec<Screen>,
}

impl Session {
    /// Starts a session on the tables screen.
    pub fn new(inspector: Inspector, name: impl Into<String>) -> Self {
        Self {
            inspector,
            name: name.into(),
            format: OutputFormat::Text,
            stack: vec![Screen::Tables],
        }
    }

    /// Sets the output format of rendered tables.
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Display name of the database.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The inspector behind the session.
    #[must_use]
    pub const fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    /// The screen at the top of the stack.
    #[must_use]
    pub fn screen(&self) -> &Screen {
        self.stack.last().unwrap_or(&ROOT)
    }

    /// Prompt showing the database and the current screen.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{}:{}> ", self.name, self.screen())
    }

    /// Parses and handles one input line. Blank lines produce no output.
    pub async fn handle_line(&mut self, line: &str) -> Result<Reply> {
        if line.trim().is_empty() {
            return Ok(Reply::Output(String::new()));
        }
        let command = line.parse()?;
        self.handle(command).await
    }

    /// Handles one command.
    pub async fn handle(&mut self, command: Command) -> Result<Reply> {
        debug!(screen = %self.screen(), command = ?command, "Handling command");
        let output = match command {
            Command::Tables => {
                self.stack.truncate(1);
                self.render_screen().await?
            }
            Command::Open(table) => {
                self.inspector.columns(&table).await?;
                self.push(Screen::Rows { table });
                self.render_screen().await?
            }
            Command::Schema => {
                let table = self.current_table()?;
                let columns = self.inspector.columns(&table).await?;
                TableView::schema(&columns).render(self.format)?
            }
            Command::Row(index) => {
                let table = self.current_table()?;
                self.inspector.row(&table, index).await?;
                if matches!(self.screen(), Screen::Row { .. }) {
                    self.stack.pop();
                }
                self.push(Screen::Row { table, index });
                self.render_screen().await?
            }
            Command::Set(assignments) => self.set(&assignments).await?,
            Command::Insert(values) => {
                let table = self.current_table()?;
                let affected = self.inspector.insert_row(&table, &values).await?;
                format!("Inserted {affected} row(s) into {table}")
            }
            Command::Delete => {
                let (table, index) = self.current_row()?;
                let affected = self.inspector.delete_at(&table, index).await?;
                self.stack.pop();
                format!("Deleted {affected} row(s) from {table}")
            }
            Command::Clear => {
                let table = self.current_table()?;
                let affected = self.inspector.clear_table(&table).await?;
                while matches!(self.screen(), Screen::Row { .. }) {
                    self.stack.pop();
                }
                format!("Deleted {affected} row(s) from {table}")
            }
            Command::Drop => {
                let table = self.current_table()?;
                self.inspector.drop_table(&table).await?;
                self.stack
                    .retain(|screen| screen.table() != Some(table.as_str()));
                format!("Dropped table {table}")
            }
            Command::Query(sql) => {
                if self.screen() != &Screen::Query {
                    self.push(Screen::Query);
                }
                match self.inspector.run_query(&sql).await? {
                    QueryOutcome::Rows(set) => TableView::from(set).render(self.format)?,
                    QueryOutcome::Affected { rows } => format!("{rows} row(s) affected"),
                }
            }
            Command::Back => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
                self.render_screen().await?
            }
            Command::Help => String::from(HELP),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Output(output))
    }

    /// Renders the current screen.
    pub async fn render_screen(&self) -> Result<String> {
        let view = match self.screen() {
            Screen::Tables => TableView::list("table", &self.inspector.tables().await?),
            Screen::Rows { table } => TableView::from(self.inspector.rows(table).await?),
            Screen::Row { table, index } => {
                let columns = self.column_names(table).await?;
                let values = self.inspector.row(table, *index).await?;
                TableView::record(&columns, &values)
            }
            Screen::Query => return Ok(String::from("Enter a statement with `query <sql>`")),
        };
        Ok(view.render(self.format)?)
    }

    async fn set(&self, assignments: &[(String, String)]) -> Result<String> {
        let (table, index) = self.current_row()?;
        let affected = self.inspector.update_at(&table, index, assignments).await?;
        Ok(format!("Updated {affected} row(s) in {table}"))
    }

    async fn column_names(&self, table: &str) -> Result<Vec<String>> {
        let columns = self.inspector.columns(table).await?;
        Ok(room_inspector_sqlite::column_names(&columns))
    }

    fn push(&mut self, screen: Screen) {
        self.stack.push(screen);
    }

    fn current_table(&self) -> Result<String> {
        self.screen()
            .table()
            .map(ToString::to_string)
            .ok_or(SessionError::NoTableSelected)
    }

    fn current_row(&self) -> Result<(String, usize)> {
        match self.screen() {
            Screen::Row { table, index } => Ok((table.clone(), *index)),
            _ => Err(SessionError::NoRowSelected),
        }
    }
}

/// Opens `url` and starts a session named `name` on the tables screen.
pub async fn explore(url: &str, name: &str, options: &InspectorOptions) -> Result<Session> {
    let inspector = Inspector::connect(url, options).await?;
    Ok(Session::new(inspector, name))
}

fn single_argument(rest: &str, usage: &str) -> Result<String> {
    let mut args = split_arguments(rest)?;
    if args.len() != 1 {
        return Err(SessionError::InvalidArgument(format!("usage: {usage}")));
    }
    Ok(args.remove(0))
}

/// Splits on whitespace, keeping double-quoted runs together.
fn split_arguments(input: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut started = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                started = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    args.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if in_quotes {
        return Err(SessionError::InvalidArgument(String::from("unterminated quote")));
    }
    if started {
        args.push(current);
    }
    Ok(args)
}
