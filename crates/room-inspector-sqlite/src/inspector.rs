//! Statement execution against a live database.
//!
//! [`Inspector`] builds every statement with a
//! [`StatementBuilder`](room_inspector_core::StatementBuilder) and hands the
//! text to the pool. Driver failures come back unchanged as
//! [`InspectError::Database`]; nothing is retried.

use std::str::FromStr;

use room_inspector_core::{zip_assignments, zip_columns, ColumnValue, StatementBuilder};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{InspectError, Result};
use crate::options::InspectorOptions;
use crate::result::{render_row, row_filter, Cell, QueryOutcome, ResultSet};
use crate::schema::{column_names, ColumnInfo, TableInfoRow};

/// Leading keywords of statements that return rows.
const ROW_RETURNING: &[&str] = &["SELECT", "PRAGMA", "WITH", "VALUES", "EXPLAIN"];
/// Leading keywords of statements that return rows only with `RETURNING`.
const DATA_CHANGING: &[&str] = &["INSERT", "UPDATE", "DELETE", "REPLACE"];

/// Browses and edits the tables of one SQLite database.
#[derive(Debug, Clone)]
pub struct Inspector {
    pool: SqlitePool,
    statements: StatementBuilder,
}

impl Inspector {
    /// Wraps an existing pool.
    pub fn new(pool: SqlitePool, statements: StatementBuilder) -> Self {
        Self { pool, statements }
    }

    /// Opens a pool on `url` (e.g. `sqlite:app.db`, `sqlite::memory:`).
    pub async fn connect(url: &str, options: &InspectorOptions) -> Result<Self> {
        let connect =
            SqliteConnectOptions::from_str(url)?.create_if_missing(options.create_if_missing);
        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .connect_with(connect)
            .await?;
        debug!(url = %url, "Connected to database");
        Ok(Self::new(pool, StatementBuilder::new(options.quoting)))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the statement builder.
    #[must_use]
    pub const fn statements(&self) -> &StatementBuilder {
        &self.statements
    }

    /// Names of all user tables.
    pub async fn tables(&self) -> Result<Vec<String>> {
        let sql = self.statements.list_tables();
        debug!(sql = %sql, "Listing tables");
        let rows: Vec<(String,)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Column metadata of `table`.
    pub async fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let sql = self.statements.list_columns(table);
        debug!(sql = %sql, "Listing columns");
        let rows: Vec<TableInfoRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        if rows.is_empty() {
            return Err(InspectError::UnknownTable(table.to_string()));
        }
        Ok(rows.into_iter().map(ColumnInfo::from).collect())
    }

    /// Every row of `table`, with the schema's column names.
    pub async fn rows(&self, table: &str) -> Result<ResultSet> {
        let columns = column_names(&self.columns(table).await?);
        let sql = self.statements.list_rows(table);
        debug!(sql = %sql, "Listing rows");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(render_row)
            .collect::<sqlx::Result<Vec<_>>>()?;
        Ok(ResultSet::new(columns, rows))
    }

    /// The row at `index` of `table`, as listed by [`Self::rows`].
    pub async fn row(&self, table: &str, index: usize) -> Result<Vec<Cell>> {
        let mut set = self.rows(table).await?;
        let len = set.len();
        if index >= len {
            return Err(InspectError::RowOutOfRange { index, len });
        }
        Ok(set.rows.swap_remove(index))
    }

    /// Drops `table` with its data and schema.
    pub async fn drop_table(&self, table: &str) -> Result<u64> {
        let affected = self.execute(&self.statements.drop_table(table)).await?;
        info!(table = %table, "Dropped table");
        Ok(affected)
    }

    /// Deletes every row of `table`.
    pub async fn clear_table(&self, table: &str) -> Result<u64> {
        let affected = self.execute(&self.statements.clear_table(table)).await?;
        info!(table = %table, rows = affected, "Cleared table");
        Ok(affected)
    }

    /// Inserts one row, values in table column order.
    pub async fn insert_row<V: AsRef<str>>(&self, table: &str, values: &[V]) -> Result<u64> {
        self.execute(&self.statements.insert_row(table, values)).await
    }

    /// Replaces `old` with `new` in every row whose `columns` hold `old`.
    ///
    /// Returns the number of rows changed; duplicates of the row all change.
    pub async fn update_row<C, V>(
        &self,
        table: &str,
        columns: &[C],
        old: &[V],
        new: &[V],
    ) -> Result<u64>
    where
        C: AsRef<str>,
        V: AsRef<str>,
    {
        let assignments = zip_assignments(columns, old, new)?;
        if assignments.is_empty() {
            return Err(InspectError::EmptyRow);
        }
        let sql = self.statements.update_row(table, &assignments);
        self.execute(&sql).await
    }

    /// Sets `changes` on every row matching `filter`.
    pub async fn update_where(
        &self,
        table: &str,
        changes: &[ColumnValue<'_>],
        filter: &[ColumnValue<'_>],
    ) -> Result<u64> {
        if changes.is_empty() || filter.is_empty() {
            return Err(InspectError::EmptyRow);
        }
        let sql = self.statements.update_where(table, changes, filter);
        self.execute(&sql).await
    }

    /// Sets `changes` (column, value) on the row at `index` of `table`.
    ///
    /// The row is matched on its cells as read, leaving out NULL and BLOB
    /// cells, so duplicates of the row change too. Fails with
    /// [`InspectError::NoRowAffected`] when nothing matched.
    pub async fn update_at<C, V>(&self, table: &str, index: usize, changes: &[(C, V)]) -> Result<u64>
    where
        C: AsRef<str>,
        V: AsRef<str>,
    {
        let columns = column_names(&self.columns(table).await?);
        for (column, _) in changes {
            let column = column.as_ref();
            if !columns.iter().any(|c| c == column) {
                return Err(InspectError::UnknownColumn {
                    table: table.to_string(),
                    column: column.to_string(),
                });
            }
        }
        let cells = self.row(table, index).await?;
        let filter = row_filter(&columns, &cells);
        let changes: Vec<_> = changes
            .iter()
            .map(|(c, v)| ColumnValue::new(c.as_ref(), v.as_ref()))
            .collect();

        let affected = self.update_where(table, &changes, &filter).await?;
        if affected == 0 {
            return Err(InspectError::NoRowAffected {
                table: table.to_string(),
                index,
            });
        }
        Ok(affected)
    }

    /// Deletes the row at `index` of `table`, matched the same way as
    /// [`Self::update_at`].
    pub async fn delete_at(&self, table: &str, index: usize) -> Result<u64> {
        let columns = column_names(&self.columns(table).await?);
        let cells = self.row(table, index).await?;
        let filter = row_filter(&columns, &cells);
        if filter.is_empty() {
            return Err(InspectError::EmptyRow);
        }

        let affected = self
            .execute(&self.statements.delete_row(table, &filter))
            .await?;
        if affected == 0 {
            return Err(InspectError::NoRowAffected {
                table: table.to_string(),
                index,
            });
        }
        info!(table = %table, index, rows = affected, "Deleted row");
        Ok(affected)
    }

    /// Deletes every row whose `columns` hold `values`.
    pub async fn delete_row<C, V>(&self, table: &str, columns: &[C], values: &[V]) -> Result<u64>
    where
        C: AsRef<str>,
        V: AsRef<str>,
    {
        let matching = zip_columns(columns, values)?;
        if matching.is_empty() {
            return Err(InspectError::EmptyRow);
        }
        let sql = self.statements.delete_row(table, &matching);
        self.execute(&sql).await
    }

    /// Runs a free-form statement.
    ///
    /// Row-returning statements yield [`QueryOutcome::Rows`]; an empty
    /// result has no column names. Anything else yields the number of
    /// rows changed.
    pub async fn run_query(&self, sql: &str) -> Result<QueryOutcome> {
        if returns_rows(sql) {
            debug!(sql = %sql, "Running query");
            let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
            Ok(QueryOutcome::Rows(ResultSet::from_rows(&rows)?))
        } else {
            let rows = self.execute(sql).await?;
            Ok(QueryOutcome::Affected { rows })
        }
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        debug!(sql = %sql, "Executing SQL");
        let result = sqlx::query(sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

/// Whether `sql` yields rows: it starts with a row-returning keyword, or it
/// is a data change with a `RETURNING` clause.
fn returns_rows(sql: &str) -> bool {
    let words = sql_words(sql);
    let Some(first) = words.first() else {
        return false;
    };
    ROW_RETURNING.contains(&first.as_str())
        || (DATA_CHANGING.contains(&first.as_str()) && words.iter().any(|w| w == "RETURNING"))
}

/// Upper-cased words of `sql`, skipping comments and quoted text.
fn sql_words(sql: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_alphanumeric() || c == '_' {
            word.push(c.to_ascii_uppercase());
            continue;
        }
        if !word.is_empty() {
            words.push(std::mem::take(&mut word));
        }
        match c {
            '-' if chars.peek() == Some(&'-') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = ' ';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
            }
            '\'' | '"' | '`' | '[' => {
                let close = if c == '[' { ']' } else { c };
                for next in chars.by_ref() {
                    if next == close {
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    if !word.is_empty() {
        words.push(word);
    }
    words
}
