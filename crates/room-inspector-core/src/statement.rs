//! SQL statements used by the inspector.
//!
//! The free functions use the default [`StatementBuilder`], which escapes
//! quotes inside literals. Build a [`StatementBuilder`] with
//! [`Quoting::Verbatim`] to get the unescaped historical output.
//!
//! Identifiers are never quoted: `table` and column names appear exactly as
//! given.

use crate::literal::Quoting;
use crate::pairs::{Assignment, ColumnValue};

/// Selects the name of every user table, aliased as `_id`.
///
/// SQLite's own tables (`sqlite_sequence`, `sqlite_stat1`, ...) and the
/// bookkeeping tables Room and Android add to every database are left out.
pub const LIST_TABLES: &str = r"SELECT name _id FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite\_%' ESCAPE '\' AND name NOT IN ('android_metadata', 'room_master_table')";

/// Builds inspector statements with a fixed literal quoting policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatementBuilder {
    quoting: Quoting,
}

impl StatementBuilder {
    /// Creates a builder using `quoting` for every literal.
    #[must_use]
    pub const fn new(quoting: Quoting) -> Self {
        Self { quoting }
    }

    /// Returns the quoting policy.
    #[must_use]
    pub const fn quoting(&self) -> Quoting {
        self.quoting
    }

    /// Lists user tables. See [`LIST_TABLES`].
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn list_tables(&self) -> String {
        String::from(LIST_TABLES)
    }

    /// Requests column metadata (`cid`, `name`, `type`, `notnull`,
    /// `dflt_value`, `pk`) for `table`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn list_columns(&self, table: &str) -> String {
        format!("PRAGMA table_info({table})")
    }

    /// Selects every column of every row, unfiltered and unordered.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn list_rows(&self, table: &str) -> String {
        format!("SELECT * FROM {table}")
    }

    /// Removes the table together with its data and schema.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE {table}")
    }

    /// Deletes every row but keeps the table.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn clear_table(&self, table: &str) -> String {
        format!("DELETE FROM {table}")
    }

    /// Inserts one row; `values` bind to the table's column order.
    ///
    /// The number of values is not checked against the schema.
    #[must_use]
    pub fn insert_row<V: AsRef<str>>(&self, table: &str, values: &[V]) -> String {
        let literals = join(values, ",", |v| self.quoting.literal(v.as_ref()));
        format!("INSERT INTO {table} VALUES({literals})")
    }

    /// Rewrites every row whose values equal the `old` side of
    /// `assignments` with the `new` side.
    ///
    /// Rows are matched on all given columns. Duplicate rows are all
    /// updated. An empty slice yields a statement with empty `SET` and
    /// `WHERE` clauses, which the database rejects.
    #[must_use]
    pub fn update_row(&self, table: &str, assignments: &[Assignment<'_>]) -> String {
        let changes: Vec<_> = assignments.iter().map(Assignment::replacement).collect();
        let filter: Vec<_> = assignments.iter().map(Assignment::current).collect();
        self.update_where(table, &changes, &filter)
    }

    /// Sets `changes` on every row whose values equal `filter`.
    ///
    /// The two slices may name different columns, so a row can be matched
    /// on some columns while others are rewritten.
    #[must_use]
    pub fn update_where(
        &self,
        table: &str,
        changes: &[ColumnValue<'_>],
        filter: &[ColumnValue<'_>],
    ) -> String {
        let set = join(changes, ", ", |pair| self.equals(*pair));
        let filter = join(filter, " AND ", |pair| self.equals(*pair));
        format!("UPDATE {table} SET {set} WHERE {filter}")
    }

    /// Deletes every row whose values equal `matching`.
    ///
    /// An empty slice yields a statement with an empty `WHERE` clause, which
    /// the database rejects.
    #[must_use]
    pub fn delete_row(&self, table: &str, matching: &[ColumnValue<'_>]) -> String {
        let filter = join(matching, " AND ", |pair| self.equals(*pair));
        format!("DELETE FROM {table} WHERE {filter}")
    }

    fn equals(&self, pair: ColumnValue<'_>) -> String {
        format!("{} = {}", pair.column, self.quoting.literal(pair.value))
    }
}

/// Renders each item and joins the results with `separator`.
fn join<T>(items: &[T], separator: &str, render: impl Fn(&T) -> String) -> String {
    items.iter().map(render).collect::<Vec<_>>().join(separator)
}

/// See [`StatementBuilder::list_tables`].
#[must_use]
pub fn list_tables() -> String {
    StatementBuilder::default().list_tables()
}

/// See [`StatementBuilder::list_columns`].
#[must_use]
pub fn list_columns(table: &str) -> String {
    StatementBuilder::default().list_columns(table)
}

/// See [`StatementBuilder::list_rows`].
#[must_use]
pub fn list_rows(table: &str) -> String {
    StatementBuilder::default().list_rows(table)
}

/// See [`StatementBuilder::drop_table`].
#[must_use]
pub fn drop_table(table: &str) -> String {
    StatementBuilder::default().drop_table(table)
}

/// See [`StatementBuilder::clear_table`].
#[must_use]
pub fn clear_table(table: &str) -> String {
    StatementBuilder::default().clear_table(table)
}

/// See [`StatementBuilder::insert_row`].
#[must_use]
pub fn insert_row<V: AsRef<str>>(table: &str, values: &[V]) -> String {
    StatementBuilder::default().insert_row(table, values)
}

/// See [`StatementBuilder::update_row`].
#[must_use]
pub fn update_row(table: &str, assignments: &[Assignment<'_>]) -> String {
    StatementBuilder::default().update_row(table, assignments)
}

/// See [`StatementBuilder::delete_row`].
#[must_use]
pub fn delete_row(table: &str, matching: &[ColumnValue<'_>]) -> String {
    StatementBuilder::default().delete_row(table, matching)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_tables_is_constant() {
        assert_eq!(list_tables(), LIST_TABLES);
        assert!(LIST_TABLES.starts_with("SELECT name _id FROM sqlite_master"));
    }

    #[test]
    fn test_list_columns() {
        assert_eq!(list_columns("users"), "PRAGMA table_info(users)");
    }

    #[test]
    fn test_list_rows() {
        assert_eq!(list_rows("users"), "SELECT * FROM users");
    }

    #[test]
    fn test_drop_and_clear() {
        assert_eq!(drop_table("users"), "DROP TABLE users");
        assert_eq!(clear_table("users"), "DELETE FROM users");
    }

    #[test]
    fn test_insert_row() {
        assert_eq!(
            insert_row("t", &["a", "b", "c"]),
            "INSERT INTO t VALUES('a','b','c')"
        );
    }

    #[test]
    fn test_insert_row_single_value() {
        assert_eq!(insert_row("t", &["a"]), "INSERT INTO t VALUES('a')");
    }

    #[test]
    fn test_insert_row_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(insert_row("t", &empty), "INSERT INTO t VALUES()");
    }

    #[test]
    fn test_update_row() {
        let sql = update_row(
            "t",
            &[Assignment::new("x", "1", "9"), Assignment::new("y", "2", "8")],
        );
        assert_eq!(sql, "UPDATE t SET x = '9', y = '8' WHERE x = '1' AND y = '2'");
    }

    #[test]
    fn test_update_where_splits_columns() {
        let builder = StatementBuilder::default();
        let sql = builder.update_where(
            "notes",
            &[ColumnValue::new("title", "changed")],
            &[ColumnValue::new("id", "1"), ColumnValue::new("title", "first")],
        );
        assert_eq!(
            sql,
            "UPDATE notes SET title = 'changed' WHERE id = '1' AND title = 'first'"
        );
    }

    #[test]
    fn test_delete_row() {
        let sql = delete_row("t", &[ColumnValue::new("id", "5")]);
        assert_eq!(sql, "DELETE FROM t WHERE id = '5'");
    }

    #[test]
    fn test_delete_row_multiple_columns() {
        let sql = delete_row(
            "t",
            &[ColumnValue::new("id", "5"), ColumnValue::new("name", "x")],
        );
        assert_eq!(sql, "DELETE FROM t WHERE id = '5' AND name = 'x'");
    }

    #[test]
    fn test_verbatim_builder() {
        let builder = StatementBuilder::new(Quoting::Verbatim);
        assert_eq!(
            builder.insert_row("t", &["it's"]),
            "INSERT INTO t VALUES('it's')"
        );
        assert_eq!(builder.quoting(), Quoting::Verbatim);
    }

    #[test]
    fn test_escaped_builder() {
        let sql = delete_row("t", &[ColumnValue::new("name", "O'Brien")]);
        assert_eq!(sql, "DELETE FROM t WHERE name = 'O''Brien'");
    }
}
