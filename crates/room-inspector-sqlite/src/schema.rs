//! Column metadata as reported by `PRAGMA table_info`.

use serde::Serialize;

/// Raw `PRAGMA table_info` row: `cid, name, type, notnull, dflt_value, pk`.
pub(crate) type TableInfoRow = (i64, String, String, i64, Option<String>, i64);

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    /// Position of the column in the table, starting at 0.
    pub cid: i64,
    /// Column name.
    pub name: String,
    /// Declared type, empty when the column was declared without one.
    #[serde(rename = "type")]
    pub declared_type: String,
    /// Whether the column is `NOT NULL`.
    pub not_null: bool,
    /// Default value expression, as written in the schema.
    pub default_value: Option<String>,
    /// 1-based position within the primary key, 0 when not part of it.
    pub primary_key: i64,
}

impl ColumnInfo {
    /// Returns true when the column is part of the primary key.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key > 0
    }
}

impl From<TableInfoRow> for ColumnInfo {
    fn from((cid, name, declared_type, not_null, default_value, primary_key): TableInfoRow) -> Self {
        Self {
            cid,
            name,
            declared_type,
            not_null: not_null != 0,
            default_value,
            primary_key,
        }
    }
}

/// Names of `columns`, in table order.
#[must_use]
pub fn column_names(columns: &[ColumnInfo]) -> Vec<String> {
    columns.iter().map(|c| c.name.clone()).collect()
}
