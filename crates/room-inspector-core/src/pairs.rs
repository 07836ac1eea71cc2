//! Column/value pairing.
//!
//! Statements that match or assign values take them already paired with
//! their column, so a length mismatch cannot reach the builder. The `zip_*`
//! functions are the one place where separate sequences get paired.

use thiserror::Error;

/// A column paired with one value, used for row matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnValue<'a> {
    /// Column name.
    pub column: &'a str,
    /// Value the column must hold.
    pub value: &'a str,
}

impl<'a> ColumnValue<'a> {
    /// Creates a new pair.
    #[must_use]
    pub const fn new(column: &'a str, value: &'a str) -> Self {
        Self { column, value }
    }
}

/// A column with its current and replacement value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    /// Column name.
    pub column: &'a str,
    /// Value the row holds now. Used to find the row.
    pub old: &'a str,
    /// Value to write.
    pub new: &'a str,
}

impl<'a> Assignment<'a> {
    /// Creates a new assignment.
    #[must_use]
    pub const fn new(column: &'a str, old: &'a str, new: &'a str) -> Self {
        Self { column, old, new }
    }

    /// The `(column, old)` pair identifying the current row.
    #[must_use]
    pub const fn current(&self) -> ColumnValue<'a> {
        ColumnValue::new(self.column, self.old)
    }

    /// The `(column, new)` pair written by the update.
    #[must_use]
    pub const fn replacement(&self) -> ColumnValue<'a> {
        ColumnValue::new(self.column, self.new)
    }
}

/// Column and value sequences of different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{columns} columns paired with {values} values")]
pub struct ArityMismatch {
    /// Number of columns.
    pub columns: usize,
    /// Number of values.
    pub values: usize,
}

/// Pairs `columns[i]` with `values[i]`.
///
/// # Errors
///
/// Returns [`ArityMismatch`] when the sequences differ in length.
pub fn zip_columns<'a, C, V>(
    columns: &'a [C],
    values: &'a [V],
) -> Result<Vec<ColumnValue<'a>>, ArityMismatch>
where
    C: AsRef<str>,
    V: AsRef<str>,
{
    if columns.len() != values.len() {
        return Err(ArityMismatch {
            columns: columns.len(),
            values: values.len(),
        });
    }
    Ok(columns
        .iter()
        .zip(values)
        .map(|(c, v)| ColumnValue::new(c.as_ref(), v.as_ref()))
        .collect())
}

/// Pairs `columns[i]` with `old[i]` and `new[i]`.
///
/// # Errors
///
/// Returns [`ArityMismatch`] when either value sequence differs in length
/// from `columns`. The reported `values` count is the offending one.
pub fn zip_assignments<'a, C, V>(
    columns: &'a [C],
    old: &'a [V],
    new: &'a [V],
) -> Result<Vec<Assignment<'a>>, ArityMismatch>
where
    C: AsRef<str>,
    V: AsRef<str>,
{
    for values in [old, new] {
        if values.len() != columns.len() {
            return Err(ArityMismatch {
                columns: columns.len(),
                values: values.len(),
            });
        }
    }
    Ok(columns
        .iter()
        .zip(old.iter().zip(new))
        .map(|(c, (o, n))| Assignment::new(c.as_ref(), o.as_ref(), n.as_ref()))
        .collect())
}
