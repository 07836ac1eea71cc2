//! Rendering of field values as SQL string literals.

/// How a field value is turned into a quoted SQL literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Quoting {
    /// Wrap in single quotes and double any embedded single quote.
    #[default]
    Escaped,
    /// Wrap in single quotes and leave the content untouched.
    ///
    /// **Warning**: a value containing `'` ends the literal early. The
    /// database rejects the statement or, worse, runs something else.
    Verbatim,
}

impl Quoting {
    /// Returns `value` as a single-quoted SQL literal.
    #[must_use]
    pub fn literal(self, value: &str) -> String {
        match self {
            Self::Escaped => {
                let escaped = value.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Verbatim => format!("'{value}'"),
        }
    }

    /// Short lowercase name, as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Escaped => "escaped",
            Self::Verbatim => "verbatim",
        }
    }
}
