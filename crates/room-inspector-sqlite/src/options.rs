//! Connection options.

use room_inspector_core::Quoting;

/// How the inspector connects and builds its statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorOptions {
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Create the database file when it does not exist.
    pub create_if_missing: bool,
    /// Quoting policy for literals in generated statements.
    pub quoting: Quoting,
}

impl Default for InspectorOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            create_if_missing: false,
            quoting: Quoting::Escaped,
        }
    }
}

impl InspectorOptions {
    /// Creates options with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pool size.
    #[must_use]
    pub const fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Creates the file on connect when missing.
    #[must_use]
    pub const fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Sets the literal quoting policy.
    #[must_use]
    pub const fn quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }
}
