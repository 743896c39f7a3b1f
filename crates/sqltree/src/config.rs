use crate::writer::Dialect;
use serde::{Deserialize, Serialize};

/// Configuration for a top-level render.
///
/// Deserializable so it can sit inside an application's own config file:
///
/// ```toml
/// [sql]
/// dialect = "numbered"
/// max_log_sql_length = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Placeholder and quoting rules.
    pub dialect: Dialect,
    /// Truncate SQL in log events (in bytes). `None` logs the full statement.
    pub max_log_sql_length: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Positional,
            max_log_sql_length: Some(200),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults (positional dialect, 200-byte log truncation).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_log_sql_length(mut self, len: usize) -> Self {
        self.max_log_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_log_sql_length = None;
        self
    }
}
