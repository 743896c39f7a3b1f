//! Error types for sqltree

use thiserror::Error;

/// Result type alias for rendering operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while writing a statement into a [`SqlWriter`](crate::SqlWriter).
///
/// The only failure class is a write failure reported by the writer itself.
/// Once one is returned the writer's buffer is incomplete and must not be executed.
#[derive(Debug, Error)]
pub enum SqlError {
    /// In-memory buffer write failed
    #[error("Write error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Stream-backed writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by a custom writer implementation
    #[error("Writer error: {0}")]
    Writer(String),
}

impl SqlError {
    /// Create a writer error
    pub fn writer(message: impl Into<String>) -> Self {
        Self::Writer(message.into())
    }

    /// Check if this error came from an I/O stream
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
