//! Error types for permission storage backends.

/// Errors that can occur during permission store operations.
///
/// Missing rows are never an error: listing an unknown API key returns an
/// empty sequence, and deleting a nonexistent grant is a no-op.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to connect to the storage backend.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection failure.
        message: String,
    },

    /// A query or statement failed.
    #[error("Query error: {message}")]
    Query {
        /// Description of the query failure.
        message: String,
    },

    /// An internal storage error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Query` error.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::connection("refused");
        assert_eq!(err.to_string(), "Connection error: refused");

        let err = StorageError::query("syntax error");
        assert_eq!(err.to_string(), "Query error: syntax error");

        let err = StorageError::internal("oops");
        assert_eq!(err.to_string(), "Internal error: oops");
    }

    #[test]
    fn test_error_predicates() {
        assert!(StorageError::connection("refused").is_connection());
        assert!(!StorageError::query("bad").is_connection());
    }
}
