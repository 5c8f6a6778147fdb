//! Failure taxonomy for permission service requests.
//!
//! The wire contract carries a closed set of error codes. `ServiceError` has
//! one variant per code so every response path is matched exhaustively at
//! compile time instead of passing strings around.

use serde::{Deserialize, Serialize};

/// Closed set of wire error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidPayload,
    DbError,
    CacheError,
    ApiKeyNotFound,
    InternalError,
}

/// Typed failure raised by handlers and the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The client supplied missing or malformed fields. Surfaced verbatim.
    #[error("{message}")]
    InvalidPayload {
        /// Description of what was missing or malformed.
        message: String,
    },

    /// The store of record was unreachable or a query failed.
    #[error("Database error: {message}")]
    Db {
        /// Underlying failure, logged but not surfaced on the wire.
        message: String,
    },

    /// The cache was unreachable, or a fill could not be read back.
    #[error("Cache error: {message}")]
    Cache {
        /// Underlying failure, logged but not surfaced on the wire.
        message: String,
    },

    /// The API key has no record anywhere. No current handler produces this;
    /// an empty permission list is a successful answer. Kept so the wire
    /// contract's code set stays stable for clients.
    #[error("API key not found")]
    ApiKeyNotFound,

    /// Anything unanticipated, caught at the dispatch boundary.
    #[error("Internal error: {message}")]
    Internal {
        /// Original failure, logged but never surfaced on the wire.
        message: String,
    },
}

impl ServiceError {
    /// Creates a new `InvalidPayload` error.
    #[must_use]
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Creates a new `Db` error.
    #[must_use]
    pub fn db(message: impl Into<String>) -> Self {
        Self::Db {
            message: message.into(),
        }
    }

    /// Creates a new `Cache` error.
    #[must_use]
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
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

    /// The wire code for this failure.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPayload { .. } => ErrorCode::InvalidPayload,
            Self::Db { .. } => ErrorCode::DbError,
            Self::Cache { .. } => ErrorCode::CacheError,
            Self::ApiKeyNotFound => ErrorCode::ApiKeyNotFound,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// The message as surfaced on the wire.
    ///
    /// Validation messages go out verbatim. Store, cache, and internal
    /// failures answer with a fixed message; the underlying cause stays in
    /// the logs.
    #[must_use]
    pub fn wire_message(&self) -> String {
        match self {
            Self::InvalidPayload { message } => message.clone(),
            Self::Db { .. } => "Database error".to_string(),
            Self::Cache { .. } => "Cache or database error".to_string(),
            Self::ApiKeyNotFound => "API key not found".to_string(),
            Self::Internal { .. } => "Internal server error".to_string(),
        }
    }

    /// The error envelope body for this failure.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.wire_message(),
        }
    }
}

/// Body of the error envelope: `{"code": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// The error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: err.to_body(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_wire_names() {
        let json = serde_json::to_string(&ErrorCode::InvalidPayload).expect("serialize");
        assert_eq!(json, r#""invalid_payload""#);

        let json = serde_json::to_string(&ErrorCode::DbError).expect("serialize");
        assert_eq!(json, r#""db_error""#);

        let json = serde_json::to_string(&ErrorCode::CacheError).expect("serialize");
        assert_eq!(json, r#""cache_error""#);

        let json = serde_json::to_string(&ErrorCode::ApiKeyNotFound).expect("serialize");
        assert_eq!(json, r#""api_key_not_found""#);

        let json = serde_json::to_string(&ErrorCode::InternalError).expect("serialize");
        assert_eq!(json, r#""internal_error""#);
    }

    #[test]
    fn test_wire_messages_hide_causes() {
        let err = ServiceError::db("connection refused");
        assert_eq!(err.wire_message(), "Database error");

        let err = ServiceError::cache("bucket unreachable");
        assert_eq!(err.wire_message(), "Cache or database error");

        let err = ServiceError::internal("handler panicked");
        assert_eq!(err.wire_message(), "Internal server error");

        let err = ServiceError::invalid_payload("Missing required fields");
        assert_eq!(err.wire_message(), "Missing required fields");
    }

    #[test]
    fn test_error_envelope_shape() {
        let err = ServiceError::invalid_payload("Missing apiKey");
        let envelope = ErrorResponse::from(&err);
        let json = serde_json::to_string(&envelope).expect("serialize");
        assert_eq!(
            json,
            r#"{"error":{"code":"invalid_payload","message":"Missing apiKey"}}"#
        );
    }
}
