//! Error types for the cache layer.

/// Errors that can occur against the shared key-value cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The cache backend was unreachable or a get/put failed.
    #[error("Cache backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },

    /// A stored record could not be decoded.
    #[error("Cache codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// A fill was written but the immediate re-read still missed.
    #[error("Failed to create cache after database load: {api_key}")]
    ReadBack {
        /// The API key whose entry could not be read back.
        api_key: String,
    },
}

impl CacheError {
    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Creates a new `ReadBack` error.
    #[must_use]
    pub fn read_back(api_key: impl Into<String>) -> Self {
        Self::ReadBack {
            api_key: api_key.into(),
        }
    }
}
