//! The distributed key-value cache contract and the in-process backend.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::CacheError;

/// Shared key-value cache, keyed by API key.
///
/// Implementations are reached by every service instance concurrently.
/// `put` is an unconditional whole-value overwrite — last writer wins, no
/// compare-and-swap — which is what makes lockless concurrent fills safe.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetches the raw entry for a key. `None` means not present.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend itself fails, never for a
    /// missing key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Overwrites the entry for a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write could not be performed.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError>;
}

/// Type alias for a shareable cache store instance.
pub type DynCacheStore = Arc<dyn CacheStore>;

/// In-process cache backend for tests and single-instance runs.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryCacheStore {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
