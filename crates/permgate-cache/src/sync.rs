//! Read-through and write-through synchronization against the shared cache.

use permgate_storage::{DynPermissionStore, StorageError};
use tracing::{debug, info, instrument};

use crate::codec::CachedPermissionSet;
use crate::error::CacheError;
use crate::store::DynCacheStore;

/// Failure from a cache synchronization operation, split by collaborator so
/// callers can answer with the right wire code.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The store of record failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The cache backend or codec failed.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Keeps the shared key-value cache consistent with the permission store.
///
/// The cache is a derived projection: every entry is written as a whole
/// object from one full store read, and any instance may rebuild any entry
/// at any time. There are no locks; the overwrite protocol is collision-safe
/// because concurrent fills for the same key derive from the same store
/// content. The worst race outcome is a redundant store read.
pub struct PermissionCache {
    cache: DynCacheStore,
    store: DynPermissionStore,
}

impl PermissionCache {
    /// Creates a synchronization layer over the given collaborators.
    #[must_use]
    pub fn new(cache: DynCacheStore, store: DynPermissionStore) -> Self {
        Self { cache, store }
    }

    /// Read-through lookup for one API key.
    ///
    /// On a hit, decodes and returns the cached entry. On a miss, loads the
    /// full permission list from the store, overwrites the cache entry, and
    /// returns the entry as read back from the cache.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Storage` when the store read fails and
    /// `SyncError::Cache` for backend, codec, or read-back failures.
    #[instrument(skip(self))]
    pub async fn read_through(&self, api_key: &str) -> Result<CachedPermissionSet, SyncError> {
        if let Some(bytes) = self.cache.get(api_key).await? {
            debug!(%api_key, "cache hit");
            return Ok(CachedPermissionSet::deserialize(&bytes)?);
        }

        debug!(%api_key, "cache miss");
        self.fill(api_key).await
    }

    /// Write-through refresh for one API key, invoked after every mutation.
    ///
    /// Re-queries the store for the full current permission list and
    /// overwrites the cache entry. The entry is never patched in place;
    /// incremental updates would be vulnerable to lost-update races between
    /// concurrent granular mutations, a full overwrite is not.
    ///
    /// # Errors
    ///
    /// Same split as [`read_through`](Self::read_through).
    #[instrument(skip(self))]
    pub async fn write_through(&self, api_key: &str) -> Result<CachedPermissionSet, SyncError> {
        self.fill(api_key).await
    }

    /// Loads from the store, overwrites the cache, and re-reads the entry
    /// just written.
    ///
    /// The re-read is deliberate: answering from the in-memory value when
    /// the readback misses would report permissions on a cache object no
    /// other instance can retrieve, and an empty answer on a failed fill
    /// would be indistinguishable from a legitimate "no permissions". Both
    /// paths therefore fail loudly instead.
    async fn fill(&self, api_key: &str) -> Result<CachedPermissionSet, SyncError> {
        let permissions = self.store.list_permissions(api_key).await?;
        let encoded = CachedPermissionSet::encode(permissions);

        self.cache.put(api_key, encoded.serialize()?).await?;
        info!(%api_key, permissions_count = encoded.len(), "cache updated");

        let Some(bytes) = self.cache.get(api_key).await? else {
            return Err(CacheError::read_back(api_key).into());
        };
        Ok(CachedPermissionSet::deserialize(&bytes)?)
    }
}
