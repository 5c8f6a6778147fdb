pub mod permissions;

use std::sync::Arc;

use permgate_cache::PermissionCache;
use permgate_storage::DynPermissionStore;

/// Shared collaborators handed to every request handler.
///
/// Cheap to clone; all cross-request state lives in the store and the cache,
/// outside this process.
#[derive(Clone)]
pub struct ServiceState {
    pub store: DynPermissionStore,
    pub cache: Arc<PermissionCache>,
}

impl ServiceState {
    /// Builds the state from a store and a cache backend, wiring the
    /// cache-aside layer over both.
    #[must_use]
    pub fn new(store: DynPermissionStore, cache_store: permgate_cache::DynCacheStore) -> Self {
        let cache = Arc::new(PermissionCache::new(cache_store, store.clone()));
        Self { store, cache }
    }
}
