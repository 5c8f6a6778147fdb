//! In-memory permission store.
//!
//! Implements the `PermissionStore` trait from `permgate-storage` on top of
//! a concurrent map. Grants do not survive a restart; this backend exists
//! for tests and single-process development runs.

mod store;

pub use permgate_storage::{PermissionStore, StorageError};
pub use store::MemoryPermissionStore;

/// Creates a new in-memory store behind the shareable trait object alias.
#[must_use]
pub fn create_permission_store() -> permgate_storage::DynPermissionStore {
    std::sync::Arc::new(MemoryPermissionStore::new())
}
