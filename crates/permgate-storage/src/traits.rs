//! The storage trait permission backends implement.

use async_trait::async_trait;
use permgate_core::Permission;

use crate::error::StorageError;

/// Authoritative repository of (api_key, module, action) grants.
///
/// Implementations must be thread-safe (`Send + Sync`); the service calls
/// them concurrently from many request tasks. Both mutations are idempotent
/// so that retried or raced requests cannot corrupt state. The core never
/// retries a failed operation itself.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Returns every permission granted to the API key, in stored order.
    ///
    /// An unknown API key yields an empty sequence, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn list_permissions(&self, api_key: &str) -> Result<Vec<Permission>, StorageError>;

    /// Grants module+action to the API key.
    ///
    /// Granting an already-granted permission is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    async fn insert_permission(
        &self,
        api_key: &str,
        module: &str,
        action: &str,
    ) -> Result<(), StorageError>;

    /// Revokes module+action from the API key.
    ///
    /// Revoking a permission that was never granted is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    async fn delete_permission(
        &self,
        api_key: &str,
        module: &str,
        action: &str,
    ) -> Result<(), StorageError>;
}
