use async_trait::async_trait;
use dashmap::DashMap;
use permgate_core::Permission;
use permgate_storage::{PermissionStore, StorageError};

/// Concurrent in-memory permission store.
///
/// Grants are held per API key in insertion order, matching what a relational
/// backend returns for an unordered scan over rows inserted one at a time.
#[derive(Debug, Default)]
pub struct MemoryPermissionStore {
    grants: DashMap<String, Vec<Permission>>,
}

impl MemoryPermissionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of API keys with at least one grant.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.grants.len()
    }
}

#[async_trait]
impl PermissionStore for MemoryPermissionStore {
    async fn list_permissions(&self, api_key: &str) -> Result<Vec<Permission>, StorageError> {
        Ok(self
            .grants
            .get(api_key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn insert_permission(
        &self,
        api_key: &str,
        module: &str,
        action: &str,
    ) -> Result<(), StorageError> {
        let mut entry = self.grants.entry(api_key.to_string()).or_default();
        let exists = entry
            .iter()
            .any(|p| p.module == module && p.action == action);
        if !exists {
            entry.push(Permission::new(module, action));
        }
        Ok(())
    }

    async fn delete_permission(
        &self,
        api_key: &str,
        module: &str,
        action: &str,
    ) -> Result<(), StorageError> {
        if let Some(mut entry) = self.grants.get_mut(api_key) {
            entry.retain(|p| !(p.module == module && p.action == action));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_key_lists_empty() {
        let store = MemoryPermissionStore::new();
        let permissions = store.list_permissions("nobody").await.expect("list");
        assert!(permissions.is_empty());
    }

    #[tokio::test]
    async fn test_insert_is_idempotent() {
        let store = MemoryPermissionStore::new();
        store
            .insert_permission("k1", "trades", "create")
            .await
            .expect("insert");
        store
            .insert_permission("k1", "trades", "create")
            .await
            .expect("duplicate insert");

        let permissions = store.list_permissions("k1").await.expect("list");
        assert_eq!(permissions, vec![Permission::new("trades", "create")]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryPermissionStore::new();
        store
            .delete_permission("k1", "trades", "create")
            .await
            .expect("delete of never-granted row");

        store
            .insert_permission("k1", "trades", "create")
            .await
            .expect("insert");
        store
            .delete_permission("k1", "trades", "create")
            .await
            .expect("delete");
        store
            .delete_permission("k1", "trades", "create")
            .await
            .expect("repeat delete");

        let permissions = store.list_permissions("k1").await.expect("list");
        assert!(permissions.is_empty());
    }

    #[tokio::test]
    async fn test_insertion_order_preserved() {
        let store = MemoryPermissionStore::new();
        store
            .insert_permission("k1", "trades", "create")
            .await
            .expect("insert");
        store
            .insert_permission("k1", "orders", "create")
            .await
            .expect("insert");
        store
            .insert_permission("k1", "reports", "view")
            .await
            .expect("insert");

        let permissions = store.list_permissions("k1").await.expect("list");
        assert_eq!(
            permissions,
            vec![
                Permission::new("trades", "create"),
                Permission::new("orders", "create"),
                Permission::new("reports", "view"),
            ]
        );
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let store = MemoryPermissionStore::new();
        store
            .insert_permission("k1", "trades", "create")
            .await
            .expect("insert");
        store
            .insert_permission("k2", "users", "admin")
            .await
            .expect("insert");

        let k1 = store.list_permissions("k1").await.expect("list");
        let k2 = store.list_permissions("k2").await.expect("list");
        assert_eq!(k1, vec![Permission::new("trades", "create")]);
        assert_eq!(k2, vec![Permission::new("users", "admin")]);
        assert_eq!(store.key_count(), 2);
    }
}
