//! Dispatcher decode/encode behavior, exercised without a running bus.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use permgate_cache::{CacheError, CacheStore, MemoryCacheStore};
use permgate_core::Permission;
use permgate_server::{Operation, ServiceState, dispatcher};
use permgate_storage::{PermissionStore, StorageError};
use permgate_storage_memory::MemoryPermissionStore;
use serde_json::{Value, json};

fn state() -> ServiceState {
    ServiceState::new(
        Arc::new(MemoryPermissionStore::new()),
        Arc::new(MemoryCacheStore::new()),
    )
}

async fn dispatch(state: &ServiceState, operation: Operation, payload: Value) -> Value {
    let request = serde_json::to_vec(&payload).expect("encode request");
    let reply = dispatcher::process(state, operation, &request).await;
    serde_json::from_slice(&reply).expect("reply is JSON")
}

#[tokio::test]
async fn grant_and_check_round_trip_the_wire_shapes() {
    let state = state();

    let reply = dispatch(
        &state,
        Operation::Grant,
        json!({"apiKey": "k1", "module": "trades", "action": "create"}),
    )
    .await;
    assert_eq!(reply, json!({"status": "ok"}));

    let reply = dispatch(
        &state,
        Operation::Check,
        json!({"apiKey": "k1", "module": "trades", "action": "create"}),
    )
    .await;
    assert_eq!(reply, json!({"allowed": true}));

    let reply = dispatch(&state, Operation::List, json!({"apiKey": "k1"})).await;
    assert_eq!(
        reply,
        json!({"permissions": [{"module": "trades", "action": "create"}]})
    );
}

#[tokio::test]
async fn malformed_json_answers_invalid_payload() {
    let state = state();

    let reply = dispatcher::process(&state, Operation::Grant, b"{not json").await;
    let parsed: Value = serde_json::from_slice(&reply).expect("reply is JSON");
    assert_eq!(parsed["error"]["code"], "invalid_payload");
}

#[tokio::test]
async fn missing_fields_answer_invalid_payload_envelope() {
    let state = state();

    let reply = dispatch(
        &state,
        Operation::Grant,
        json!({"apiKey": "", "module": "trades", "action": "create"}),
    )
    .await;
    assert_eq!(
        reply,
        json!({"error": {"code": "invalid_payload", "message": "Missing required fields"}})
    );

    // Absent fields behave exactly like empty ones.
    let reply = dispatch(&state, Operation::Check, json!({"apiKey": "k1"})).await;
    assert_eq!(reply["error"]["code"], "invalid_payload");
}

/// Store wrapper that counts list queries.
struct CountingStore {
    inner: MemoryPermissionStore,
    reads: AtomicUsize,
}

#[async_trait]
impl PermissionStore for CountingStore {
    async fn list_permissions(&self, api_key: &str) -> Result<Vec<Permission>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_permissions(api_key).await
    }

    async fn insert_permission(
        &self,
        api_key: &str,
        module: &str,
        action: &str,
    ) -> Result<(), StorageError> {
        self.inner.insert_permission(api_key, module, action).await
    }

    async fn delete_permission(
        &self,
        api_key: &str,
        module: &str,
        action: &str,
    ) -> Result<(), StorageError> {
        self.inner.delete_permission(api_key, module, action).await
    }
}

#[tokio::test]
async fn first_check_for_fresh_key_reads_store_once() {
    let store = Arc::new(CountingStore {
        inner: MemoryPermissionStore::new(),
        reads: AtomicUsize::new(0),
    });
    let cache = Arc::new(MemoryCacheStore::new());
    let state = ServiceState::new(store.clone(), cache.clone());

    let reply = dispatch(
        &state,
        Operation::Check,
        json!({"apiKey": "fresh", "module": "trades", "action": "create"}),
    )
    .await;
    assert_eq!(reply, json!({"allowed": false}));
    assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);

    // Second check is served from the cache.
    let reply = dispatch(
        &state,
        Operation::Check,
        json!({"apiKey": "fresh", "module": "trades", "action": "create"}),
    )
    .await;
    assert_eq!(reply, json!({"allowed": false}));
    assert_eq!(store.reads.load(Ordering::SeqCst), 1);
}

/// Cache backend that accepts writes but never returns them.
struct BlackHoleCache;

#[async_trait]
impl CacheStore for BlackHoleCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: Vec<u8>) -> Result<(), CacheError> {
        Ok(())
    }
}

#[tokio::test]
async fn unreadable_fill_answers_cache_error() {
    let state = ServiceState::new(
        Arc::new(MemoryPermissionStore::new()),
        Arc::new(BlackHoleCache),
    );

    let reply = dispatch(
        &state,
        Operation::Check,
        json!({"apiKey": "k1", "module": "trades", "action": "create"}),
    )
    .await;
    assert_eq!(
        reply,
        json!({"error": {"code": "cache_error", "message": "Cache or database error"}})
    );
}

/// Store whose queries always fail.
struct DownStore;

#[async_trait]
impl PermissionStore for DownStore {
    async fn list_permissions(&self, _api_key: &str) -> Result<Vec<Permission>, StorageError> {
        Err(StorageError::connection("store offline"))
    }

    async fn insert_permission(
        &self,
        _api_key: &str,
        _module: &str,
        _action: &str,
    ) -> Result<(), StorageError> {
        Err(StorageError::connection("store offline"))
    }

    async fn delete_permission(
        &self,
        _api_key: &str,
        _module: &str,
        _action: &str,
    ) -> Result<(), StorageError> {
        Err(StorageError::connection("store offline"))
    }
}

#[tokio::test]
async fn store_failures_fold_per_operation() {
    let state = ServiceState::new(Arc::new(DownStore), Arc::new(MemoryCacheStore::new()));

    // Mutations answer db_error with the fixed wire message.
    let reply = dispatch(
        &state,
        Operation::Grant,
        json!({"apiKey": "k1", "module": "trades", "action": "create"}),
    )
    .await;
    assert_eq!(
        reply,
        json!({"error": {"code": "db_error", "message": "Database error"}})
    );

    // Reads answer cache_error, store failure included.
    let reply = dispatch(
        &state,
        Operation::List,
        json!({"apiKey": "k1"}),
    )
    .await;
    assert_eq!(
        reply,
        json!({"error": {"code": "cache_error", "message": "Cache or database error"}})
    );
}
