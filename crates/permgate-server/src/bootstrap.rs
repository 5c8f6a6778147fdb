//! Wires external collaborators into a ready-to-serve service.

use std::sync::Arc;

use anyhow::Context;
use permgate_storage::DynPermissionStore;
use permgate_storage_memory::MemoryPermissionStore;
use permgate_storage_postgres::PostgresPermissionStore;
use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::kv::JetStreamCacheStore;
use crate::services::ServiceState;

/// A connected service: the bus client plus the shared handler state.
pub struct Bootstrap {
    pub client: async_nats::Client,
    pub state: ServiceState,
}

/// Connects the message bus, opens the cache bucket, and builds the
/// permission store named by the configuration.
pub async fn init(config: &AppConfig) -> anyhow::Result<Bootstrap> {
    let client = async_nats::connect(&config.nats.url)
        .await
        .with_context(|| format!("connecting to NATS at {}", config.nats.url))?;
    info!(url = %config.nats.url, "connected to NATS");

    let jetstream = async_nats::jetstream::new(client.clone());
    let cache_store = JetStreamCacheStore::open(&jetstream, &config.nats.cache_bucket)
        .await
        .with_context(|| format!("opening cache bucket {}", config.nats.cache_bucket))?;

    let store: DynPermissionStore = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg = config
                .storage
                .postgres
                .as_ref()
                .context("storage.postgres config is required for the postgres backend")?;
            let store = PostgresPermissionStore::connect(pg)
                .await
                .context("connecting to PostgreSQL")?;
            Arc::new(store)
        }
        StorageBackend::Memory => {
            warn!("using in-memory permission store; grants will not survive a restart");
            Arc::new(MemoryPermissionStore::new())
        }
    };

    let state = ServiceState::new(store, Arc::new(cache_store));
    Ok(Bootstrap { client, state })
}
