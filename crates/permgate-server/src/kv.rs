//! JetStream key-value backend for the shared permission cache.

use async_nats::jetstream;
use async_nats::jetstream::kv;
use async_trait::async_trait;
use permgate_cache::{CacheError, CacheStore};
use tracing::{debug, info};

/// Cache store over a JetStream key-value bucket, shared by every service
/// instance. Entries are opaque bytes keyed by API key.
pub struct JetStreamCacheStore {
    bucket: kv::Store,
}

impl JetStreamCacheStore {
    /// Opens the bucket, creating it on first use.
    pub async fn open(context: &jetstream::Context, bucket: &str) -> Result<Self, CacheError> {
        let store = match context.get_key_value(bucket).await {
            Ok(store) => {
                debug!(bucket, "opened existing cache bucket");
                store
            }
            Err(_) => {
                let store = context
                    .create_key_value(kv::Config {
                        bucket: bucket.to_string(),
                        ..Default::default()
                    })
                    .await
                    .map_err(|e| CacheError::backend(e.to_string()))?;
                info!(bucket, "created cache bucket");
                store
            }
        };
        Ok(Self { bucket: store })
    }

    /// Wraps an already-opened bucket.
    #[must_use]
    pub fn from_bucket(bucket: kv::Store) -> Self {
        Self { bucket }
    }
}

#[async_trait]
impl CacheStore for JetStreamCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entry = self
            .bucket
            .get(key)
            .await
            .map_err(|e| CacheError::backend(e.to_string()))?;
        Ok(entry.map(|bytes| bytes.to_vec()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        self.bucket
            .put(key, value.into())
            .await
            .map_err(|e| CacheError::backend(e.to_string()))?;
        Ok(())
    }
}
