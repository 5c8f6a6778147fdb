pub mod bootstrap;
pub mod config;
pub mod dispatcher;
pub mod kv;
pub mod observability;
pub mod server;
pub mod services;

pub use config::{AppConfig, LoggingConfig, NatsConfig, StorageBackend, StorageConfig};
pub use dispatcher::Operation;
pub use kv::JetStreamCacheStore;
pub use observability::{apply_logging_level, init_tracing};
pub use server::PermgateServer;
pub use services::ServiceState;
