//! PostgreSQL permission store.
//!
//! The authoritative backend for (api_key, module, action) grants. Implements
//! the `PermissionStore` trait from `permgate-storage` over a sqlx connection
//! pool, with an idempotent startup migration for the `permissions` table.

pub mod config;
pub mod error;
mod schema;
mod store;

pub use config::PostgresConfig;
pub use error::PostgresError;
pub use store::PostgresPermissionStore;

/// Re-exported pool type for callers that construct their own pool.
pub use sqlx_postgres::PgPool;
