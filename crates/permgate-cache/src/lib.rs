//! Cache-aside synchronization layer for permission sets.
//!
//! ## Architecture
//!
//! ```text
//! check/list ──> read_through ──> cache get ──hit──> decode ──> answer
//!                     │ miss
//!                     ▼
//!            store list ──> encode ──> cache put ──> re-read ──> answer
//!
//! grant/revoke ──> store mutation ──> write_through (same fill path)
//! ```
//!
//! The relational store is the sole source of truth; every cache entry is a
//! whole-object projection of one full store read. Entries are overwritten,
//! never patched, so concurrent fills for the same key collide safely: both
//! writers derived their value from the same store content and the last
//! write wins.

pub mod codec;
pub mod error;
pub mod store;
pub mod sync;

pub use codec::CachedPermissionSet;
pub use error::CacheError;
pub use store::{CacheStore, DynCacheStore, MemoryCacheStore};
pub use sync::{PermissionCache, SyncError};
