//! Permission store abstraction.
//!
//! The relational store is the sole source of truth for grants; everything
//! downstream of it (the shared cache in particular) is a derived, disposable
//! projection. This crate defines the contract storage backends implement.

pub mod error;
pub mod traits;

pub use error::StorageError;
pub use traits::PermissionStore;

/// Type alias for a shareable permission store instance.
pub type DynPermissionStore = std::sync::Arc<dyn PermissionStore>;
