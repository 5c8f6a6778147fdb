//! Message-bus subject and queue-group names for the permission service.

/// Queue group shared by all service instances, so any one of N running
/// instances may pick up any given request.
pub const QUEUE_GROUP: &str = "permissions";

/// Grant a permission to an API key.
pub const GRANT: &str = "permissions.grant";

/// Revoke a permission from an API key.
pub const REVOKE: &str = "permissions.revoke";

/// Check a single module+action for an API key.
pub const CHECK: &str = "permissions.check";

/// List every permission granted to an API key.
pub const LIST: &str = "permissions.list";

/// Default JetStream key-value bucket holding cached permission sets,
/// keyed by API key.
pub const CACHE_BUCKET: &str = "permissions_cache";
