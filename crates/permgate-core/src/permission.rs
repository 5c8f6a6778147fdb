//! The permission value type and its set-membership token.

use serde::{Deserialize, Serialize};

/// A single module+action grant.
///
/// Immutable value; uniqueness is per (api_key, module, action) and is
/// enforced by the store of record, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub module: String,
    pub action: String,
}

impl Permission {
    /// Creates a new permission value.
    #[must_use]
    pub fn new(module: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            action: action.into(),
        }
    }

    /// Membership token for set lookups. Never persisted, always recomputed.
    #[must_use]
    pub fn key(&self) -> String {
        permission_key(&self.module, &self.action)
    }
}

/// Derives the `"<module>:<action>"` membership token.
#[must_use]
pub fn permission_key(module: &str, action: &str) -> String {
    format!("{module}:{action}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation() {
        let permission = Permission::new("trades", "create");
        assert_eq!(permission.key(), "trades:create");
        assert_eq!(permission.key(), permission_key("trades", "create"));
    }

    #[test]
    fn test_wire_shape() {
        let permission = Permission::new("orders", "read");
        let json = serde_json::to_string(&permission).expect("serialize");
        assert_eq!(json, r#"{"module":"orders","action":"read"}"#);

        let parsed: Permission = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, permission);
    }
}
