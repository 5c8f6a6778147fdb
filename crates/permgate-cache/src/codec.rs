//! Conversion between permission lists and the cached representation.

use std::collections::HashSet;

use permgate_core::{Permission, epoch_millis, permission_key};
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Cache-optimized view of one API key's permissions.
///
/// Holds the ordered list as loaded from the store plus a derived membership
/// set for O(1) checks. The set is always exactly the image of the list under
/// the `"<module>:<action>"` key derivation; the two are built together and
/// there is no way to mutate one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPermissionSet {
    permission_set: HashSet<String>,
    permissions: Vec<Permission>,
    last_updated: i64,
}

/// Wire form of a cached entry: `{"permissions": [...], "lastUpdated": n}`.
/// The membership set is cheap to rederive and is not persisted.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheRecord {
    permissions: Vec<Permission>,
    last_updated: i64,
}

impl CachedPermissionSet {
    /// Builds the membership set and ordered sequence together, stamped with
    /// the current time.
    #[must_use]
    pub fn encode(permissions: Vec<Permission>) -> Self {
        Self::from_parts(permissions, epoch_millis())
    }

    fn from_parts(permissions: Vec<Permission>, last_updated: i64) -> Self {
        let permission_set = permissions.iter().map(Permission::key).collect();
        Self {
            permission_set,
            permissions,
            last_updated,
        }
    }

    /// Serializes to the persisted byte form.
    pub fn serialize(&self) -> Result<Vec<u8>, CacheError> {
        let record = CacheRecord {
            permissions: self.permissions.clone(),
            last_updated: self.last_updated,
        };
        Ok(serde_json::to_vec(&record)?)
    }

    /// Parses the persisted form and rederives the membership set, so the
    /// set/list invariant holds for every value ever read from the cache,
    /// regardless of how it was written.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, CacheError> {
        let record: CacheRecord = serde_json::from_slice(bytes)?;
        Ok(Self::from_parts(record.permissions, record.last_updated))
    }

    /// O(1) membership test for module+action.
    #[must_use]
    pub fn allows(&self, module: &str, action: &str) -> bool {
        self.permission_set.contains(&permission_key(module, action))
    }

    /// The permissions in the order they were loaded from the store.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Epoch-millis timestamp of cache population. Observability only;
    /// nothing expires on it.
    #[must_use]
    pub fn last_updated(&self) -> i64 {
        self.last_updated
    }

    /// Number of cached permissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Whether the API key holds no permissions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Permission> {
        vec![
            Permission::new("trades", "create"),
            Permission::new("orders", "create"),
            Permission::new("reports", "view"),
        ]
    }

    #[test]
    fn test_round_trip_law() {
        let encoded = CachedPermissionSet::encode(sample());
        let bytes = encoded.serialize().expect("serialize");
        let decoded = CachedPermissionSet::deserialize(&bytes).expect("deserialize");
        assert_eq!(decoded, encoded);
    }

    #[test]
    fn test_membership_matches_list() {
        let encoded = CachedPermissionSet::encode(sample());
        for permission in encoded.permissions() {
            assert!(encoded.allows(&permission.module, &permission.action));
        }
        assert!(!encoded.allows("trades", "delete"));
        assert!(!encoded.allows("users", "create"));
    }

    #[test]
    fn test_membership_is_not_substring_matching() {
        let encoded = CachedPermissionSet::encode(vec![Permission::new("trades", "create")]);
        // "trade" + "s:create" must not collide with "trades" + "create".
        assert!(!encoded.allows("trade", "s:create"));
        assert!(!encoded.allows("trades:create", ""));
    }

    #[test]
    fn test_order_preserved() {
        let encoded = CachedPermissionSet::encode(sample());
        let bytes = encoded.serialize().expect("serialize");
        let decoded = CachedPermissionSet::deserialize(&bytes).expect("deserialize");
        assert_eq!(decoded.permissions(), encoded.permissions());
    }

    #[test]
    fn test_set_not_persisted() {
        let encoded = CachedPermissionSet::encode(sample());
        let bytes = encoded.serialize().expect("serialize");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("parse");
        let object = json.as_object().expect("object");
        assert!(object.contains_key("permissions"));
        assert!(object.contains_key("lastUpdated"));
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn test_deserialize_preserves_timestamp() {
        let bytes = br#"{"permissions":[{"module":"trades","action":"create"}],"lastUpdated":1700000000000}"#;
        let decoded = CachedPermissionSet::deserialize(bytes).expect("deserialize");
        assert_eq!(decoded.last_updated(), 1_700_000_000_000);
        assert!(decoded.allows("trades", "create"));
    }

    #[test]
    fn test_empty_set() {
        let encoded = CachedPermissionSet::encode(Vec::new());
        assert!(encoded.is_empty());
        assert_eq!(encoded.len(), 0);
        assert!(!encoded.allows("trades", "create"));

        let bytes = encoded.serialize().expect("serialize");
        let decoded = CachedPermissionSet::deserialize(&bytes).expect("deserialize");
        assert_eq!(decoded, encoded);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(CachedPermissionSet::deserialize(b"not json").is_err());
        assert!(CachedPermissionSet::deserialize(b"{}").is_err());
    }
}
