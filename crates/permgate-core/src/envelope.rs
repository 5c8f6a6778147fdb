//! Request and response envelopes for the permission service.
//!
//! Field names are the wire contract (camelCase, matching the JSON the
//! service has always spoken). Request fields default to empty strings on
//! missing keys so handler validation owns the invalid-payload answer.

use serde::{Deserialize, Serialize};

use crate::error::ErrorResponse;
use crate::permission::Permission;

/// `permissions.grant` request: `{apiKey, module, action}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrantRequest {
    pub api_key: String,
    pub module: String,
    pub action: String,
}

/// `permissions.revoke` request: `{apiKey, module, action}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevokeRequest {
    pub api_key: String,
    pub module: String,
    pub action: String,
}

/// `permissions.check` request: `{apiKey, module, action}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckRequest {
    pub api_key: String,
    pub module: String,
    pub action: String,
}

/// `permissions.list` request: `{apiKey}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListRequest {
    pub api_key: String,
}

/// Success envelope for grant and revoke: `{"status":"ok"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckResponse {
    pub status: String,
}

impl AckResponse {
    /// The one acknowledgement the service sends.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Success envelope for check: `{"allowed": bool}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub allowed: bool,
}

/// Success envelope for list: `{"permissions": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub permissions: Vec<Permission>,
}

/// A decoded reply: either the operation's success envelope or the error
/// envelope. Error is tried first so `{"error": ...}` never half-matches a
/// success shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Reply<T> {
    Err(ErrorResponse),
    Ok(T),
}
