use permgate_core::envelope::{AckResponse, RevokeRequest};
use permgate_core::error::ServiceError;
use tracing::{error, info};

use super::MISSING_FIELDS;
use crate::services::ServiceState;

/// Revokes module+action from an API key, then refreshes the cached set.
/// Revoking a permission that was never granted still succeeds.
pub async fn handle_revoke(
    state: &ServiceState,
    request: RevokeRequest,
) -> Result<AckResponse, ServiceError> {
    info!(
        api_key = %request.api_key,
        module = %request.module,
        action = %request.action,
        "revoke request received"
    );

    if request.api_key.is_empty() || request.module.is_empty() || request.action.is_empty() {
        error!("revoke request rejected: missing required fields");
        return Err(ServiceError::invalid_payload(MISSING_FIELDS));
    }

    state
        .store
        .delete_permission(&request.api_key, &request.module, &request.action)
        .await
        .map_err(|e| {
            error!(api_key = %request.api_key, error = %e, "revoke delete failed");
            ServiceError::db(e.to_string())
        })?;

    state
        .cache
        .write_through(&request.api_key)
        .await
        .map_err(|e| {
            error!(api_key = %request.api_key, error = %e, "cache refresh after revoke failed");
            ServiceError::db(e.to_string())
        })?;

    info!(api_key = %request.api_key, "revoke ok");
    Ok(AckResponse::ok())
}
