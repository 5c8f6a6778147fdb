use permgate_core::envelope::{AckResponse, GrantRequest};
use permgate_core::error::ServiceError;
use tracing::{error, info};

use super::MISSING_FIELDS;
use crate::services::ServiceState;

/// Grants module+action to an API key, then refreshes the cached set from
/// the store's new truth.
pub async fn handle_grant(
    state: &ServiceState,
    request: GrantRequest,
) -> Result<AckResponse, ServiceError> {
    info!(
        api_key = %request.api_key,
        module = %request.module,
        action = %request.action,
        "grant request received"
    );

    if request.api_key.is_empty() || request.module.is_empty() || request.action.is_empty() {
        error!("grant request rejected: missing required fields");
        return Err(ServiceError::invalid_payload(MISSING_FIELDS));
    }

    state
        .store
        .insert_permission(&request.api_key, &request.module, &request.action)
        .await
        .map_err(|e| {
            error!(api_key = %request.api_key, error = %e, "grant insert failed");
            ServiceError::db(e.to_string())
        })?;

    state
        .cache
        .write_through(&request.api_key)
        .await
        .map_err(|e| {
            error!(api_key = %request.api_key, error = %e, "cache refresh after grant failed");
            ServiceError::db(e.to_string())
        })?;

    info!(api_key = %request.api_key, "grant ok");
    Ok(AckResponse::ok())
}
