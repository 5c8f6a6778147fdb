use permgate_core::envelope::{CheckRequest, CheckResponse};
use permgate_core::error::ServiceError;
use tracing::{error, info};

use super::MISSING_FIELDS;
use crate::services::ServiceState;

/// Answers whether an API key holds module+action. Pure read: a cache miss
/// triggers a fill, never a mutation of the store.
pub async fn handle_check(
    state: &ServiceState,
    request: CheckRequest,
) -> Result<CheckResponse, ServiceError> {
    info!(
        api_key = %request.api_key,
        module = %request.module,
        action = %request.action,
        "check request received"
    );

    if request.api_key.is_empty() || request.module.is_empty() || request.action.is_empty() {
        error!("check request rejected: missing required fields");
        return Err(ServiceError::invalid_payload(MISSING_FIELDS));
    }

    let cached = state
        .cache
        .read_through(&request.api_key)
        .await
        .map_err(|e| {
            error!(api_key = %request.api_key, error = %e, "check lookup failed");
            ServiceError::cache(e.to_string())
        })?;

    let allowed = cached.allows(&request.module, &request.action);
    info!(api_key = %request.api_key, allowed, "check response sent");
    Ok(CheckResponse { allowed })
}
