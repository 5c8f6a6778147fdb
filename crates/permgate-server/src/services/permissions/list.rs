use permgate_core::envelope::{ListRequest, ListResponse};
use permgate_core::error::ServiceError;
use tracing::{error, info};

use super::MISSING_API_KEY;
use crate::services::ServiceState;

/// Returns every permission granted to an API key, in stored order.
pub async fn handle_list(
    state: &ServiceState,
    request: ListRequest,
) -> Result<ListResponse, ServiceError> {
    info!(api_key = %request.api_key, "list request received");

    if request.api_key.is_empty() {
        error!("list request rejected: missing apiKey");
        return Err(ServiceError::invalid_payload(MISSING_API_KEY));
    }

    let cached = state
        .cache
        .read_through(&request.api_key)
        .await
        .map_err(|e| {
            error!(api_key = %request.api_key, error = %e, "list lookup failed");
            ServiceError::cache(e.to_string())
        })?;

    info!(
        api_key = %request.api_key,
        permissions_count = cached.len(),
        "list response sent"
    );
    Ok(ListResponse {
        permissions: cached.permissions().to_vec(),
    })
}
