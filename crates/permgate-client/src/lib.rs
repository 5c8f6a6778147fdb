//! Typed request client for the Permgate permission service.
//!
//! Wraps a NATS client and speaks the service's request-reply envelopes.
//! Service-level failures come back as [`ClientError::Service`] with the
//! typed wire code, so callers can distinguish a validation problem from an
//! unavailable store.
//!
//! # Example
//!
//! ```ignore
//! use permgate_client::PermissionsClient;
//!
//! let client = PermissionsClient::connect("nats://localhost:4222").await?;
//! client.grant("k1", "trades", "create").await?;
//! assert!(client.check("k1", "trades", "create").await?);
//! ```

use bytes::Bytes;
use permgate_core::envelope::{
    AckResponse, CheckRequest, CheckResponse, GrantRequest, ListRequest, ListResponse, Reply,
    RevokeRequest,
};
use permgate_core::error::ErrorCode;
use permgate_core::{Permission, subjects};
use serde::Serialize;
use serde::de::DeserializeOwned;

// Re-export the wire types for consumers.
pub use permgate_core::envelope;
pub use permgate_core::error;

/// Errors surfaced to client callers.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Failed to connect to the bus.
    #[error("Connect error: {0}")]
    Connect(#[from] async_nats::ConnectError),

    /// The request could not be delivered or timed out.
    #[error("Request error: {0}")]
    Request(#[from] async_nats::RequestError),

    /// The reply was not a valid envelope.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered with a typed error envelope.
    #[error("Service error ({code:?}): {message}")]
    Service { code: ErrorCode, message: String },
}

/// Request client for the permission service.
pub struct PermissionsClient {
    client: async_nats::Client,
}

impl PermissionsClient {
    /// Wraps an existing bus connection.
    #[must_use]
    pub fn new(client: async_nats::Client) -> Self {
        Self { client }
    }

    /// Connects to the bus and wraps the connection.
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let client = async_nats::connect(url).await?;
        Ok(Self::new(client))
    }

    /// Grants module+action to an API key.
    pub async fn grant(
        &self,
        api_key: &str,
        module: &str,
        action: &str,
    ) -> Result<(), ClientError> {
        let _: AckResponse = self
            .request(
                subjects::GRANT,
                &GrantRequest {
                    api_key: api_key.into(),
                    module: module.into(),
                    action: action.into(),
                },
            )
            .await?;
        Ok(())
    }

    /// Revokes module+action from an API key.
    pub async fn revoke(
        &self,
        api_key: &str,
        module: &str,
        action: &str,
    ) -> Result<(), ClientError> {
        let _: AckResponse = self
            .request(
                subjects::REVOKE,
                &RevokeRequest {
                    api_key: api_key.into(),
                    module: module.into(),
                    action: action.into(),
                },
            )
            .await?;
        Ok(())
    }

    /// Returns whether an API key holds module+action.
    pub async fn check(
        &self,
        api_key: &str,
        module: &str,
        action: &str,
    ) -> Result<bool, ClientError> {
        let response: CheckResponse = self
            .request(
                subjects::CHECK,
                &CheckRequest {
                    api_key: api_key.into(),
                    module: module.into(),
                    action: action.into(),
                },
            )
            .await?;
        Ok(response.allowed)
    }

    /// Lists every permission granted to an API key.
    pub async fn list(&self, api_key: &str) -> Result<Vec<Permission>, ClientError> {
        let response: ListResponse = self
            .request(
                subjects::LIST,
                &ListRequest {
                    api_key: api_key.into(),
                },
            )
            .await?;
        Ok(response.permissions)
    }

    async fn request<Req, Resp>(
        &self,
        subject: &'static str,
        request: &Req,
    ) -> Result<Resp, ClientError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(request)?;
        let message = self.client.request(subject, Bytes::from(payload)).await?;
        match serde_json::from_slice::<Reply<Resp>>(&message.payload)? {
            Reply::Ok(response) => Ok(response),
            Reply::Err(envelope) => Err(ClientError::Service {
                code: envelope.error.code,
                message: envelope.error.message,
            }),
        }
    }
}
