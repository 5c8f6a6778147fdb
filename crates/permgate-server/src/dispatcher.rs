//! Binds permission handlers to message-bus subjects.
//!
//! One queue-group subscription per subject; every inbound request is served
//! on its own task. All failure paths come back as typed error envelopes —
//! a poisoned request must never take down the listener for everyone else.

use async_nats::{Client, Message};
use bytes::Bytes;
use futures_util::StreamExt;
use permgate_core::envelope::{CheckRequest, GrantRequest, ListRequest, RevokeRequest};
use permgate_core::error::{ErrorResponse, ServiceError};
use permgate_core::subjects;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::services::{ServiceState, permissions};

/// Fallback reply for when even error-envelope encoding fails.
const INTERNAL_ERROR_REPLY: &[u8] =
    br#"{"error":{"code":"internal_error","message":"Internal server error"}}"#;

/// The four request operations served by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Grant,
    Revoke,
    Check,
    List,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Grant,
        Operation::Revoke,
        Operation::Check,
        Operation::List,
    ];

    /// The bus subject this operation is served on.
    #[must_use]
    pub fn subject(self) -> &'static str {
        match self {
            Operation::Grant => subjects::GRANT,
            Operation::Revoke => subjects::REVOKE,
            Operation::Check => subjects::CHECK,
            Operation::List => subjects::LIST,
        }
    }
}

/// Decodes a request payload, runs the handler, and encodes the reply bytes.
///
/// Malformed JSON answers `invalid_payload`; handler failures answer their
/// typed code. This function never fails — the caller always has something
/// to publish.
pub async fn process(state: &ServiceState, operation: Operation, payload: &[u8]) -> Vec<u8> {
    match operation {
        Operation::Grant => match decode::<GrantRequest>(payload) {
            Ok(request) => encode_reply(permissions::handle_grant(state, request).await),
            Err(err) => encode_error(&err),
        },
        Operation::Revoke => match decode::<RevokeRequest>(payload) {
            Ok(request) => encode_reply(permissions::handle_revoke(state, request).await),
            Err(err) => encode_error(&err),
        },
        Operation::Check => match decode::<CheckRequest>(payload) {
            Ok(request) => encode_reply(permissions::handle_check(state, request).await),
            Err(err) => encode_error(&err),
        },
        Operation::List => match decode::<ListRequest>(payload) {
            Ok(request) => encode_reply(permissions::handle_list(state, request).await),
            Err(err) => encode_error(&err),
        },
    }
}

/// Subscribes every operation under the shared queue group and serves
/// requests until the subscriptions close.
pub async fn run(
    client: Client,
    state: ServiceState,
    queue_group: String,
) -> Result<(), async_nats::SubscribeError> {
    let mut subscription_tasks = Vec::with_capacity(Operation::ALL.len());

    for operation in Operation::ALL {
        let mut subscription = client
            .queue_subscribe(operation.subject(), queue_group.clone())
            .await?;
        info!(subject = operation.subject(), queue_group = %queue_group, "subscribed");

        let client = client.clone();
        let state = state.clone();
        subscription_tasks.push(tokio::spawn(async move {
            while let Some(message) = subscription.next().await {
                let client = client.clone();
                let state = state.clone();
                tokio::spawn(async move {
                    serve_message(client, state, operation, message).await;
                });
            }
        }));
    }

    info!("permission service listening");

    for task in subscription_tasks {
        let _ = task.await;
    }
    Ok(())
}

/// Serves one request and publishes the reply.
///
/// The handler runs on its own task so a panic is contained there; the
/// caller still gets an internal-error envelope and this subscription keeps
/// draining.
async fn serve_message(client: Client, state: ServiceState, operation: Operation, message: Message) {
    let Some(reply_subject) = message.reply else {
        warn!(subject = %message.subject, "request without reply subject dropped");
        return;
    };

    let payload = message.payload.clone();
    let handler = tokio::spawn(async move { process(&state, operation, &payload).await });

    let reply = match handler.await {
        Ok(bytes) => bytes,
        Err(join_error) => {
            error!(
                subject = operation.subject(),
                error = %join_error,
                "handler task failed"
            );
            INTERNAL_ERROR_REPLY.to_vec()
        }
    };

    if let Err(e) = client.publish(reply_subject, Bytes::from(reply)).await {
        error!(subject = operation.subject(), error = %e, "failed to publish reply");
    }
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, ServiceError> {
    serde_json::from_slice(payload).map_err(|e| {
        warn!(error = %e, "request payload failed to decode");
        ServiceError::invalid_payload("Malformed request payload")
    })
}

fn encode_reply<T: Serialize>(result: Result<T, ServiceError>) -> Vec<u8> {
    match result {
        Ok(response) => serde_json::to_vec(&response).unwrap_or_else(|e| {
            error!(error = %e, "response failed to encode");
            INTERNAL_ERROR_REPLY.to_vec()
        }),
        Err(err) => encode_error(&err),
    }
}

fn encode_error(err: &ServiceError) -> Vec<u8> {
    serde_json::to_vec(&ErrorResponse::from(err)).unwrap_or_else(|_| INTERNAL_ERROR_REPLY.to_vec())
}
