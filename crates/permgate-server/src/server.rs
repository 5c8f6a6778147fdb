//! Service lifecycle: serve until the subscriptions close or a shutdown
//! signal arrives.

use crate::bootstrap::Bootstrap;
use crate::dispatcher;
use crate::services::ServiceState;

pub struct PermgateServer {
    client: async_nats::Client,
    state: ServiceState,
    queue_group: String,
}

impl PermgateServer {
    #[must_use]
    pub fn new(bootstrap: Bootstrap, queue_group: String) -> Self {
        Self {
            client: bootstrap.client,
            state: bootstrap.state,
            queue_group,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tokio::select! {
            result = dispatcher::run(self.client, self.state, self.queue_group) => {
                result?;
            }
            _ = shutdown_signal() => {}
        }
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
