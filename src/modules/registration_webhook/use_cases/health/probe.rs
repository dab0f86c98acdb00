use crate::modules::registration_webhook::adapters::outbound::webhook_client::WebhookClient;
use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::core::expect::expect_status;
use crate::shared::core::primitives::{HEALTHY, STATUS_OK};
use crate::shell::state::HarnessState;
use std::time::Duration;

pub const PROBE_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(2);

/// Poll the health endpoint until it answers 200, pausing `interval` between
/// attempts. Returns the attempt number that succeeded.
pub async fn wait_for_service(
    client: &WebhookClient,
    attempts: u32,
    interval: Duration,
) -> Result<u32, ContractError> {
    for attempt in 1..=attempts {
        match client.health(PROBE_ATTEMPT_TIMEOUT).await {
            Ok(reply) if reply.status == STATUS_OK => {
                tracing::debug!(attempt, url = client.health_url(), "service is up");
                return Ok(attempt);
            }
            Ok(reply) => {
                tracing::debug!(attempt, status = reply.status, "service not ready");
            }
            Err(error) => {
                tracing::debug!(attempt, %error, "service not reachable");
            }
        }
        if attempt < attempts {
            tokio::time::sleep(interval).await;
        }
    }
    Err(ContractError::ServiceUnavailable {
        url: client.health_url().to_string(),
        attempts,
    })
}

pub async fn health_check(state: HarnessState) -> Result<(), ContractError> {
    let reply = state.client.health(state.config.request_timeout).await?;
    expect_status(&reply, &HEALTHY, "health endpoint")
}
