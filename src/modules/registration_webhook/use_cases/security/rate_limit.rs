use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::core::expect::ensure;
use crate::modules::registration_webhook::core::registration::{
    RegistrationRequest, unique_email,
};
use crate::shared::core::primitives::{STATUS_INTERNAL_SERVER_ERROR, STATUS_TOO_MANY_REQUESTS};
use crate::shell::state::HarnessState;
use std::collections::BTreeSet;

/// Send `burst_requests` submissions back to back and require some sign of
/// throttling in the statuses.
pub async fn rate_limiting(state: HarnessState) -> Result<(), ContractError> {
    let mut statuses = Vec::with_capacity(state.config.burst_requests);
    for index in 0..state.config.burst_requests {
        let request = RegistrationRequest::new(
            unique_email(&format!("ratelimit-{index}")),
            format!("Rate Limit User {index}"),
            &state.config.passphrase,
        );
        statuses.push(state.client.submit(&request).await?.status);
    }
    tracing::debug!(?statuses, "burst finished");

    ensure(shows_throttling(&statuses), || {
        format!(
            "expected 429, a server error or mixed statuses across {} requests, got {statuses:?}",
            statuses.len()
        )
    })
}

/// A 429, any 5xx, or more than one distinct status.
pub fn shows_throttling(statuses: &[u16]) -> bool {
    let distinct: BTreeSet<_> = statuses.iter().collect();
    statuses.contains(&STATUS_TOO_MANY_REQUESTS)
        || statuses.iter().any(|status| *status >= STATUS_INTERNAL_SERVER_ERROR)
        || distinct.len() > 1
}
