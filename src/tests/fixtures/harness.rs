// Harness state wired to the in-memory simulated webhook, with delays cut down
// so case tests finish quickly.

use crate::shared::infrastructure::transport::in_memory::InMemoryWebhook;
use crate::shell::config::ContractConfig;
use crate::shell::state::HarnessState;
use std::sync::Arc;
use std::time::Duration;

pub fn fast_config() -> ContractConfig {
    ContractConfig {
        webhook_url: "http://sim/webhook/google-forms-webhook".into(),
        service_url: "http://sim".into(),
        request_timeout: Duration::from_secs(5),
        short_timeout: Duration::from_millis(100),
        probe_attempts: 3,
        probe_interval: Duration::ZERO,
        idempotency_delay: Duration::from_millis(10),
        burst_requests: 8,
        oversized_bytes: 20_000,
        ..ContractConfig::default()
    }
}

pub fn in_memory_state(webhook: InMemoryWebhook) -> HarnessState {
    HarnessState::new(fast_config(), Arc::new(webhook))
}

pub fn state_with(config: ContractConfig, webhook: InMemoryWebhook) -> HarnessState {
    HarnessState::new(config, Arc::new(webhook))
}

/// A simulated webhook that honours the contract. It does not throttle; rate
/// limiting tests add a limit themselves.
pub fn compliant_webhook() -> InMemoryWebhook {
    let mut webhook = InMemoryWebhook::new(fast_config().passphrase);
    webhook.set_slow_mode_delay(Duration::from_millis(500));
    webhook
}
