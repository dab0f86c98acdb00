use crate::modules::registration_webhook::adapters::outbound::webhook_client::WebhookClient;
use crate::shared::infrastructure::transport::WebhookTransport;
use crate::shared::infrastructure::transport::in_memory::InMemoryWebhook;
use crate::shell::config::ContractConfig;
use std::sync::Arc;
use std::time::Duration;

/// Shared, read-only state handed to every contract case.
#[derive(Clone)]
pub struct HarnessState {
    pub config: Arc<ContractConfig>,
    pub client: WebhookClient,
}

impl HarnessState {
    pub fn new(config: ContractConfig, transport: Arc<dyn WebhookTransport>) -> Self {
        let client = WebhookClient::new(
            transport,
            config.webhook_url.clone(),
            config.health_url(),
            config.request_timeout,
        );
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

/// Simulated webhook for `--dry-run`, tuned so the whole suite passes against it.
///
/// The rate limit lets `burst_requests` submissions through per second: the
/// cases before the rate limiting burst stay under it, the burst itself trips it.
pub fn dry_run_webhook(config: &ContractConfig) -> InMemoryWebhook {
    let mut webhook = InMemoryWebhook::new(config.passphrase.clone());
    webhook.set_health_path(config.health_path.clone());
    webhook.set_rate_limit(
        u32::try_from(config.burst_requests).unwrap_or(u32::MAX),
        Duration::from_secs(1),
    );
    webhook.set_slow_mode_delay(config.short_timeout + Duration::from_millis(500));
    webhook
}
