use std::time::Duration;

pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5679/webhook/google-forms-webhook";
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5679";
pub const DEFAULT_HEALTH_PATH: &str = "/healthz";
pub const DEFAULT_PASSPHRASE: &str = "spse2025";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SHORT_TIMEOUT_SECS: u64 = 2;
pub const DEFAULT_PROBE_ATTEMPTS: u32 = 30;
pub const DEFAULT_PROBE_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_IDEMPOTENCY_DELAY_MS: u64 = 2_000;
pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_BURST_REQUESTS: usize = 20;
pub const DEFAULT_OVERSIZED_BYTES: usize = 10_000;

/// Read-only settings shared by every contract case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    pub webhook_url: String,
    pub service_url: String,
    pub health_path: String,
    pub passphrase: String,
    pub request_timeout: Duration,
    pub short_timeout: Duration,
    pub probe_attempts: u32,
    pub probe_interval: Duration,
    pub idempotency_delay: Duration,
    pub concurrency: usize,
    pub burst_requests: usize,
    pub oversized_bytes: usize,
    pub special_characters: bool,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            service_url: DEFAULT_SERVICE_URL.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            passphrase: DEFAULT_PASSPHRASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            short_timeout: Duration::from_secs(DEFAULT_SHORT_TIMEOUT_SECS),
            probe_attempts: DEFAULT_PROBE_ATTEMPTS,
            probe_interval: Duration::from_millis(DEFAULT_PROBE_INTERVAL_MS),
            idempotency_delay: Duration::from_millis(DEFAULT_IDEMPOTENCY_DELAY_MS),
            concurrency: DEFAULT_CONCURRENCY,
            burst_requests: DEFAULT_BURST_REQUESTS,
            oversized_bytes: DEFAULT_OVERSIZED_BYTES,
            special_characters: false,
        }
    }
}

impl ContractConfig {
    pub fn health_url(&self) -> String {
        let base = self.service_url.trim_end_matches('/');
        if self.health_path.starts_with('/') {
            format!("{base}{}", self.health_path)
        } else {
            format!("{base}/{}", self.health_path)
        }
    }
}
