//! CLI argument parsing and logging setup.

use crate::shell::config::{
    ContractConfig, DEFAULT_BURST_REQUESTS, DEFAULT_CONCURRENCY, DEFAULT_HEALTH_PATH,
    DEFAULT_IDEMPOTENCY_DELAY_MS, DEFAULT_OVERSIZED_BYTES, DEFAULT_PASSPHRASE,
    DEFAULT_PROBE_ATTEMPTS, DEFAULT_PROBE_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SERVICE_URL, DEFAULT_SHORT_TIMEOUT_SECS, DEFAULT_WEBHOOK_URL,
};
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Contract tests for the registration form webhook.
#[derive(Parser, Debug)]
#[command(name = "webhook_contracts")]
#[command(about = "Contract tests for the registration form webhook")]
pub struct Args {
    /// Webhook endpoint receiving form submissions.
    #[arg(long, env = "WEBHOOK_URL", default_value = DEFAULT_WEBHOOK_URL)]
    pub webhook_url: String,

    /// Base URL of the automation platform hosting the webhook.
    #[arg(long, env = "N8N_URL", default_value = DEFAULT_SERVICE_URL)]
    pub service_url: String,

    /// Health endpoint path, relative to the service URL.
    #[arg(long, env = "HEALTH_PATH", default_value = DEFAULT_HEALTH_PATH)]
    pub health_path: String,

    /// Passphrase the webhook expects on valid submissions.
    #[arg(long, env = "FORM_PASSPHRASE", default_value = DEFAULT_PASSPHRASE)]
    pub passphrase: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Client-side timeout used by the timeout tolerance case, in seconds.
    #[arg(long, env = "SHORT_TIMEOUT_SECS", default_value_t = DEFAULT_SHORT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub short_timeout_secs: u64,

    /// Health polls before the service is declared unavailable.
    #[arg(long, env = "PROBE_ATTEMPTS", default_value_t = DEFAULT_PROBE_ATTEMPTS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub probe_attempts: u32,

    /// Pause between health polls, in milliseconds.
    #[arg(long, env = "PROBE_INTERVAL_MS", default_value_t = DEFAULT_PROBE_INTERVAL_MS)]
    pub probe_interval_ms: u64,

    /// Pause between the two identical submissions of the idempotency case.
    #[arg(long, env = "IDEMPOTENCY_DELAY_MS", default_value_t = DEFAULT_IDEMPOTENCY_DELAY_MS)]
    pub idempotency_delay_ms: u64,

    /// Worker pool size and request count for the concurrency case.
    #[arg(long, env = "CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY,
          value_parser = RangedU64ValueParser::<usize>::new().range(1..=64))]
    pub concurrency: usize,

    /// Sequential requests sent by the rate limiting case.
    #[arg(long, env = "BURST_REQUESTS", default_value_t = DEFAULT_BURST_REQUESTS,
          value_parser = RangedU64ValueParser::<usize>::new().range(2..))]
    pub burst_requests: usize,

    /// Size of the filler field in the oversized payload case.
    #[arg(long, env = "OVERSIZED_BYTES", default_value_t = DEFAULT_OVERSIZED_BYTES)]
    pub oversized_bytes: usize,

    /// Also run the special characters case.
    #[arg(long, env = "SPECIAL_CHARACTERS")]
    pub special_characters: bool,

    /// Run the suite against the built-in simulated webhook instead of the network.
    #[arg(long)]
    pub dry_run: bool,

    /// Run only cases whose `category/name` contains this text.
    #[arg(long, short)]
    pub filter: Option<String>,

    /// List available cases without running them.
    #[arg(long)]
    pub list: bool,

    /// Verbose output (can be repeated for more verbosity).
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format: text, json.
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

impl Args {
    pub fn to_config(&self) -> ContractConfig {
        ContractConfig {
            webhook_url: self.webhook_url.clone(),
            service_url: self.service_url.clone(),
            health_path: self.health_path.clone(),
            passphrase: self.passphrase.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            short_timeout: Duration::from_secs(self.short_timeout_secs),
            probe_attempts: self.probe_attempts,
            probe_interval: Duration::from_millis(self.probe_interval_ms),
            idempotency_delay: Duration::from_millis(self.idempotency_delay_ms),
            concurrency: self.concurrency,
            burst_requests: self.burst_requests,
            oversized_bytes: self.oversized_bytes,
            special_characters: self.special_characters,
        }
    }
}

/// Output format for case results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// JSON document for CI integration.
    Json,
}

/// Initialize tracing with the specified verbosity level. `RUST_LOG` wins when set.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "webhook_contracts=info",
        1 => "webhook_contracts=debug",
        _ => "webhook_contracts=trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
