use anyhow::{Context, bail};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use webhook_contracts::modules::registration_webhook::runner::execute::{RunSummary, run_suite};
use webhook_contracts::modules::registration_webhook::runner::report::{
    list_cases, write_json, write_text,
};
use webhook_contracts::modules::registration_webhook::runner::suite::build_suite;
use webhook_contracts::shared::infrastructure::transport::WebhookTransport;
use webhook_contracts::shared::infrastructure::transport::http::HttpWebhookTransport;
use webhook_contracts::shell::cli::{Args, OutputFormat, init_tracing};
use webhook_contracts::shell::state::{HarnessState, dry_run_webhook};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.verbose);

    let suite = build_suite();
    let mut stdout = std::io::stdout().lock();

    if args.list {
        list_cases(&mut stdout, &suite)?;
        return Ok(());
    }

    let config = args.to_config();
    let transport: Arc<dyn WebhookTransport> = if args.dry_run {
        tracing::info!("dry run against the simulated webhook");
        Arc::new(dry_run_webhook(&config))
    } else {
        Arc::new(HttpWebhookTransport::new().context("failed to build the HTTP client")?)
    };
    tracing::info!(
        webhook = %config.webhook_url,
        health = %config.health_url(),
        "running contract suite"
    );
    let state = HarnessState::new(config, transport);

    let reports = run_suite(&state, &suite, args.filter.as_deref()).await;
    if reports.is_empty() {
        bail!(
            "no contract cases match filter {:?}",
            args.filter.unwrap_or_default()
        );
    }

    match args.format {
        OutputFormat::Text => write_text(&mut stdout, &reports)?,
        OutputFormat::Json => write_json(&mut stdout, &reports)?,
    }
    stdout.flush()?;

    if !RunSummary::from_reports(&reports).all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
