//! CI to Fleep webhook relay.
//!
//! Main entry point. Loads configuration, initializes logging and serves
//! until CTRL+C or SIGTERM.

use anyhow::{Context, Result};
use hookrelay_api::{AppState, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    init_tracing(&config.rust_log)?;

    info!("Starting webhook relay");
    info!(
        webhook_secret = %config.webhook_secret_masked(),
        fleep_hook_url = %config.fleep_hook_url,
        delivery_timeout_seconds = config.delivery_timeout_seconds,
        request_timeout = config.request_timeout,
        "Configuration loaded"
    );

    let addr = config.parse_server_addr()?;
    let state = AppState::from_config(&config)?;

    hookrelay_api::start_server(state, addr).await.context("HTTP server failed")?;

    info!("Webhook relay shutdown complete");
    Ok(())
}

/// Initializes tracing with the configured filter directives.
///
/// `directives` already reflects `RUST_LOG` when it is set.
fn init_tracing(directives: &str) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_new(directives)
        .with_context(|| format!("Invalid RUST_LOG filter: {directives}"))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()?;
    Ok(())
}
