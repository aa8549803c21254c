//! LINE alert relay binary.
//!
//! Receives LINE webhooks and fall alerts, and pushes alerts to recipients.

use anyhow::Context;
use clap::Parser;
use relay_server::{Cli, RecipientConfig, RelayConfig, RelayServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::try_from(Cli::parse()).context("invalid configuration")?;

    info!("Starting LINE alert relay on {}", config.bind_addr);
    info!("  Webhook endpoint: http://{}/callback", config.bind_addr);
    info!("  Alert endpoint:   http://{}/alert", config.bind_addr);
    match &config.recipients {
        RecipientConfig::Registry => {
            info!(admin = %config.admin, "alerts go to the managed contact list");
        }
        RecipientConfig::Single(recipient) => {
            info!(recipient = %recipient, "alerts go to a single fixed recipient");
        }
    }

    let server = RelayServer::from_config(&config).context("failed to build relay server")?;

    server
        .serve_with_shutdown(config.bind_addr, shutdown_signal())
        .await
        .context("relay server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
