//! asyncchatd - AsyncChat multi-user TCP chat server.
//!
//! Clients speak newline-delimited text: `/`-prefixed lines are commands,
//! anything else is public chat.

mod cli;
mod config;
mod error;
mod handlers;
mod network;
mod state;
mod telemetry;

use crate::cli::Cli;
use crate::network::Gateway;
use crate::state::Hub;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    if let Err(errors) = config::validate(&config) {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        anyhow::bail!("invalid configuration: {joined}");
    }

    telemetry::init(config.audit.as_ref())?;

    info!(
        server = %config.server.name,
        audit = ?config.audit.as_ref().map(|a| &a.path),
        "Starting asyncchatd"
    );

    let hub = Arc::new(Hub::new(&config));
    let gateway = Gateway::bind(config.listen.address, hub).await?;

    gateway
        .run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "Failed to install Ctrl-C handler");
                std::future::pending::<()>().await;
            }
        })
        .await;

    info!("Server shutting down");
    Ok(())
}
