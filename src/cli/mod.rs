// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use tracing::info;

use crate::api::{start_server, AppState};
use crate::preview::{PreviewService, ResolverConfig};

/// Link preview resolver
#[derive(Parser, Debug)]
#[command(name = "teaser")]
#[command(version)]
#[command(about = "Resolves URLs into link preview material", long_about = None)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Resolve a single URL and print the material as JSON
    Resolve(ResolveArgs),
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// URL to resolve
    pub url: String,
}

impl Cli {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = ResolverConfig::from_env();
    config.validate().map_err(|e| anyhow!("invalid configuration: {}", e))?;

    let service = PreviewService::new(&config)?;

    match cli.command {
        None | Some(Commands::Serve) => {
            start_server(cli.addr(), AppState::new(service), shutdown_signal()).await
        }
        Some(Commands::Resolve(args)) => {
            let material = service.resolve_url(&args.url).await?;
            println!("{}", serde_json::to_string_pretty(&material)?);
            Ok(())
        }
    }
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, exiting gracefully..."),
        _ = terminate => info!("received SIGTERM, exiting gracefully..."),
    }
}
