mod config;
mod mcp;
mod server;

use anyhow::Result;
use clap::Parser;
use config::Config;
use mcp::stdio::Stopped;
use server::Server;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Exits with a usage diagnostic when the vault path is not configured.
    let config = Config::parse();

    // stdout carries the protocol; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if !config.vault_path.is_dir() {
        tracing::warn!(
            "Vault path {} is not a directory; tool calls will fail until it exists",
            config.vault_path.display()
        );
    }

    let server = Arc::new(Server::new(config.vault_path));
    tracing::info!(
        "Vault Weaver MCP server running on stdio (vault: {})",
        server.vault().root().display()
    );

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    match mcp::stdio::serve_until(server, tokio::io::stdin(), tokio::io::stdout(), shutdown)
        .await?
    {
        Stopped::InputClosed => Ok(()),
        Stopped::Shutdown => {
            tracing::info!("Received Ctrl-C, shutting down");
            // The stdin reader thread cannot be cancelled; don't wait on it.
            std::process::exit(0);
        }
    }
}
