use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use order_guard::web::{router, AppState};
use order_guard::{logging, Config};

/// Serve orders over HTTP, disclosing each one only to its owner.
#[derive(Debug, Parser)]
#[command(name = "order-guard", version, about)]
struct Args {
    /// JSON configuration file. Built-in sample data is used when omitted.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configured address's port.
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(port) = args.port {
        config.listen.set_port(port);
    }

    logging::init(&config.log_filter);

    let listen = config.listen;
    let state = AppState::from_config(config).context("building order store")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("binding {}", listen))?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
