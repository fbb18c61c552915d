//! Serve command - expose the conversion over HTTP.

use clap::Args;
use console::style;
use tokio::net::TcpListener;
use tracing::info;

use crate::server;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let app = server::router(&config);
    let listener = TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;

    info!("Listening on {}", addr);
    eprintln!(
        "{} Listening on http://{}{}",
        style("ℹ").blue(),
        addr,
        server::ORDER_ROUTE
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
