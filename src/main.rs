//! Combined-data service.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────┐
//!                     │                 combined-data                 │
//!  GET /combinedData  │  ┌────────┐   ┌────────────┐   ┌─────────┐    │   comments
//!  ───────────────────┼─▶│  http  │──▶│ aggregator │──▶│ fetcher │◀───┼── posts
//!                     │  │ server │   └─────┬──────┘   └─────────┘    │   users
//!  JSON / 500 text    │  └────────┘         ▼                         │
//!  ◀──────────────────┼──────────────── joiner                        │
//!                     │                                               │
//!                     │  config · observability · lifecycle           │
//!                     └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use combined_data::cli::Cli;
use combined_data::config::{resolve_config, ConfigWatcher};
use combined_data::lifecycle::{shutdown_on_signal, Shutdown};
use combined_data::observability::{logging, metrics};
use combined_data::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = cli.overrides();

    let config = resolve_config(cli.config.as_deref(), &overrides)?;
    logging::init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "combined-data starting");
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        comments_url = %config.upstream.comments_url,
        posts_url = %config.upstream.posts_url,
        users_url = %config.upstream.users_url,
        fetch_timeout_secs = config.timeouts.fetch_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher must outlive the server; without --watch the sender is
    // dropped and the update stream simply ends.
    let (_watcher, config_updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path, overrides.clone());
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown_on_signal(shutdown));

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
