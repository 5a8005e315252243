//! waypoint - game server
//!
//! Answers action packets from game clients over TCP.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use waypoint_server::{Config, Server, ServerConfig};

#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "Game server answering binary action packets")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "WAYPOINT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind to (overrides the configuration)
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Defaults, then the config file, then environment overrides
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path).map_err(|e| {
                tracing::error!("Failed to load config: {}", e);
                e
            })?;
            config.apply_env_overrides();
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        None => {
            tracing::info!("Using default configuration");
            Config::load()?
        }
    };

    if let Some(bind) = cli.bind {
        config.network.bind_addr = bind;
    }

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    tracing::info!("Starting waypoint server");
    tracing::info!("  Bind address: {}", config.network.bind_addr);
    tracing::info!("  Max connections: {}", config.network.max_connections);
    tracing::info!("  Max packet size: {} bytes", config.network.max_packet_size);
    tracing::info!(
        "  Spawn: map {} at ({}, {})",
        config.spawn.map_id,
        config.spawn.x,
        config.spawn.y
    );

    let server = Arc::new(Server::new(ServerConfig::from(&config)));

    // Spawn shutdown signal handler
    let shutdown_server = server.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Received shutdown signal, stopping server...");
        shutdown_server.shutdown();
    });

    // Run server (blocks until shutdown)
    server.run().await?;

    let stats = server.stats();
    tracing::info!(
        "Server stopped ({} connections, {} packets)",
        stats
            .connections_total
            .load(std::sync::atomic::Ordering::Relaxed),
        stats.packets_total.load(std::sync::atomic::Ordering::Relaxed)
    );
    Ok(())
}
