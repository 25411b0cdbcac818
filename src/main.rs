//! EmberCache server entry point.
//!
//! Reads the listen port from the `PORT` environment variable, builds the
//! shared cache, and accepts connections until the process is terminated.

use embercache::cache::LruCache;
use embercache::commands::CommandHandler;
use embercache::connection::{handle_connection, ConnectionStats};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Server configuration
struct Config {
    /// Host to bind to
    host: String,
    /// Port to listen on
    port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: embercache::DEFAULT_HOST.to_string(),
            port: embercache::DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Builds the configuration from the environment.
    ///
    /// `PORT` is the only knob: a decimal port number, with empty or unset
    /// falling back to the default. The binary takes no CLI arguments.
    fn from_env() -> Self {
        let mut config = Config::default();

        match std::env::var("PORT") {
            Ok(value) if value.is_empty() => {}
            Ok(value) => match value.parse() {
                Ok(port) => config.port = port,
                Err(_) => {
                    warn!(value = %value, "ignoring invalid PORT, using {}", config.port);
                }
            },
            Err(_) => {}
        }

        config
    }

    /// Returns the bind address as a string
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let config = Config::from_env();

    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    info!(
        "EmberCache v{} starting on {} ({} cores)",
        embercache::VERSION,
        config.bind_address(),
        cores
    );

    // The cache is an explicit value shared across all connections.
    let cache = Arc::new(LruCache::new(embercache::DEFAULT_CAPACITY));
    info!(
        capacity = cache.capacity(),
        shards = cache.shard_count(),
        "cache initialized"
    );

    let stats = Arc::new(ConnectionStats::new());

    // A failed bind is fatal.
    let listener = match TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {}", config.bind_address(), e);
            return Err(e.into());
        }
    };
    info!("listening on {}", config.bind_address());

    let shutdown = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        info!("shutdown signal received, stopping server...");
    };

    tokio::select! {
        _ = accept_loop(listener, cache, stats) => {}
        _ = shutdown => {}
    }

    info!("server shutdown complete");
    Ok(())
}

/// Main loop that accepts incoming connections
async fn accept_loop(listener: TcpListener, cache: Arc<LruCache>, stats: Arc<ConnectionStats>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let handler = CommandHandler::new(Arc::clone(&cache));
                let stats = Arc::clone(&stats);

                tokio::spawn(async move {
                    handle_connection(stream, addr, handler, stats).await;
                });
            }
            Err(e) => {
                error!("failed to accept connection: {}", e);
            }
        }
    }
}
