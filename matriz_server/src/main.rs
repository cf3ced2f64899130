//! La Matriz API server.
//!
//! ```bash
//! # Run with config/matriz.toml (or defaults when it is absent)
//! matriz_server
//!
//! # Custom config file
//! MATRIZ_CONFIG=/etc/matriz.toml matriz_server
//!
//! # Debug logging
//! RUST_LOG=debug matriz_server
//! ```

use std::env;

use anyhow::{Context, Result};
use matriz_server::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use matriz_server::{create_router_with, AppState, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match ServerConfig::load_from_file(&config_path) {
        Ok(config) => {
            info!("Loaded configuration from {}", config_path);
            config
        }
        Err(err) => {
            warn!("Using default configuration ({}: {})", config_path, err);
            ServerConfig::default()
        }
    };

    let state = AppState::from_config(&config);
    state.load_catalog(&config.catalog_path);

    let app = create_router_with(state, config.log_requests, config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;
    info!("La Matriz API listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("La Matriz API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
