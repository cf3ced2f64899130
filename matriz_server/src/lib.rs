//! # La Matriz Server
//!
//! HTTP boundary over [`matriz_core`]: a color similarity lookup backed by a
//! table precomputed at startup, and an upload endpoint that clusters a color
//! catalog and ranks color sequences by momentum.
//!
//! ```rust,no_run
//! use matriz_server::{create_router, AppState, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let state = AppState::from_config(&config);
//!     state.load_catalog(&config.catalog_path);
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_address).await.unwrap();
//!     axum::serve(listener, create_router(state)).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{create_router, create_router_with};
pub use state::{AppState, UsageSnapshot, UsageStats};
