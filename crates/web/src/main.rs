//! Tienda web server.
//!
//! Serves the product-list application, by default on `127.0.0.1:5000`.
//!
//! # Architecture
//!
//! - Axum web framework with Askama server-side templates
//! - Cookie sessions held in process memory
//! - Storage behind a trait with two engines: SQLite (via sqlx) and MongoDB
//!
//! The engine is picked exactly once, at startup, from `TIENDA_DB_ENGINE`;
//! every request path is identical across engines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tienda_web::{config::WebConfig, routes, state::AppState, storage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment (also loads .env, so RUST_LOG
    // from there is visible to the filter below)
    let config = WebConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tienda_web=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect the storage backend selected by the configuration
    let store = storage::connect(&config.database)
        .await
        .expect("Failed to connect storage backend");
    tracing::info!("Storage backend ready ({:?})", config.database.engine);

    // Build application state and router
    let state = AppState::new(store);
    let app = routes::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("tienda listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
