//! office-server — Axum entry point.
//!
//! Receives agent hook payloads over HTTP, normalizes them into animation
//! events, and broadcasts them to every connected WebSocket client. An
//! idle tracker fills silent gaps with synthetic thinking/idle events.

mod server;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use office_core::config::Config;

use server::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = Config::load_or_default(&project_root);

    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
        config.port = port;
    }

    let state = Arc::new(AppState::new(&config));
    let state_for_shutdown = Arc::clone(&state);
    let app = server::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    eprintln!("\n  Event endpoint:  http://localhost:{}/event", config.port);
    eprintln!("  WebSocket:       ws://localhost:{}/ws", config.port);
    eprintln!("  Health check:    http://localhost:{}/health\n", config.port);
    eprintln!("  Waiting for events...\n");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind port");

    let shutdown = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received");
        state_for_shutdown.idle_tracker.shutdown().await;
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .expect("Server error");

    info!("Server stopped.");
}
