//! Web server — Axum router + shared state.

pub mod api;
pub mod ws;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use axum::Router;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;

use office_core::config::Config;
use office_core::events::AnimationEvent;
use office_core::idle::IdleTracker;

/// Shared application state: the broadcast channel every WebSocket client
/// subscribes to, and the idle tracker feeding synthetic events into it.
pub struct AppState {
    pub event_tx: broadcast::Sender<AnimationEvent>,
    pub idle_tracker: IdleTracker,
    pub client_count: AtomicUsize,
    pub port: u16,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        let idle_tracker = IdleTracker::new(event_tx.clone(), config);
        Self {
            event_tx,
            idle_tracker,
            client_count: AtomicUsize::new(0),
            port: config.port,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::very_permissive();

    Router::new()
        .merge(api::routes())
        .merge(ws::routes())
        .layer(cors)
        .with_state(state)
}
