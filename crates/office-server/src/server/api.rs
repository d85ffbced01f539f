//! REST endpoints — hook event ingestion plus health/status probes.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{error, info};

use office_core::normalizer::normalize;
use office_core::types::HookPayload;

use super::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/event", post(post_event))
        .route("/health", get(get_health))
        .route("/status", get(get_status))
}

/// Ingest a hook payload: normalize, feed the idle tracker, broadcast.
/// A malformed body is logged and rejected with 400; nothing else
/// changes, and no payload content can crash the server.
async fn post_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<HookPayload>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(payload) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            error!("Discarding malformed hook payload: {}", rejection);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"status": "error", "message": "Invalid payload"})),
            );
        }
    };

    match payload.tool.as_deref() {
        Some(tool) => info!("event: {} [{}]", payload.event, tool),
        None => info!("event: {}", payload.event),
    }

    let event = normalize(&payload);
    match event.description.as_deref() {
        Some(description) => info!("anim: -> {}: {}", event.animation, description),
        None => info!("anim: -> {}", event.animation),
    }

    state.idle_tracker.on_event(event.animation, &payload.event).await;

    // No receivers is fine; events are fire-and-forget.
    let _ = state.event_tx.send(event.clone());

    (
        StatusCode::OK,
        Json(json!({"status": "ok", "animation": event.animation})),
    )
}

async fn get_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "clients": state.client_count.load(Ordering::Relaxed),
        "currentState": state.idle_tracker.current_state().await,
    }))
}

async fn get_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "port": state.port,
        "connectedClients": state.client_count.load(Ordering::Relaxed),
        "currentAnimation": state.idle_tracker.current_state().await,
    }))
}
