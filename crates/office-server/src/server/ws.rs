//! WebSocket — fan out animation events to every connected client.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::{error, info};

use office_core::events::AnimationEvent;

use super::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/ws", get(ws_handler))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let mut rx = state.event_tx.subscribe();

    let total = state.client_count.fetch_add(1, Ordering::Relaxed) + 1;
    info!("WebSocket client connected (total: {})", total);

    // Seed the new client with the current state so it can draw the
    // character before any real event arrives.
    let baseline =
        AnimationEvent::state_change(state.idle_tracker.current_state().await, "Connected");
    if let Ok(json) = serde_json::to_string(&baseline) {
        if socket
            .send(axum::extract::ws::Message::Text(json.into()))
            .await
            .is_err()
        {
            state.client_count.fetch_sub(1, Ordering::Relaxed);
            return;
        }
    }

    loop {
        tokio::select! {
            // Broadcast events -> client
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        match serde_json::to_string(&event) {
                            Ok(json) => {
                                if socket.send(axum::extract::ws::Message::Text(json.into())).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                error!("Failed to serialize event: {}", e);
                            }
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        info!("WebSocket client lagged {} events", n);
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }
            // Incoming frames from the client (keep-alive)
            msg = socket.recv() => {
                match msg {
                    Some(Ok(_)) => {} // keep-alive, ignore content
                    _ => break,       // disconnected or error
                }
            }
        }
    }

    let total = state.client_count.fetch_sub(1, Ordering::Relaxed) - 1;
    info!("WebSocket client disconnected (total: {})", total);
}
