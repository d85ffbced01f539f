//! Server connection — WebSocket read loop with exponential-backoff
//! reconnect.
//!
//! Resume after a disconnect is stateless: nothing missed is replayed,
//! and the server's baseline event re-seeds the character on reconnect.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

use office_core::config::Config;
use office_core::events::AnimationEvent;

/// Connect, forward events, reconnect forever. Returns only when the
/// driver side of the channel is gone.
pub async fn run(config: Config, event_tx: mpsc::Sender<AnimationEvent>) {
    let initial = Duration::from_millis(config.reconnect_initial_ms);
    let max = Duration::from_millis(config.reconnect_max_ms);
    let mut backoff = initial;

    loop {
        match connect_async(&config.server_url).await {
            Ok((stream, _)) => {
                info!("Connected to {}", config.server_url);
                backoff = initial;

                let (_, mut read) = stream.split();
                while let Some(frame) = read.next().await {
                    match frame {
                        Ok(Message::Text(text)) => {
                            match serde_json::from_str::<AnimationEvent>(&text) {
                                Ok(event) => {
                                    if event_tx.send(event).await.is_err() {
                                        return;
                                    }
                                }
                                Err(e) => warn!("Skipping unparseable frame: {}", e),
                            }
                        }
                        Ok(Message::Close(_)) => break,
                        Ok(_) => {} // ping/pong/binary, ignore
                        Err(e) => {
                            warn!("WebSocket error: {}", e);
                            break;
                        }
                    }
                }
                warn!("Disconnected from {}", config.server_url);
            }
            Err(e) => {
                warn!("Connection to {} failed: {}", config.server_url, e);
            }
        }

        info!("Reconnecting in {} ms", backoff.as_millis());
        tokio::time::sleep(backoff).await;
        backoff = (backoff * 2).min(max);
    }
}
