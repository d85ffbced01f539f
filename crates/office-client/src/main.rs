//! office-client — console client for watching the character.
//!
//! Connects to the server WebSocket, feeds received events through a
//! CharacterDriver, and prints every state transition. Sprite rendering
//! belongs to a graphical frontend; this client renders as log lines.

mod connection;

use std::path::PathBuf;

use tracing::info;

use office_core::config::Config;
use office_core::driver::CharacterDriver;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::load_or_default(&project_root);

    let driver = CharacterDriver::new(&config);
    let event_tx = driver.event_sender();
    let mut state_rx = driver.subscribe();
    tokio::spawn(driver.run());
    tokio::spawn(connection::run(config, event_tx));

    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                if let Some(target) = state.target_location {
                    info!(
                        "walking: {} -> {} ({})",
                        state.current_location, target, state.animation_state
                    );
                } else {
                    info!(
                        "{} at the {} ({})",
                        state.current_action, state.current_location, state.animation_state
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }
}
