//! Idle tracker — emits synthetic thinking/idle state changes when the
//! agent goes quiet.
//!
//! Every real event cancels both pending timers before rearming, so at
//! most one timer per concern exists at any moment. A timer that fires
//! anyway re-checks staleness under the lock before emitting; the worst
//! case is a duplicate emission, which consumers re-apply harmlessly.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;

use crate::config::Config;
use crate::events::AnimationEvent;
use crate::types::AnimationState;

struct Inner {
    last_event: Instant,
    last_state: AnimationState,
    had_stop_event: bool,
    thinking_timer: Option<JoinHandle<()>>,
    idle_timer: Option<JoinHandle<()>>,
}

impl Inner {
    fn clear_timers(&mut self) {
        if let Some(handle) = self.thinking_timer.take() {
            handle.abort();
        }
        if let Some(handle) = self.idle_timer.take() {
            handle.abort();
        }
    }
}

pub struct IdleTracker {
    inner: Arc<Mutex<Inner>>,
    event_tx: broadcast::Sender<AnimationEvent>,
    thinking_timeout: Duration,
    idle_timeout: Duration,
}

impl IdleTracker {
    pub fn new(event_tx: broadcast::Sender<AnimationEvent>, config: &Config) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                last_event: Instant::now(),
                last_state: AnimationState::Idle,
                had_stop_event: false,
                thinking_timer: None,
                idle_timer: None,
            })),
            event_tx,
            thinking_timeout: config.thinking_timeout(),
            idle_timeout: config.idle_timeout(),
        }
    }

    /// Record a real event. Cancels pending timers, then arms the idle
    /// timer after a Stop, or the thinking timer for any other state that
    /// is not already terminal (idle/leaving).
    pub async fn on_event(&self, state: AnimationState, event_name: &str) {
        let mut inner = self.inner.lock().await;
        inner.last_event = Instant::now();
        inner.last_state = state;
        inner.clear_timers();

        if event_name == "Stop" {
            inner.had_stop_event = true;
            inner.idle_timer = Some(self.spawn_timer(AnimationState::Idle, self.idle_timeout));
        } else {
            inner.had_stop_event = false;
            if state != AnimationState::Idle && state != AnimationState::Leaving {
                inner.thinking_timer =
                    Some(self.spawn_timer(AnimationState::Thinking, self.thinking_timeout));
            }
        }
    }

    /// Single-shot decay timer: after `timeout` of silence, emit a
    /// synthetic state change. Updates last_state but never last_event,
    /// so a synthetic firing cannot sustain itself.
    fn spawn_timer(&self, state: AnimationState, timeout: Duration) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;

            let mut inner = inner.lock().await;
            if inner.last_event.elapsed() < timeout {
                return; // superseded by a fresh event
            }
            if state == AnimationState::Idle && !inner.had_stop_event {
                return;
            }

            inner.last_state = state;
            let description = match state {
                AnimationState::Idle => "Idle",
                _ => "Thinking...",
            };
            info!("idle tracker: no activity, falling back to {}", state);
            let _ = event_tx.send(AnimationEvent::state_change(state, description));
        })
    }

    /// Most recently observed or emitted animation state.
    pub async fn current_state(&self) -> AnimationState {
        self.inner.lock().await.last_state
    }

    /// Cancel any pending timers.
    pub async fn shutdown(&self) {
        self.inner.lock().await.clear_timers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventCategory;

    fn tracker() -> (IdleTracker, broadcast::Receiver<AnimationEvent>) {
        let (event_tx, rx) = broadcast::channel(16);
        (IdleTracker::new(event_tx, &Config::default()), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_silence_after_stop_emits_exactly_one_idle() {
        let (tracker, mut rx) = tracker();

        tracker.on_event(AnimationState::Idle, "Stop").await;
        tokio::time::sleep(Duration::from_millis(10_100)).await;

        let event = rx.try_recv().unwrap();
        assert_eq!(event.animation, AnimationState::Idle);
        assert_eq!(event.category, EventCategory::StateChange);
        assert_eq!(event.description.as_deref(), Some("Idle"));

        // Single-shot decay: no recurring heartbeat.
        tokio::time::sleep(Duration::from_millis(30_000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_silence_after_activity_emits_thinking() {
        let (tracker, mut rx) = tracker();

        tracker.on_event(AnimationState::Typing, "PreToolUse").await;
        tokio::time::sleep(Duration::from_millis(3_100)).await;

        let event = rx.try_recv().unwrap();
        assert_eq!(event.animation, AnimationState::Thinking);
        assert_eq!(event.category, EventCategory::StateChange);
        assert_eq!(tracker.current_state().await, AnimationState::Thinking);

        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_event_cancels_pending_timer() {
        let (tracker, mut rx) = tracker();

        tracker.on_event(AnimationState::Typing, "PreToolUse").await;
        tokio::time::sleep(Duration::from_millis(2_000)).await;
        tracker.on_event(AnimationState::Reading, "PreToolUse").await;

        // 4 s after the first event, but only 2 s after the second:
        // nothing fires.
        tokio::time::sleep(Duration::from_millis(2_000)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        let event = rx.try_recv().unwrap();
        assert_eq!(event.animation, AnimationState::Thinking);
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_after_stop_cancels_idle_timer() {
        let (tracker, mut rx) = tracker();

        tracker.on_event(AnimationState::Idle, "Stop").await;
        tokio::time::sleep(Duration::from_millis(5_000)).await;
        tracker.on_event(AnimationState::Typing, "PreToolUse").await;

        tokio::time::sleep(Duration::from_millis(20_000)).await;

        // The thinking fallback fires for the typing event, but the idle
        // timer armed by Stop never does.
        let event = rx.try_recv().unwrap();
        assert_eq!(event.animation, AnimationState::Thinking);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_states_arm_no_timer() {
        let (tracker, mut rx) = tracker();

        tracker.on_event(AnimationState::Leaving, "SessionEnd").await;
        tokio::time::sleep(Duration::from_millis(60_000)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(tracker.current_state().await, AnimationState::Leaving);
    }
}
