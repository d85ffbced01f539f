//! Character driver — owns a CharacterState and runs as an independent
//! tokio task, one per connected client.
//!
//! Incoming animation events arrive on an mpsc channel; every applied
//! transition publishes a fresh snapshot on a watch channel for the
//! rendering layer. The walk and brief-action timers live as deadlines
//! inside the one select loop, so no two transitions ever interleave and
//! at most one timer per concern is pending.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::character::{is_brief_action, reduce, CharacterState, CharacterTransition};
use crate::config::Config;
use crate::events::AnimationEvent;
use crate::types::AnimationState;

pub struct CharacterDriver {
    state: CharacterState,
    walk_duration: Duration,
    brief_dwell: Duration,

    event_rx: Option<mpsc::Receiver<AnimationEvent>>,
    event_tx: mpsc::Sender<AnimationEvent>,
    state_tx: watch::Sender<CharacterState>,

    walk_deadline: Option<Instant>,
    dwell_deadline: Option<Instant>,
}

impl CharacterDriver {
    pub fn new(config: &Config) -> Self {
        let (event_tx, event_rx) = mpsc::channel(64);
        let (state_tx, _) = watch::channel(CharacterState::default());

        Self {
            state: CharacterState::default(),
            walk_duration: config.walk_duration(),
            brief_dwell: config.brief_action(),
            event_rx: Some(event_rx),
            event_tx,
            state_tx,
            walk_deadline: None,
            dwell_deadline: None,
        }
    }

    /// Sender for feeding animation events into the driver.
    pub fn event_sender(&self) -> mpsc::Sender<AnimationEvent> {
        self.event_tx.clone()
    }

    /// Subscribe to character state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<CharacterState> {
        self.state_tx.subscribe()
    }

    /// Run until the event channel closes.
    pub async fn run(mut self) {
        let mut rx = match self.event_rx.take() {
            Some(rx) => rx,
            None => return,
        };

        loop {
            let walk_deadline = self.walk_deadline;
            let dwell_deadline = self.dwell_deadline;

            tokio::select! {
                maybe_event = rx.recv() => {
                    match maybe_event {
                        Some(event) => self.handle_event(event),
                        None => break,
                    }
                }

                _ = async { sleep_until(walk_deadline.unwrap()).await },
                        if walk_deadline.is_some() => {
                    self.walk_deadline = None;
                    self.on_walk_complete();
                }

                _ = async { sleep_until(dwell_deadline.unwrap()).await },
                        if dwell_deadline.is_some() => {
                    self.dwell_deadline = None;
                    self.on_dwell_expired();
                }
            }
        }

        debug!("character driver stopped");
    }

    /// Events arriving mid-walk are queued (latest wins); otherwise they
    /// are applied immediately.
    fn handle_event(&mut self, event: AnimationEvent) {
        if self.state.is_walking {
            self.apply(CharacterTransition::QueueState(event.animation));
        } else {
            self.apply(CharacterTransition::SetAnimationState(event.animation));
        }
    }

    fn on_walk_complete(&mut self) {
        // The target can only be gone if a superseding transition already
        // ended the walk; in that case the deadline is stale, do nothing.
        let Some(target) = self.state.target_location else {
            return;
        };
        self.apply(CharacterTransition::ArriveAtLocation(target));

        if self.state.queued_state.is_some() {
            self.apply(CharacterTransition::ProcessQueuedState);
        }
    }

    fn on_dwell_expired(&mut self) {
        // After a brief action runs out, fall back to whatever was queued,
        // or to thinking when nothing is pending.
        if self.state.queued_state.is_some() {
            self.apply(CharacterTransition::ProcessQueuedState);
        } else {
            self.apply(CharacterTransition::SetAnimationState(
                AnimationState::Thinking,
            ));
        }
    }

    fn apply(&mut self, transition: CharacterTransition) {
        let next = reduce(&self.state, transition);

        // Walk started: arm the walk timer, nothing else may dwell.
        if next.is_walking && !self.state.is_walking {
            self.walk_deadline = Some(Instant::now() + self.walk_duration);
        }

        // Brief actions dwell once; re-applying the same action keeps the
        // original deadline.
        if !next.is_walking && is_brief_action(next.current_action) {
            if next.current_action != self.state.current_action {
                self.dwell_deadline = Some(Instant::now() + self.brief_dwell);
            }
        } else {
            self.dwell_deadline = None;
        }

        if next != self.state {
            debug!(
                location = %next.current_location,
                action = %next.current_action,
                walking = next.is_walking,
                "character transition"
            );
        }

        let _ = self.state_tx.send(next.clone());
        self.state = next;
    }
}
