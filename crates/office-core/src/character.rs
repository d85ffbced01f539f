//! Character state machine — pure reducer over CharacterState.
//!
//! The character walks between named office locations before performing
//! the action an animation state asks for. Events arriving mid-walk are
//! queued (latest wins) and applied after arrival. Timer firing is owned
//! by the driver; everything here is a pure function of (state, input).

use serde::{Deserialize, Serialize};

use crate::types::{AnimationState, CharacterAction, Location};

// ── Mapping tables ──

/// Which location an animation state belongs at.
pub fn location_for_state(state: AnimationState) -> Location {
    match state {
        AnimationState::Entering | AnimationState::Leaving => Location::Door,
        AnimationState::Idle => Location::Coffee,
        AnimationState::Thinking => Location::Whiteboard,
        AnimationState::Typing
        | AnimationState::Reading
        | AnimationState::Searching
        | AnimationState::Terminal
        | AnimationState::Browsing
        | AnimationState::Waiting
        | AnimationState::Error
        | AnimationState::Success
        | AnimationState::Delegating => Location::Desk,
    }
}

/// Which rendering action an animation state plays once in place.
pub fn action_for_state(state: AnimationState) -> CharacterAction {
    match state {
        AnimationState::Entering | AnimationState::Leaving => CharacterAction::Walking,
        AnimationState::Idle => CharacterAction::CoffeeSip,
        AnimationState::Thinking => CharacterAction::Thinking,
        AnimationState::Typing => CharacterAction::Typing,
        AnimationState::Reading => CharacterAction::Reading,
        AnimationState::Searching => CharacterAction::Searching,
        AnimationState::Terminal => CharacterAction::TypingGreen,
        AnimationState::Browsing => CharacterAction::Scrolling,
        AnimationState::Waiting => CharacterAction::Waiting,
        AnimationState::Error => CharacterAction::Frustrated,
        AnimationState::Success => CharacterAction::Celebrating,
        AnimationState::Delegating => CharacterAction::Phone,
    }
}

/// Where to walk for an animation state. Entering overrides the location
/// table: the character walks from the door to the desk, not to the door
/// it is already standing at.
pub fn transition_target(state: AnimationState, _current: Location) -> Location {
    match state {
        AnimationState::Entering => Location::Desk,
        AnimationState::Leaving => Location::Door,
        other => location_for_state(other),
    }
}

/// Actions that auto-revert after a short dwell.
pub fn is_brief_action(action: CharacterAction) -> bool {
    matches!(
        action,
        CharacterAction::Celebrating | CharacterAction::Frustrated
    )
}

// ── State ──

/// The character's full observable state. Snapshots of this are what the
/// rendering layer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterState {
    pub current_location: Location,
    pub target_location: Option<Location>,
    pub current_action: CharacterAction,
    pub is_walking: bool,
    pub animation_state: AnimationState,
    pub queued_state: Option<AnimationState>,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            current_location: Location::Door,
            target_location: None,
            current_action: CharacterAction::Idle,
            is_walking: false,
            animation_state: AnimationState::Idle,
            queued_state: None,
        }
    }
}

/// Inputs to the reducer. SetAnimationState and QueueState come from
/// incoming events; ArriveAtLocation and ProcessQueuedState are driven by
/// the driver's timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterTransition {
    SetAnimationState(AnimationState),
    QueueState(AnimationState),
    ArriveAtLocation(Location),
    ProcessQueuedState,
}

/// Enter a new animation state from rest: walk first if the target
/// location differs, otherwise apply the action in place.
fn apply_state(state: &CharacterState, animation: AnimationState) -> CharacterState {
    let target = transition_target(animation, state.current_location);

    if target != state.current_location {
        CharacterState {
            animation_state: animation,
            target_location: Some(target),
            is_walking: true,
            current_action: CharacterAction::Walking,
            queued_state: None,
            ..state.clone()
        }
    } else {
        CharacterState {
            animation_state: animation,
            target_location: None,
            is_walking: false,
            current_action: action_for_state(animation),
            queued_state: None,
            ..state.clone()
        }
    }
}

/// Pure reducer. Applied atomically; no two transitions interleave.
pub fn reduce(state: &CharacterState, transition: CharacterTransition) -> CharacterState {
    match transition {
        CharacterTransition::SetAnimationState(animation) => apply_state(state, animation),

        CharacterTransition::QueueState(animation) => CharacterState {
            // Latest wins: a queued state already present is overwritten.
            queued_state: Some(animation),
            ..state.clone()
        },

        CharacterTransition::ArriveAtLocation(location) => CharacterState {
            current_location: location,
            target_location: None,
            is_walking: false,
            // Re-derive from the state recorded at walk start, not from
            // anything queued since.
            current_action: action_for_state(state.animation_state),
            ..state.clone()
        },

        CharacterTransition::ProcessQueuedState => match state.queued_state {
            Some(queued) => apply_state(state, queued),
            None => state.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_tables_total() {
        // Exhaustive matches guarantee this at compile time; the loop
        // pins the documented table values.
        for state in AnimationState::ALL {
            let _ = location_for_state(state);
            let _ = action_for_state(state);
            let _ = transition_target(state, Location::Door);
        }
        assert_eq!(location_for_state(AnimationState::Idle), Location::Coffee);
        assert_eq!(
            location_for_state(AnimationState::Thinking),
            Location::Whiteboard
        );
        assert_eq!(location_for_state(AnimationState::Typing), Location::Desk);
        assert_eq!(
            action_for_state(AnimationState::Terminal),
            CharacterAction::TypingGreen
        );
        assert_eq!(
            action_for_state(AnimationState::Delegating),
            CharacterAction::Phone
        );
    }

    #[test]
    fn test_entering_walks_to_desk_not_door() {
        // The location table puts entering at the door, but the walk
        // target is always the desk.
        assert_eq!(location_for_state(AnimationState::Entering), Location::Door);
        for current in [
            Location::Door,
            Location::Desk,
            Location::Whiteboard,
            Location::Coffee,
        ] {
            assert_eq!(
                transition_target(AnimationState::Entering, current),
                Location::Desk
            );
        }
        assert_eq!(
            transition_target(AnimationState::Leaving, Location::Desk),
            Location::Door
        );
    }

    #[test]
    fn test_set_state_walks_when_location_differs() {
        let state = CharacterState {
            current_location: Location::Coffee,
            ..Default::default()
        };
        let next = reduce(
            &state,
            CharacterTransition::SetAnimationState(AnimationState::Typing),
        );
        assert!(next.is_walking);
        assert_eq!(next.current_action, CharacterAction::Walking);
        assert_eq!(next.target_location, Some(Location::Desk));
        assert_eq!(next.animation_state, AnimationState::Typing);
        // Location only changes on arrival.
        assert_eq!(next.current_location, Location::Coffee);
        assert_eq!(next.queued_state, None);
    }

    #[test]
    fn test_set_state_applies_in_place_when_location_matches() {
        let state = CharacterState {
            current_location: Location::Desk,
            ..Default::default()
        };
        let next = reduce(
            &state,
            CharacterTransition::SetAnimationState(AnimationState::Error),
        );
        assert!(!next.is_walking);
        assert_eq!(next.target_location, None);
        assert_eq!(next.current_action, CharacterAction::Frustrated);
    }

    #[test]
    fn test_arrival_re_derives_action_from_recorded_state() {
        let state = CharacterState {
            current_location: Location::Coffee,
            ..Default::default()
        };
        let walking = reduce(
            &state,
            CharacterTransition::SetAnimationState(AnimationState::Typing),
        );
        let arrived = reduce(&walking, CharacterTransition::ArriveAtLocation(Location::Desk));
        assert_eq!(arrived.current_location, Location::Desk);
        assert!(!arrived.is_walking);
        assert_eq!(arrived.target_location, None);
        assert_eq!(arrived.current_action, CharacterAction::Typing);
    }

    #[test]
    fn test_queueing_law() {
        // handle A → walk, handle B mid-walk → queued, arrive, process:
        // final animation_state is B and the queue is cleared.
        let state = CharacterState {
            current_location: Location::Coffee,
            ..Default::default()
        };
        let walking = reduce(
            &state,
            CharacterTransition::SetAnimationState(AnimationState::Typing),
        );
        let queued = reduce(
            &walking,
            CharacterTransition::QueueState(AnimationState::Searching),
        );
        assert!(queued.is_walking);
        assert_eq!(queued.queued_state, Some(AnimationState::Searching));

        let arrived = reduce(&queued, CharacterTransition::ArriveAtLocation(Location::Desk));
        let processed = reduce(&arrived, CharacterTransition::ProcessQueuedState);
        assert_eq!(processed.animation_state, AnimationState::Searching);
        assert_eq!(processed.queued_state, None);
        assert_eq!(processed.current_action, CharacterAction::Searching);
    }

    #[test]
    fn test_queue_overwrite_keeps_latest() {
        // Intentional lossy behavior: intermediate events arriving during
        // a walk are dropped, only the most recent survives.
        let walking = CharacterState {
            current_location: Location::Coffee,
            target_location: Some(Location::Desk),
            is_walking: true,
            current_action: CharacterAction::Walking,
            animation_state: AnimationState::Typing,
            queued_state: None,
        };
        let first = reduce(
            &walking,
            CharacterTransition::QueueState(AnimationState::Reading),
        );
        let second = reduce(
            &first,
            CharacterTransition::QueueState(AnimationState::Terminal),
        );
        assert_eq!(second.queued_state, Some(AnimationState::Terminal));
    }

    #[test]
    fn test_process_empty_queue_is_noop() {
        let state = CharacterState {
            current_location: Location::Desk,
            ..Default::default()
        };
        assert_eq!(reduce(&state, CharacterTransition::ProcessQueuedState), state);
    }

    #[test]
    fn test_idempotent_when_not_walking() {
        // Same event twice from rest lands on the same state both times.
        let state = CharacterState {
            current_location: Location::Desk,
            ..Default::default()
        };
        let once = reduce(
            &state,
            CharacterTransition::SetAnimationState(AnimationState::Reading),
        );
        let twice = reduce(
            &once,
            CharacterTransition::SetAnimationState(AnimationState::Reading),
        );
        assert_eq!(once, twice);
    }
}
