//! AnimationEvent — the wire type broadcast from the server to every
//! connected client via tokio::broadcast.

use serde::{Deserialize, Serialize};

use crate::types::AnimationState;

/// Whether an event reflects in-session tool activity or a lifecycle /
/// idle state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Activity,
    StateChange,
}

/// Normalized event sent to clients. Immutable once constructed; one
/// instance per emitted notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationEvent {
    #[serde(rename = "type")]
    pub category: EventCategory,
    pub animation: AnimationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Wall-clock unix milliseconds, stamped at normalization time.
    pub timestamp: i64,
    #[serde(
        rename = "sessionId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<String>,
}

impl AnimationEvent {
    /// Synthetic or lifecycle state-change event with no tool attached.
    pub fn state_change(animation: AnimationState, description: impl Into<String>) -> Self {
        Self {
            category: EventCategory::StateChange,
            animation,
            tool: None,
            description: Some(description.into()),
            timestamp: now_ms(),
            session_id: None,
        }
    }
}

/// Current wall-clock time in unix milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let event = AnimationEvent::state_change(AnimationState::Idle, "Idle");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "state_change");
        assert_eq!(json["animation"], "idle");
        assert_eq!(json["description"], "Idle");
        // Absent optionals are omitted entirely.
        assert!(json.get("tool").is_none());
        assert!(json.get("sessionId").is_none());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{
            "type": "activity",
            "animation": "typing",
            "timestamp": 1700000000000,
            "extra_field": {"nested": true}
        }"#;
        let event: AnimationEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.category, EventCategory::Activity);
        assert_eq!(event.animation, AnimationState::Typing);
        assert!(event.tool.is_none());
    }
}
