//! Core types — animation states, office locations, character actions,
//! and the raw hook payload shape received from the agent.

use serde::{Deserialize, Serialize};

// ── Animation states ──

/// Semantic activity classification derived from an agent tool or
/// lifecycle event. Produced only by the normalizer or the idle tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationState {
    Idle,
    Thinking,
    Typing,
    Reading,
    Searching,
    Terminal,
    Browsing,
    Delegating,
    Waiting,
    Success,
    Error,
    Entering,
    Leaving,
}

impl std::fmt::Display for AnimationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AnimationState::Idle => "idle",
            AnimationState::Thinking => "thinking",
            AnimationState::Typing => "typing",
            AnimationState::Reading => "reading",
            AnimationState::Searching => "searching",
            AnimationState::Terminal => "terminal",
            AnimationState::Browsing => "browsing",
            AnimationState::Delegating => "delegating",
            AnimationState::Waiting => "waiting",
            AnimationState::Success => "success",
            AnimationState::Error => "error",
            AnimationState::Entering => "entering",
            AnimationState::Leaving => "leaving",
        };
        write!(f, "{}", s)
    }
}

impl AnimationState {
    /// All variants, for totality tests and enumeration.
    pub const ALL: [AnimationState; 13] = [
        AnimationState::Idle,
        AnimationState::Thinking,
        AnimationState::Typing,
        AnimationState::Reading,
        AnimationState::Searching,
        AnimationState::Terminal,
        AnimationState::Browsing,
        AnimationState::Delegating,
        AnimationState::Waiting,
        AnimationState::Success,
        AnimationState::Error,
        AnimationState::Entering,
        AnimationState::Leaving,
    ];
}

// ── Office locations ──

/// Named positions the character can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Door,
    Desk,
    Whiteboard,
    Coffee,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Location::Door => "door",
            Location::Desk => "desk",
            Location::Whiteboard => "whiteboard",
            Location::Coffee => "coffee",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Office dimensions (pixels, for any layout consumer).
pub const OFFICE_WIDTH: i32 = 320;
pub const OFFICE_HEIGHT: i32 = 480;

/// Fixed position for each location. One position per location, never
/// mutated at runtime.
pub fn location_position(location: Location) -> Position {
    match location {
        Location::Door => Position { x: 260, y: 380 },
        Location::Desk => Position { x: 80, y: 280 },
        Location::Whiteboard => Position { x: 160, y: 120 },
        Location::Coffee => Position { x: 260, y: 180 },
    }
}

// ── Character actions ──

/// Concrete rendering behavior, derived from an animation state.
/// Never set directly by external input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharacterAction {
    Walking,
    Typing,
    TypingGreen,
    Reading,
    Searching,
    Scrolling,
    Thinking,
    Waiting,
    Celebrating,
    Frustrated,
    Phone,
    CoffeeSip,
    Idle,
}

impl std::fmt::Display for CharacterAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CharacterAction::Walking => "walking",
            CharacterAction::Typing => "typing",
            CharacterAction::TypingGreen => "typing-green",
            CharacterAction::Reading => "reading",
            CharacterAction::Searching => "searching",
            CharacterAction::Scrolling => "scrolling",
            CharacterAction::Thinking => "thinking",
            CharacterAction::Waiting => "waiting",
            CharacterAction::Celebrating => "celebrating",
            CharacterAction::Frustrated => "frustrated",
            CharacterAction::Phone => "phone",
            CharacterAction::CoffeeSip => "coffee-sip",
            CharacterAction::Idle => "idle",
        };
        write!(f, "{}", s)
    }
}

// ── Raw hook payload ──

/// Raw hook event fields forwarded by the agent's hook script.
/// Unknown extras are ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookEvent {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<serde_json::Value>,
}

/// Incoming POST payload from the hook script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookPayload {
    pub event: String,
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub raw: HookEvent,
}
