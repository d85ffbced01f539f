//! Event normalizer — maps a raw hook payload to an animation event.
//! Pure aside from stamping the wall-clock timestamp.

use crate::events::{now_ms, AnimationEvent, EventCategory};
use crate::types::{AnimationState, HookPayload};

/// Map a tool name to the animation that best represents using it.
/// Unknown tools degrade to thinking, never an error.
fn tool_animation(tool: &str) -> AnimationState {
    match tool {
        "Edit" | "Write" | "NotebookEdit" => AnimationState::Typing,
        "Read" | "Glob" => AnimationState::Reading,
        "Grep" | "WebSearch" => AnimationState::Searching,
        "Bash" => AnimationState::Terminal,
        "WebFetch" => AnimationState::Browsing,
        "Task" => AnimationState::Delegating,
        "AskUserQuestion" => AnimationState::Waiting,
        _ => AnimationState::Thinking,
    }
}

/// First `max` characters of a string field from the tool input.
fn truncated(input: &serde_json::Value, key: &str, max: usize) -> Option<String> {
    input
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.chars().take(max).collect())
}

/// Basename of a path field from the tool input.
fn file_name(input: &serde_json::Value, key: &str) -> Option<String> {
    input
        .get(key)
        .and_then(|v| v.as_str())
        .and_then(|p| p.rsplit('/').next())
        .map(String::from)
}

/// Best-effort human description of what the agent is doing. Absence is
/// valid: lifecycle events without a fixed string and tool events with no
/// input yield None.
fn description(payload: &HookPayload) -> Option<String> {
    match payload.event.as_str() {
        "SessionStart" => return Some("Starting session".into()),
        "SessionEnd" => return Some("Ending session".into()),
        "Stop" => return Some("Finished responding".into()),
        "Notification" => return Some("Waiting for user input".into()),
        _ => {}
    }

    let tool = payload.tool.as_deref()?;
    let input = payload.raw.tool_input.as_ref()?;

    let text = match tool {
        "Bash" => format!(
            "Running: {}",
            truncated(input, "command", 50).unwrap_or_else(|| "command".into())
        ),
        "Read" => format!(
            "Reading: {}",
            file_name(input, "file_path").unwrap_or_else(|| "file".into())
        ),
        "Edit" => format!(
            "Editing: {}",
            file_name(input, "file_path").unwrap_or_else(|| "file".into())
        ),
        "Write" => format!(
            "Writing: {}",
            file_name(input, "file_path").unwrap_or_else(|| "file".into())
        ),
        "Grep" => format!(
            "Searching for: {}",
            truncated(input, "pattern", 30).unwrap_or_else(|| "pattern".into())
        ),
        "Glob" => format!(
            "Finding files: {}",
            truncated(input, "pattern", usize::MAX).unwrap_or_else(|| "pattern".into())
        ),
        "WebFetch" => format!(
            "Fetching: {}",
            truncated(input, "url", 40).unwrap_or_else(|| "URL".into())
        ),
        "WebSearch" => format!(
            "Searching web: {}",
            truncated(input, "query", 30).unwrap_or_else(|| "query".into())
        ),
        "Task" => format!(
            "Delegating: {}",
            truncated(input, "description", usize::MAX).unwrap_or_else(|| "task".into())
        ),
        "AskUserQuestion" => "Asking a question".into(),
        other => format!("Using {}", other),
    };

    Some(text)
}

/// Normalize a hook payload into an animation event. Unrecognized event
/// names fall back to thinking; this never fails.
pub fn normalize(payload: &HookPayload) -> AnimationEvent {
    let animation = match payload.event.as_str() {
        "SessionStart" => AnimationState::Entering,
        "SessionEnd" => AnimationState::Leaving,
        "Stop" => AnimationState::Idle,
        "Notification" => AnimationState::Waiting,
        "PostToolUseFailure" => AnimationState::Error,
        "PostToolUse" => AnimationState::Success,
        "PreToolUse" => match payload.tool.as_deref() {
            Some(tool) => tool_animation(tool),
            None => AnimationState::Thinking,
        },
        "SubagentStart" => AnimationState::Delegating,
        "SubagentStop" => AnimationState::Thinking,
        _ => AnimationState::Thinking,
    };

    let category = match payload.event.as_str() {
        "Stop" | "SessionStart" | "SessionEnd" => EventCategory::StateChange,
        _ => EventCategory::Activity,
    };

    AnimationEvent {
        category,
        animation,
        tool: payload.tool.clone(),
        description: description(payload),
        timestamp: now_ms(),
        session_id: payload.raw.session_id.clone(),
    }
}
