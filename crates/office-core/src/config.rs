//! Configuration — YAML config + env var overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP + WebSocket port the server binds.
    #[serde(default = "default_port")]
    pub port: u16,

    /// WebSocket URL the client connects to.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// How long a walk between locations takes.
    #[serde(default = "default_walk_duration")]
    pub walk_duration_ms: u64,

    /// Dwell before a brief action (celebrating/frustrated) auto-reverts.
    #[serde(default = "default_brief_action")]
    pub brief_action_ms: u64,

    /// Silence window before a synthetic thinking event.
    #[serde(default = "default_thinking_timeout")]
    pub thinking_timeout_ms: u64,

    /// Silence window after a Stop event before a synthetic idle event.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_ms: u64,

    /// Client reconnect backoff, initial delay.
    #[serde(default = "default_reconnect_initial")]
    pub reconnect_initial_ms: u64,

    /// Client reconnect backoff, cap.
    #[serde(default = "default_reconnect_max")]
    pub reconnect_max_ms: u64,
}

fn default_port() -> u16 {
    3001
}
fn default_server_url() -> String {
    "ws://127.0.0.1:3001/ws".into()
}
fn default_walk_duration() -> u64 {
    800
}
fn default_brief_action() -> u64 {
    1500
}
fn default_thinking_timeout() -> u64 {
    3000
}
fn default_idle_timeout() -> u64 {
    10000
}
fn default_reconnect_initial() -> u64 {
    1000
}
fn default_reconnect_max() -> u64 {
    30000
}

impl Config {
    /// Load config from a YAML file with env var overrides.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let mut config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config.yaml")?;

        if let Ok(p) = std::env::var("OFFICE_PORT") {
            config.port = p
                .parse()
                .with_context(|| format!("Invalid OFFICE_PORT: {}", p))?;
        }
        if let Ok(url) = std::env::var("OFFICE_SERVER_URL") {
            config.server_url = url;
        }

        if config.reconnect_initial_ms > config.reconnect_max_ms {
            anyhow::bail!(
                "reconnect_initial_ms ({}) exceeds reconnect_max_ms ({})",
                config.reconnect_initial_ms,
                config.reconnect_max_ms
            );
        }

        Ok(config)
    }

    /// Load from project_root/config.yaml, falling back to defaults if the
    /// file is missing or invalid.
    pub fn load_or_default(project_root: &Path) -> Self {
        Self::load(&project_root.join("config.yaml")).unwrap_or_default()
    }

    pub fn walk_duration(&self) -> Duration {
        Duration::from_millis(self.walk_duration_ms)
    }

    pub fn brief_action(&self) -> Duration {
        Duration::from_millis(self.brief_action_ms)
    }

    pub fn thinking_timeout(&self) -> Duration {
        Duration::from_millis(self.thinking_timeout_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            server_url: default_server_url(),
            walk_duration_ms: default_walk_duration(),
            brief_action_ms: default_brief_action(),
            thinking_timeout_ms: default_thinking_timeout(),
            idle_timeout_ms: default_idle_timeout(),
            reconnect_initial_ms: default_reconnect_initial(),
            reconnect_max_ms: default_reconnect_max(),
        }
    }
}
