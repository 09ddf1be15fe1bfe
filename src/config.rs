//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable for the artificial reply delay in milliseconds.
pub const ENV_REPLY_DELAY_MS: &str = "HEALTHCHAT_REPLY_DELAY_MS";
/// Environment variable pointing at a JSON profile draft.
pub const ENV_PROFILE: &str = "HEALTHCHAT_PROFILE";
/// Environment variable for the conversation event buffer size.
pub const ENV_EVENT_CAPACITY: &str = "HEALTHCHAT_EVENT_CAPACITY";

/// Chat runtime configuration.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Delay between a user turn and the assistant reply.
    /// Zero appends the reply inside `submit`.
    pub reply_delay: Duration,
    /// Optional profile draft that replaces the interactive wizard.
    pub profile_path: Option<PathBuf>,
    /// Broadcast capacity for conversation events.
    pub event_capacity: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(1000),
            profile_path: None,
            event_capacity: 256,
        }
    }
}

impl ChatConfig {
    /// Build a config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_REPLY_DELAY_MS) {
            let ms: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: ENV_REPLY_DELAY_MS.to_string(),
                message: format!("{e}"),
            })?;
            config.reply_delay = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup(ENV_EVENT_CAPACITY) {
            let capacity: usize = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: ENV_EVENT_CAPACITY.to_string(),
                message: format!("{e}"),
            })?;
            if capacity == 0 {
                return Err(ConfigError::InvalidValue {
                    key: ENV_EVENT_CAPACITY.to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
            config.event_capacity = capacity;
        }

        config.profile_path = lookup(ENV_PROFILE)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// Same config with a different reply delay.
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }
}
