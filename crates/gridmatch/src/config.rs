//! Bot configuration, loaded from a JSON file at startup.

use std::path::Path;

use gridmatch_protocol::UserId;
use serde::{Deserialize, Serialize};

/// Errors loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not valid JSON for [`BotConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Startup configuration for a Gridmatch deployment.
///
/// Matches the JSON file an operator ships alongside the binary:
///
/// ```json
/// { "prefix": "!", "token": "...", "bot_user": 1234 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Command prefix, e.g. `"!"` for `!play @someone`.
    pub prefix: String,

    /// Credential for the chat service connection.
    pub token: String,

    /// The automated account's user id on the chat service. Its own
    /// reaction events must be recognized and ignored.
    pub bot_user: u64,
}

impl BotConfig {
    /// Loads the configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }

    /// Parses the configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The automated identity, typed for the session layer.
    pub fn automated_user(&self) -> UserId {
        UserId(self.bot_user)
    }
}
