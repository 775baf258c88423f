//! History configuration

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Number of undo steps kept when nothing else is configured
pub const DEFAULT_HISTORY_SIZE: usize = 50;

/// Construction-time settings for an [`ActionManager`](crate::ActionManager)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of groups on the undo stack; the oldest is dropped
    /// when a new one would exceed it
    pub history_size: usize,
}

impl HistoryConfig {
    /// Create a config, rejecting a zero history size
    pub fn new(history_size: usize) -> Result<Self, ConfigError> {
        let config = Self { history_size };
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_size == 0 {
            return Err(ConfigError::InvalidHistorySize(self.history_size));
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}
