use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CoreError;

/// Default cap on pathfinder requests per session.
pub const DEFAULT_MAX_ROUTES_TO_REQUEST: u32 = 100;

/// Configuration for a routing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Maximum number of pathfinder requests before the session gives up.
    pub max_routes_to_request: u32,
    /// Whether recorded exclusions are announced on the output sink.
    pub show_messages: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_routes_to_request: DEFAULT_MAX_ROUTES_TO_REQUEST,
            show_messages: true,
        }
    }
}

impl RoutingConfig {
    /// Parse and validate a configuration from TOML. Missing keys take
    /// their default values.
    pub fn from_toml_str(s: &str) -> Result<Self, CoreError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "routing config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_routes_to_request == 0 {
            return Err(CoreError::InvalidConfig(
                "max_routes_to_request must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
