//! Configuration loading and management

use std::time::Duration;

use crate::conversation::ScriptResource;

/// Environment override for the idle timeout, in whole seconds
const IDLE_TIMEOUT_ENV: &str = "MAP_MENU_IDLE_TIMEOUT_SECS";

/// Menu configuration
#[derive(Debug, Clone)]
pub struct MenuConfig {
    /// Silence window before auto-navigating back to the start checkpoint
    pub idle_timeout: Duration,

    /// Script variable receiving the opening proposal sentence
    pub proposal_variable: String,

    /// Proposal spoken when a stored map exists
    pub prompt_with_map: String,

    /// Proposal spoken when no map exists yet
    pub prompt_no_map: String,

    /// Dialogue script resource driving the menu
    pub script: ScriptResource,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(5),
            proposal_variable: "proposal".to_string(),
            prompt_with_map:
                "Hi! I already have a map of this place. Shall I use it, or create a new one?"
                    .to_string(),
            prompt_no_map: "Hi! I don't know this place yet. Shall I create a map?".to_string(),
            script: ScriptResource::new("menu"),
        }
    }
}

/// Errors raised while loading the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid MAP_MENU_IDLE_TIMEOUT_SECS value: {value}")]
    InvalidIdleTimeout { value: String },
}

impl MenuConfig {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(IDLE_TIMEOUT_ENV) {
            let secs: u64 = raw
                .parse()
                .map_err(|_| ConfigError::InvalidIdleTimeout { value: raw })?;
            config.idle_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_idle_timeout_is_five_seconds() {
        let config = MenuConfig::default();
        assert_eq!(config.idle_timeout, Duration::from_secs(5));
        assert_eq!(config.proposal_variable, "proposal");
        assert_eq!(config.script.name(), "menu");
    }

    // single test so the env var is not touched concurrently
    #[test]
    fn test_load_honors_and_validates_timeout_override() {
        std::env::set_var(IDLE_TIMEOUT_ENV, "8");
        let config = MenuConfig::load().unwrap();
        assert_eq!(config.idle_timeout, Duration::from_secs(8));

        std::env::set_var(IDLE_TIMEOUT_ENV, "soon");
        let result = MenuConfig::load();
        std::env::remove_var(IDLE_TIMEOUT_ENV);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidIdleTimeout { .. })
        ));
    }
}
