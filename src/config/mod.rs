//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `CAREER_COMPASS_` prefix; nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use career_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod matching;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use matching::MatchingConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Generation API and gateway configuration.
    #[serde(default)]
    pub ai: AiConfig,

    /// Scoring and matching configuration.
    #[serde(default)]
    pub matching: MatchingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present (development), then reads variables
    /// with the `CAREER_COMPASS_` prefix:
    ///
    /// - `CAREER_COMPASS_AI__API_KEY=...` -> `ai.api_key`
    /// - `CAREER_COMPASS_MATCHING__TOP_CAREER_MATCH_LIMIT=3`
    ///   -> `matching.top_career_match_limit`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CAREER_COMPASS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate every configuration section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ai.validate()?;
        self.matching.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn default_config_fails_validation_without_api_key() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_vars_join_the_prefix_with_a_single_underscore() {
        std::env::set_var("CAREER_COMPASS_AI__MODEL", "gemini-1.5-pro");
        let config = AppConfig::load().unwrap();
        assert_eq!(config.ai.model, "gemini-1.5-pro");
        std::env::remove_var("CAREER_COMPASS_AI__MODEL");
    }

    #[test]
    fn config_with_api_key_validates() {
        let config = AppConfig {
            ai: AiConfig {
                api_key: Some(Secret::new("test-key".to_string())),
                ..Default::default()
            },
            matching: MatchingConfig::default(),
        };
        assert!(config.validate().is_ok());
    }
}
