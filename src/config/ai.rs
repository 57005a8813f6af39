//! AI gateway configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the generation API client and gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Generation API key.
    pub api_key: Option<Secret<String>>,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generation API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call network timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Total attempt budget for transient failures, first attempt included.
    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,

    /// Delay before the second attempt; doubles per attempt after.
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,

    /// Cap on a single backoff delay.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Response cache time-to-live in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Temperature used when a caller does not override it.
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Output token cap used when a caller does not override it.
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,
}

impl AiConfig {
    /// Request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Check if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate AI configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if self.request_timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retry_attempts == 0 {
            return Err(ValidationError::InvalidRetryAttempts);
        }
        if self.cache_ttl_secs == 0 {
            return Err(ValidationError::InvalidCacheTtl);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            max_retry_attempts: default_max_retry_attempts(),
            base_backoff_ms: default_base_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_request_timeout_ms() -> u64 {
    20_000
}

fn default_max_retry_attempts() -> u32 {
    3
}

fn default_base_backoff_ms() -> u64 {
    500
}

fn default_max_backoff_ms() -> u64 {
    8_000
}

fn default_cache_ttl_secs() -> u64 {
    3_600
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1_024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AiConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.max_retry_attempts, 3);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.default_max_tokens, 1024);
    }

    #[test]
    fn validation_requires_api_key() {
        let config = AiConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));

        let config = AiConfig {
            api_key: Some(Secret::new("key".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let config = AiConfig {
            api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(!config.has_api_key());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = AiConfig {
            api_key: Some(Secret::new("key".to_string())),
            request_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let config = AiConfig {
            api_key: Some(Secret::new("key".to_string())),
            max_retry_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRetryAttempts)
        ));
    }
}
