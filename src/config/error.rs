//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Request timeout must be greater than zero")]
    InvalidTimeout,

    #[error("Retry attempts must be at least 1")]
    InvalidRetryAttempts,

    #[error("Cache TTL must be greater than zero")]
    InvalidCacheTtl,

    #[error("Dimension match weight must be between 0.0 and 1.0")]
    InvalidDimensionWeight,

    #[error("Top career match limit must be at least 1")]
    InvalidMatchLimit,

    #[error("Assessment shape must require at least one response per dimension")]
    InvalidAssessmentShape,
}
