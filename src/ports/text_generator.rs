//! Text Generator Port - Interface to the external generation API.
//!
//! One logical operation: generate text given a prompt and generation
//! parameters, returning the text plus token-usage counters. Providers
//! implement exactly this; resilience (retry, caching, timeout budget)
//! lives in the gateway wrapping the port, never in the provider itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for the external text-generation API.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issues a single generation call.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, ProviderError>;

    /// Provider name for logging (e.g. "gemini", "mock").
    fn name(&self) -> &str;
}

/// Provider-level generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Instructions that frame the model's role.
    pub system: Option<String>,
    /// The prompt body.
    pub prompt: String,
    /// Response randomness (0.0 = deterministic).
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Nucleus sampling cutoff, provider default when absent.
    pub top_p: Option<f32>,
    /// Top-k sampling cutoff, provider default when absent.
    pub top_k: Option<u32>,
}

impl GenerationRequest {
    /// Creates a request with provider-default sampling.
    pub fn new(prompt: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature,
            max_tokens,
            top_p: None,
            top_k: None,
        }
    }

    /// Sets the system instructions.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Token usage counters reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates usage counters; total is derived.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Successful provider output.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    /// Generated text.
    pub content: String,
    /// Token counters for cost attribution.
    pub usage: TokenUsage,
    /// Model that produced the text.
    pub model: String,
}

/// Provider errors, classified for the retry policy.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider signaled throttling.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Request exceeded the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Upstream 5xx or equivalent outage.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key rejected; retrying cannot help.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider rejected the request shape.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// True when a retry is likely to succeed.
    ///
    /// Rate limiting is deliberately excluded: it surfaces to callers as a
    /// distinct error so they can back off instead of piling retries on.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::Timeout { .. }
                | ProviderError::Unavailable { .. }
                | ProviderError::Network(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_works() {
        let request = GenerationRequest::new("Explain RIASEC", 0.7, 256)
            .with_system("You are a career advisor");

        assert_eq!(request.prompt, "Explain RIASEC");
        assert_eq!(request.system.as_deref(), Some("You are a career advisor"));
        assert_eq!(request.max_tokens, 256);
        assert!(request.top_p.is_none());
    }

    #[test]
    fn token_usage_derives_total() {
        let usage = TokenUsage::new(120, 80);
        assert_eq!(usage.total_tokens, 200);
    }

    #[test]
    fn transient_classification() {
        assert!(ProviderError::Timeout { timeout_ms: 1000 }.is_transient());
        assert!(ProviderError::unavailable("503").is_transient());
        assert!(ProviderError::network("reset").is_transient());

        assert!(!ProviderError::RateLimited { retry_after_secs: 30 }.is_transient());
        assert!(!ProviderError::AuthenticationFailed.is_transient());
        assert!(!ProviderError::InvalidRequest("bad".into()).is_transient());
        assert!(!ProviderError::parse("garbled").is_transient());
    }

    #[test]
    fn errors_display_clearly() {
        assert_eq!(
            ProviderError::RateLimited { retry_after_secs: 30 }.to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            ProviderError::Timeout { timeout_ms: 20_000 }.to_string(),
            "request timed out after 20000ms"
        );
    }
}
