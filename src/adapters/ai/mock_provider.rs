//! Mock text generator for testing.
//!
//! Configurable to return scripted responses, inject failures, or simulate
//! latency, with call tracking for verification. Once the script runs out
//! it keeps answering with a default success.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockTextGenerator::new()
//!     .with_failure(MockFailure::Network)
//!     .with_response("recovered");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationOutput, GenerationRequest, ProviderError, TextGenerator, TokenUsage};

/// Scripted outcome for one mock call.
#[derive(Debug, Clone)]
enum MockOutcome {
    Success { content: String },
    Failure(MockFailure),
}

/// Failure kinds the mock can inject.
#[derive(Debug, Clone)]
pub enum MockFailure {
    RateLimited { retry_after_secs: u32 },
    Timeout { timeout_ms: u64 },
    Unavailable,
    AuthenticationFailed,
    InvalidRequest(String),
    Network,
    Parse,
}

impl From<MockFailure> for ProviderError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::RateLimited { retry_after_secs } => {
                ProviderError::RateLimited { retry_after_secs }
            }
            MockFailure::Timeout { timeout_ms } => ProviderError::Timeout { timeout_ms },
            MockFailure::Unavailable => ProviderError::unavailable("simulated outage"),
            MockFailure::AuthenticationFailed => ProviderError::AuthenticationFailed,
            MockFailure::InvalidRequest(message) => ProviderError::InvalidRequest(message),
            MockFailure::Network => ProviderError::network("simulated network failure"),
            MockFailure::Parse => ProviderError::parse("simulated parse failure"),
        }
    }
}

/// Mock provider with a scripted outcome queue.
///
/// Clones share the same script and call history.
#[derive(Debug, Clone, Default)]
pub struct MockTextGenerator {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
    delay: Duration,
}

impl MockTextGenerator {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().push_back(MockOutcome::Success {
            content: content.into(),
        });
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Failure(failure));
        self
    }

    /// Simulates latency on every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, ProviderError> {
        self.calls.lock().unwrap().push(request.clone());
        let outcome = self.outcomes.lock().unwrap().pop_front();

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match outcome {
            Some(MockOutcome::Success { content }) => Ok(GenerationOutput {
                content,
                usage: TokenUsage::new(32, 16),
                model: "mock-model".to_string(),
            }),
            Some(MockOutcome::Failure(failure)) => Err(failure.into()),
            None => Ok(GenerationOutput {
                content: "mock response".to_string(),
                usage: TokenUsage::new(8, 4),
                model: "mock-model".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest::new("prompt", 0.7, 64)
    }

    #[tokio::test]
    async fn scripted_outcomes_are_consumed_in_order() {
        let mock = MockTextGenerator::new()
            .with_response("one")
            .with_failure(MockFailure::Network)
            .with_response("two");

        assert_eq!(mock.generate(&request()).await.unwrap().content, "one");
        assert!(mock.generate(&request()).await.is_err());
        assert_eq!(mock.generate(&request()).await.unwrap().content, "two");
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn empty_script_yields_default_success() {
        let mock = MockTextGenerator::new();
        let output = mock.generate(&request()).await.unwrap();
        assert_eq!(output.content, "mock response");
    }

    #[tokio::test]
    async fn records_the_last_request() {
        let mock = MockTextGenerator::new();
        let sent = GenerationRequest::new("specific prompt", 0.2, 99);
        mock.generate(&sent).await.unwrap();
        assert_eq!(mock.last_request(), Some(sent));
    }
}
