//! AI Gateway Client - Cache-then-network generation with retry.
//!
//! Wraps any [`TextGenerator`] with the call discipline every path shares:
//!
//! 1. CacheCheck - fingerprint lookup; a hit returns without a network call
//! 2. Dispatch - one provider call under a bounded timeout
//! 3. RetryOnTransient - exponential backoff, fixed attempt budget
//! 4. CacheStore - best-effort write after a fully successful response
//! 5. Return - `cached=false`, correlation id threaded through
//!
//! Rate limiting never consumes the transient-retry budget: it surfaces
//! immediately as [`GatewayError::RateLimited`] so callers back off on
//! their own schedule. Cache faults are logged and swallowed.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, warn};

use crate::config::AiConfig;
use crate::domain::foundation::Timestamp;
use crate::ports::{
    AIRequest, AIResponse, AiGateway, GatewayError, GenerationRequest, ProviderError,
    ResponseCache, TextGenerator,
};

use super::retry::RetryPolicy;

/// Resilient gateway over a text-generation provider.
///
/// Holds no mutable state of its own; the injected cache is the only
/// shared state, so any number of calls may be in flight concurrently.
pub struct AIGatewayClient<P: TextGenerator> {
    provider: P,
    cache: Arc<dyn ResponseCache>,
    retry: RetryPolicy,
    request_timeout: Duration,
    cache_ttl: Duration,
}

impl<P: TextGenerator> AIGatewayClient<P> {
    /// Creates a gateway client.
    pub fn new(
        provider: P,
        cache: Arc<dyn ResponseCache>,
        retry: RetryPolicy,
        request_timeout: Duration,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            retry,
            request_timeout,
            cache_ttl,
        }
    }

    /// Creates a gateway client from the AI configuration section.
    pub fn from_config(provider: P, cache: Arc<dyn ResponseCache>, config: &AiConfig) -> Self {
        Self::new(
            provider,
            cache,
            RetryPolicy::new(
                config.max_retry_attempts,
                Duration::from_millis(config.base_backoff_ms),
                Duration::from_millis(config.max_backoff_ms),
            ),
            config.request_timeout(),
            config.cache_ttl(),
        )
    }

    /// CacheCheck step. A read failure degrades to a miss.
    async fn check_cache(&self, request: &AIRequest) -> Option<AIResponse> {
        match self.cache.get(&request.fingerprint).await {
            Ok(Some(mut response)) => {
                debug!(
                    correlation_id = %request.correlation_id,
                    fingerprint = %request.fingerprint,
                    "cache hit, skipping network call"
                );
                response.cached = true;
                response.correlation_id = request.correlation_id;
                Some(response)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(
                    correlation_id = %request.correlation_id,
                    error = %err,
                    "cache read failed, treating as miss"
                );
                None
            }
        }
    }

    /// CacheStore step. Best-effort: a failure is logged, never surfaced.
    async fn store_in_cache(&self, request: &AIRequest, response: &AIResponse) {
        if let Err(err) = self
            .cache
            .put(request.fingerprint.clone(), response.clone(), self.cache_ttl)
            .await
        {
            warn!(
                correlation_id = %request.correlation_id,
                error = %err,
                "cache store failed, response still returned"
            );
        }
    }

    /// Dispatch step: one provider call under the configured timeout.
    async fn dispatch(&self, generation: &GenerationRequest) -> Result<crate::ports::GenerationOutput, ProviderError> {
        match timeout(self.request_timeout, self.provider.generate(generation)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout {
                timeout_ms: self.request_timeout.as_millis() as u64,
            }),
        }
    }
}

fn to_generation_request(request: &AIRequest) -> GenerationRequest {
    let mut generation =
        GenerationRequest::new(request.prompt.clone(), request.temperature, request.max_tokens);
    if !request.context.is_empty() {
        generation = generation.with_system(request.context.clone());
    }
    generation
}

#[async_trait]
impl<P: TextGenerator> AiGateway for AIGatewayClient<P> {
    async fn generate(&self, request: AIRequest) -> Result<AIResponse, GatewayError> {
        if let Some(cached) = self.check_cache(&request).await {
            return Ok(cached);
        }

        let generation = to_generation_request(&request);
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 1u32;

        loop {
            debug!(
                correlation_id = %request.correlation_id,
                provider = self.provider.name(),
                attempt,
                max_attempts,
                "dispatching generation request"
            );

            match self.dispatch(&generation).await {
                Ok(output) => {
                    let response = AIResponse {
                        content: output.content,
                        usage: output.usage,
                        model_id: output.model,
                        correlation_id: request.correlation_id,
                        timestamp: Timestamp::now(),
                        cached: false,
                    };
                    self.store_in_cache(&request, &response).await;
                    debug!(
                        correlation_id = %request.correlation_id,
                        total_tokens = response.usage.total_tokens,
                        attempt,
                        "generation succeeded"
                    );
                    return Ok(response);
                }
                Err(ProviderError::RateLimited { retry_after_secs }) => {
                    warn!(
                        correlation_id = %request.correlation_id,
                        retry_after_secs,
                        "provider rate limited, surfacing to caller"
                    );
                    return Err(GatewayError::RateLimited { retry_after_secs });
                }
                Err(ProviderError::InvalidRequest(message)) => {
                    warn!(
                        correlation_id = %request.correlation_id,
                        "provider rejected request shape"
                    );
                    return Err(GatewayError::InvalidRequest(message));
                }
                Err(err) if err.is_transient() && self.retry.allows_retry_after(attempt) => {
                    attempt += 1;
                    let delay = self.retry.delay_before(attempt);
                    warn!(
                        correlation_id = %request.correlation_id,
                        error = %err,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "transient failure, backing off before retry"
                    );
                    sleep(delay).await;
                }
                Err(err) => {
                    error!(
                        correlation_id = %request.correlation_id,
                        error = %err,
                        attempt,
                        max_attempts,
                        "generation failed, no retries left"
                    );
                    return Err(GatewayError::Unavailable { source: err });
                }
            }
        }
    }
}
