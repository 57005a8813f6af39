//! Response Cache Port - Fingerprint-keyed cache of AI responses.
//!
//! The cache is the only shared mutable state in the core. It is injected
//! into the gateway at construction (created once per process, shared by
//! reference) and must be safe for concurrent readers and writers.
//! Cache failures are best-effort: the gateway logs and moves on.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use super::ai_gateway::{AIResponse, Fingerprint};

/// Cache failures. Never affect call correctness, only latency and cost.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store rejected the operation.
    #[error("cache store failed: {0}")]
    Store(String),
}

/// Port for the AI response cache.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Looks up a fresh entry; expired entries read as absent.
    async fn get(&self, fingerprint: &Fingerprint) -> Result<Option<AIResponse>, CacheError>;

    /// Stores a response with the given time-to-live.
    async fn put(
        &self,
        fingerprint: Fingerprint,
        response: AIResponse,
        ttl: Duration,
    ) -> Result<(), CacheError>;
}
