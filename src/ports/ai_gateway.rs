//! AI Gateway Port - Resilient, cached text generation.
//!
//! This is the contract the orchestrator consumes: callers build an
//! [`AIRequest`] (directly or via the structured convenience constructors)
//! and receive an [`AIResponse`] that records whether it was served from
//! cache and which correlation id to trace it by.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

use crate::domain::assessment::PersonalityProfile;
use crate::domain::foundation::{CorrelationId, Timestamp};
use crate::domain::matching::MatchResult;

use super::text_generator::{ProviderError, TokenUsage};

/// Deterministic hash of a request's semantic inputs, used as cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the fingerprint of `(prompt, context, temperature, max_tokens)`.
    ///
    /// Fields are length-prefixed so adjacent values cannot collide, and the
    /// temperature hashes by bit pattern so equality is exact.
    pub fn compute(prompt: &str, context: &str, temperature: f32, max_tokens: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((prompt.len() as u64).to_be_bytes());
        hasher.update(prompt.as_bytes());
        hasher.update((context.len() as u64).to_be_bytes());
        hasher.update(context.as_bytes());
        hasher.update(temperature.to_bits().to_be_bytes());
        hasher.update(max_tokens.to_be_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Returns the hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A generation request as the gateway sees it.
///
/// Created per call and discarded once the orchestrator consumes the
/// response; the fingerprint is fixed at construction.
#[derive(Debug, Clone)]
pub struct AIRequest {
    pub fingerprint: Fingerprint,
    pub prompt: String,
    /// Structured context payload rendered into the prompt frame.
    pub context: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Generated once at request entry, threaded through all logs and
    /// the returned response.
    pub correlation_id: CorrelationId,
}

impl AIRequest {
    /// Creates a request from raw prompt and context.
    pub fn new(
        prompt: impl Into<String>,
        context: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        let prompt = prompt.into();
        let context = context.into();
        Self {
            fingerprint: Fingerprint::compute(&prompt, &context, temperature, max_tokens),
            prompt,
            context,
            temperature,
            max_tokens,
            correlation_id: CorrelationId::new(),
        }
    }

    /// Builds a request asking for an analysis of a scored profile.
    pub fn profile_analysis(profile: &PersonalityProfile, temperature: f32, max_tokens: u32) -> Self {
        Self::new(
            format!(
                "Describe the strengths of a student whose primary personality dimension \
                 is {} and secondary dimension is {}.",
                profile.primary, profile.secondary
            ),
            render_profile(profile),
            temperature,
            max_tokens,
        )
    }

    /// Builds a request for a short narrative over ranked career matches.
    pub fn career_narrative(
        profile: &PersonalityProfile,
        matches: &[MatchResult],
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        let careers = matches
            .iter()
            .map(|m| m.career_id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            format!(
                "Write a short encouraging summary of why these careers fit: {}.",
                careers
            ),
            render_profile(profile),
            temperature,
            max_tokens,
        )
    }

    /// Builds a request for learning-path suggestions toward a career.
    pub fn learning_path(
        career_title: &str,
        profile: &PersonalityProfile,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self::new(
            format!(
                "Suggest concrete first learning steps for a student aiming to become {}.",
                career_title
            ),
            render_profile(profile),
            temperature,
            max_tokens,
        )
    }

    /// Builds a request for one chat turn over bounded history.
    pub fn chat_turn(
        message: &str,
        history: &[ChatTurn],
        context: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        let mut transcript = String::new();
        for turn in history {
            let speaker = match turn.role {
                ChatRole::User => "Student",
                ChatRole::Assistant => "Advisor",
            };
            transcript.push_str(speaker);
            transcript.push_str(": ");
            transcript.push_str(&turn.content);
            transcript.push('\n');
        }
        transcript.push_str("Student: ");
        transcript.push_str(message);

        Self::new(transcript, context.to_string(), temperature, max_tokens)
    }
}

fn render_profile(profile: &PersonalityProfile) -> String {
    profile
        .scores
        .iter()
        .map(|s| format!("{}={}", s.dimension, s.percent))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A generation result, fresh or cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIResponse {
    pub content: String,
    pub usage: TokenUsage,
    pub model_id: String,
    pub correlation_id: CorrelationId,
    pub timestamp: Timestamp,
    /// True when served from the response cache without a network call.
    pub cached: bool,
}

/// Gateway failures as callers see them.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The provider is throttling; back off before resubmitting.
    #[error("rate limited by provider: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Retries exhausted or a permanent upstream failure.
    ///
    /// Orchestrator-level callers degrade to a fallback message instead of
    /// propagating this to the end user.
    #[error("generation service unavailable")]
    Unavailable {
        #[source]
        source: ProviderError,
    },

    /// The request itself was malformed; never retried.
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),
}

/// Port for resilient, cached generation.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Generates a response, serving from cache when the fingerprint is
    /// fresh and retrying transient provider failures.
    async fn generate(&self, request: AIRequest) -> Result<AIResponse, GatewayError>;
}
