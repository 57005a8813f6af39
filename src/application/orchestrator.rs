//! Guidance orchestrator - Scorer -> Matcher -> gateway composition.
//!
//! Owns the product policy of how many top matches to return and the
//! degraded-mode behavior when the generation service is down. Persists
//! nothing: every result is plain data for the caller to store.
//!
//! Callers are responsible for serializing turns within a single chat
//! session; the orchestrator imposes no session-level locking of its own.

use thiserror::Error;
use tracing::warn;

use crate::config::{AiConfig, MatchingConfig};
use crate::domain::assessment::{
    AssessmentError, AssessmentResponse, PersonalityProfile, PersonalityScorer, ScoringRules,
};
use crate::domain::foundation::Timestamp;
use crate::domain::matching::{CareerCandidate, CareerMatcher, MatchError, MatchResult};
use crate::ports::{AIRequest, AIResponse, AiGateway, ChatTurn, GatewayError, TokenUsage};

/// Most recent turns kept when building chat context, bounding prompt
/// size and cost.
pub const CHAT_HISTORY_WINDOW: usize = 10;

/// Deterministic acknowledgment returned when the generation service is
/// unavailable. Never an error page.
pub const CHAT_FALLBACK_MESSAGE: &str =
    "I'm having trouble reaching the guidance service right now. Your message was received; \
     please try again in a moment.";

/// Orchestrator failures surfaced to route-level callers.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Assessment input failed validation.
    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    /// Matching input failed validation.
    #[error(transparent)]
    Matching(#[from] MatchError),

    /// The provider is throttling; callers should back off before retrying.
    #[error("generation service rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },
}

/// Result of a scored and matched assessment submission.
///
/// The narrative is an optional enrichment: when generation fails the
/// numeric result still stands and the field is simply absent.
#[derive(Debug, Clone)]
pub struct AssessmentOutcome {
    pub profile: PersonalityProfile,
    pub matches: Vec<MatchResult>,
    pub narrative: Option<String>,
}

/// Composes scoring, matching, and AI generation.
pub struct GuidanceOrchestrator<G: AiGateway> {
    gateway: G,
    scorer: PersonalityScorer,
    matcher: CareerMatcher,
    top_match_limit: usize,
    default_temperature: f32,
    default_max_tokens: u32,
}

impl<G: AiGateway> GuidanceOrchestrator<G> {
    /// Creates an orchestrator from configuration.
    pub fn new(gateway: G, ai: &AiConfig, matching: &MatchingConfig) -> Self {
        Self {
            gateway,
            scorer: PersonalityScorer::new(ScoringRules::new(
                matching.responses_per_dimension,
                matching.max_score_per_response,
            )),
            matcher: CareerMatcher::new(matching.dimension_match_weight),
            top_match_limit: matching.top_career_match_limit,
            default_temperature: ai.default_temperature,
            default_max_tokens: ai.default_max_tokens,
        }
    }

    /// Handles one chat turn.
    ///
    /// History is trimmed to the most recent [`CHAT_HISTORY_WINDOW`] turns
    /// before the prompt is built. On gateway unavailability the caller
    /// receives [`CHAT_FALLBACK_MESSAGE`] rather than an error; rate
    /// limiting is surfaced so callers can apply their own backoff.
    pub async fn handle_chat_turn(
        &self,
        message: &str,
        history: &[ChatTurn],
        context: &str,
    ) -> Result<AIResponse, OrchestratorError> {
        let window_start = history.len().saturating_sub(CHAT_HISTORY_WINDOW);
        let request = AIRequest::chat_turn(
            message,
            &history[window_start..],
            context,
            self.default_temperature,
            self.default_max_tokens,
        );
        let correlation_id = request.correlation_id;

        match self.gateway.generate(request).await {
            Ok(response) => Ok(response),
            Err(GatewayError::RateLimited { retry_after_secs }) => {
                Err(OrchestratorError::RateLimited { retry_after_secs })
            }
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "chat generation failed, returning fallback acknowledgment"
                );
                Ok(AIResponse {
                    content: CHAT_FALLBACK_MESSAGE.to_string(),
                    usage: TokenUsage::default(),
                    model_id: "fallback".to_string(),
                    correlation_id,
                    timestamp: Timestamp::now(),
                    cached: false,
                })
            }
        }
    }

    /// Scores an assessment, ranks careers, and best-effort enriches the
    /// result with a generated narrative.
    pub async fn handle_assessment_submission(
        &self,
        responses: &[AssessmentResponse],
        catalog: &[CareerCandidate],
        interests: &[String],
    ) -> Result<AssessmentOutcome, OrchestratorError> {
        let profile = self.scorer.score(responses)?;
        let matches = self
            .matcher
            .rank(&profile, catalog, interests, self.top_match_limit)?;
        let narrative = self.generate_narrative(&profile, &matches).await;

        Ok(AssessmentOutcome {
            profile,
            matches,
            narrative,
        })
    }

    /// Ranks careers for an already-scored profile.
    pub async fn career_recommendations(
        &self,
        profile: &PersonalityProfile,
        catalog: &[CareerCandidate],
        interests: &[String],
    ) -> Result<Vec<MatchResult>, OrchestratorError> {
        Ok(self
            .matcher
            .rank(profile, catalog, interests, self.top_match_limit)?)
    }

    /// Narrative enrichment. Any failure leaves the field absent.
    async fn generate_narrative(
        &self,
        profile: &PersonalityProfile,
        matches: &[MatchResult],
    ) -> Option<String> {
        if matches.is_empty() {
            return None;
        }

        let request = AIRequest::career_narrative(
            profile,
            matches,
            self.default_temperature,
            self.default_max_tokens,
        );
        let correlation_id = request.correlation_id;

        match self.gateway.generate(request).await {
            Ok(response) => Some(response.content),
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "narrative enrichment failed, returning numeric result only"
                );
                None
            }
        }
    }
}
