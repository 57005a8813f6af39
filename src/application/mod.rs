//! Application layer - Orchestration over domain services and ports.
//!
//! The orchestrator composes the scorer, matcher, and AI gateway into the
//! operations route-level collaborators call.

mod orchestrator;

pub use orchestrator::{
    AssessmentOutcome, GuidanceOrchestrator, OrchestratorError, CHAT_FALLBACK_MESSAGE,
    CHAT_HISTORY_WINDOW,
};
