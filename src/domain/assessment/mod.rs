//! Assessment module - Personality assessment responses and scoring.
//!
//! An assessment is a fixed-length set of categorical answers, each tied to
//! one of the six RIASEC dimensions. The scorer turns a complete response
//! set into a [`PersonalityProfile`] with deterministic tie-breaking.

mod dimension;
mod response;
mod scorer;

pub use dimension::Dimension;
pub use response::AssessmentResponse;
pub use scorer::{
    AssessmentError, DimensionScore, PersonalityProfile, PersonalityScorer, ScoringRules,
};
