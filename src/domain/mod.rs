//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared value objects (percentages, timestamps, ids)
//! - `assessment` - Personality assessment responses and scoring
//! - `matching` - Career catalog types and the matching algorithm

pub mod assessment;
pub mod foundation;
pub mod matching;
