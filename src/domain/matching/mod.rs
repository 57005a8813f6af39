//! Matching module - Career catalog types and the matching algorithm.
//!
//! The matcher is a pure function over a scored profile and read-only
//! catalog data; it performs no I/O and is safe to call from any thread.

mod career;
mod matcher;

pub use career::{CareerCandidate, MatchResult};
pub use matcher::{CareerMatcher, MatchError, DEFAULT_DIMENSION_WEIGHT};
