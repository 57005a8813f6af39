//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects that form the vocabulary of the
//! career-guidance domain: percentages, timestamps, correlation ids.

mod correlation;
mod percentage;
mod timestamp;

pub use correlation::CorrelationId;
pub use percentage::Percentage;
pub use timestamp::Timestamp;
