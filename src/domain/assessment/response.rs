//! A single answered assessment question.

use serde::{Deserialize, Serialize};

use super::Dimension;

/// One answered question: which dimension it probes and the selected score.
///
/// `selected_score` is a categorical value on a closed discrete scale
/// (e.g. 0 = disagree, 1 = neutral, 2 = agree); the scorer validates the
/// upper bound against its configured rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    /// Identifier of the answered question.
    pub question_id: String,
    /// Dimension the question probes.
    pub dimension: Dimension,
    /// Selected score on the assessment scale.
    pub selected_score: u8,
}

impl AssessmentResponse {
    /// Creates a new assessment response.
    pub fn new(question_id: impl Into<String>, dimension: Dimension, selected_score: u8) -> Self {
        Self {
            question_id: question_id.into(),
            dimension,
            selected_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_sets_fields() {
        let r = AssessmentResponse::new("q1", Dimension::Artistic, 2);
        assert_eq!(r.question_id, "q1");
        assert_eq!(r.dimension, Dimension::Artistic);
        assert_eq!(r.selected_score, 2);
    }
}
