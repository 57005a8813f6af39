//! Personality scorer - Turns a complete response set into a scored profile.
//!
//! Scoring is pure and deterministic: identical input always yields an
//! identical profile. Percentages round half-up, and exact ties between
//! dimensions are broken by the fixed priority order on [`Dimension`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Percentage;

use super::{AssessmentResponse, Dimension};

/// Validation failures for an assessment submission.
///
/// All variants are deterministic input errors; retrying cannot help.
#[derive(Debug, Clone, Error)]
pub enum AssessmentError {
    /// One or more dimensions received fewer responses than required.
    #[error("assessment incomplete: dimensions {missing:?} need {required} responses each")]
    Incomplete {
        /// Dimensions with too few responses, in priority order.
        missing: Vec<Dimension>,
        /// Responses required per dimension.
        required: usize,
    },

    /// A dimension received more responses than the assessment defines.
    #[error("dimension {dimension} has {actual} responses, expected exactly {expected}")]
    UnexpectedResponseCount {
        dimension: Dimension,
        expected: usize,
        actual: usize,
    },

    /// A selected score falls outside the assessment scale.
    #[error("question '{question_id}' has score {actual}, maximum is {max}")]
    ScoreOutOfRange {
        question_id: String,
        max: u8,
        actual: u8,
    },
}

/// Configured shape of the assessment: how many questions probe each
/// dimension and the top of the per-question score scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Responses required per dimension.
    pub responses_per_dimension: usize,
    /// Highest selectable score per response.
    pub max_score_per_response: u8,
}

impl ScoringRules {
    /// Creates scoring rules.
    pub fn new(responses_per_dimension: usize, max_score_per_response: u8) -> Self {
        Self {
            responses_per_dimension,
            max_score_per_response,
        }
    }

    /// Maximum raw sum a single dimension can reach.
    pub fn max_possible(&self) -> u32 {
        self.responses_per_dimension as u32 * self.max_score_per_response as u32
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            responses_per_dimension: 5,
            max_score_per_response: 2,
        }
    }
}

/// Score for a single dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    /// Sum of selected scores across the dimension's responses.
    pub raw_sum: u32,
    /// `raw_sum` as a share of the maximum possible, rounded half-up.
    pub percent: Percentage,
}

/// A fully scored assessment: every dimension scored, plus the derived
/// primary and secondary dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    /// Scores for every dimension, in fixed priority order.
    pub scores: Vec<DimensionScore>,
    /// Dimension with the highest percent (ties: lowest priority index).
    pub primary: Dimension,
    /// Next highest dimension, excluding the primary.
    pub secondary: Dimension,
}

impl PersonalityProfile {
    /// Looks up the score for a dimension.
    pub fn score_for(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.scores.iter().find(|s| s.dimension == dimension)
    }

    /// Percent value for a dimension, zero if unscored.
    pub fn percent_of(&self, dimension: Dimension) -> u8 {
        self.score_for(dimension).map(|s| s.percent.value()).unwrap_or(0)
    }

    /// True when no dimension carries a score.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Scorer for personality assessments.
///
/// Holds only its [`ScoringRules`]; scoring has no side effects.
#[derive(Debug, Clone, Default)]
pub struct PersonalityScorer {
    rules: ScoringRules,
}

impl PersonalityScorer {
    /// Creates a scorer with the given rules.
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    /// Returns the configured rules.
    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Scores a complete response set.
    ///
    /// # Errors
    ///
    /// - [`AssessmentError::ScoreOutOfRange`] when any score exceeds the scale
    /// - [`AssessmentError::Incomplete`] naming every under-covered dimension
    /// - [`AssessmentError::UnexpectedResponseCount`] when a dimension has
    ///   surplus responses (the max-possible formula assumes the fixed count)
    pub fn score(
        &self,
        responses: &[AssessmentResponse],
    ) -> Result<PersonalityProfile, AssessmentError> {
        let max_score = self.rules.max_score_per_response;
        for response in responses {
            if response.selected_score > max_score {
                return Err(AssessmentError::ScoreOutOfRange {
                    question_id: response.question_id.clone(),
                    max: max_score,
                    actual: response.selected_score,
                });
            }
        }

        let mut counts = [0usize; Dimension::ALL.len()];
        let mut sums = [0u32; Dimension::ALL.len()];
        for response in responses {
            let idx = response.dimension.priority();
            counts[idx] += 1;
            sums[idx] += u32::from(response.selected_score);
        }

        let required = self.rules.responses_per_dimension;
        let missing: Vec<Dimension> = Dimension::ALL
            .into_iter()
            .filter(|d| counts[d.priority()] < required)
            .collect();
        if !missing.is_empty() {
            return Err(AssessmentError::Incomplete { missing, required });
        }
        for dimension in Dimension::ALL {
            let actual = counts[dimension.priority()];
            if actual > required {
                return Err(AssessmentError::UnexpectedResponseCount {
                    dimension,
                    expected: required,
                    actual,
                });
            }
        }

        let max_possible = self.rules.max_possible();
        let scores: Vec<DimensionScore> = Dimension::ALL
            .into_iter()
            .map(|dimension| {
                let raw_sum = sums[dimension.priority()];
                DimensionScore {
                    dimension,
                    raw_sum,
                    percent: Percentage::from_ratio(raw_sum, max_possible),
                }
            })
            .collect();

        // Percent descending, fixed priority order on exact ties.
        let mut ranked: Vec<&DimensionScore> = scores.iter().collect();
        ranked.sort_by(|a, b| {
            b.percent
                .cmp(&a.percent)
                .then_with(|| a.dimension.priority().cmp(&b.dimension.priority()))
        });
        let primary = ranked[0].dimension;
        let secondary = ranked[1].dimension;

        Ok(PersonalityProfile {
            scores,
            primary,
            secondary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn responses_for(dimension: Dimension, scores: &[u8]) -> Vec<AssessmentResponse> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                AssessmentResponse::new(format!("{}-{}", dimension.label(), i), dimension, s)
            })
            .collect()
    }

    fn full_assessment(per_dimension: impl Fn(Dimension) -> Vec<u8>) -> Vec<AssessmentResponse> {
        Dimension::ALL
            .into_iter()
            .flat_map(|d| responses_for(d, &per_dimension(d)))
            .collect()
    }

    #[test]
    fn all_agree_scores_hundred_percent() {
        // 5 responses, max score 2, all "agree" -> raw=10, max=10 -> 100%
        let responses = full_assessment(|_| vec![2, 2, 2, 2, 2]);
        let profile = PersonalityScorer::default().score(&responses).unwrap();

        for score in &profile.scores {
            assert_eq!(score.raw_sum, 10);
            assert_eq!(score.percent, Percentage::HUNDRED);
        }
    }

    #[test]
    fn mixed_responses_round_correctly() {
        // [2,1,0,2,1] -> raw=6, max=10 -> 60%
        let responses = full_assessment(|d| {
            if d == Dimension::Artistic {
                vec![2, 1, 0, 2, 1]
            } else {
                vec![0, 0, 0, 0, 0]
            }
        });
        let profile = PersonalityScorer::default().score(&responses).unwrap();

        let artistic = profile.score_for(Dimension::Artistic).unwrap();
        assert_eq!(artistic.raw_sum, 6);
        assert_eq!(artistic.percent.value(), 60);
        assert_eq!(profile.primary, Dimension::Artistic);
    }

    #[test]
    fn primary_and_secondary_follow_percent_order() {
        let responses = full_assessment(|d| match d {
            Dimension::Social => vec![2, 2, 2, 2, 2],
            Dimension::Investigative => vec![2, 2, 2, 2, 0],
            _ => vec![1, 0, 0, 0, 0],
        });
        let profile = PersonalityScorer::default().score(&responses).unwrap();

        assert_eq!(profile.primary, Dimension::Social);
        assert_eq!(profile.secondary, Dimension::Investigative);
    }

    #[test]
    fn exact_tie_breaks_by_priority_order() {
        // Everything identical: Realistic declares first, so it wins.
        let responses = full_assessment(|_| vec![1, 1, 1, 1, 1]);
        let profile = PersonalityScorer::default().score(&responses).unwrap();

        assert_eq!(profile.primary, Dimension::Realistic);
        assert_eq!(profile.secondary, Dimension::Investigative);
    }

    #[test]
    fn missing_dimension_reports_incomplete() {
        let responses: Vec<_> = full_assessment(|_| vec![1, 1, 1, 1, 1])
            .into_iter()
            .filter(|r| r.dimension != Dimension::Conventional)
            .collect();

        let err = PersonalityScorer::default().score(&responses).unwrap_err();
        match err {
            AssessmentError::Incomplete { missing, required } => {
                assert_eq!(missing, vec![Dimension::Conventional]);
                assert_eq!(required, 5);
            }
            other => panic!("expected Incomplete, got {other:?}"),
        }
    }

    #[test]
    fn short_dimension_reports_incomplete() {
        let responses = full_assessment(|d| {
            if d == Dimension::Social {
                vec![2, 2]
            } else {
                vec![1, 1, 1, 1, 1]
            }
        });

        let err = PersonalityScorer::default().score(&responses).unwrap_err();
        assert!(matches!(err, AssessmentError::Incomplete { .. }));
    }

    #[test]
    fn surplus_responses_are_rejected() {
        let responses = full_assessment(|d| {
            if d == Dimension::Realistic {
                vec![1, 1, 1, 1, 1, 1]
            } else {
                vec![1, 1, 1, 1, 1]
            }
        });

        let err = PersonalityScorer::default().score(&responses).unwrap_err();
        assert!(matches!(
            err,
            AssessmentError::UnexpectedResponseCount {
                dimension: Dimension::Realistic,
                expected: 5,
                actual: 6,
            }
        ));
    }

    #[test]
    fn out_of_range_score_names_the_question() {
        let mut responses = full_assessment(|_| vec![1, 1, 1, 1, 1]);
        responses[0].selected_score = 7;

        let err = PersonalityScorer::default().score(&responses).unwrap_err();
        match err {
            AssessmentError::ScoreOutOfRange { question_id, max, actual } => {
                assert_eq!(question_id, responses[0].question_id);
                assert_eq!(max, 2);
                assert_eq!(actual, 7);
            }
            other => panic!("expected ScoreOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn scoring_is_idempotent() {
        let responses = full_assessment(|d| match d {
            Dimension::Artistic => vec![2, 1, 0, 2, 1],
            _ => vec![1, 0, 2, 0, 1],
        });
        let scorer = PersonalityScorer::default();

        let first = scorer.score(&responses).unwrap();
        let second = scorer.score(&responses).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn percents_stay_in_range(seed in proptest::collection::vec(0u8..=2, 30)) {
            let responses: Vec<_> = Dimension::ALL
                .into_iter()
                .enumerate()
                .flat_map(|(di, d)| {
                    seed[di * 5..di * 5 + 5]
                        .iter()
                        .enumerate()
                        .map(move |(i, &s)| {
                            AssessmentResponse::new(format!("q{di}-{i}"), d, s)
                        })
                        .collect::<Vec<_>>()
                })
                .collect();

            let profile = PersonalityScorer::default().score(&responses).unwrap();
            for score in &profile.scores {
                prop_assert!(score.percent.value() <= 100);
            }

            // Primary carries the maximum percent.
            let max = profile.scores.iter().map(|s| s.percent).max().unwrap();
            prop_assert_eq!(profile.percent_of(profile.primary), max.value());
            prop_assert_ne!(profile.primary, profile.secondary);
        }
    }
}
