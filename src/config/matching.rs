//! Scoring and matching configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for assessment scoring and career matching.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Weight of dimension similarity in the blended match score;
    /// interest overlap takes the remainder.
    #[serde(default = "default_dimension_weight")]
    pub dimension_match_weight: f64,

    /// How many top matches an assessment submission returns.
    #[serde(default = "default_top_match_limit")]
    pub top_career_match_limit: usize,

    /// Responses required per dimension before scoring is valid.
    #[serde(default = "default_responses_per_dimension")]
    pub responses_per_dimension: usize,

    /// Highest selectable score per response.
    #[serde(default = "default_max_score_per_response")]
    pub max_score_per_response: u8,
}

impl MatchingConfig {
    /// Validate matching configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.dimension_match_weight) {
            return Err(ValidationError::InvalidDimensionWeight);
        }
        if self.top_career_match_limit == 0 {
            return Err(ValidationError::InvalidMatchLimit);
        }
        if self.responses_per_dimension == 0 || self.max_score_per_response == 0 {
            return Err(ValidationError::InvalidAssessmentShape);
        }
        Ok(())
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            dimension_match_weight: default_dimension_weight(),
            top_career_match_limit: default_top_match_limit(),
            responses_per_dimension: default_responses_per_dimension(),
            max_score_per_response: default_max_score_per_response(),
        }
    }
}

fn default_dimension_weight() -> f64 {
    crate::domain::matching::DEFAULT_DIMENSION_WEIGHT
}

fn default_top_match_limit() -> usize {
    2
}

fn default_responses_per_dimension() -> usize {
    5
}

fn default_max_score_per_response() -> u8 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = MatchingConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.dimension_match_weight - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.top_career_match_limit, 2);
    }

    #[test]
    fn out_of_range_weight_is_rejected() {
        let config = MatchingConfig {
            dimension_match_weight: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidDimensionWeight)
        ));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = MatchingConfig {
            top_career_match_limit: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMatchLimit)
        ));
    }

    #[test]
    fn degenerate_assessment_shape_is_rejected() {
        let config = MatchingConfig {
            responses_per_dimension: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
