//! Career matcher - Ranks catalog candidates against a scored profile.
//!
//! The dominant signal is cosine similarity between the candidate's
//! rank-weighted dimension vector and the profile's percentages; free-text
//! interests contribute a smaller bag-of-terms overlap. The split is a
//! tunable, not a hidden constant: see [`DEFAULT_DIMENSION_WEIGHT`].

use once_cell::sync::Lazy;
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::assessment::{Dimension, PersonalityProfile};

use super::{CareerCandidate, MatchResult};

/// Default weight of dimension similarity in the blended score; interest
/// overlap receives the remainder. Overridable via configuration.
pub const DEFAULT_DIMENSION_WEIGHT: f64 = 0.8;

/// Common English terms excluded from interest overlap.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "i", "in", "into", "is",
        "it", "my", "of", "on", "or", "that", "the", "to", "with", "working",
    ]
    .into_iter()
    .collect()
});

/// Matching failures. Deterministic input errors, never retried.
#[derive(Debug, Clone, Error)]
pub enum MatchError {
    /// The profile carries no scored dimensions.
    #[error("profile has no scored dimensions")]
    InvalidProfile,

    /// The requested result limit is below one.
    #[error("match limit must be at least 1, got {0}")]
    InvalidLimit(usize),
}

/// Ranks career candidates against a personality profile.
#[derive(Debug, Clone)]
pub struct CareerMatcher {
    dimension_weight: f64,
}

impl CareerMatcher {
    /// Creates a matcher with the given dimension-similarity weight,
    /// clamped to `[0, 1]`.
    pub fn new(dimension_weight: f64) -> Self {
        Self {
            dimension_weight: dimension_weight.clamp(0.0, 1.0),
        }
    }

    /// Returns the configured dimension weight.
    pub fn dimension_weight(&self) -> f64 {
        self.dimension_weight
    }

    /// Ranks `catalog` against `profile`, best match first.
    ///
    /// Ordering is score descending with ties broken by candidate id
    /// ascending, so identical inputs always produce identical output.
    /// An empty catalog yields an empty result; `limit` larger than the
    /// catalog returns everything.
    ///
    /// # Errors
    ///
    /// - [`MatchError::InvalidLimit`] when `limit` is zero
    /// - [`MatchError::InvalidProfile`] when the profile has no scores
    pub fn rank(
        &self,
        profile: &PersonalityProfile,
        catalog: &[CareerCandidate],
        interests: &[String],
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        if limit == 0 {
            return Err(MatchError::InvalidLimit(limit));
        }
        if profile.is_empty() {
            return Err(MatchError::InvalidProfile);
        }
        if catalog.is_empty() {
            return Ok(Vec::new());
        }

        let profile_vec = profile_vector(profile);
        let interest_terms = term_set(interests);

        let mut results: Vec<MatchResult> = catalog
            .iter()
            .map(|candidate| {
                let score = self.blended_score(&profile_vec, candidate, &interest_terms);
                MatchResult {
                    career_id: candidate.id.clone(),
                    score,
                    matched_dimensions: matched_dimensions(profile, candidate),
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.career_id.cmp(&b.career_id))
        });
        results.truncate(limit);
        Ok(results)
    }

    /// Blends dimension similarity with interest overlap.
    ///
    /// Without interest terms the dimension similarity stands alone rather
    /// than being scaled down by an overlap of zero.
    fn blended_score(
        &self,
        profile_vec: &[f64; Dimension::ALL.len()],
        candidate: &CareerCandidate,
        interest_terms: &HashSet<String>,
    ) -> f64 {
        let similarity = cosine_similarity(profile_vec, &candidate_vector(candidate));
        if interest_terms.is_empty() {
            return similarity;
        }

        let candidate_terms = candidate_term_set(candidate);
        let overlap = interest_overlap(interest_terms, &candidate_terms);
        (self.dimension_weight * similarity + (1.0 - self.dimension_weight) * overlap)
            .clamp(0.0, 1.0)
    }
}

impl Default for CareerMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION_WEIGHT)
    }
}

/// Profile percentages as a dense vector in priority order.
fn profile_vector(profile: &PersonalityProfile) -> [f64; Dimension::ALL.len()] {
    let mut vec = [0.0; Dimension::ALL.len()];
    for dimension in Dimension::ALL {
        vec[dimension.priority()] = f64::from(profile.percent_of(dimension)) / 100.0;
    }
    vec
}

/// Candidate requirements as a dense vector: linearly descending rank
/// weights, most important dimension first.
fn candidate_vector(candidate: &CareerCandidate) -> [f64; Dimension::ALL.len()] {
    let mut vec = [0.0; Dimension::ALL.len()];
    let n = candidate.required_dimensions.len();
    for (rank, dimension) in candidate.required_dimensions.iter().enumerate() {
        vec[dimension.priority()] = (n - rank) as f64 / n as f64;
    }
    vec
}

/// Cosine similarity over non-negative vectors; zero when either is zero.
fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Lowercased, stop-word-filtered terms from a set of phrases.
fn term_set(phrases: &[String]) -> HashSet<String> {
    phrases
        .iter()
        .flat_map(|phrase| phrase.split(|c: char| !c.is_alphanumeric()))
        .map(|term| term.to_lowercase())
        .filter(|term| term.len() > 1 && !STOP_WORDS.contains(term.as_str()))
        .collect()
}

fn candidate_term_set(candidate: &CareerCandidate) -> HashSet<String> {
    let mut phrases = vec![candidate.title.clone()];
    phrases.extend(candidate.tags.iter().cloned());
    term_set(&phrases)
}

/// Share of interest terms found among the candidate's terms.
fn interest_overlap(interests: &HashSet<String>, candidate: &HashSet<String>) -> f64 {
    if interests.is_empty() {
        return 0.0;
    }
    let hits = interests.intersection(candidate).count();
    hits as f64 / interests.len() as f64
}

/// Required dimensions that land in the profile's top two.
fn matched_dimensions(
    profile: &PersonalityProfile,
    candidate: &CareerCandidate,
) -> Vec<Dimension> {
    candidate
        .required_dimensions
        .iter()
        .copied()
        .filter(|d| *d == profile.primary || *d == profile.secondary)
        .collect()
}
