//! Career catalog reference types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::assessment::Dimension;

/// A career from the external catalog.
///
/// Immutable reference data owned by the catalog collaborator; the matcher
/// only reads it. `required_dimensions` is ranked, most important first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerCandidate {
    pub id: String,
    pub title: String,
    /// Dimensions this career draws on, ranked by importance.
    pub required_dimensions: Vec<Dimension>,
    /// Free-form tags used for interest overlap.
    pub tags: Vec<String>,
    /// Catalog-owned metadata, passed through untouched.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CareerCandidate {
    /// Creates a candidate with no tags or metadata.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        required_dimensions: Vec<Dimension>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            required_dimensions,
            tags: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Adds tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// One ranked match, produced fresh per request and never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub career_id: String,
    /// Blended similarity in `[0, 1]`.
    pub score: f64,
    /// Required dimensions of the candidate that land in the profile's
    /// primary or secondary dimension.
    pub matched_dimensions: Vec<Dimension>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_tags() {
        let c = CareerCandidate::new("c1", "Data Scientist", vec![Dimension::Investigative])
            .with_tags(["data", "statistics"]);
        assert_eq!(c.tags, vec!["data", "statistics"]);
        assert!(c.metadata.is_empty());
    }
}
