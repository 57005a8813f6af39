//! Personality assessment dimensions (RIASEC model).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six fixed personality-assessment categories.
///
/// Declaration order doubles as the fixed priority order used to break
/// exact percentage ties, so results stay reproducible across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl Dimension {
    /// All dimensions in fixed priority order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Realistic,
        Dimension::Investigative,
        Dimension::Artistic,
        Dimension::Social,
        Dimension::Enterprising,
        Dimension::Conventional,
    ];

    /// Position in the fixed priority order (lower wins ties).
    pub fn priority(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(usize::MAX)
    }

    /// Returns the display label for this dimension.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Realistic => "Realistic",
            Dimension::Investigative => "Investigative",
            Dimension::Artistic => "Artistic",
            Dimension::Social => "Social",
            Dimension::Enterprising => "Enterprising",
            Dimension::Conventional => "Conventional",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_follows_declaration_order() {
        assert_eq!(Dimension::Realistic.priority(), 0);
        assert_eq!(Dimension::Conventional.priority(), 5);
    }

    #[test]
    fn all_covers_every_dimension_once() {
        let mut seen = std::collections::HashSet::new();
        for d in Dimension::ALL {
            assert!(seen.insert(d));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Dimension::Artistic).unwrap();
        assert_eq!(json, "\"artistic\"");
    }
}
