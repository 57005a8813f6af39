//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Percentage from a numerator/denominator ratio,
    /// rounding half-up to the nearest whole percent.
    ///
    /// A zero denominator yields zero percent.
    pub fn from_ratio(numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return Self::ZERO;
        }
        let scaled = (numerator as u64 * 200 + denominator as u64) / (denominator as u64 * 2);
        Self::new(scaled.min(100) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_hundred() {
        assert_eq!(Percentage::new(150), Percentage::HUNDRED);
        assert_eq!(Percentage::new(42).value(), 42);
    }

    #[test]
    fn from_ratio_rounds_half_up() {
        // 6/10 = 60%
        assert_eq!(Percentage::from_ratio(6, 10).value(), 60);
        // 1/3 = 33.33% -> 33
        assert_eq!(Percentage::from_ratio(1, 3).value(), 33);
        // 1/8 = 12.5% -> 13 (half rounds up)
        assert_eq!(Percentage::from_ratio(1, 8).value(), 13);
        // 10/10 = 100%
        assert_eq!(Percentage::from_ratio(10, 10), Percentage::HUNDRED);
    }

    #[test]
    fn from_ratio_zero_denominator_is_zero() {
        assert_eq!(Percentage::from_ratio(5, 0), Percentage::ZERO);
    }

    #[test]
    fn as_fraction_converts() {
        assert!((Percentage::new(75).as_fraction() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(format!("{}", Percentage::new(60)), "60%");
    }
}
