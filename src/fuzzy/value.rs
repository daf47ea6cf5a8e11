//! Fuzzy truth values

use serde::{Deserialize, Serialize};

/// A fuzzy truth value in [0, 1]
///
/// Values are clamped into the unit interval at construction, so every
/// `FuzzyValue` in the system is a valid membership degree.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuzzyValue(f64);

impl FuzzyValue {
    /// Create a new fuzzy value, clamped to [0, 1]
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// The underlying degree
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Fuzzy NOT (complement)
    pub fn not(&self) -> Self {
        Self::new(1.0 - self.0)
    }

    /// Fuzzy AND (t-norm) - minimum
    pub fn and(&self, other: &Self) -> Self {
        Self::new(self.0.min(other.0))
    }

    /// Fuzzy OR (t-conorm) - maximum
    pub fn or(&self, other: &Self) -> Self {
        Self::new(self.0.max(other.0))
    }

    /// Whether this degree is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for FuzzyValue {
    fn default() -> Self {
        Self(0.0)
    }
}

impl From<f64> for FuzzyValue {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<bool> for FuzzyValue {
    fn from(b: bool) -> Self {
        Self::new(if b { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        assert_eq!(FuzzyValue::new(-0.5).value(), 0.0);
        assert_eq!(FuzzyValue::new(1.5).value(), 1.0);
        assert_eq!(FuzzyValue::new(0.25).value(), 0.25);
    }

    #[test]
    fn test_operations() {
        let a = FuzzyValue::new(0.6);
        let b = FuzzyValue::new(0.4);

        assert!((a.and(&b).value() - 0.4).abs() < 1e-12);
        assert!((a.or(&b).value() - 0.6).abs() < 1e-12);
        assert!((a.not().value() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_double_negation() {
        let a = FuzzyValue::new(0.3);
        assert!((a.not().not().value() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(FuzzyValue::from(true).value(), 1.0);
        assert_eq!(FuzzyValue::from(false).value(), 0.0);
    }
}
