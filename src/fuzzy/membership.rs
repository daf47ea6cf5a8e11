//! Membership functions
//!
//! Piecewise-linear curves mapping a crisp value to a degree of membership.
//! Constructors validate parameter ordering up front: a malformed shape is a
//! fatal configuration error, never an evaluation-time surprise.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, FuzzResult};
use crate::fuzz_ensure;
use super::value::FuzzyValue;

/// A validated, immutable membership function
///
/// Evaluation is total: `degree(x)` is defined for every real `x` and is
/// zero outside the function's support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipFunction {
    /// Triangular: zero up to `a`, ramp to 1 at `b`, back to zero at `c`.
    /// `a == b` (or `b == c`) degenerates the ramp into a step.
    Triangular { a: f64, b: f64, c: f64 },
    /// Trapezoidal: ramp over [a, b], plateau at 1 over [b, c], ramp down
    /// over [c, d].
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Build a triangular membership function, requiring finite `a <= b <= c`
    pub fn triangular(a: f64, b: f64, c: f64) -> FuzzResult<Self> {
        fuzz_ensure!(
            a.is_finite() && b.is_finite() && c.is_finite(),
            ErrorCode::InvalidMembership,
            "triangular parameters must be finite, got ({}, {}, {})",
            a, b, c
        );
        fuzz_ensure!(
            a <= b && b <= c,
            ErrorCode::InvalidMembership,
            "triangular parameters must satisfy a <= b <= c, got ({}, {}, {})",
            a, b, c
        );
        Ok(Self::Triangular { a, b, c })
    }

    /// Build a trapezoidal membership function, requiring finite `a <= b <= c <= d`
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> FuzzResult<Self> {
        fuzz_ensure!(
            a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite(),
            ErrorCode::InvalidMembership,
            "trapezoidal parameters must be finite, got ({}, {}, {}, {})",
            a, b, c, d
        );
        fuzz_ensure!(
            a <= b && b <= c && c <= d,
            ErrorCode::InvalidMembership,
            "trapezoidal parameters must satisfy a <= b <= c <= d, got ({}, {}, {}, {})",
            a, b, c, d
        );
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Evaluate the degree of membership for a crisp value
    pub fn degree(&self, x: f64) -> FuzzyValue {
        let result = match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x == b {
                    // Covers the degenerate a == b and b == c steps, where
                    // the ramp division below would be 0/0.
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x >= b && x <= c {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
        };

        FuzzyValue::new(result)
    }

    /// The interval outside which membership is zero
    pub fn support(&self) -> (f64, f64) {
        match *self {
            MembershipFunction::Triangular { a, c, .. } => (a, c),
            MembershipFunction::Trapezoidal { a, d, .. } => (a, d),
        }
    }

    /// The interval (possibly a point) where membership is exactly 1
    pub fn core(&self) -> (f64, f64) {
        match *self {
            MembershipFunction::Triangular { b, .. } => (b, b),
            MembershipFunction::Trapezoidal { b, c, .. } => (b, c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangular_degrees() {
        let mf = MembershipFunction::triangular(0.0, 5.0, 10.0).unwrap();

        assert_eq!(mf.degree(0.0).value(), 0.0);
        assert_eq!(mf.degree(5.0).value(), 1.0);
        assert_eq!(mf.degree(10.0).value(), 0.0);
        assert!((mf.degree(2.5).value() - 0.5).abs() < 1e-12);
        assert!((mf.degree(7.5).value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_triangular_outside_support() {
        let mf = MembershipFunction::triangular(2.0, 4.0, 6.0).unwrap();
        assert_eq!(mf.degree(-100.0).value(), 0.0);
        assert_eq!(mf.degree(1.999).value(), 0.0);
        assert_eq!(mf.degree(100.0).value(), 0.0);
    }

    #[test]
    fn test_degenerate_left_step() {
        // a == b: full membership at the left edge, ramp down to c
        let mf = MembershipFunction::triangular(0.0, 0.0, 6.0).unwrap();
        assert_eq!(mf.degree(0.0).value(), 1.0);
        assert!((mf.degree(3.0).value() - 0.5).abs() < 1e-12);
        assert_eq!(mf.degree(6.0).value(), 0.0);
    }

    #[test]
    fn test_degenerate_right_step() {
        // b == c: ramp up from a, full membership at the right edge
        let mf = MembershipFunction::triangular(7.0, 12.0, 12.0).unwrap();
        assert_eq!(mf.degree(7.0).value(), 0.0);
        assert!((mf.degree(9.5).value() - 0.5).abs() < 1e-12);
        assert_eq!(mf.degree(12.0).value(), 1.0);
    }

    #[test]
    fn test_peak_is_exactly_one() {
        let mf = MembershipFunction::triangular(4.0, 7.0, 9.0).unwrap();
        assert_eq!(mf.degree(7.0).value(), 1.0);
    }

    #[test]
    fn test_trapezoidal_plateau() {
        let mf = MembershipFunction::trapezoidal(0.0, 2.0, 8.0, 10.0).unwrap();
        assert!((mf.degree(1.0).value() - 0.5).abs() < 1e-12);
        assert_eq!(mf.degree(2.0).value(), 1.0);
        assert_eq!(mf.degree(5.0).value(), 1.0);
        assert_eq!(mf.degree(8.0).value(), 1.0);
        assert!((mf.degree(9.0).value() - 0.5).abs() < 1e-12);
        assert_eq!(mf.degree(11.0).value(), 0.0);
    }

    #[test]
    fn test_invalid_ordering_rejected() {
        let err = MembershipFunction::triangular(5.0, 2.0, 10.0).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidMembership);

        assert!(MembershipFunction::triangular(0.0, 8.0, 4.0).is_err());
        assert!(MembershipFunction::trapezoidal(0.0, 5.0, 3.0, 10.0).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(MembershipFunction::triangular(f64::NAN, 1.0, 2.0).is_err());
        assert!(MembershipFunction::triangular(0.0, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_support_and_core() {
        let tri = MembershipFunction::triangular(1.0, 3.0, 8.0).unwrap();
        assert_eq!(tri.support(), (1.0, 8.0));
        assert_eq!(tri.core(), (3.0, 3.0));

        let trap = MembershipFunction::trapezoidal(0.0, 2.0, 4.0, 6.0).unwrap();
        assert_eq!(trap.support(), (0.0, 6.0));
        assert_eq!(trap.core(), (2.0, 4.0));
    }
}
