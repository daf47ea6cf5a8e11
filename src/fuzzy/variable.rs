//! Linguistic variables
//!
//! A linguistic variable covers a bounded numeric universe with a set of
//! labelled membership functions ("terms"). The same type serves both
//! roles: antecedent variables fuzzify crisp inputs, consequent variables
//! are discretized for defuzzification.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, FuzzError, FuzzResult};
use crate::fuzz_ensure;
use super::membership::MembershipFunction;
use super::value::FuzzyValue;

/// Default discretization step when none is specified
pub const DEFAULT_RESOLUTION: f64 = 1.0;

/// A linguistic variable: a bounded universe plus labelled terms
///
/// Immutable once constructed. Terms keep their declaration order, so
/// fuzzification results are deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinguisticVariable {
    /// Variable name (e.g. "sleep")
    name: String,
    /// Universe of discourse, inclusive
    universe: (f64, f64),
    /// Discretization step, used only when this variable is a consequent
    resolution: f64,
    /// Terms in declaration order
    terms: IndexMap<String, MembershipFunction>,
}

impl LinguisticVariable {
    /// Create a variable over `[min, max]` with the default resolution
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> FuzzResult<Self> {
        let name = name.into();
        fuzz_ensure!(
            min.is_finite() && max.is_finite(),
            ErrorCode::InvalidUniverse,
            "universe of '{}' must be finite, got [{}, {}]",
            name, min, max
        );
        fuzz_ensure!(
            min < max,
            ErrorCode::InvalidUniverse,
            "universe of '{}' must be a non-empty interval, got [{}, {}]",
            name, min, max
        );
        Ok(Self {
            name,
            universe: (min, max),
            resolution: DEFAULT_RESOLUTION,
            terms: IndexMap::new(),
        })
    }

    /// Set the discretization resolution (must be positive and finite)
    pub fn with_resolution(mut self, resolution: f64) -> FuzzResult<Self> {
        fuzz_ensure!(
            resolution.is_finite() && resolution > 0.0,
            ErrorCode::InvalidResolution,
            "resolution of '{}' must be positive, got {}",
            self.name, resolution
        );
        self.resolution = resolution;
        Ok(self)
    }

    /// Add a labelled term, validating label uniqueness and universe fit
    pub fn term(mut self, label: impl Into<String>, mf: MembershipFunction) -> FuzzResult<Self> {
        let label = label.into();
        fuzz_ensure!(
            !self.terms.contains_key(&label),
            ErrorCode::DuplicateLabel,
            "variable '{}' already has a term '{}'",
            self.name, label
        );
        let (lo, hi) = mf.support();
        if lo < self.universe.0 || hi > self.universe.1 {
            return Err(FuzzError::new(
                ErrorCode::TermOutsideUniverse,
                format!(
                    "term '{}' of '{}' spans [{}, {}], outside universe [{}, {}]",
                    label, self.name, lo, hi, self.universe.0, self.universe.1
                ),
            ));
        }
        self.terms.insert(label, mf);
        Ok(self)
    }

    /// Variable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Universe bounds `(min, max)`
    pub fn universe(&self) -> (f64, f64) {
        self.universe
    }

    /// Discretization resolution
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Declared term labels, in declaration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(|s| s.as_str())
    }

    /// Look up a term's membership function
    pub fn term_fn(&self, label: &str) -> Option<&MembershipFunction> {
        self.terms.get(label)
    }

    /// Whether the variable declares the given label
    pub fn has_label(&self, label: &str) -> bool {
        self.terms.contains_key(label)
    }

    /// Clamp a crisp value into this variable's universe
    ///
    /// Out-of-range inputs are a defined behavior, not an error: callers
    /// must not rely on them producing anything other than the clamped
    /// result.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.universe.0, self.universe.1)
    }

    /// Fuzzify a crisp value: clamp, then evaluate every term
    pub fn fuzzify(&self, x: f64) -> IndexMap<&str, FuzzyValue> {
        let x = self.clamp(x);
        self.terms
            .iter()
            .map(|(label, mf)| (label.as_str(), mf.degree(x)))
            .collect()
    }

    /// Degree of one term at a crisp value (clamped first)
    ///
    /// Unknown labels are only reachable before network validation has run.
    pub fn degree_of(&self, label: &str, x: f64) -> FuzzResult<FuzzyValue> {
        let mf = self
            .terms
            .get(label)
            .ok_or_else(|| FuzzError::unknown_label(&self.name, label))?;
        Ok(mf.degree(self.clamp(x)))
    }

    /// Sample points spanning the universe at `resolution` step, inclusive
    /// of both ends
    pub fn discretize(&self) -> Vec<f64> {
        let (min, max) = self.universe;
        let steps = ((max - min) / self.resolution).floor() as usize;
        let mut points = Vec::with_capacity(steps + 2);
        for i in 0..=steps {
            points.push(min + i as f64 * self.resolution);
        }
        // Guard against resolutions that do not divide the span evenly
        if let Some(&last) = points.last() {
            if max - last > self.resolution * 1e-9 {
                points.push(max);
            }
        }
        points
    }

    /// Midpoint of the universe: the documented fallback returned when
    /// defuzzification has no mass to average
    pub fn midpoint(&self) -> f64 {
        (self.universe.0 + self.universe.1) / 2.0
    }
}
