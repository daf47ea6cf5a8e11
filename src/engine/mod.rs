//! The stress inference system
//!
//! `StressEngine` composes two independent inference networks — one
//! producing the stress score, one the lifestyle-instability score — over
//! a single shared, immutable variable set. Construction validates the
//! whole catalog up front; evaluation is a pure function of the input
//! record, holds no per-call state on the engine, and is safe to call
//! from any number of threads concurrently.

mod inputs;

pub use inputs::{
    quiz_score_from_likert, ActivityLevel, DeadlineLevel, ProcrastinationLevel, StressBand,
    StressInputs,
};

use serde::Serialize;

use crate::catalog::{Catalog, NetworkSpec};
use crate::error::{FuzzError, FuzzResult};
use crate::fuzzy::{InferenceNetwork, RuleFiring, VariableSet};

/// Both scores plus the stress band, from one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    /// Stress score in [0, 100]
    pub stress: f64,
    /// Lifestyle instability score in [0, 100]
    pub instability: f64,
    /// Coarse band of the stress score
    pub band: StressBand,
}

/// Per-rule firing strengths for one evaluation, for both networks
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    /// Stress score in [0, 100]
    pub stress: f64,
    /// Lifestyle instability score in [0, 100]
    pub instability: f64,
    /// Firing strength of every stress rule
    pub stress_rules: Vec<RuleFiring>,
    /// Firing strength of every instability rule
    pub instability_rules: Vec<RuleFiring>,
}

/// The composed stress/instability inference system
///
/// Immutable after construction; share it behind an `Arc` (or by
/// reference) across threads and call it concurrently without locks.
#[derive(Debug, Clone)]
pub struct StressEngine {
    catalog_version: String,
    stress: InferenceNetwork,
    instability: InferenceNetwork,
}

impl StressEngine {
    /// Build the engine from the built-in versioned catalog
    pub fn new() -> FuzzResult<Self> {
        Self::from_catalog(&Catalog::builtin())
    }

    /// Build the engine from an explicit catalog, failing fast on any
    /// malformed variable or rule
    pub fn from_catalog(catalog: &Catalog) -> FuzzResult<Self> {
        let variables = catalog.build_variables()?;
        let stress = Self::build_network(&variables, &catalog.stress)?;
        let instability = Self::build_network(&variables, &catalog.instability)?;
        Ok(Self {
            catalog_version: catalog.version.clone(),
            stress,
            instability,
        })
    }

    fn build_network(variables: &VariableSet, spec: &NetworkSpec) -> FuzzResult<InferenceNetwork> {
        let consequent = variables
            .get(spec.consequent.as_str())
            .ok_or_else(|| FuzzError::unknown_variable(&spec.consequent))?;
        let mut builder = InferenceNetwork::builder(consequent.clone());
        for name in &spec.antecedents {
            let var = variables
                .get(name.as_str())
                .ok_or_else(|| FuzzError::unknown_variable(name))?;
            builder = builder.antecedent(var.clone());
        }
        builder.rules(spec.rules.iter().cloned()).build()
    }

    /// Version tag of the catalog this engine was built from
    pub fn catalog_version(&self) -> &str {
        &self.catalog_version
    }

    /// The stress network
    pub fn stress_network(&self) -> &InferenceNetwork {
        &self.stress
    }

    /// The instability network
    pub fn instability_network(&self) -> &InferenceNetwork {
        &self.instability
    }

    /// Compute the stress score, in [0, 100]
    ///
    /// Every input is clamped to its variable's universe before
    /// fuzzification. When no stress rule fires with nonzero strength the
    /// result is the documented fallback: the midpoint of the stress
    /// universe (50.0).
    pub fn compute_stress(&self, inputs: &StressInputs) -> FuzzResult<f64> {
        inputs.validate()?;
        self.stress.evaluate(&inputs.to_crisp())
    }

    /// Compute the lifestyle-instability score, in [0, 100]
    ///
    /// Same clamping and fallback semantics as [`compute_stress`],
    /// against the instability network's own rule set.
    ///
    /// [`compute_stress`]: StressEngine::compute_stress
    pub fn compute_instability(&self, inputs: &StressInputs) -> FuzzResult<f64> {
        inputs.validate()?;
        self.instability.evaluate(&inputs.to_crisp())
    }

    /// Compute both scores and the stress band
    pub fn assess(&self, inputs: &StressInputs) -> FuzzResult<Assessment> {
        inputs.validate()?;
        let crisp = inputs.to_crisp();
        let stress = self.stress.evaluate(&crisp)?;
        let instability = self.instability.evaluate(&crisp)?;
        Ok(Assessment {
            stress,
            instability,
            band: StressBand::classify(stress),
        })
    }

    /// Report every rule's firing strength alongside both scores
    pub fn explain(&self, inputs: &StressInputs) -> FuzzResult<Explanation> {
        inputs.validate()?;
        let crisp = inputs.to_crisp();
        Ok(Explanation {
            stress: self.stress.evaluate(&crisp)?,
            instability: self.instability.evaluate(&crisp)?,
            stress_rules: self.stress.firings(&crisp)?,
            instability_rules: self.instability.firings(&crisp)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::catalog::TermSpec;
    use crate::error::ErrorCode;
    use crate::fuzzy::{Expr, Rule};

    fn engine() -> StressEngine {
        StressEngine::new().unwrap()
    }

    #[test]
    fn test_poor_sleep_heavy_study_is_high_stress() {
        // Poor sleep plus heavy study triggers the high-stress rules.
        let inputs = StressInputs::new(2.0, 14.0, 6.0);
        let stress = engine().compute_stress(&inputs).unwrap();
        assert!(stress > 60.0, "expected high stress, got {}", stress);
    }

    #[test]
    fn test_rested_balanced_day_is_low_stress() {
        let inputs = StressInputs::new(9.0, 3.0, 6.0)
            .with_mood(9.0)
            .with_activity(6.0);
        let stress = engine().compute_stress(&inputs).unwrap();
        assert!(stress < 40.0, "expected low stress, got {}", stress);
    }

    #[test]
    fn test_no_rule_coverage_falls_back_to_midpoint() {
        // Sleep in the dead zone between "poor" and "good" with "average"
        // suppressed by low study, study below every active band, screen
        // time between "low" and "high": no stress rule fires at all.
        let inputs = StressInputs::new(6.5, 4.0, 5.0);
        let stress = engine().compute_stress(&inputs).unwrap();
        assert_eq!(stress, 50.0);
    }

    #[test]
    fn test_pressured_isolation_is_high_instability() {
        let inputs = StressInputs::new(7.0, 4.0, 6.0)
            .with_financial(9.0)
            .with_social(1.0)
            .with_procrastination(9.0);
        let instability = engine().compute_instability(&inputs).unwrap();
        assert!(
            instability > 60.0,
            "expected high instability, got {}",
            instability
        );
    }

    #[test]
    fn test_secure_connected_is_low_instability() {
        let inputs = StressInputs::new(7.0, 4.0, 6.0)
            .with_financial(1.0)
            .with_social(9.0)
            .with_procrastination(1.0);
        let instability = engine().compute_instability(&inputs).unwrap();
        assert!(
            instability < 40.0,
            "expected low instability, got {}",
            instability
        );
    }

    #[test]
    fn test_determinism_bit_identical() {
        let eng = engine();
        let inputs = StressInputs::new(5.3, 7.7, 9.1).with_mood(3.4);
        let a = eng.compute_stress(&inputs).unwrap();
        let b = eng.compute_stress(&inputs).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());

        let c = eng.compute_instability(&inputs).unwrap();
        let d = eng.compute_instability(&inputs).unwrap();
        assert_eq!(c.to_bits(), d.to_bits());
    }

    #[test]
    fn test_out_of_range_inputs_equal_clamped_inputs() {
        let eng = engine();
        let wild = StressInputs::new(-5.0, 99.0, 40.0)
            .with_mood(0.0)
            .with_age(200.0)
            .with_quiz(150.0);
        let clamped = StressInputs::new(0.0, 16.0, 24.0)
            .with_mood(1.0)
            .with_age(80.0)
            .with_quiz(100.0);
        assert_eq!(
            eng.compute_stress(&wild).unwrap().to_bits(),
            eng.compute_stress(&clamped).unwrap().to_bits()
        );
        assert_eq!(
            eng.compute_instability(&wild).unwrap().to_bits(),
            eng.compute_instability(&clamped).unwrap().to_bits()
        );
    }

    #[test]
    fn test_outputs_stay_in_range() {
        let eng = engine();
        let cases = [
            StressInputs::new(0.0, 16.0, 24.0),
            StressInputs::new(12.0, 0.0, 0.0),
            StressInputs::new(6.0, 8.0, 12.0).with_mood(1.0).with_deadline(10.0),
            StressInputs::new(8.0, 2.0, 3.0).with_mood(10.0).with_activity(10.0),
        ];
        for inputs in cases {
            let a = eng.assess(&inputs).unwrap();
            assert!((0.0..=100.0).contains(&a.stress));
            assert!((0.0..=100.0).contains(&a.instability));
        }
    }

    #[test]
    fn test_concurrent_calls_match_sequential() {
        let eng = Arc::new(engine());

        let cases: Vec<StressInputs> = (0..8)
            .map(|i| {
                StressInputs::new(i as f64 * 1.5, 16.0 - i as f64 * 2.0, i as f64 * 3.0)
                    .with_mood(1.0 + i as f64)
                    .with_financial(i as f64)
            })
            .collect();

        let expected: Vec<(f64, f64)> = cases
            .iter()
            .map(|c| {
                (
                    eng.compute_stress(c).unwrap(),
                    eng.compute_instability(c).unwrap(),
                )
            })
            .collect();

        let handles: Vec<_> = cases
            .iter()
            .cloned()
            .map(|c| {
                let eng = Arc::clone(&eng);
                thread::spawn(move || {
                    (
                        eng.compute_stress(&c).unwrap(),
                        eng.compute_instability(&c).unwrap(),
                    )
                })
            })
            .collect();

        for (handle, (stress, instability)) in handles.into_iter().zip(expected) {
            let (got_stress, got_instability) = handle.join().unwrap();
            assert_eq!(got_stress.to_bits(), stress.to_bits());
            assert_eq!(got_instability.to_bits(), instability.to_bits());
        }
    }

    #[test]
    fn test_rule_with_absent_label_fails_construction() {
        let mut catalog = Catalog::builtin();
        catalog.stress.rules.push(Rule::new(
            Expr::is("sleep", "dreadful"),
            "stress",
            "high",
        ));
        let err = StressEngine::from_catalog(&catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownLabel);
    }

    #[test]
    fn test_rule_with_absent_variable_fails_construction() {
        let mut catalog = Catalog::builtin();
        catalog.instability.rules.push(Rule::new(
            Expr::is("caffeine", "high"),
            "instability",
            "high",
        ));
        let err = StressEngine::from_catalog(&catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownVariable);
    }

    #[test]
    fn test_malformed_membership_fails_construction() {
        let mut catalog = Catalog::builtin();
        catalog.variables[0]
            .terms
            .push(TermSpec {
                label: "broken".into(),
                points: vec![6.0, 3.0, 9.0],
            });
        let err = StressEngine::from_catalog(&catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMembership);
    }

    #[test]
    fn test_nan_input_is_error_not_fallback() {
        let eng = engine();
        let mut inputs = StressInputs::new(7.0, 4.0, 5.0);
        inputs.sleep_hours = f64::NAN;
        let err = eng.compute_stress(&inputs).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValue);
    }

    #[test]
    fn test_assess_band_matches_score() {
        let eng = engine();
        let calm = eng
            .assess(&StressInputs::new(9.0, 3.0, 6.0).with_mood(9.0).with_activity(6.0))
            .unwrap();
        assert_eq!(calm.band, StressBand::classify(calm.stress));
        assert_eq!(calm.band, StressBand::Low);

        let strained = eng.assess(&StressInputs::new(2.0, 14.0, 6.0)).unwrap();
        assert_eq!(strained.band, StressBand::classify(strained.stress));
    }

    #[test]
    fn test_explain_reports_every_rule() {
        let eng = engine();
        let report = eng.explain(&StressInputs::new(2.0, 14.0, 6.0)).unwrap();
        assert_eq!(report.stress_rules.len(), 20);
        assert_eq!(report.instability_rules.len(), 6);

        // The sleep/study rule must be the strongest firing for this case.
        let top = report
            .stress_rules
            .iter()
            .max_by(|a, b| a.strength.partial_cmp(&b.strength).unwrap())
            .unwrap();
        assert_eq!(top.rule, "sleep_debt_or_heavy_study");
        assert!(top.strength > 0.0);
    }

    #[test]
    fn test_networks_are_independent() {
        // The instability inputs leave the stress result untouched and
        // vice versa: both evaluations read the same record, but each
        // network only consumes its own antecedents.
        let eng = engine();
        let base = StressInputs::new(2.0, 14.0, 6.0);
        let noisy = base.with_age(70.0).with_quiz(20.0);

        let a = eng.compute_instability(&base).unwrap();
        let b = eng.compute_instability(&noisy).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_catalog_version_exposed() {
        assert_eq!(
            engine().catalog_version(),
            crate::catalog::BUILTIN_CATALOG_VERSION
        );
    }
}
