//! Inference networks
//!
//! An `InferenceNetwork` binds a set of antecedent variables, one
//! consequent variable, and a rule list into an immutable unit that turns
//! a crisp input vector into one crisp output (Mamdani inference:
//! min-implication, max-aggregation, centroid defuzzification).
//!
//! Every cross-reference is validated when the network is built: a rule
//! naming an undeclared variable or label fails construction, never
//! evaluation. Evaluation holds all per-call state (firing strengths, the
//! aggregation buffer) in call-local storage, so a network shared behind
//! an `Arc` can be evaluated from any number of threads concurrently.

use std::sync::Arc;

use super::rule::{CrispInputs, Rule, VariableSet};
use super::variable::LinguisticVariable;
use crate::error::{ErrorCode, FuzzError, FuzzResult};
use crate::fuzz_ensure;

/// One rule's firing strength, as reported by [`InferenceNetwork::firings`]
#[derive(Debug, Clone, serde::Serialize)]
pub struct RuleFiring {
    /// Rule name, or its position when anonymous
    pub rule: String,
    /// Firing strength in [0, 1]
    pub strength: f64,
    /// Consequent label the strength is implied onto
    pub label: String,
}

/// An immutable Mamdani inference network producing one scalar output
#[derive(Debug, Clone)]
pub struct InferenceNetwork {
    antecedents: VariableSet,
    consequent: Arc<LinguisticVariable>,
    rules: Vec<Rule>,
}

impl InferenceNetwork {
    /// Start building a network around its consequent variable
    pub fn builder(consequent: Arc<LinguisticVariable>) -> NetworkBuilder {
        NetworkBuilder {
            antecedents: VariableSet::new(),
            consequent,
            rules: Vec::new(),
        }
    }

    /// The consequent variable
    pub fn consequent(&self) -> &LinguisticVariable {
        &self.consequent
    }

    /// The antecedent variables, in declaration order
    pub fn antecedents(&self) -> &VariableSet {
        &self.antecedents
    }

    /// The rule list
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluate the network for one crisp input vector
    ///
    /// Mamdani inference over the consequent's discretized universe:
    /// each rule's firing strength caps its consequent term
    /// (min-implication), capped terms combine by pointwise maximum, and
    /// the aggregate defuzzifies by centroid. Rules with zero strength
    /// are inert. When no rule contributes any mass the centroid is
    /// undefined; the documented fallback is the midpoint of the
    /// consequent universe.
    pub fn evaluate(&self, inputs: &CrispInputs) -> FuzzResult<f64> {
        let samples = self.consequent.discretize();
        let mut aggregated = vec![0.0f64; samples.len()];

        for rule in &self.rules {
            let alpha = rule.fire(&self.antecedents, inputs)?;
            if alpha.is_zero() {
                continue;
            }
            // Validated at build time, so the lookup cannot fail here.
            let term = self
                .consequent
                .term_fn(&rule.consequent.label)
                .ok_or_else(|| {
                    FuzzError::unknown_label(self.consequent.name(), &rule.consequent.label)
                })?;
            for (slot, &y) in aggregated.iter_mut().zip(samples.iter()) {
                let implied = alpha.and(&term.degree(y));
                if implied.value() > *slot {
                    *slot = implied.value();
                }
            }
        }

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (&y, &mu) in samples.iter().zip(aggregated.iter()) {
            numerator += y * mu;
            denominator += mu;
        }

        if denominator > 0.0 {
            Ok(numerator / denominator)
        } else {
            Ok(self.consequent.midpoint())
        }
    }

    /// Firing strength of every rule for one input vector
    ///
    /// The explanation surface: reports each rule's name (or index), its
    /// strength, and the consequent label it implies.
    pub fn firings(&self, inputs: &CrispInputs) -> FuzzResult<Vec<RuleFiring>> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let alpha = rule.fire(&self.antecedents, inputs)?;
                Ok(RuleFiring {
                    rule: rule
                        .name
                        .clone()
                        .unwrap_or_else(|| format!("rule {}", i + 1)),
                    strength: alpha.value(),
                    label: rule.consequent.label.clone(),
                })
            })
            .collect()
    }
}

/// Builder for [`InferenceNetwork`]
///
/// `build()` performs the fail-fast validation pass: every proposition's
/// variable and label, every consequent label, and every rule's consequent
/// variable are checked against the declared catalog.
pub struct NetworkBuilder {
    antecedents: VariableSet,
    consequent: Arc<LinguisticVariable>,
    rules: Vec<Rule>,
}

impl NetworkBuilder {
    /// Declare an antecedent variable
    pub fn antecedent(mut self, variable: Arc<LinguisticVariable>) -> Self {
        self.antecedents
            .insert(variable.name().to_string(), variable);
        self
    }

    /// Declare a rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Declare several rules
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Validate all cross-references and freeze the network
    pub fn build(self) -> FuzzResult<InferenceNetwork> {
        for (i, rule) in self.rules.iter().enumerate() {
            let rule_id = rule
                .name
                .clone()
                .unwrap_or_else(|| format!("rule {}", i + 1));

            fuzz_ensure!(
                !rule.antecedent.has_empty_node(),
                ErrorCode::EmptyExpression,
                "rule '{}' contains an AND/OR node with no operands",
                rule_id
            );

            for (variable, label) in rule.antecedent.propositions() {
                let var = self.antecedents.get(variable).ok_or_else(|| {
                    FuzzError::unknown_variable(variable).with_context("rule", &rule_id)
                })?;
                if !var.has_label(label) {
                    return Err(FuzzError::unknown_label(variable, label)
                        .with_context("rule", &rule_id));
                }
            }

            if rule.consequent.variable != self.consequent.name() {
                return Err(FuzzError::new(
                    ErrorCode::ConsequentMismatch,
                    format!(
                        "rule '{}' concludes on '{}', but this network's consequent is '{}'",
                        rule_id,
                        rule.consequent.variable,
                        self.consequent.name()
                    ),
                ));
            }
            if !self.consequent.has_label(&rule.consequent.label) {
                return Err(
                    FuzzError::unknown_label(self.consequent.name(), &rule.consequent.label)
                        .with_context("rule", &rule_id),
                );
            }
        }

        Ok(InferenceNetwork {
            antecedents: self.antecedents,
            consequent: self.consequent,
            rules: self.rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::membership::MembershipFunction;
    use crate::fuzzy::rule::Expr;

    fn temp() -> Arc<LinguisticVariable> {
        Arc::new(
            LinguisticVariable::new("temp", 0.0, 40.0)
                .unwrap()
                .term("cold", MembershipFunction::triangular(0.0, 0.0, 20.0).unwrap())
                .unwrap()
                .term("hot", MembershipFunction::triangular(15.0, 40.0, 40.0).unwrap())
                .unwrap(),
        )
    }

    fn fan() -> Arc<LinguisticVariable> {
        Arc::new(
            LinguisticVariable::new("fan", 0.0, 10.0)
                .unwrap()
                .term("slow", MembershipFunction::triangular(0.0, 0.0, 6.0).unwrap())
                .unwrap()
                .term("fast", MembershipFunction::triangular(0.0, 5.0, 10.0).unwrap())
                .unwrap(),
        )
    }

    fn network() -> InferenceNetwork {
        InferenceNetwork::builder(fan())
            .antecedent(temp())
            .rule(Rule::named(
                "cooling",
                Expr::is("temp", "hot"),
                "fan",
                "fast",
            ))
            .rule(Rule::named(
                "idle",
                Expr::is("temp", "cold"),
                "fan",
                "slow",
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_centroid_of_symmetric_term() {
        // temp=40 fires only "cooling" at full strength; the aggregate is
        // the symmetric "fast" triangle, whose centroid is its peak.
        let net = network();
        let inputs: CrispInputs = [("temp", 40.0)].into_iter().collect();
        let out = net.evaluate(&inputs).unwrap();
        assert!((out - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_capped_symmetric_term_keeps_centroid() {
        // hot(27.5) = 0.5: the capped triangle is still symmetric about 5.
        let net = network();
        let inputs: CrispInputs = [("temp", 27.5)].into_iter().collect();
        let out = net.evaluate(&inputs).unwrap();
        assert!((out - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_asymmetric_aggregate_hand_computed() {
        // temp=0 fires only "idle" at strength 1; aggregate over 0..=10 is
        // the left-step triangle (1, 5/6, 4/6, 3/6, 2/6, 1/6, 0, ...).
        let net = network();
        let inputs: CrispInputs = [("temp", 0.0)].into_iter().collect();
        let out = net.evaluate(&inputs).unwrap();

        let degrees = [1.0, 5.0 / 6.0, 4.0 / 6.0, 3.0 / 6.0, 2.0 / 6.0, 1.0 / 6.0];
        let num: f64 = degrees.iter().enumerate().map(|(y, d)| y as f64 * d).sum();
        let den: f64 = degrees.iter().sum();
        assert!((out - num / den).abs() < 1e-9);
    }

    #[test]
    fn test_zero_aggregation_falls_back_to_midpoint() {
        let net = InferenceNetwork::builder(fan())
            .antecedent(temp())
            .rule(Rule::new(Expr::is("temp", "hot"), "fan", "fast"))
            .build()
            .unwrap();
        // hot(10) = 0: no rule fires, centroid undefined, midpoint returned
        let inputs: CrispInputs = [("temp", 10.0)].into_iter().collect();
        let out = net.evaluate(&inputs).unwrap();
        assert_eq!(out, 5.0);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let net = network();
        let inputs: CrispInputs = [("temp", 33.3)].into_iter().collect();
        let a = net.evaluate(&inputs).unwrap();
        let b = net.evaluate(&inputs).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_clamping_idempotence() {
        let net = network();
        let wild: CrispInputs = [("temp", 500.0)].into_iter().collect();
        let clamped: CrispInputs = [("temp", 40.0)].into_iter().collect();
        assert_eq!(
            net.evaluate(&wild).unwrap().to_bits(),
            net.evaluate(&clamped).unwrap().to_bits()
        );
    }

    #[test]
    fn test_unknown_antecedent_variable_fails_build() {
        let err = InferenceNetwork::builder(fan())
            .antecedent(temp())
            .rule(Rule::new(Expr::is("humidity", "high"), "fan", "fast"))
            .build()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownVariable);
    }

    #[test]
    fn test_unknown_antecedent_label_fails_build() {
        let err = InferenceNetwork::builder(fan())
            .antecedent(temp())
            .rule(Rule::new(Expr::is("temp", "scorching"), "fan", "fast"))
            .build()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownLabel);
    }

    #[test]
    fn test_consequent_mismatch_fails_build() {
        let err = InferenceNetwork::builder(fan())
            .antecedent(temp())
            .rule(Rule::new(Expr::is("temp", "hot"), "heater", "fast"))
            .build()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConsequentMismatch);
    }

    #[test]
    fn test_unknown_consequent_label_fails_build() {
        let err = InferenceNetwork::builder(fan())
            .antecedent(temp())
            .rule(Rule::new(Expr::is("temp", "hot"), "fan", "turbo"))
            .build()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownLabel);
    }

    #[test]
    fn test_empty_expression_fails_build() {
        let err = InferenceNetwork::builder(fan())
            .antecedent(temp())
            .rule(Rule::new(Expr::All(vec![]), "fan", "fast"))
            .build()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyExpression);
    }

    #[test]
    fn test_empty_rule_set_always_falls_back() {
        let net = InferenceNetwork::builder(fan())
            .antecedent(temp())
            .build()
            .unwrap();
        let inputs: CrispInputs = [("temp", 40.0)].into_iter().collect();
        assert_eq!(net.evaluate(&inputs).unwrap(), 5.0);
    }

    #[test]
    fn test_firings_report() {
        let net = network();
        let inputs: CrispInputs = [("temp", 40.0)].into_iter().collect();
        let firings = net.firings(&inputs).unwrap();
        assert_eq!(firings.len(), 2);
        assert_eq!(firings[0].rule, "cooling");
        assert_eq!(firings[0].strength, 1.0);
        assert_eq!(firings[0].label, "fast");
        assert_eq!(firings[1].strength, 0.0);
    }
}
