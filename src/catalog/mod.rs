//! The variable/rule catalog
//!
//! The engine's configuration — linguistic variables, membership
//! parameters, and the two rule sets — is data, not code. This module
//! defines the serde-facing data model, the built-in versioned catalog,
//! and TOML/JSON loading, so swapping the rule set is a configuration
//! change rather than a code change.
//!
//! # Catalog format
//!
//! ```toml
//! version = "1.2.0"
//!
//! [[variables]]
//! name = "sleep"
//! min = 0.0
//! max = 12.0
//! terms = [
//!     { label = "poor", points = [0.0, 0.0, 6.0] },
//!     { label = "average", points = [4.0, 7.0, 9.0] },
//!     { label = "good", points = [7.0, 12.0, 12.0] },
//! ]
//!
//! [stress]
//! consequent = "stress"
//! antecedents = ["sleep", "study"]
//!
//! [[stress.rules]]
//! name = "rested_and_light_study"
//! when = { all = [
//!     { is = { variable = "sleep", label = "good" } },
//!     { is = { variable = "study", label = "low" } },
//! ] }
//! then = { variable = "stress", label = "low" }
//! ```
//!
//! Three `points` describe a triangular term, four a trapezoidal one.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, FuzzError, FuzzResult};
use crate::fuzz_bail;
use crate::fuzzy::{Expr, LinguisticVariable, MembershipFunction, Rule, VariableSet};

/// Version tag of the built-in catalog
pub const BUILTIN_CATALOG_VERSION: &str = "1.2.0";

// ============================================================================
// Data model
// ============================================================================

/// One labelled term of a variable: 3 points = triangular, 4 = trapezoidal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSpec {
    pub label: String,
    pub points: Vec<f64>,
}

impl TermSpec {
    fn tri(label: &str, a: f64, b: f64, c: f64) -> Self {
        Self {
            label: label.to_string(),
            points: vec![a, b, c],
        }
    }

    /// Convert to a validated membership function
    pub fn to_membership(&self) -> FuzzResult<MembershipFunction> {
        match self.points.as_slice() {
            [a, b, c] => MembershipFunction::triangular(*a, *b, *c),
            [a, b, c, d] => MembershipFunction::trapezoidal(*a, *b, *c, *d),
            other => fuzz_bail!(
                ErrorCode::InvalidMembership,
                "term '{}' needs 3 or 4 points, got {}",
                self.label,
                other.len()
            ),
        }
    }
}

/// One linguistic variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    pub min: f64,
    pub max: f64,
    /// Discretization step; only consulted when the variable is a consequent
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    pub terms: Vec<TermSpec>,
}

fn default_resolution() -> f64 {
    1.0
}

impl VariableSpec {
    /// Convert to a validated linguistic variable
    pub fn to_variable(&self) -> FuzzResult<LinguisticVariable> {
        let mut var = LinguisticVariable::new(&self.name, self.min, self.max)?
            .with_resolution(self.resolution)?;
        for term in &self.terms {
            var = var.term(&term.label, term.to_membership()?)?;
        }
        Ok(var)
    }
}

/// One network: its consequent, the antecedents it consumes, and its rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Name of the consequent variable
    pub consequent: String,
    /// Names of the antecedent variables this network consumes
    pub antecedents: Vec<String>,
    /// The rule set
    pub rules: Vec<Rule>,
}

/// The full catalog: all variables plus the two network definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog version tag; changing rules bumps this, not the crate
    pub version: String,
    /// Every variable, antecedent and consequent alike
    pub variables: Vec<VariableSpec>,
    /// The stress network definition
    pub stress: NetworkSpec,
    /// The instability network definition
    pub instability: NetworkSpec,
}

impl Catalog {
    /// Build the shared variable set for this catalog
    ///
    /// Variables are constructed once and shared by reference between the
    /// networks, not duplicated.
    pub fn build_variables(&self) -> FuzzResult<VariableSet> {
        let mut set = VariableSet::new();
        for spec in &self.variables {
            if set.contains_key(spec.name.as_str()) {
                fuzz_bail!(
                    ErrorCode::DuplicateLabel,
                    "catalog declares variable '{}' twice",
                    spec.name
                );
            }
            set.insert(spec.name.clone(), Arc::new(spec.to_variable()?));
        }
        Ok(set)
    }

    /// Load a catalog from a TOML document
    pub fn from_toml_str(text: &str) -> FuzzResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a catalog from a JSON document
    pub fn from_json_str(text: &str) -> FuzzResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a catalog from a file, dispatching on the extension
    pub fn from_path(path: &Path) -> FuzzResult<Self> {
        let is_toml = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => true,
            Some("json") => false,
            _ => {
                return Err(FuzzError::new(
                    ErrorCode::UnknownCatalogFormat,
                    format!("cannot infer catalog format of '{}'", path.display()),
                )
                .with_hint("Supported catalog formats: .toml, .json"))
            }
        };
        let text = fs::read_to_string(path).map_err(|e| {
            FuzzError::from(e).with_context("path", path.display().to_string())
        })?;
        if is_toml {
            Self::from_toml_str(&text)
        } else {
            Self::from_json_str(&text)
        }
    }

    /// The built-in, versioned default catalog
    ///
    /// Eleven antecedent variables, two consequents, 20 stress rules and
    /// 6 instability rules. The first eleven stress rules cover the core
    /// sleep/study/screen/mood/deadline/activity factors; the remainder
    /// extend coverage to the social, procrastination, financial, age and
    /// quiz factors. Default input values (mood 5, deadline 0, activity 0,
    /// social 5, procrastination 5, financial 5, age 30, quiz 50) fire
    /// none of the extended rules, so defaults stay neutral.
    pub fn builtin() -> Self {
        let variables = vec![
            VariableSpec {
                name: "sleep".into(),
                min: 0.0,
                max: 12.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("poor", 0.0, 0.0, 6.0),
                    TermSpec::tri("average", 4.0, 7.0, 9.0),
                    TermSpec::tri("good", 7.0, 12.0, 12.0),
                ],
            },
            VariableSpec {
                name: "study".into(),
                min: 0.0,
                max: 16.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("low", 0.0, 0.0, 5.0),
                    TermSpec::tri("moderate", 4.0, 8.0, 12.0),
                    TermSpec::tri("high", 10.0, 16.0, 16.0),
                ],
            },
            VariableSpec {
                name: "screen_time".into(),
                min: 0.0,
                max: 24.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("low", 0.0, 0.0, 4.0),
                    TermSpec::tri("moderate", 3.0, 6.0, 9.0),
                    TermSpec::tri("high", 7.0, 24.0, 24.0),
                ],
            },
            VariableSpec {
                name: "mood".into(),
                min: 1.0,
                max: 10.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("low", 1.0, 1.0, 4.0),
                    TermSpec::tri("neutral", 3.0, 5.0, 8.0),
                    TermSpec::tri("high", 6.0, 10.0, 10.0),
                ],
            },
            VariableSpec {
                name: "deadline".into(),
                min: 0.0,
                max: 10.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("none", 0.0, 0.0, 3.0),
                    TermSpec::tri("upcoming", 2.0, 5.0, 8.0),
                    TermSpec::tri("urgent", 7.0, 10.0, 10.0),
                ],
            },
            VariableSpec {
                name: "activity".into(),
                min: 0.0,
                max: 10.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("low", 0.0, 0.0, 4.0),
                    TermSpec::tri("moderate", 3.0, 6.0, 9.0),
                    TermSpec::tri("high", 7.0, 10.0, 10.0),
                ],
            },
            VariableSpec {
                name: "social".into(),
                min: 0.0,
                max: 10.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("low", 0.0, 0.0, 4.0),
                    TermSpec::tri("moderate", 3.0, 6.0, 9.0),
                    TermSpec::tri("high", 7.0, 10.0, 10.0),
                ],
            },
            VariableSpec {
                name: "procrastination".into(),
                min: 0.0,
                max: 10.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("low", 0.0, 0.0, 4.0),
                    TermSpec::tri("medium", 2.0, 5.0, 8.0),
                    TermSpec::tri("high", 6.0, 10.0, 10.0),
                ],
            },
            VariableSpec {
                name: "financial".into(),
                min: 0.0,
                max: 10.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("low", 0.0, 0.0, 4.0),
                    TermSpec::tri("moderate", 2.0, 5.0, 8.0),
                    TermSpec::tri("high", 6.0, 10.0, 10.0),
                ],
            },
            VariableSpec {
                name: "age".into(),
                min: 10.0,
                max: 80.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("young", 10.0, 10.0, 30.0),
                    TermSpec::tri("middle", 25.0, 40.0, 60.0),
                    TermSpec::tri("senior", 50.0, 80.0, 80.0),
                ],
            },
            VariableSpec {
                name: "quiz".into(),
                min: 0.0,
                max: 100.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("low", 0.0, 0.0, 40.0),
                    TermSpec::tri("moderate", 30.0, 50.0, 70.0),
                    TermSpec::tri("high", 60.0, 100.0, 100.0),
                ],
            },
            VariableSpec {
                name: "stress".into(),
                min: 0.0,
                max: 100.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("low", 0.0, 0.0, 40.0),
                    TermSpec::tri("moderate", 30.0, 50.0, 70.0),
                    TermSpec::tri("high", 60.0, 100.0, 100.0),
                ],
            },
            VariableSpec {
                name: "instability".into(),
                min: 0.0,
                max: 100.0,
                resolution: 1.0,
                terms: vec![
                    TermSpec::tri("low", 0.0, 0.0, 40.0),
                    TermSpec::tri("moderate", 30.0, 50.0, 70.0),
                    TermSpec::tri("high", 60.0, 100.0, 100.0),
                ],
            },
        ];

        let stress_rules = vec![
            Rule::named(
                "sleep_debt_or_heavy_study",
                Expr::is("sleep", "poor").or(Expr::is("study", "high")),
                "stress",
                "high",
            ),
            Rule::named(
                "rested_and_light_study",
                Expr::is("sleep", "good").and(Expr::is("study", "low")),
                "stress",
                "low",
            ),
            Rule::named(
                "steady_routine",
                Expr::is("sleep", "average").and(Expr::is("study", "moderate")),
                "stress",
                "moderate",
            ),
            Rule::named(
                "excessive_screen_time",
                Expr::is("screen_time", "high"),
                "stress",
                "high",
            ),
            Rule::named(
                "screens_cutting_sleep",
                Expr::is("screen_time", "high").and(Expr::is("sleep", "poor")),
                "stress",
                "high",
            ),
            Rule::named(
                "minimal_screen_time",
                Expr::is("screen_time", "low"),
                "stress",
                "low",
            ),
            Rule::named(
                "urgent_deadline",
                Expr::is("deadline", "urgent"),
                "stress",
                "high",
            ),
            Rule::named("low_mood", Expr::is("mood", "low"), "stress", "high"),
            Rule::named(
                "exercise_buffer",
                Expr::is("activity", "high").and(Expr::is("study", "moderate")),
                "stress",
                "low",
            ),
            Rule::named(
                "good_mood_active",
                Expr::is("mood", "high").and(Expr::is("activity", "moderate")),
                "stress",
                "low",
            ),
            Rule::named(
                "low_mood_under_deadline",
                Expr::is("mood", "low").and(Expr::is("deadline", "upcoming")),
                "stress",
                "high",
            ),
            Rule::named(
                "money_worries",
                Expr::is("financial", "high"),
                "stress",
                "high",
            ),
            Rule::named(
                "isolated_and_down",
                Expr::is("social", "low").and(Expr::is("mood", "low")),
                "stress",
                "high",
            ),
            Rule::named(
                "procrastinating_on_urgent",
                Expr::is("procrastination", "high").and(Expr::is("deadline", "urgent")),
                "stress",
                "high",
            ),
            Rule::named(
                "self_reported_strain",
                Expr::is("quiz", "high"),
                "stress",
                "high",
            ),
            Rule::named(
                "self_reported_calm",
                Expr::is("quiz", "low"),
                "stress",
                "low",
            ),
            Rule::named(
                "social_and_active",
                Expr::is("social", "high").and(Expr::is("activity", "moderate")),
                "stress",
                "low",
            ),
            Rule::named(
                "young_under_pressure",
                Expr::is("age", "young").and(Expr::is("deadline", "urgent")),
                "stress",
                "high",
            ),
            Rule::named(
                "backlog_crunch",
                Expr::is("procrastination", "high").and(Expr::is("study", "high")),
                "stress",
                "high",
            ),
            Rule::named(
                "secure_and_connected",
                Expr::is("financial", "low").and(Expr::is("social", "high")),
                "stress",
                "low",
            ),
        ];

        let instability_rules = vec![
            Rule::named(
                "financial_or_procrastination_strain",
                Expr::is("financial", "high").or(Expr::is("procrastination", "high")),
                "instability",
                "high",
            ),
            Rule::named(
                "isolated_with_money_worries",
                Expr::is("social", "low").and(Expr::is("financial", "high")),
                "instability",
                "high",
            ),
            Rule::named(
                "screens_replacing_people",
                Expr::is("screen_time", "high").and(Expr::is("social", "low")),
                "instability",
                "high",
            ),
            Rule::named(
                "connected_and_disciplined",
                Expr::is("social", "high").and(Expr::is("procrastination", "low")),
                "instability",
                "low",
            ),
            Rule::named(
                "secure_and_social",
                Expr::is("financial", "low").and(Expr::is("social", "high")),
                "instability",
                "low",
            ),
            Rule::named(
                "middling_habits",
                Expr::is("procrastination", "medium").and(Expr::is("financial", "moderate")),
                "instability",
                "moderate",
            ),
        ];

        Catalog {
            version: BUILTIN_CATALOG_VERSION.to_string(),
            variables,
            stress: NetworkSpec {
                consequent: "stress".into(),
                antecedents: vec![
                    "sleep".into(),
                    "study".into(),
                    "screen_time".into(),
                    "mood".into(),
                    "deadline".into(),
                    "activity".into(),
                    "social".into(),
                    "procrastination".into(),
                    "financial".into(),
                    "age".into(),
                    "quiz".into(),
                ],
                rules: stress_rules,
            },
            instability: NetworkSpec {
                consequent: "instability".into(),
                antecedents: vec![
                    "social".into(),
                    "procrastination".into(),
                    "financial".into(),
                    "screen_time".into(),
                ],
                rules: instability_rules,
            },
        }
    }
}
