//! Fuzzy rules
//!
//! A rule pairs an antecedent expression tree with a consequent
//! `(variable, label)`. The tree combines `(variable, label)` propositions
//! with fuzzy AND (min), OR (max), and NOT (complement), which keeps the
//! rule set pure data: a catalog can be declared in code, or loaded from
//! TOML/JSON, without touching the evaluation algorithm.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FuzzError, FuzzResult};
use super::value::FuzzyValue;
use super::variable::LinguisticVariable;

/// The set of variables an expression is evaluated against
pub type VariableSet = IndexMap<String, Arc<LinguisticVariable>>;

/// A crisp input vector: variable name to numeric value
///
/// Values are clamped to each variable's universe during fuzzification,
/// not here; the map itself is just plain data built fresh per call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrispInputs(IndexMap<String, f64>);

impl CrispInputs {
    /// Create an empty input vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one
    pub fn set(&mut self, variable: impl Into<String>, value: f64) -> &mut Self {
        self.0.insert(variable.into(), value);
        self
    }

    /// Builder-style `set`
    pub fn with(mut self, variable: impl Into<String>, value: f64) -> Self {
        self.0.insert(variable.into(), value);
        self
    }

    /// Look up a value
    pub fn get(&self, variable: &str) -> Option<f64> {
        self.0.get(variable).copied()
    }

    /// Number of supplied values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no values are supplied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for CrispInputs {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// An antecedent expression: a tree of propositions combined with fuzzy
/// AND/OR/NOT
///
/// Serialized in externally-tagged form, e.g.
/// `{"any": [{"is": {"variable": "sleep", "label": "poor"}},
///           {"is": {"variable": "study", "label": "high"}}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Leaf proposition: membership of the input in `variable`'s `label`
    Is { variable: String, label: String },
    /// Fuzzy AND: pointwise minimum over the operands
    All(Vec<Expr>),
    /// Fuzzy OR: pointwise maximum over the operands
    Any(Vec<Expr>),
    /// Fuzzy NOT: complement of the operand
    Not(Box<Expr>),
}

impl Expr {
    /// Leaf proposition builder
    pub fn is(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Expr::Is {
            variable: variable.into(),
            label: label.into(),
        }
    }

    /// Combine with another expression under fuzzy AND
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::All(mut ops) => {
                ops.push(other);
                Expr::All(ops)
            }
            first => Expr::All(vec![first, other]),
        }
    }

    /// Combine with another expression under fuzzy OR
    pub fn or(self, other: Expr) -> Self {
        match self {
            Expr::Any(mut ops) => {
                ops.push(other);
                Expr::Any(ops)
            }
            first => Expr::Any(vec![first, other]),
        }
    }

    /// Wrap in fuzzy NOT
    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Evaluate the expression against a crisp input vector
    ///
    /// Deterministic: identical inputs always produce identical degrees.
    /// A proposition whose variable has no supplied value is a caller
    /// error at this layer; unknown variables/labels are unreachable once
    /// network validation has run.
    pub fn eval(&self, variables: &VariableSet, inputs: &CrispInputs) -> FuzzResult<FuzzyValue> {
        match self {
            Expr::Is { variable, label } => {
                let var = variables
                    .get(variable.as_str())
                    .ok_or_else(|| FuzzError::unknown_variable(variable))?;
                let x = inputs
                    .get(variable)
                    .ok_or_else(|| FuzzError::missing_input(variable))?;
                var.degree_of(label, x)
            }
            Expr::All(ops) => {
                let mut degree = FuzzyValue::new(1.0);
                for op in ops {
                    degree = degree.and(&op.eval(variables, inputs)?);
                }
                Ok(degree)
            }
            Expr::Any(ops) => {
                let mut degree = FuzzyValue::new(0.0);
                for op in ops {
                    degree = degree.or(&op.eval(variables, inputs)?);
                }
                Ok(degree)
            }
            Expr::Not(op) => Ok(op.eval(variables, inputs)?.not()),
        }
    }

    /// Visit every `(variable, label)` proposition in the tree
    pub fn propositions(&self) -> Vec<(&str, &str)> {
        fn walk<'a>(expr: &'a Expr, out: &mut Vec<(&'a str, &'a str)>) {
            match expr {
                Expr::Is { variable, label } => out.push((variable, label)),
                Expr::All(ops) | Expr::Any(ops) => {
                    for op in ops {
                        walk(op, out);
                    }
                }
                Expr::Not(op) => walk(op, out),
            }
        }
        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    /// Whether the tree contains an AND/OR node with no operands
    pub fn has_empty_node(&self) -> bool {
        match self {
            Expr::Is { .. } => false,
            Expr::All(ops) | Expr::Any(ops) => {
                ops.is_empty() || ops.iter().any(Expr::has_empty_node)
            }
            Expr::Not(op) => op.has_empty_node(),
        }
    }
}

/// A rule's conclusion: one label of one output variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consequent {
    /// Output variable name
    pub variable: String,
    /// Label of the output variable
    pub label: String,
}

/// An immutable fuzzy rule
///
/// Declared once at system construction; rules are evaluated independently
/// of one another. Serialized with `when`/`then` field names, matching the
/// catalog file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Optional rule name, surfaced in explanations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Antecedent expression tree
    #[serde(rename = "when")]
    pub antecedent: Expr,
    /// Consequent `(variable, label)`
    #[serde(rename = "then")]
    pub consequent: Consequent,
}

impl Rule {
    /// Create an anonymous rule
    pub fn new(
        antecedent: Expr,
        consequent_variable: impl Into<String>,
        consequent_label: impl Into<String>,
    ) -> Self {
        Self {
            name: None,
            antecedent,
            consequent: Consequent {
                variable: consequent_variable.into(),
                label: consequent_label.into(),
            },
        }
    }

    /// Create a named rule
    pub fn named(
        name: impl Into<String>,
        antecedent: Expr,
        consequent_variable: impl Into<String>,
        consequent_label: impl Into<String>,
    ) -> Self {
        let mut rule = Self::new(antecedent, consequent_variable, consequent_label);
        rule.name = Some(name.into());
        rule
    }

    /// Firing strength: evaluation of the antecedent against the inputs
    pub fn fire(&self, variables: &VariableSet, inputs: &CrispInputs) -> FuzzResult<FuzzyValue> {
        self.antecedent.eval(variables, inputs)
    }
}
