//! Generic Mamdani fuzzy inference engine
//!
//! This module provides the reusable, catalog-independent machinery:
//! - Fuzzy truth values and their logical combination
//! - Triangular/trapezoidal membership functions
//! - Linguistic variables over bounded numeric universes
//! - Rules with AND/OR/NOT antecedent expression trees
//! - Inference networks (fuzzification, min-implication, max-aggregation,
//!   centroid defuzzification)
//!
//! All configuration objects are immutable once built and validated at
//! construction time. Evaluation is a pure function of the inputs: no I/O,
//! no shared mutable state, safe to call concurrently.
//!
//! # Usage
//!
//! ```ignore
//! use fuzzstress::fuzzy::{Expr, InferenceNetwork, LinguisticVariable, MembershipFunction, Rule};
//!
//! let temp = LinguisticVariable::new("temp", 0.0, 40.0)?
//!     .term("cold", MembershipFunction::triangular(0.0, 0.0, 20.0)?)?
//!     .term("hot", MembershipFunction::triangular(15.0, 40.0, 40.0)?)?;
//! let fan = LinguisticVariable::new("fan", 0.0, 100.0)?
//!     .term("slow", MembershipFunction::triangular(0.0, 0.0, 60.0)?)?
//!     .term("fast", MembershipFunction::triangular(40.0, 100.0, 100.0)?)?;
//!
//! let network = InferenceNetwork::builder(fan.into())
//!     .antecedent(temp.into())
//!     .rule(Rule::named("cooling", Expr::is("temp", "hot"), "fan", "fast"))
//!     .build()?;
//! ```

mod value;
mod membership;
mod variable;
mod rule;
mod network;

pub use value::FuzzyValue;
pub use membership::MembershipFunction;
pub use variable::LinguisticVariable;
pub use rule::{Consequent, CrispInputs, Expr, Rule, VariableSet};
pub use network::{InferenceNetwork, NetworkBuilder, RuleFiring};
