//! fuzzstress - fuzzy stress and lifestyle-instability scoring
//!
//! A Mamdani-style fuzzy inference engine that turns crisp lifestyle
//! measurements into two crisp scores on a 0-100 scale: stress and
//! lifestyle instability.
//!
//! # Architecture
//!
//! The crate is split into a generic inference layer and a fixed,
//! versioned configuration on top of it:
//!
//! - [`fuzzy`] - membership functions, linguistic variables, rule
//!   expression trees, and the Mamdani inference network
//!   (fuzzification, min-implication, max-aggregation, centroid
//!   defuzzification)
//! - [`catalog`] - the variable/rule catalog as data: a built-in default
//!   plus TOML/JSON loading, so changing the rule set is a configuration
//!   change, not a code change
//! - [`engine`] - the composed system: two independent networks over one
//!   shared variable set, the input record, and the scoring surface
//!
//! # Properties
//!
//! - Configuration is validated when the engine is built; a rule that
//!   references an undeclared variable or label fails construction,
//!   never evaluation
//! - Inputs are clamped to each variable's universe before fuzzification
//! - When no rule fires, the result is the midpoint of the output
//!   universe (50.0 on the 0-100 scales) - a documented fallback, not a
//!   swallowed error
//! - Evaluation is pure and holds no per-call state on the engine, so a
//!   shared engine can be called from any number of threads concurrently
//!
//! # Example
//!
//! ```rust,ignore
//! use fuzzstress::{StressEngine, StressInputs};
//!
//! let engine = StressEngine::new()?;
//! let inputs = StressInputs::new(6.5, 8.0, 5.0)
//!     .with_mood(4.0)
//!     .with_deadline(10.0);
//!
//! let stress = engine.compute_stress(&inputs)?;
//! let instability = engine.compute_instability(&inputs)?;
//! ```

pub mod error;
pub mod config;
pub mod fuzzy;
pub mod catalog;
pub mod engine;

// Re-export the scoring surface
pub use engine::{
    quiz_score_from_likert, ActivityLevel, Assessment, DeadlineLevel, Explanation,
    ProcrastinationLevel, StressBand, StressEngine, StressInputs,
};

// Re-export the generic inference layer
pub use fuzzy::{
    Consequent, CrispInputs, Expr, FuzzyValue, InferenceNetwork, LinguisticVariable,
    MembershipFunction, NetworkBuilder, Rule, RuleFiring, VariableSet,
};

// Re-export catalog types
pub use catalog::{Catalog, NetworkSpec, TermSpec, VariableSpec, BUILTIN_CATALOG_VERSION};

// Re-export configuration types
pub use config::{EngineConfig, FuzzConfig, GeneralConfig, LogLevel, OutputFormat};

// Re-export error types
pub use error::{ErrorCode, ErrorContext, FuzzError, FuzzResult};
