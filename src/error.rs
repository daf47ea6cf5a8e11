//! Structured Error Handling for fuzzstress
//!
//! Provides a unified error type hierarchy with:
//! - Error codes for programmatic handling
//! - Structured, serializable error values
//! - Context preservation through error chains
//!
//! # Error Categories
//!
//! - Catalog errors - malformed membership functions, variables, or rules,
//!   always raised at construction time, never during evaluation
//! - Evaluation errors - caller mistakes at the generic layer (a rule
//!   references an input the caller did not supply)
//! - Config errors - configuration file and catalog-file loading issues
//!
//! # Example
//!
//! ```rust,ignore
//! use fuzzstress::error::{FuzzError, ErrorCode};
//!
//! fn check_resolution(res: f64) -> Result<(), FuzzError> {
//!     if res <= 0.0 {
//!         return Err(FuzzError::catalog("resolution must be positive")
//!             .with_code(ErrorCode::InvalidResolution)
//!             .with_context("resolution", res.to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Catalog/construction errors (1xxx)
    /// Generic catalog error
    CatalogError = 1000,
    /// Membership function parameters out of order or non-finite
    InvalidMembership = 1001,
    /// Variable universe empty, inverted, or non-finite
    InvalidUniverse = 1002,
    /// Non-positive or non-finite discretization resolution
    InvalidResolution = 1003,
    /// Two terms of one variable share a label
    DuplicateLabel = 1004,
    /// A rule references a variable absent from the network
    UnknownVariable = 1005,
    /// A rule references a label absent from its variable
    UnknownLabel = 1006,
    /// A rule's consequent variable differs from the network's
    ConsequentMismatch = 1007,
    /// An AND/OR node with no operands
    EmptyExpression = 1008,
    /// A membership function extends outside its variable's universe
    TermOutsideUniverse = 1009,

    // Evaluation errors (2xxx)
    /// Generic evaluation error
    EvaluationError = 2000,
    /// A rule needs an input value the caller did not supply
    MissingInput = 2001,
    /// An input value is NaN or infinite
    InvalidValue = 2002,

    // Config errors (7xxx)
    /// Generic config error
    ConfigError = 7000,
    /// Config or catalog file not found
    ConfigNotFound = 7001,
    /// Invalid config syntax
    InvalidConfigSyntax = 7002,
    /// Invalid config value
    InvalidConfigValue = 7003,
    /// Catalog file extension is neither .toml nor .json
    UnknownCatalogFormat = 7004,

    // Internal errors (9xxx)
    /// Internal error
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::CatalogError => "Catalog error",
            ErrorCode::InvalidMembership => "Invalid membership function",
            ErrorCode::InvalidUniverse => "Invalid universe",
            ErrorCode::InvalidResolution => "Invalid resolution",
            ErrorCode::DuplicateLabel => "Duplicate label",
            ErrorCode::UnknownVariable => "Unknown variable",
            ErrorCode::UnknownLabel => "Unknown label",
            ErrorCode::ConsequentMismatch => "Consequent variable mismatch",
            ErrorCode::EmptyExpression => "Empty antecedent expression",
            ErrorCode::TermOutsideUniverse => "Term outside universe",

            ErrorCode::EvaluationError => "Evaluation error",
            ErrorCode::MissingInput => "Missing input value",
            ErrorCode::InvalidValue => "Invalid input value",

            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ConfigNotFound => "Configuration file not found",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",
            ErrorCode::InvalidConfigValue => "Invalid configuration value",
            ErrorCode::UnknownCatalogFormat => "Unknown catalog file format",

            ErrorCode::InternalError => "Internal error",
        }
    }

    /// Whether this code belongs to the construction-time catalog family
    pub fn is_catalog(&self) -> bool {
        (1000..2000).contains(&self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Error Context
// ============================================================================

/// Additional context information for an error
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Key-value pairs of context information
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, String>,
    /// Source location (file:line)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Stack of error causes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ErrorContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to the context
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add source location
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add a cause to the error chain
    pub fn cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for fuzzstress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FuzzError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    // ========================================================================
    // Factory methods for common error types
    // ========================================================================

    /// Create a catalog (construction-time) error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CatalogError, message)
    }

    /// Create an invalid-membership error
    pub fn membership(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMembership, message)
    }

    /// Create an unknown-variable error
    pub fn unknown_variable(name: &str) -> Self {
        Self::new(
            ErrorCode::UnknownVariable,
            format!("variable '{}' is not declared in this network", name),
        )
    }

    /// Create an unknown-label error
    pub fn unknown_label(variable: &str, label: &str) -> Self {
        Self::new(
            ErrorCode::UnknownLabel,
            format!("variable '{}' has no label '{}'", variable, label),
        )
    }

    /// Create a missing-input error
    pub fn missing_input(variable: &str) -> Self {
        Self::new(
            ErrorCode::MissingInput,
            format!("no crisp value supplied for variable '{}'", variable),
        )
    }

    /// Create an invalid-value error
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidValue, message)
    }

    /// Create an evaluation error
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EvaluationError, message)
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.fields.insert(key.into(), value.into());
        self
    }

    /// Add a cause to the error chain
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.causes.push(cause.into());
        self
    }

    /// Add source location
    pub fn at(mut self, location: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.location = Some(location.into());
        self
    }

    /// Add a hint for resolving the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Whether this is a construction-time catalog error
    pub fn is_catalog_error(&self) -> bool {
        self.code.is_catalog()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":"INTERNAL_ERROR","message":"{}"}}"#, self.message)
        })
    }
}

impl fmt::Display for FuzzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;

        if let Some(ref ctx) = self.context {
            if let Some(ref loc) = ctx.location {
                write!(f, " at {}", loc)?;
            }
            if !ctx.causes.is_empty() {
                write!(f, "\nCaused by:")?;
                for cause in &ctx.causes {
                    write!(f, "\n  - {}", cause)?;
                }
            }
        }

        if let Some(ref hint) = self.hint {
            write!(f, "\nHint: {}", hint)?;
        }

        Ok(())
    }
}

impl std::error::Error for FuzzError {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<std::io::Error> for FuzzError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        let code = match err.kind() {
            ErrorKind::NotFound => ErrorCode::ConfigNotFound,
            _ => ErrorCode::InternalError,
        };
        FuzzError::new(code, err.to_string())
    }
}

impl From<serde_json::Error> for FuzzError {
    fn from(err: serde_json::Error) -> Self {
        FuzzError::config(err.to_string())
            .with_code(ErrorCode::InvalidConfigSyntax)
            .with_context("format", "JSON")
    }
}

impl From<toml::de::Error> for FuzzError {
    fn from(err: toml::de::Error) -> Self {
        FuzzError::config(err.to_string())
            .with_code(ErrorCode::InvalidConfigSyntax)
            .with_context("format", "TOML")
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// A Result type using FuzzError
pub type FuzzResult<T> = Result<T, FuzzError>;

// ============================================================================
// Macros for convenient error creation
// ============================================================================

/// Create a FuzzError with context from the current location
#[macro_export]
macro_rules! fuzz_error {
    ($code:expr, $msg:expr) => {
        $crate::error::FuzzError::new($code, $msg)
            .at(format!("{}:{}", file!(), line!()))
    };
    ($code:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::error::FuzzError::new($code, format!($fmt, $($arg)*))
            .at(format!("{}:{}", file!(), line!()))
    };
}

/// Bail out early with an error
#[macro_export]
macro_rules! fuzz_bail {
    ($code:expr, $msg:expr) => {
        return Err($crate::fuzz_error!($code, $msg))
    };
    ($code:expr, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::fuzz_error!($code, $fmt, $($arg)*))
    };
}

/// Ensure a condition holds, or return an error
#[macro_export]
macro_rules! fuzz_ensure {
    ($cond:expr, $code:expr, $msg:expr) => {
        if !$cond {
            $crate::fuzz_bail!($code, $msg);
        }
    };
    ($cond:expr, $code:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::fuzz_bail!($code, $fmt, $($arg)*);
        }
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = FuzzError::membership("b must not precede a");
        assert_eq!(err.code, ErrorCode::InvalidMembership);
        assert_eq!(err.message, "b must not precede a");
    }

    #[test]
    fn test_error_with_context() {
        let err = FuzzError::unknown_label("sleep", "dreadful")
            .with_context("rule", "sleep_debt_or_heavy_study");

        assert!(err.context.is_some());
        let ctx = err.context.as_ref().unwrap();
        assert_eq!(
            ctx.fields.get("rule"),
            Some(&"sleep_debt_or_heavy_study".to_string())
        );
    }

    #[test]
    fn test_error_with_cause() {
        let err = FuzzError::config("failed to load catalog")
            .with_cause("file truncated")
            .with_cause("unexpected EOF");

        let ctx = err.context.as_ref().unwrap();
        assert_eq!(ctx.causes.len(), 2);
    }

    #[test]
    fn test_error_with_hint() {
        let err = FuzzError::new(ErrorCode::UnknownCatalogFormat, "catalog.yaml")
            .with_hint("Supported catalog formats: .toml, .json");

        assert_eq!(
            err.hint,
            Some("Supported catalog formats: .toml, .json".to_string())
        );
    }

    #[test]
    fn test_catalog_error_family() {
        assert!(FuzzError::membership("x").is_catalog_error());
        assert!(FuzzError::unknown_variable("x").is_catalog_error());
        assert!(!FuzzError::missing_input("x").is_catalog_error());
        assert!(!FuzzError::config("x").is_catalog_error());
    }

    #[test]
    fn test_error_display() {
        let err = FuzzError::unknown_label("mood", "ecstatic")
            .at("catalog.toml:42")
            .with_cause("rule 'good_mood_active'")
            .with_hint("Declared labels: low, neutral, high");

        let display = err.to_string();
        assert!(display.contains("[1006]"));
        assert!(display.contains("ecstatic"));
        assert!(display.contains("catalog.toml:42"));
        assert!(display.contains("good_mood_active"));
        assert!(display.contains("Declared labels"));
    }

    #[test]
    fn test_error_to_json() {
        let err = FuzzError::missing_input("quiz");
        let json = err.to_json();
        assert!(json.contains("MISSING_INPUT"));
        assert!(json.contains("quiz"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: FuzzError = io.into();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }
}
