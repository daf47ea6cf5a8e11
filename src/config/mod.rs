//! Configuration System for fuzzstress
//!
//! Provides configuration for the CLI and other embedding surfaces:
//! - TOML configuration files
//! - Environment variable overrides
//! - Catalog file selection
//!
//! The library itself never reads configuration implicitly; the engine is
//! constructed from an explicit catalog. This module only serves callers
//! that want file/env-driven defaults, the bundled CLI first among them.
//!
//! # Configuration File Locations
//!
//! Configuration files are searched in order (first found wins):
//! 1. `./fuzzstress.toml` - Project-local configuration
//! 2. `~/.config/fuzzstress/config.toml` - User configuration (XDG)
//! 3. `~/.fuzzstress/config.toml` - User configuration (legacy)
//!
//! # Environment Variables
//!
//! - `FUZZSTRESS_LOG_LEVEL` - Logging verbosity (quiet, normal, verbose, debug)
//! - `FUZZSTRESS_FORMAT` - Default output format (text, json)
//! - `FUZZSTRESS_CATALOG` - Path to a catalog file (.toml or .json)
//!
//! # Example Configuration
//!
//! ```toml
//! # fuzzstress.toml
//!
//! [general]
//! log_level = "normal"
//! format = "text"
//!
//! [engine]
//! catalog = "catalogs/pilot-study.toml"
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, FuzzError, FuzzResult};

// ============================================================================
// Configuration Schema
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FuzzConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Engine settings
    pub engine: EngineConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Logging level
    pub log_level: LogLevel,
    /// Default output format
    pub format: OutputFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Normal,
            format: OutputFormat::Text,
        }
    }
}

/// Engine configuration options
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Catalog file to load instead of the built-in catalog
    pub catalog: Option<PathBuf>,
}

/// Logging verbosity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Quiet,
    Normal,
    Verbose,
    Debug,
}

impl FromStr for LogLevel {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" => Ok(LogLevel::Quiet),
            "normal" => Ok(LogLevel::Normal),
            "verbose" => Ok(LogLevel::Verbose),
            "debug" => Ok(LogLevel::Debug),
            other => Err(FuzzError::new(
                ErrorCode::InvalidConfigValue,
                format!("unknown log level '{}'", other),
            )
            .with_hint("Expected one of: quiet, normal, verbose, debug")),
        }
    }
}

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(FuzzError::new(
                ErrorCode::InvalidConfigValue,
                format!("unknown output format '{}'", other),
            )
            .with_hint("Expected one of: text, json")),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl FuzzConfig {
    /// Parse a configuration document
    pub fn from_toml_str(text: &str) -> FuzzResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Candidate configuration file paths, in priority order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("fuzzstress.toml")];
        if let Some(home) = env::var_os("HOME") {
            let home = PathBuf::from(home);
            paths.push(home.join(".config/fuzzstress/config.toml"));
            paths.push(home.join(".fuzzstress/config.toml"));
        }
        paths
    }

    /// Load configuration: first file found in the search order, then
    /// environment overrides on top. Missing files are not an error; a
    /// file that exists but fails to parse is.
    pub fn load() -> FuzzResult<Self> {
        let mut config = Self::default();
        for path in Self::search_paths() {
            if path.is_file() {
                let text = fs::read_to_string(&path).map_err(|e| {
                    FuzzError::from(e).with_context("path", path.display().to_string())
                })?;
                config = Self::from_toml_str(&text)?;
                break;
            }
        }
        config.apply_env();
        Ok(config)
    }

    /// Apply `FUZZSTRESS_*` environment variable overrides
    ///
    /// Unparseable values are ignored rather than fatal, matching how a
    /// stray shell export should not break every invocation.
    pub fn apply_env(&mut self) {
        if let Ok(level) = env::var("FUZZSTRESS_LOG_LEVEL") {
            if let Ok(level) = level.parse() {
                self.general.log_level = level;
            }
        }
        if let Ok(format) = env::var("FUZZSTRESS_FORMAT") {
            if let Ok(format) = format.parse() {
                self.general.format = format;
            }
        }
        if let Ok(catalog) = env::var("FUZZSTRESS_CATALOG") {
            if !catalog.is_empty() {
                self.engine.catalog = Some(PathBuf::from(catalog));
            }
        }
    }
}
