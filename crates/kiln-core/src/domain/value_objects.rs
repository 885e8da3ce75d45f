//! Domain value objects: ConfigValue, Scope, Level, PropertyTarget, Change.
//!
//! These are pure value types with equality-by-value and no identity.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ConfigValue ──────────────────────────────────────────────────────────────

/// A typed configuration value carried by a project or a properties file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl ConfigValue {
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::String(_) => "string",
        }
    }

    /// Parse a raw textual value, restoring booleans and integers.
    ///
    /// Only the canonical spelling of an integer becomes [`Self::Integer`],
    /// so `0042` or `+7` stay strings and render back unchanged.
    ///
    /// Used when reading `.properties` files and `--set key=value` input.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            _ => match raw.parse::<i64>() {
                Ok(i) if i.to_string() == raw => Self::Integer(i),
                _ => Self::String(raw.to_string()),
            },
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

// ── Scope ────────────────────────────────────────────────────────────────────

/// Dependency scope. Part of the dependency deduplication key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Runtime,
    Provided,
    Test,
    Import,
}

impl Scope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::Provided => "provided",
            Self::Test => "test",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compile" => Ok(Self::Compile),
            "runtime" => Ok(Self::Runtime),
            "provided" => Ok(Self::Provided),
            "test" => Ok(Self::Test),
            "import" => Ok(Self::Import),
            other => Err(DomainError::InvalidDependency(format!(
                "unknown scope: {other}"
            ))),
        }
    }
}

// ── Level ────────────────────────────────────────────────────────────────────

/// Logging level written into generated logback configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            other => Err(DomainError::InvalidProject(format!(
                "unknown log level: {other}"
            ))),
        }
    }
}

// ── PropertyTarget ───────────────────────────────────────────────────────────

/// Which runtime configuration file a property lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyTarget {
    Main,
    Test,
}

// ── Change ───────────────────────────────────────────────────────────────────

/// Outcome of an idempotent mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added,
    Updated,
    Unchanged,
}

impl Change {
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}
