//! Error types for configuration loading and lookup

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by typed lookups and value assignment.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("config option {0} does not exist")]
    UnknownKey(String),

    #[error("special category {0} does not exist")]
    UnknownCategory(String),

    #[error("special category {category} has no instance {key}")]
    UnknownInstance { category: String, key: String },

    #[error("config option {key} is a {found}, not a {expected}")]
    TypeMismatch { key: String, expected: &'static str, found: &'static str },

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue { key: String, value: String, reason: String },
}

/// A single advisory error recorded while parsing. Parsing never stops on
/// these; the offending entry keeps its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub path: PathBuf,
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config error in file {} at line {}: {}",
            self.path.display(),
            self.line,
            self.message
        )
    }
}

/// Outcome of a parse: the list of advisory errors, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub errors: Vec<ParseError>,
}

impl ParseReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All errors joined one per line, as shown to the user.
    pub fn error_string(&self) -> String {
        self.errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
