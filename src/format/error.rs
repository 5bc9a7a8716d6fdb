//! Error types for the text codec and figure registry.

use thiserror::Error;

use crate::model::GeometryError;

/// Errors that can occur while decoding or resolving figures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Type name not present in the figure registry
    #[error("Unknown figure type '{name}'")]
    UnknownType {
        /// The unresolved type name
        name: String,
    },

    /// Malformed text structure
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number in the decoded text
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Tree nested deeper than the decoder accepts
    #[error("Nesting reaches level {level}, deeper than the limit of {max}")]
    TooDeep { level: usize, max: usize },

    /// Field values rejected by the figure constructor
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl FormatError {
    /// Create a parse error for the given 1-based line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an unknown type error.
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }
}
