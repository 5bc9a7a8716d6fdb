//! Error types for figure construction.

use thiserror::Error;

/// Rejected figure construction arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A field that must be strictly positive was zero or negative
    #[error("Invalid geometry: {field} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value, as text
        value: String,
    },

    /// A size field exceeded the largest drawable extent
    #[error("Invalid geometry: {field} must be at most {max}, got {value}")]
    TooLarge {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value, as text
        value: String,
        /// The largest accepted value, as text
        max: String,
    },

    /// Translating a point left the representable decimal range
    #[error("Invalid geometry: moving {point} by {offset} is out of range")]
    Overflow {
        /// The point being moved, as text
        point: String,
        /// The offset applied, as text
        offset: String,
    },

    /// A field that must be a whole number had a fractional part
    #[error("Invalid geometry: {field} must be a whole number, got {value}")]
    NotInteger {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value, as text
        value: String,
    },

    /// A fixed-arity figure got the wrong number of points
    #[error("Invalid geometry: {figure} expects {expected} points, got {found}")]
    WrongPointCount {
        /// Figure type name
        figure: &'static str,
        /// Required number of points
        expected: usize,
        /// Number of points supplied
        found: usize,
    },

    /// A required constructor argument was not supplied
    #[error("Invalid geometry: missing argument '{name}'")]
    MissingArgument {
        /// Name of the missing argument
        name: String,
    },

    /// A constructor argument had the wrong kind of value
    #[error("Invalid geometry: argument '{name}' expects a {expected}, got '{found}'")]
    WrongArgumentKind {
        /// Name of the argument
        name: String,
        /// Expected kind name
        expected: &'static str,
        /// The supplied value, as text
        found: String,
    },

    /// An argument that the figure type does not declare
    #[error("Invalid geometry: unexpected argument '{name}'")]
    UnexpectedArgument {
        /// Name of the undeclared argument
        name: String,
    },
}

impl GeometryError {
    /// Create a missing argument error.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument { name: name.into() }
    }

    /// Create a non-positive field error.
    pub fn non_positive(field: &'static str, value: impl ToString) -> Self {
        Self::NonPositive {
            field,
            value: value.to_string(),
        }
    }

    /// Create an out-of-range translation error.
    pub fn overflow(point: impl ToString, offset: impl ToString) -> Self {
        Self::Overflow {
            point: point.to_string(),
            offset: offset.to_string(),
        }
    }
}
