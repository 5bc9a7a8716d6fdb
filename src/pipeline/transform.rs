//! The transform contract and pipeline failure types.

use thiserror::Error;

/// Boxed error for failures a transform does not classify itself.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A reversible byte-level operation applied on top of the serialized text.
///
/// `read` must accept exactly what `write` produces. Input that does not
/// carry the transform's own tag must be returned unchanged, so optional
/// transforms can read files that were saved without them.
pub trait Transform {
    /// Name shown to the user and used to tag unrecognized failures.
    fn display_name(&self) -> &'static str;

    fn write(&self, data: Vec<u8>) -> Result<Vec<u8>, TransformError>;

    fn read(&self, data: Vec<u8>) -> Result<Vec<u8>, TransformError>;
}

/// Failure reported by a single transform.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Expected failure; the message is shown to the user as is
    #[error("{0}")]
    Stop(String),

    /// Anything else that went wrong inside the transform
    #[error(transparent)]
    Other(#[from] BoxError),
}

impl TransformError {
    /// Create a stop signal with a user-facing message.
    pub fn stop(message: impl Into<String>) -> Self {
        Self::Stop(message.into())
    }

    /// Wrap an arbitrary error.
    pub fn other(error: impl Into<BoxError>) -> Self {
        Self::Other(error.into())
    }
}

impl From<std::io::Error> for TransformError {
    fn from(e: std::io::Error) -> Self {
        Self::Other(Box::new(e))
    }
}

/// The pipeline stopped; carries the user-facing reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct PipelineStopped {
    pub reason: String,
}

impl PipelineStopped {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Convert a transform failure, tagging unrecognized ones with the
    /// transform's display name.
    pub fn from_transform(name: &str, error: TransformError) -> Self {
        match error {
            TransformError::Stop(message) => Self::new(message),
            TransformError::Other(e) => Self::new(format!("{}: {}", name, e)),
        }
    }
}
