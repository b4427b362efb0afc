use thiserror::Error;

/// Convenient result alias for the bargeflow library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Only invalid configuration stops a computation. Infeasible designs, zero
/// cargo and undefined propulsion are modelled outcomes and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a configuration field fails validation.
    #[error("invalid parameter {field}: {message}")]
    InvalidParameter { field: String, message: String },

    /// Raised when a river depth profile is malformed.
    #[error("invalid depth profile: {message}")]
    InvalidDepthProfile { message: String },

    /// Raised when no engine can be sized because the propulsion power is
    /// undefined in the deepest month.
    #[error("invalid channel geometry: {message}")]
    InvalidGeometry { message: String },

    /// Raised when a dedicated worker pool cannot be built.
    #[error("failed to build worker pool: {message}")]
    WorkerPool { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON scenario parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV depth profile parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }
}
