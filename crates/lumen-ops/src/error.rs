//! Error types for post-processing operators.

use thiserror::Error;

/// Error type for post-processing operators.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid buffer dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Frame construction or combination failed.
    #[error(transparent)]
    Frame(#[from] lumen_core::Error),
}

/// Result type for post-processing operators.
pub type OpsResult<T> = Result<T, OpsError>;
