//! Error types for color operations.

use thiserror::Error;

/// Color operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Hex color string is not of the form `#rrggbb`.
    #[error("invalid hex color {input:?}: {reason}")]
    InvalidHex {
        /// The offending input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
