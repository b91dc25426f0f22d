//! Error types for frame I/O.

use std::io;
use thiserror::Error;

/// Frame I/O error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decoding error.
    #[error("decode error: {0}")]
    Decode(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    Encode(String),

    /// Unsupported file format or pixel layout.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Decoded data did not form a valid frame.
    #[error(transparent)]
    Frame(#[from] lumen_core::Error),
}

/// Result type for frame I/O.
pub type IoResult<T> = Result<T, IoError>;
