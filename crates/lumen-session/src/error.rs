//! Error types for render sessions.

use std::path::PathBuf;
use thiserror::Error;

/// Render session error.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Settings file could not be read or written.
    #[error("settings file {path}: {source}")]
    SettingsIo {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Settings document is not valid YAML for [`crate::ViewerSettings`].
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_yaml::Error),

    /// Preset name not recognized.
    #[error("unknown preset {0:?} (expected one of: identity, viewer)")]
    UnknownPreset(String),

    /// The session owning the update channel is gone.
    #[error("render session disconnected")]
    Disconnected,

    /// A post effect failed.
    #[error(transparent)]
    Ops(#[from] lumen_ops::OpsError),

    /// Frame source failed to load an image.
    #[error(transparent)]
    Image(#[from] lumen_io::IoError),
}

/// Result type for render sessions.
pub type SessionResult<T> = Result<T, SessionError>;
