//! # lumen-core
//!
//! Core types for the Lumen viewer's post-processing pipeline.
//!
//! This crate provides the foundational types shared by every other Lumen crate:
//!
//! - [`Frame`] - Owned RGBA `f32` color buffer produced by the scene renderer
//! - [`luminance_rec709`] and the [`REC709_LUMA`] weights
//! - [`Error`] / [`Result`] - Buffer construction and access errors
//!
//! ## Crate Structure
//!
//! `lumen-core` has no internal dependencies. All other crates build on it:
//!
//! ```text
//! lumen-core (this crate)
//!    ^
//!    |
//!    +-- lumen-math (interpolation helpers)
//!    +-- lumen-color (HSV, hex colors)
//!    +-- lumen-io (PNG frames)
//!    +-- lumen-ops (grading, bloom, effect chain)
//!    +-- lumen-session (render loop, settings)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod frame;
pub mod pixel;

pub use error::{Error, Result};
pub use frame::{Frame, CHANNELS};
pub use pixel::{luminance_rec709, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};

/// Prelude module for convenient imports.
///
/// ```
/// use lumen_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::frame::{Frame, CHANNELS};
    pub use crate::pixel::{luminance_rec709, REC709_LUMA};
}
