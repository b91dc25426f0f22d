//! # lumen-math
//!
//! Scalar math helpers for the Lumen post-processing operators.
//!
//! The grading operator is specified in shader terms (`smoothstep`, `mix`,
//! `fract`, `clamp`). This crate provides those functions with the exact
//! GLSL semantics so per-pixel code reads like the math it implements:
//!
//! - Interpolation ([`lerp`], [`mix`], [`inverse_lerp`])
//! - Hermite easing ([`smoothstep`]), including reversed edges
//! - Clamping ([`clamp`], [`saturate`]) and [`fract`]
//!
//! # Usage
//!
//! ```rust
//! use lumen_math::{mix, smoothstep};
//!
//! // Falling edge: 1 at x = 0, 0 at x >= 0.5
//! assert_eq!(smoothstep(0.5, 0.0, 0.0), 1.0);
//! assert_eq!(mix(1.0, 3.0, 0.5), 2.0);
//! ```
//!
//! # Used By
//!
//! - `lumen-color` - HSV conversion
//! - `lumen-ops` - tone masks, hue bands, bloom threshold

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interp;

pub use interp::*;
