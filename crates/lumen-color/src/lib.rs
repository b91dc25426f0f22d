//! # lumen-color
//!
//! Color-space utilities used by the Lumen grading operator.
//!
//! - [`rgb_to_hsv`] / [`hsv_to_rgb`] - HSV with hue in [0, 1), epsilon-guarded
//!   so achromatic colors never divide by zero
//! - [`parse_hex_rgb`] / [`to_hex_rgb`] - `#rrggbb` strings as used by color
//!   pickers in the settings UI
//!
//! # Quick Start
//!
//! ```rust
//! use lumen_color::{hsv_to_rgb, parse_hex_rgb, rgb_to_hsv};
//!
//! let orange = parse_hex_rgb("#ff8000").unwrap();
//! let hsv = rgb_to_hsv(orange);
//! let back = hsv_to_rgb(hsv);
//! assert!((back[1] - orange[1]).abs() < 1e-5);
//! ```
//!
//! # Used By
//!
//! - `lumen-ops` - selective saturation and tint stages, settings marshaling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod hex;
pub mod hsv;

pub use error::{ColorError, ColorResult};
pub use hex::{parse_hex_rgb, to_hex_rgb};
pub use hsv::{hsv_to_rgb, rgb_to_hsv, Hsv, HSV_EPSILON};
