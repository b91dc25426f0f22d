//! RGB <-> HSV conversion.
//!
//! Hue is normalized to [0, 1) rather than degrees. Saturation and value are
//! in [0, 1] for inputs in [0, 1]^3.
//!
//! The forward conversion adds [`HSV_EPSILON`] to both denominators, so
//! black and grays come out as `h = 0, s = 0` instead of NaN. Ties for the
//! largest channel resolve red first, then green over blue.
//!
//! # Example
//!
//! ```rust
//! use lumen_color::{rgb_to_hsv, hsv_to_rgb};
//!
//! let hsv = rgb_to_hsv([0.0, 1.0, 1.0]);
//! assert!((hsv.h - 0.5).abs() < 1e-6);
//! let rgb = hsv_to_rgb(hsv);
//! assert!(rgb.iter().zip([0.0, 1.0, 1.0]).all(|(a, b)| (a - b).abs() < 1e-5));
//! ```

use lumen_math::{fract, mix, saturate};

/// Guard added to denominators in [`rgb_to_hsv`].
pub const HSV_EPSILON: f32 = 1.0e-10;

/// A color in hue/saturation/value form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Hue in [0, 1). 0 = red, 1/3 = green, 2/3 = blue.
    pub h: f32,
    /// Saturation, 0 = gray.
    pub s: f32,
    /// Value (largest RGB component).
    pub v: f32,
}

impl Hsv {
    /// Creates an HSV triple.
    #[inline]
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Converts an RGB triple to HSV. See [`rgb_to_hsv`].
    #[inline]
    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        rgb_to_hsv(rgb)
    }

    /// Converts back to RGB. See [`hsv_to_rgb`].
    #[inline]
    pub fn to_rgb(self) -> [f32; 3] {
        hsv_to_rgb(self)
    }
}

/// Converts RGB to HSV.
///
/// # Formula
///
/// With `v = max(r, g, b)` and `d = v - min(r, g, b)`:
///
/// ```text
/// red max:    h = |  0  + (g - b) / (6d + e)|     (g >= b)
///             h = | -1  + (b - g) / (6d + e)|     (g <  b)
/// green max:  h = |-1/3 + (r - b) / (6d + e)|
/// blue max:   h = | 2/3 + (r - g) / (6d + e)|
/// s = d / (v + e)
/// ```
#[inline]
pub fn rgb_to_hsv(rgb: [f32; 3]) -> Hsv {
    let [r, g, b] = rgb;

    // (value, remaining channel minimum, hue offset, hue numerator)
    let (v, min_other, offset, numerator) = if r >= g.max(b) {
        if g >= b {
            (r, b, 0.0, g - b)
        } else {
            (r, g, -1.0, b - g)
        }
    } else if g >= b {
        (g, r.min(b), -1.0 / 3.0, r - b)
    } else {
        (b, r.min(g), 2.0 / 3.0, r - g)
    };

    let d = v - min_other;
    let h = (offset + numerator / (6.0 * d + HSV_EPSILON)).abs();
    // -1 + tiny rounds to -1 near pure red
    let h = if h >= 1.0 { h - 1.0 } else { h };
    let s = d / (v + HSV_EPSILON);

    Hsv { h, s, v }
}

/// Converts HSV to RGB.
///
/// Hue wraps modulo 1. Saturation above 1 extrapolates away from gray and
/// can produce negative components; callers clamp where that matters.
///
/// # Formula
///
/// ```text
/// p_i = |fract(h + k_i) * 6 - 3|,  k = (1, 2/3, 1/3)
/// c_i = v * mix(1, clamp(p_i - 1, 0, 1), s)
/// ```
#[inline]
pub fn hsv_to_rgb(hsv: Hsv) -> [f32; 3] {
    const K: [f32; 3] = [1.0, 2.0 / 3.0, 1.0 / 3.0];

    let channel = |k: f32| {
        let p = (fract(hsv.h + k) * 6.0 - 3.0).abs();
        hsv.v * mix(1.0, saturate(p - 1.0), hsv.s)
    };

    [channel(K[0]), channel(K[1]), channel(K[2])]
}
