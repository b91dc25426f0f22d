//! HSV tint compositing.
//!
//! The tint pulls hue linearly toward the tint hue and scales saturation by
//! the tint's saturation, both weighted by strength. Value is kept, so a
//! tint never brightens or darkens a pixel.

use lumen_color::{hsv_to_rgb, rgb_to_hsv, Hsv};
use lumen_math::mix;

/// Tint color and blend strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    /// Target color, RGB in [0, 1].
    pub color: [f32; 3],
    /// Blend factor in [0, 1]; 0 disables the tint.
    pub strength: f32,
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            strength: 0.0,
        }
    }
}

impl Tint {
    /// Returns `true` if applying this tint changes nothing.
    pub fn is_neutral(&self) -> bool {
        self.strength == 0.0
    }
}

/// Blends `rgb` toward `tint_rgb` by `strength`.
///
/// Strength 0 returns the input bit-for-bit.
#[inline]
pub fn apply_tint(rgb: [f32; 3], tint_rgb: [f32; 3], strength: f32) -> [f32; 3] {
    apply_tint_hsv(rgb, rgb_to_hsv(tint_rgb), strength)
}

/// [`apply_tint`] with the tint already converted to HSV.
#[inline]
pub(crate) fn apply_tint_hsv(rgb: [f32; 3], tint: Hsv, strength: f32) -> [f32; 3] {
    if strength <= 0.0 {
        return rgb;
    }
    let color = rgb_to_hsv(rgb);
    hsv_to_rgb(Hsv {
        h: mix(color.h, tint.h, strength),
        s: mix(color.s, tint.s * color.s, strength),
        v: color.v,
    })
}
