//! Tone-region remapping.
//!
//! Four overlapping luminance bands, each with a soft Hermite mask:
//!
//! ```text
//! blacks      1 ──╮                       L < 0.2
//! shadows     1 ─────────╮                L < 0.5
//! highlights             ╭─────────── 1   L > 0.5
//! whites                          ╭── 1   L > 0.8
//!             0    0.2   0.5   0.8   1
//! ```
//!
//! The band offsets are added to all three channels, scaled by the mask,
//! and the result is clamped to [0, 1].

use lumen_core::luminance_rec709;
use lumen_math::{saturate3, smoothstep};

/// Additive tone-band offsets, normalized to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToneRegions {
    /// Offset for the upper half of the luminance range.
    pub highlights: f32,
    /// Offset for the lower half of the luminance range.
    pub shadows: f32,
    /// Offset for the top of the luminance range.
    pub whites: f32,
    /// Offset for the bottom of the luminance range.
    pub blacks: f32,
}

impl ToneRegions {
    /// Returns `true` if every offset is zero.
    pub fn is_neutral(&self) -> bool {
        self.highlights == 0.0 && self.shadows == 0.0 && self.whites == 0.0 && self.blacks == 0.0
    }
}

/// Per-band mask weights for one luminance value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMasks {
    /// `smoothstep(0.5, 1.0, L)`
    pub highlights: f32,
    /// `smoothstep(0.5, 0.0, L)`
    pub shadows: f32,
    /// `smoothstep(0.8, 1.0, L)`
    pub whites: f32,
    /// `smoothstep(0.2, 0.0, L)`
    pub blacks: f32,
}

/// Evaluates the four band masks at luminance `l`.
#[inline]
pub fn tone_masks(l: f32) -> ToneMasks {
    ToneMasks {
        highlights: smoothstep(0.5, 1.0, l),
        shadows: smoothstep(0.5, 0.0, l),
        whites: smoothstep(0.8, 1.0, l),
        blacks: smoothstep(0.2, 0.0, l),
    }
}

/// Applies tone-band offsets to an RGB triple and clamps to [0, 1].
#[inline]
pub fn adjust_tones(rgb: [f32; 3], tone: &ToneRegions) -> [f32; 3] {
    let m = tone_masks(luminance_rec709(rgb));
    let offset = m.highlights * tone.highlights
        + m.shadows * tone.shadows
        + m.whites * tone.whites
        + m.blacks * tone.blacks;
    saturate3([rgb[0] + offset, rgb[1] + offset, rgb[2] + offset])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn masks_at_anchor_points() {
        let black = tone_masks(0.0);
        assert_eq!((black.shadows, black.blacks), (1.0, 1.0));
        assert_eq!((black.highlights, black.whites), (0.0, 0.0));

        let white = tone_masks(1.0);
        assert_eq!((white.highlights, white.whites), (1.0, 1.0));
        assert_eq!((white.shadows, white.blacks), (0.0, 0.0));

        let mid = tone_masks(0.5);
        assert_eq!(mid.highlights, 0.0);
        assert_eq!(mid.shadows, 0.0);
    }

    #[test]
    fn highlight_and_shadow_masks_mirror_about_mid_gray() {
        for i in 0..=50 {
            let d = i as f32 / 100.0;
            assert_relative_eq!(
                tone_masks(0.5 + d).highlights,
                tone_masks(0.5 - d).shadows,
                epsilon = 1e-5
            );
        }
        assert_relative_eq!(tone_masks(0.75).highlights, 0.5, epsilon = 1e-6);
        assert_relative_eq!(tone_masks(0.25).shadows, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn neutral_tones_leave_color_alone() {
        let rgb = [0.3, 0.6, 0.1];
        assert_eq!(adjust_tones(rgb, &ToneRegions::default()), rgb);
        assert!(ToneRegions::default().is_neutral());
    }

    #[test]
    fn symmetric_inputs_give_symmetric_contributions() {
        let tone = ToneRegions {
            highlights: 0.2,
            shadows: 0.2,
            ..Default::default()
        };
        let bright = adjust_tones([0.75; 3], &tone);
        let dark = adjust_tones([0.25; 3], &tone);
        assert_relative_eq!(bright[0] - 0.75, dark[0] - 0.25, epsilon = 1e-5);
        assert_relative_eq!(bright[0] - 0.75, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn offsets_are_clamped() {
        let tone = ToneRegions {
            whites: 1.0,
            highlights: 1.0,
            ..Default::default()
        };
        assert_eq!(adjust_tones([0.95; 3], &tone), [1.0; 3]);

        let crush = ToneRegions {
            blacks: -1.0,
            ..Default::default()
        };
        assert_eq!(adjust_tones([0.05; 3], &crush), [0.0; 3]);
    }
}
