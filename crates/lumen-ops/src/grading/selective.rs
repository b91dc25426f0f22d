//! Hue-selective saturation for the red and yellow bands.
//!
//! Hue is in [0, 1). Red wraps around 0 and fades out over 1/12 of the
//! circle on either side. Yellow is fully on between 0.139 and 0.194 with
//! shoulders of the same width on both sides. Outside both bands the
//! multiplier is exactly 1.
//!
//! These shapes differ from the viewer's shader, which used a rising
//! `smoothstep(0.0, 0.083, h)` for the low red edge (0 at pure red) and a
//! bare `smoothstep(0.139, 0.194, h)` for yellow (1 for every hue past
//! yellow, greens and blues included).

use lumen_math::{mix, smoothstep};

/// Per-band saturation multipliers, normalized (1.0 = unchanged).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSaturation {
    /// Red band multiplier.
    pub red: f32,
    /// Yellow band multiplier.
    pub yellow: f32,
}

impl Default for ColorSaturation {
    fn default() -> Self {
        Self {
            red: 1.0,
            yellow: 1.0,
        }
    }
}

/// Red-band membership, 1 at hue 0 and 0 for hues in [0.083, 0.917].
#[inline]
pub fn red_band(hue: f32) -> f32 {
    smoothstep(0.917, 1.0, hue) + smoothstep(0.083, 0.0, hue)
}

/// Yellow-band membership, 1 for hues in [0.139, 0.194].
#[inline]
pub fn yellow_band(hue: f32) -> f32 {
    smoothstep(0.083, 0.139, hue) * smoothstep(0.25, 0.194, hue)
}

/// Saturation multiplier for `hue` given the band settings.
///
/// Yellow wins where both bands are nonzero.
#[inline]
pub fn selective_saturation_multiplier(hue: f32, bands: &ColorSaturation) -> f32 {
    let red = red_band(hue);
    let yellow = yellow_band(hue);
    let band_value = mix(bands.red, bands.yellow, yellow);
    mix(1.0, band_value, red.max(yellow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BANDS: ColorSaturation = ColorSaturation {
        red: 0.56,
        yellow: 1.4,
    };

    #[test]
    fn red_center_uses_red_value() {
        assert_relative_eq!(selective_saturation_multiplier(0.0, &BANDS), 0.56, epsilon = 1e-6);
        assert_relative_eq!(selective_saturation_multiplier(0.999, &BANDS), 0.56, epsilon = 1e-3);
    }

    #[test]
    fn yellow_center_uses_yellow_value() {
        for hue in [0.139, 0.15, 1.0 / 6.0, 0.194] {
            assert_relative_eq!(selective_saturation_multiplier(hue, &BANDS), 1.4, epsilon = 1e-5);
        }
    }

    #[test]
    fn outside_bands_is_exactly_one() {
        for hue in [0.25, 1.0 / 3.0, 0.5, 2.0 / 3.0, 0.8, 0.9] {
            assert_eq!(selective_saturation_multiplier(hue, &BANDS), 1.0, "hue {hue}");
        }
    }

    #[test]
    fn shoulders_are_partial() {
        let m = selective_saturation_multiplier(0.04, &BANDS);
        assert!(m > 0.56 && m < 1.0, "{m}");
        let m = selective_saturation_multiplier(0.22, &BANDS);
        assert!(m > 1.0 && m < 1.4, "{m}");
    }

    #[test]
    fn unit_bands_are_identity_everywhere() {
        let bands = ColorSaturation::default();
        for i in 0..100 {
            let hue = i as f32 / 100.0;
            assert_relative_eq!(selective_saturation_multiplier(hue, &bands), 1.0, epsilon = 1e-6);
        }
    }
}
