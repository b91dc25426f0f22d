//! Host-side grading settings, as edited by the viewer's sliders.
//!
//! Values are in UI units: percentages for multipliers, -100..100 for tone
//! sliders and a `#rrggbb` string for the tint color. Nothing here is
//! validated; [`super::marshal`] turns these into operator parameters.
//!
//! Serialized with camel-case keys:
//!
//! ```yaml
//! gamma: 1.2
//! exposure: 0.6
//! contrast: 104
//! saturation: 165
//! colorSaturation: { red: 56, yellow: 100 }
//! light: { highlights: 0, shadows: 0, whites: 0, blacks: 0 }
//! tint: { color: "#ffffff", strength: 0 }
//! ```

use serde::{Deserialize, Serialize};

/// Grading settings in UI units.
///
/// Missing keys take their identity defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradeSettings {
    /// Output gamma, 1 = unchanged.
    pub gamma: f32,
    /// Exposure, 1 = unchanged (applied as `2^(exposure - 1)`).
    pub exposure: f32,
    /// Contrast in percent.
    pub contrast: f32,
    /// Global saturation in percent.
    pub saturation: f32,
    /// Per-hue saturation in percent.
    pub color_saturation: ColorSaturationSettings,
    /// Tone sliders, -100..100.
    pub light: LightSettings,
    /// Tint color and strength.
    pub tint: TintSettings,
}

impl Default for GradeSettings {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            exposure: 1.0,
            contrast: 100.0,
            saturation: 100.0,
            color_saturation: ColorSaturationSettings::default(),
            light: LightSettings::default(),
            tint: TintSettings::default(),
        }
    }
}

impl GradeSettings {
    /// Settings that leave the image unchanged.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The viewer's shipped look: slightly lifted gamma, darker exposure,
    /// punchy saturation with muted reds.
    pub fn viewer() -> Self {
        Self {
            gamma: 1.2,
            exposure: 0.6,
            contrast: 104.0,
            saturation: 165.0,
            color_saturation: ColorSaturationSettings {
                red: 56.0,
                yellow: 100.0,
            },
            ..Self::default()
        }
    }
}

/// Per-hue saturation in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSaturationSettings {
    /// Red band, percent.
    pub red: f32,
    /// Yellow band, percent.
    pub yellow: f32,
}

impl Default for ColorSaturationSettings {
    fn default() -> Self {
        Self {
            red: 100.0,
            yellow: 100.0,
        }
    }
}

/// Tone sliders, each in -100..100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    /// Highlights slider.
    pub highlights: f32,
    /// Shadows slider.
    pub shadows: f32,
    /// Whites slider.
    pub whites: f32,
    /// Blacks slider.
    pub blacks: f32,
}

/// Tint as edited in a color picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TintSettings {
    /// `#rrggbb` color string.
    pub color: String,
    /// Strength in percent.
    pub strength: f32,
}

impl Default for TintSettings {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            strength: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_keys() {
        let yaml = r##"
gamma: 1.2
colorSaturation:
  red: 56
light:
  shadows: -20
tint:
  color: "#ff8800"
  strength: 30
"##;
        let s: GradeSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(s.gamma, 1.2);
        assert_eq!(s.exposure, 1.0);
        assert_eq!(s.color_saturation.red, 56.0);
        assert_eq!(s.color_saturation.yellow, 100.0);
        assert_eq!(s.light.shadows, -20.0);
        assert_eq!(s.tint.color, "#ff8800");
        assert_eq!(s.tint.strength, 30.0);
    }

    #[test]
    fn empty_document_is_identity() {
        let s: GradeSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(s, GradeSettings::identity());
    }

    #[test]
    fn serializes_camel_case() {
        let yaml = serde_yaml::to_string(&GradeSettings::viewer()).unwrap();
        assert!(yaml.contains("colorSaturation"));
        assert!(!yaml.contains("color_saturation"));
        let back: GradeSettings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, GradeSettings::viewer());
    }
}
