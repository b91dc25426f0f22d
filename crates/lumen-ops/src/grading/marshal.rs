//! Conversion from host settings to operator parameters.
//!
//! [`marshal`] is the only place where UI units become normalized values:
//! percentages and tone sliders are divided by 100 here and nowhere else.
//! It never fails. Out-of-range values are clamped, non-finite values fall
//! back to the field default and a malformed tint color becomes a neutral
//! tint. Each such repair is reported as a [`Diagnostic`] for the caller to
//! log.

use std::fmt;

use lumen_color::{parse_hex_rgb, ColorError};
use tracing::warn;

use super::settings::GradeSettings;
use super::{ColorSaturation, GradingParameters, Tint, ToneRegions};

/// A repair made while marshaling settings.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Value was outside its documented range.
    Clamped {
        /// Settings field path.
        field: &'static str,
        /// Value as given.
        value: f32,
        /// Value after clamping.
        clamped: f32,
    },
    /// Value was NaN or infinite and was replaced by the default.
    NonFinite {
        /// Settings field path.
        field: &'static str,
        /// Default used instead.
        fallback: f32,
    },
    /// Tint color could not be parsed; the tint was neutralized.
    MalformedTint {
        /// Parse failure.
        error: ColorError,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clamped {
                field,
                value,
                clamped,
            } => write!(f, "{field}: {value} out of range, clamped to {clamped}"),
            Self::NonFinite { field, fallback } => {
                write!(f, "{field}: non-finite value, using {fallback}")
            }
            Self::MalformedTint { error } => {
                write!(f, "tint.color: {error}, using neutral tint")
            }
        }
    }
}

/// Output of [`marshal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Marshaled {
    /// Normalized operator parameters.
    pub params: GradingParameters,
    /// Repairs made along the way, in field order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Marshaled {
    /// Returns `true` if no repairs were needed.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Emits each diagnostic as a `warn!` event.
    pub fn log_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            warn!(%diagnostic, "grade settings repaired");
        }
    }
}

/// Documented range of one settings field, in UI units.
struct FieldRange {
    name: &'static str,
    min: f32,
    max: f32,
    default: f32,
}

impl FieldRange {
    const fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    fn sanitize(&self, value: f32, diagnostics: &mut Vec<Diagnostic>) -> f32 {
        if !value.is_finite() {
            diagnostics.push(Diagnostic::NonFinite {
                field: self.name,
                fallback: self.default,
            });
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if clamped != value {
            diagnostics.push(Diagnostic::Clamped {
                field: self.name,
                value,
                clamped,
            });
        }
        clamped
    }
}

const GAMMA: FieldRange = FieldRange::new("gamma", 0.1, 4.0, 1.0);
const EXPOSURE: FieldRange = FieldRange::new("exposure", 0.0, 2.0, 1.0);
const CONTRAST: FieldRange = FieldRange::new("contrast", 0.0, 200.0, 100.0);
const SATURATION: FieldRange = FieldRange::new("saturation", 0.0, 200.0, 100.0);
const RED: FieldRange = FieldRange::new("colorSaturation.red", 0.0, 200.0, 100.0);
const YELLOW: FieldRange = FieldRange::new("colorSaturation.yellow", 0.0, 200.0, 100.0);
const HIGHLIGHTS: FieldRange = FieldRange::new("light.highlights", -100.0, 100.0, 0.0);
const SHADOWS: FieldRange = FieldRange::new("light.shadows", -100.0, 100.0, 0.0);
const WHITES: FieldRange = FieldRange::new("light.whites", -100.0, 100.0, 0.0);
const BLACKS: FieldRange = FieldRange::new("light.blacks", -100.0, 100.0, 0.0);
const TINT_STRENGTH: FieldRange = FieldRange::new("tint.strength", 0.0, 100.0, 0.0);

/// Converts host settings into normalized [`GradingParameters`].
///
/// Idempotent: equal settings always produce equal parameters.
///
/// # Example
///
/// ```rust
/// use lumen_ops::grading::{marshal, GradeSettings};
///
/// let mut settings = GradeSettings::viewer();
/// settings.tint.color = "#zz0000".into();
/// settings.tint.strength = 50.0;
///
/// let out = marshal(&settings);
/// assert_eq!(out.params.tint.strength, 0.0);
/// assert_eq!(out.diagnostics.len(), 1);
/// ```
pub fn marshal(settings: &GradeSettings) -> Marshaled {
    let mut diagnostics = Vec::new();
    let d = &mut diagnostics;

    let gamma = GAMMA.sanitize(settings.gamma, d);
    let exposure = EXPOSURE.sanitize(settings.exposure, d);
    let contrast = CONTRAST.sanitize(settings.contrast, d) / 100.0;
    let saturation = SATURATION.sanitize(settings.saturation, d) / 100.0;

    let color_saturation = ColorSaturation {
        red: RED.sanitize(settings.color_saturation.red, d) / 100.0,
        yellow: YELLOW.sanitize(settings.color_saturation.yellow, d) / 100.0,
    };

    let light = &settings.light;
    let tone = ToneRegions {
        highlights: HIGHLIGHTS.sanitize(light.highlights, d) / 100.0,
        shadows: SHADOWS.sanitize(light.shadows, d) / 100.0,
        whites: WHITES.sanitize(light.whites, d) / 100.0,
        blacks: BLACKS.sanitize(light.blacks, d) / 100.0,
    };

    let strength = TINT_STRENGTH.sanitize(settings.tint.strength, d) / 100.0;
    let tint = match parse_hex_rgb(&settings.tint.color) {
        Ok(color) => Tint { color, strength },
        Err(error) => {
            d.push(Diagnostic::MalformedTint { error });
            Tint::default()
        }
    };

    Marshaled {
        params: GradingParameters {
            gamma,
            exposure,
            contrast,
            saturation,
            color_saturation,
            tone,
            tint,
        },
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_settings_marshal_to_identity_params() {
        let out = marshal(&GradeSettings::identity());
        assert!(out.is_clean());
        assert_eq!(out.params, GradingParameters::identity());
        assert!(out.params.is_identity());
    }

    #[test]
    fn viewer_preset_normalizes() {
        let p = marshal(&GradeSettings::viewer()).params;
        assert_relative_eq!(p.gamma, 1.2);
        assert_relative_eq!(p.exposure, 0.6);
        assert_relative_eq!(p.contrast, 1.04);
        assert_relative_eq!(p.saturation, 1.65);
        assert_relative_eq!(p.color_saturation.red, 0.56);
        assert_relative_eq!(p.color_saturation.yellow, 1.0);
    }

    #[test]
    fn tone_values_divided_once() {
        let mut settings = GradeSettings::identity();
        settings.light.highlights = 50.0;
        settings.light.blacks = -25.0;
        let p = marshal(&settings).params;
        assert_relative_eq!(p.tone.highlights, 0.5);
        assert_relative_eq!(p.tone.blacks, -0.25);
    }

    #[test]
    fn marshaling_is_idempotent() {
        let mut settings = GradeSettings::viewer();
        settings.light.shadows = 12.0;
        settings.tint.color = "#3366cc".into();
        settings.tint.strength = 40.0;
        assert_eq!(marshal(&settings), marshal(&settings));
    }

    #[test]
    fn malformed_tint_is_neutralized() {
        let mut settings = GradeSettings::identity();
        settings.tint.color = "#zz0000".into();
        settings.tint.strength = 80.0;

        let out = marshal(&settings);
        assert_eq!(out.params.tint, Tint::default());
        assert!(matches!(
            out.diagnostics.as_slice(),
            [Diagnostic::MalformedTint { .. }]
        ));
        assert!(out.diagnostics[0].to_string().contains("#zz0000"));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut settings = GradeSettings::identity();
        settings.gamma = 0.0;
        settings.contrast = 500.0;
        settings.light.whites = -300.0;

        let out = marshal(&settings);
        assert_relative_eq!(out.params.gamma, 0.1);
        assert_relative_eq!(out.params.contrast, 2.0);
        assert_relative_eq!(out.params.tone.whites, -1.0);
        assert_eq!(out.diagnostics.len(), 3);
        assert_eq!(
            out.diagnostics[0],
            Diagnostic::Clamped {
                field: "gamma",
                value: 0.0,
                clamped: 0.1
            }
        );
    }

    #[test]
    fn non_finite_values_use_defaults() {
        let mut settings = GradeSettings::identity();
        settings.exposure = f32::NAN;
        settings.saturation = f32::INFINITY;

        let out = marshal(&settings);
        assert_eq!(out.params.exposure, 1.0);
        assert_eq!(out.params.saturation, 1.0);
        assert_eq!(
            out.diagnostics,
            vec![
                Diagnostic::NonFinite {
                    field: "exposure",
                    fallback: 1.0
                },
                Diagnostic::NonFinite {
                    field: "saturation",
                    fallback: 100.0
                },
            ]
        );
    }
}
