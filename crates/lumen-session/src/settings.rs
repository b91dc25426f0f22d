//! Viewer settings: grading, bloom and effect toggles.
//!
//! Stored as YAML (JSON documents parse too). Every key is optional and
//! falls back to its default, so a file only needs the values it changes:
//!
//! ```yaml
//! grade:
//!   saturation: 140
//!   tint: { color: "#ffd9a0", strength: 25 }
//! bloom:
//!   intensity: 0.35
//! effects:
//!   bloom: false
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use lumen_ops::grading::GradeSettings;
use lumen_ops::BloomParams;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{SessionError, SessionResult};

/// Complete settings snapshot for a render session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Color grading sliders.
    pub grade: GradeSettings,
    /// Bloom sliders.
    pub bloom: BloomSettings,
    /// Which effects run.
    pub effects: EffectToggles,
}

impl ViewerSettings {
    /// Parses settings from a YAML (or JSON) string.
    pub fn from_yaml_str(text: &str) -> SessionResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Serializes settings to YAML.
    pub fn to_yaml_string(&self) -> SessionResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Loads settings from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> SessionResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SessionError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Saves settings to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SessionResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_yaml_string()?).map_err(|source| SessionError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Accepted `(min, max)` per bloom field, matching the viewer's sliders.
pub const BLOOM_RANGES: [(&str, f32, f32); 4] = [
    ("intensity", 0.0, 3.0),
    ("radius", 0.0, 1.0),
    ("luminanceThreshold", 0.0, 1.0),
    ("luminanceSmoothing", 0.0, 1.0),
];

fn bloom_range(name: &str) -> (f32, f32) {
    BLOOM_RANGES
        .iter()
        .find(|(field, ..)| *field == name)
        .map_or((0.0, f32::MAX), |&(_, min, max)| (min, max))
}

/// Bloom sliders as stored in settings files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BloomSettings {
    /// Glow gain.
    pub intensity: f32,
    /// Blur radius relative to the shorter frame side.
    pub radius: f32,
    /// Bright-pass luminance threshold.
    pub luminance_threshold: f32,
    /// Bright-pass transition width.
    pub luminance_smoothing: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        let p = BloomParams::default();
        Self {
            intensity: p.intensity,
            radius: p.radius,
            luminance_threshold: p.threshold,
            luminance_smoothing: p.smoothing,
        }
    }
}

impl BloomSettings {
    /// Converts to bloom parameters, repairing invalid values.
    ///
    /// NaN and infinities take the default; finite values are clamped to
    /// [`BLOOM_RANGES`]. Returns the names of repaired fields alongside the
    /// parameters.
    pub fn to_params(&self) -> (BloomParams, Vec<&'static str>) {
        let defaults = Self::default();
        let mut repaired = Vec::new();
        let mut fix = |name: &'static str, value: f32, default: f32| {
            if !value.is_finite() {
                repaired.push(name);
                return default;
            }
            let (min, max) = bloom_range(name);
            let clamped = value.clamp(min, max);
            if clamped != value {
                repaired.push(name);
            }
            clamped
        };

        let params = BloomParams {
            intensity: fix("intensity", self.intensity, defaults.intensity),
            radius: fix("radius", self.radius, defaults.radius),
            threshold: fix(
                "luminanceThreshold",
                self.luminance_threshold,
                defaults.luminance_threshold,
            ),
            smoothing: fix(
                "luminanceSmoothing",
                self.luminance_smoothing,
                defaults.luminance_smoothing,
            ),
        };
        (params, repaired)
    }

    /// [`Self::to_params`], logging each repaired field.
    pub fn to_params_logged(&self) -> BloomParams {
        let (params, repaired) = self.to_params();
        for field in repaired {
            warn!(field, "bloom setting out of range, repaired");
        }
        params
    }
}

/// Which post effects are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectToggles {
    /// Run the bloom stage.
    pub bloom: bool,
    /// Run the color grading stage.
    pub color_adjustment: bool,
}

impl Default for EffectToggles {
    fn default() -> Self {
        Self {
            bloom: true,
            color_adjustment: true,
        }
    }
}

/// Named settings bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Grading that changes nothing, bloom at defaults.
    Identity,
    /// The viewer's shipped look.
    Viewer,
}

impl Preset {
    /// All presets.
    pub const fn all() -> &'static [Self] {
        &[Self::Identity, Self::Viewer]
    }

    /// Preset name as used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Viewer => "viewer",
        }
    }

    /// Settings for this preset.
    pub fn settings(self) -> ViewerSettings {
        match self {
            Self::Identity => ViewerSettings::default(),
            Self::Viewer => ViewerSettings {
                grade: GradeSettings::viewer(),
                ..ViewerSettings::default()
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SessionError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_fill_defaults() {
        let s = ViewerSettings::from_yaml_str(
            "grade:\n  saturation: 140\nbloom:\n  luminanceThreshold: 0.6\neffects:\n  bloom: false\n",
        )
        .unwrap();
        assert_eq!(s.grade.saturation, 140.0);
        assert_eq!(s.grade.gamma, 1.0);
        assert_eq!(s.bloom.luminance_threshold, 0.6);
        assert_eq!(s.bloom.intensity, 0.2);
        assert!(!s.effects.bloom);
        assert!(s.effects.color_adjustment);
    }

    #[test]
    fn json_is_accepted() {
        let s = ViewerSettings::from_yaml_str(
            r##"{"grade": {"tint": {"color": "#ff0000", "strength": 50}}, "effects": {"colorAdjustment": false}}"##,
        )
        .unwrap();
        assert_eq!(s.grade.tint.color, "#ff0000");
        assert!(!s.effects.color_adjustment);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("look.yaml");
        let settings = Preset::Viewer.settings();
        settings.save(&path).unwrap();
        assert_eq!(ViewerSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ViewerSettings::load("/nonexistent/look.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/look.yaml"));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            ViewerSettings::from_yaml_str("grade: [1, 2"),
            Err(SessionError::Settings(_))
        ));
    }

    #[test]
    fn presets_parse_by_name() {
        assert_eq!("viewer".parse::<Preset>().unwrap(), Preset::Viewer);
        assert_eq!("IDENTITY".parse::<Preset>().unwrap(), Preset::Identity);
        assert!(matches!(
            "cinematic".parse::<Preset>(),
            Err(SessionError::UnknownPreset(_))
        ));
        assert_eq!(Preset::Viewer.settings().grade.saturation, 165.0);
        assert_eq!(Preset::Identity.settings(), ViewerSettings::default());
    }

    #[test]
    fn bloom_settings_are_repaired() {
        let settings = BloomSettings {
            intensity: -0.5,
            radius: f32::NAN,
            ..Default::default()
        };
        let (params, repaired) = settings.to_params();
        assert_eq!(params.intensity, 0.0);
        assert_eq!(params.radius, 0.1);
        assert_eq!(repaired, vec!["intensity", "radius"]);

        let (params, repaired) = BloomSettings {
            intensity: 12.0,
            radius: 1.0e30,
            luminance_smoothing: 0.1,
            ..Default::default()
        }
        .to_params();
        assert_eq!(params.intensity, 3.0);
        assert_eq!(params.radius, 1.0);
        assert_eq!(params.smoothing, 0.1);
        assert_eq!(repaired, vec!["intensity", "radius"]);

        let (params, repaired) = BloomSettings::default().to_params();
        assert_eq!(params, BloomParams::default());
        assert!(repaired.is_empty());
    }
}
