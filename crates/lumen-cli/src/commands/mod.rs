//! CLI command implementations

pub mod bloom;
pub mod grade;
pub mod preset;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};
use lumen_core::Frame;
use lumen_ops::grading::GradeSettings;
use lumen_session::{Preset, ViewerSettings};

use crate::{GradeOverrides, SettingsSource};

/// Load frame from path
pub fn load_frame(path: &Path) -> Result<Frame> {
    lumen_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save frame to path
pub fn save_frame(path: &Path, frame: &Frame) -> Result<()> {
    lumen_io::write(path, frame).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Resolves the base settings: a file, a preset, or the defaults.
pub fn load_settings(source: &SettingsSource) -> Result<ViewerSettings> {
    if let Some(path) = &source.settings {
        return ViewerSettings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()));
    }
    match &source.preset {
        Some(name) => Ok(name.parse::<Preset>()?.settings()),
        None => Ok(ViewerSettings::default()),
    }
}

impl GradeOverrides {
    /// Writes every given override into `grade`.
    pub fn apply_to(&self, grade: &mut GradeSettings) {
        let fields = [
            (self.gamma, &mut grade.gamma),
            (self.exposure, &mut grade.exposure),
            (self.contrast, &mut grade.contrast),
            (self.saturation, &mut grade.saturation),
            (self.red, &mut grade.color_saturation.red),
            (self.yellow, &mut grade.color_saturation.yellow),
            (self.highlights, &mut grade.light.highlights),
            (self.shadows, &mut grade.light.shadows),
            (self.whites, &mut grade.light.whites),
            (self.blacks, &mut grade.light.blacks),
            (self.tint_strength, &mut grade.tint.strength),
        ];
        for (value, field) in fields {
            if let Some(v) = value {
                *field = v;
            }
        }
        if let Some(color) = &self.tint {
            grade.tint.color = color.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let overrides = GradeOverrides {
            saturation: Some(140.0),
            shadows: Some(-20.0),
            tint: Some("#ff8800".into()),
            ..Default::default()
        };
        let mut grade = GradeSettings::viewer();
        overrides.apply_to(&mut grade);

        assert_eq!(grade.saturation, 140.0);
        assert_eq!(grade.light.shadows, -20.0);
        assert_eq!(grade.tint.color, "#ff8800");
        assert_eq!(grade.gamma, 1.2);
        assert_eq!(grade.color_saturation.red, 56.0);
    }

    #[test]
    fn preset_source_resolves() {
        let source = SettingsSource {
            preset: Some("viewer".into()),
            ..Default::default()
        };
        assert_eq!(load_settings(&source).unwrap(), Preset::Viewer.settings());

        let bad = SettingsSource {
            preset: Some("nope".into()),
            ..Default::default()
        };
        assert!(load_settings(&bad).is_err());
    }
}
