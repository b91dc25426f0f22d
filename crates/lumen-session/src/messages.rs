//! Typed settings updates sent to a render session.

use lumen_ops::grading::GradeSettings;

use crate::settings::{BloomSettings, EffectToggles, ViewerSettings};

/// A settings change, applied at the next frame boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsUpdate {
    /// Replace the grading sliders.
    Grade(GradeSettings),
    /// Replace the bloom sliders.
    Bloom(BloomSettings),
    /// Replace the effect toggles.
    Effects(EffectToggles),
    /// Replace everything.
    Replace(ViewerSettings),
}
