//! Reference outputs of the viewer's shipped grade.
//!
//! Computed by hand from the stage formulas with the `viewer` preset
//! (gamma 1.2, exposure 0.6, contrast 104%, saturation 165%, red 56%,
//! yellow 100%, no tones, no tint). Neutral grays stay neutral, so one
//! channel value describes each entry.

/// Viewer grade of mid gray (0.5).
pub const VIEWER_MID_GRAY: f32 = 0.440_700_13;

/// `(input, output)` gray pairs for the viewer grade.
pub const VIEWER_GRAYS: &[(f32, f32)] = &[(0.0, 0.0), (0.5, VIEWER_MID_GRAY)];
