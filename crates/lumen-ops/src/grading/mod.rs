//! Single-pass color grading.
//!
//! [`ColorGrade`] composes six stages into one per-pixel transform, applied
//! in this order:
//!
//! ```text
//! exposure    color *= 2^(exposure - 1)
//! contrast    color = clamp((color - 0.5) * contrast + 0.5, 0, 1)
//! tones       highlights / shadows / whites / blacks (see [`tone`])
//! saturation  hsv.s *= saturation * selective(hue) (see [`selective`])
//! tint        hue/saturation blend toward tint color (see [`tint`])
//! gamma       color = max(color, 0)^(1 / gamma)
//! ```
//!
//! Alpha is passed through. The operator only sees normalized
//! [`GradingParameters`]; host settings in UI units go through
//! [`marshal`] first.
//!
//! # Example
//!
//! ```rust
//! use lumen_ops::grading::{ColorGrade, GradingParameters};
//!
//! let grade = ColorGrade::new(GradingParameters {
//!     exposure: 2.0,
//!     ..GradingParameters::identity()
//! });
//! let out = grade.apply([0.25, 0.25, 0.25]);
//! assert!((out[0] - 0.5).abs() < 1e-5);
//! ```

pub mod marshal;
pub mod selective;
pub mod settings;
pub mod tint;
pub mod tone;

pub use marshal::{marshal, Diagnostic, Marshaled};
pub use selective::{selective_saturation_multiplier, ColorSaturation};
pub use settings::{ColorSaturationSettings, GradeSettings, LightSettings, TintSettings};
pub use tint::{apply_tint, Tint};
pub use tone::{adjust_tones, tone_masks, ToneMasks, ToneRegions};

use lumen_color::{hsv_to_rgb, rgb_to_hsv, Hsv};
use lumen_core::pixel::{split_alpha, with_alpha};
use lumen_core::Frame;
use lumen_math::saturate;
use tracing::{debug, trace};

use crate::chain::PostEffect;
use crate::OpsResult;

/// Lowest gamma the operator will use; keeps `1 / gamma` finite.
pub const MIN_GAMMA: f32 = 0.1;

/// Normalized grading parameters.
///
/// Built fresh for every frame and replaced as a whole; the operator never
/// sees a partially updated set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradingParameters {
    /// Output gamma; `1 / gamma` is applied. 1 = unchanged.
    pub gamma: f32,
    /// Exposure; the color is scaled by `2^(exposure - 1)`. 1 = unchanged.
    pub exposure: f32,
    /// Contrast multiplier around 0.5. 1 = unchanged.
    pub contrast: f32,
    /// Global saturation multiplier. 1 = unchanged.
    pub saturation: f32,
    /// Red/yellow band saturation multipliers.
    pub color_saturation: ColorSaturation,
    /// Tone-band offsets in [-1, 1].
    pub tone: ToneRegions,
    /// Tint color and strength.
    pub tint: Tint,
}

impl Default for GradingParameters {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            exposure: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            color_saturation: ColorSaturation::default(),
            tone: ToneRegions::default(),
            tint: Tint::default(),
        }
    }
}

impl GradingParameters {
    /// Parameters that leave the image unchanged.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Check if this is identity (no-op).
    pub fn is_identity(&self) -> bool {
        self.gamma == 1.0
            && self.exposure == 1.0
            && self.contrast == 1.0
            && self.saturation == 1.0
            && self.color_saturation == ColorSaturation::default()
            && self.tone.is_neutral()
            && self.tint.is_neutral()
    }

    /// Linear exposure multiplier, `2^(exposure - 1)`.
    #[inline]
    pub fn exposure_gain(&self) -> f32 {
        (self.exposure - 1.0).exp2()
    }
}

/// Stage ordering of the grading operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageOrder {
    /// exposure, contrast (clamped), tones, saturation, tint, gamma.
    #[default]
    Canonical,
    /// exposure, contrast (unclamped), saturation, tint, tones, gamma.
    ///
    /// Reproduces an older shader variant. Not used unless asked for.
    LegacyTonesLast,
}

/// The color grading operator.
///
/// Owns one parameter snapshot. Cheap to construct; a session keeps one and
/// swaps parameters each frame with [`ColorGrade::set_parameters`].
#[derive(Debug, Clone)]
pub struct ColorGrade {
    params: GradingParameters,
    order: StageOrder,
    tint_hsv: Hsv,
}

impl Default for ColorGrade {
    fn default() -> Self {
        Self::new(GradingParameters::identity())
    }
}

impl ColorGrade {
    /// Creates an operator with the canonical stage order.
    pub fn new(params: GradingParameters) -> Self {
        Self {
            params,
            order: StageOrder::Canonical,
            tint_hsv: rgb_to_hsv(params.tint.color),
        }
    }

    /// Selects the stage order.
    pub fn with_order(mut self, order: StageOrder) -> Self {
        self.order = order;
        self
    }

    /// Current parameter snapshot.
    pub fn parameters(&self) -> &GradingParameters {
        &self.params
    }

    /// Current stage order.
    pub fn order(&self) -> StageOrder {
        self.order
    }

    /// Replaces the whole parameter snapshot.
    pub fn set_parameters(&mut self, params: GradingParameters) {
        self.tint_hsv = rgb_to_hsv(params.tint.color);
        self.params = params;
    }

    /// Returns `true` if the current parameters are a no-op.
    pub fn is_identity(&self) -> bool {
        self.params.is_identity()
    }

    /// Grades one RGB sample.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let p = &self.params;
        let gain = p.exposure_gain();
        let exposed = rgb.map(|c| c * gain);

        let graded = match self.order {
            StageOrder::Canonical => {
                let contrasted = exposed.map(|c| saturate(self.contrast(c)));
                let toned = adjust_tones(contrasted, &p.tone);
                let saturated = self.saturate_color(toned);
                tint::apply_tint_hsv(saturated, self.tint_hsv, p.tint.strength)
            }
            StageOrder::LegacyTonesLast => {
                let contrasted = exposed.map(|c| self.contrast(c));
                let saturated = self.saturate_color(contrasted);
                let tinted = tint::apply_tint_hsv(saturated, self.tint_hsv, p.tint.strength);
                adjust_tones(tinted, &p.tone)
            }
        };

        let inv_gamma = 1.0 / p.gamma.max(MIN_GAMMA);
        graded.map(|c| c.max(0.0).powf(inv_gamma))
    }

    /// Grades one RGBA sample, passing alpha through.
    #[inline]
    pub fn apply_rgba(&self, rgba: [f32; 4]) -> [f32; 4] {
        let (rgb, alpha) = split_alpha(rgba);
        with_alpha(self.apply(rgb), alpha)
    }

    /// Grades a frame into a new frame.
    pub fn process(&self, frame: &Frame) -> Frame {
        let mut out = frame.clone();
        self.process_inplace(&mut out);
        out
    }

    /// Grades a frame in place, in parallel over pixels.
    pub fn process_inplace(&self, frame: &mut Frame) {
        let (width, height) = frame.dimensions();
        trace!(width, height, order = ?self.order, "color_grade");
        debug!(width, height, identity = self.is_identity(), "Applying color grade");
        frame.map_pixels(|px| self.apply_rgba(px));
    }

    #[inline]
    fn contrast(&self, c: f32) -> f32 {
        (c - 0.5) * self.params.contrast + 0.5
    }

    #[inline]
    fn saturate_color(&self, rgb: [f32; 3]) -> [f32; 3] {
        let hsv = rgb_to_hsv(rgb);
        let multiplier = selective_saturation_multiplier(hsv.h, &self.params.color_saturation);
        hsv_to_rgb(Hsv {
            s: hsv.s * self.params.saturation * multiplier,
            ..hsv
        })
    }
}

impl PostEffect for ColorGrade {
    fn name(&self) -> &str {
        "color-grade"
    }

    fn process(&self, frame: &Frame) -> OpsResult<Frame> {
        Ok(ColorGrade::process(self, frame))
    }
}
