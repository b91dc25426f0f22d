//! Bloom: bright-pass, blur, additive composite.
//!
//! ```text
//! bright = rgb * smoothstep(threshold, threshold + smoothing, luma)
//! glow   = box_blur^3(bright)
//! out    = rgb + intensity * glow      (alpha unchanged)
//! ```
//!
//! `radius` is relative to the frame: the blur radius in pixels is
//! `max(1, round(radius * min(width, height) * 0.25))`.

use lumen_core::pixel::{split_alpha, with_alpha};
use lumen_core::{luminance_rec709, Frame, CHANNELS};
use lumen_math::smoothstep;
use tracing::{debug, trace};

use crate::blur::box_blur_passes;
use crate::chain::PostEffect;
use crate::{OpsError, OpsResult};

/// Box blur passes used to approximate a Gaussian.
pub const BLUR_PASSES: usize = 3;

/// Bloom parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomParams {
    /// Glow gain; 0 disables bloom.
    pub intensity: f32,
    /// Blur radius as a fraction of the shorter frame side.
    pub radius: f32,
    /// Luminance where the bright pass starts.
    pub threshold: f32,
    /// Width of the bright-pass transition above `threshold`.
    pub smoothing: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            intensity: 0.2,
            radius: 0.1,
            threshold: 0.8,
            smoothing: 0.05,
        }
    }
}

impl BloomParams {
    fn validate(&self) -> OpsResult<()> {
        let fields = [
            ("intensity", self.intensity),
            ("radius", self.radius),
            ("threshold", self.threshold),
            ("smoothing", self.smoothing),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(OpsError::InvalidParameter(format!(
                    "bloom {name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Bloom post effect.
#[derive(Debug, Clone)]
pub struct Bloom {
    params: BloomParams,
}

impl Bloom {
    /// Creates a bloom stage.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if any parameter is negative or not
    /// finite.
    pub fn new(params: BloomParams) -> OpsResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Current parameters.
    pub fn params(&self) -> &BloomParams {
        &self.params
    }

    /// Replaces the parameters, keeping the old ones on error.
    pub fn set_params(&mut self, params: BloomParams) -> OpsResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Blur radius in pixels for a frame of the given size, capped at the
    /// longer side.
    pub fn blur_radius_px(&self, width: u32, height: u32) -> usize {
        let short_side = width.min(height) as f32;
        let long_side = width.max(height).max(1) as usize;
        ((self.params.radius * short_side * 0.25).round() as usize).clamp(1, long_side)
    }

    /// Keeps the part of each pixel above the luminance threshold.
    pub fn bright_pass(&self, frame: &Frame) -> Frame {
        let BloomParams {
            threshold,
            smoothing,
            ..
        } = self.params;
        let mut bright = frame.clone();
        bright.map_pixels(|px| {
            let (rgb, alpha) = split_alpha(px);
            let w = smoothstep(threshold, threshold + smoothing, luminance_rec709(rgb));
            with_alpha(rgb.map(|c| c * w), alpha)
        });
        bright
    }

    /// Applies bloom to a frame.
    pub fn process(&self, frame: &Frame) -> OpsResult<Frame> {
        if self.params.intensity == 0.0 || frame.is_empty() {
            return Ok(frame.clone());
        }

        let (width, height) = frame.dimensions();
        let radius = self.blur_radius_px(width, height);
        trace!(width, height, radius, "bloom");
        debug!(width, height, radius, intensity = self.params.intensity, "Applying bloom");

        let bright = self.bright_pass(frame);
        let glow = box_blur_passes(
            bright.data(),
            width as usize,
            height as usize,
            CHANNELS,
            radius,
            BLUR_PASSES,
        )?;
        let glow = Frame::from_data(width, height, glow)?;

        let intensity = self.params.intensity;
        let mut out = frame.clone();
        out.combine(&glow, |base, glow| {
            [
                base[0] + intensity * glow[0],
                base[1] + intensity * glow[1],
                base[2] + intensity * glow[2],
                base[3],
            ]
        })?;
        Ok(out)
    }
}

impl PostEffect for Bloom {
    fn name(&self) -> &str {
        "bloom"
    }

    fn process(&self, frame: &Frame) -> OpsResult<Frame> {
        Bloom::process(self, frame)
    }
}
