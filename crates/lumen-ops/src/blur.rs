//! Separable box blur over interleaved `f32` buffers.
//!
//! Each pass is a horizontal sliding-window average followed by the same
//! average over the transposed buffer, with edge pixels clamped. Repeating
//! the pass three times gives a close Gaussian approximation, which is what
//! [`crate::Bloom`] uses.
//!
//! Rows are processed in parallel when the `parallel` feature is enabled.
//!
//! # Example
//!
//! ```rust
//! use lumen_ops::blur;
//!
//! let src = vec![0.5f32; 64 * 32 * 4];
//! let out = blur::box_blur_passes(&src, 64, 32, 4, 3, 3).unwrap();
//! assert!(out.iter().all(|v| (v - 0.5).abs() < 1e-5));
//! ```

use crate::{OpsError, OpsResult};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

/// Single separable box blur pass with a `(2 * radius + 1)` window.
pub fn box_blur(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> OpsResult<Vec<f32>> {
    box_blur_passes(src, width, height, channels, radius, 1)
}

/// Runs `passes` separable box blur passes.
///
/// # Errors
///
/// Returns [`OpsError::InvalidDimensions`] if any dimension is zero, the
/// size overflows, or `src` does not hold `width * height * channels`
/// values.
pub fn box_blur_passes(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
    passes: usize,
) -> OpsResult<Vec<f32>> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(OpsError::InvalidDimensions(
            "width, height, and channels must be > 0".into(),
        ));
    }

    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| OpsError::InvalidDimensions("buffer size overflows".into()))?;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} values, got {}",
            expected,
            src.len()
        )));
    }
    radius
        .checked_mul(2)
        .and_then(|v| v.checked_add(1))
        .ok_or_else(|| OpsError::InvalidDimensions("blur radius overflows".into()))?;

    trace!(width, height, channels, radius, passes, "box_blur");

    let mut buf = src.to_vec();
    for _ in 0..passes {
        let horizontal = blur_rows(&buf, width, height, channels, radius);
        let transposed = transpose(&horizontal, width, height, channels);
        let vertical = blur_rows(&transposed, height, width, channels, radius);
        buf = transpose(&vertical, height, width, channels);
    }
    Ok(buf)
}

/// Sliding-window average along each row, clamping at the edges.
fn blur_rows(src: &[f32], width: usize, height: usize, channels: usize, radius: usize) -> Vec<f32> {
    let inv_size = 1.0 / (2 * radius + 1) as f32;
    let stride = width * channels;
    let mut dst = vec![0.0f32; width * height * channels];

    let blur_row = |(y, row): (usize, &mut [f32])| {
        let line = &src[y * stride..(y + 1) * stride];
        let at = |x: usize, c: usize| line[x.min(width - 1) * channels + c];

        for c in 0..channels {
            // Window centered on x = 0; left side clamps to the first pixel.
            let mut sum = at(0, c) * radius as f32;
            for x in 0..=radius {
                sum += at(x, c);
            }

            for x in 0..width {
                row[x * channels + c] = sum * inv_size;
                sum -= at(x.saturating_sub(radius), c);
                sum += at(x + radius + 1, c);
            }
        }
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(stride).enumerate().for_each(blur_row);
    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(stride).enumerate().for_each(blur_row);

    dst
}

/// Transposes a `width x height` buffer into `height x width`.
fn transpose(src: &[f32], width: usize, height: usize, channels: usize) -> Vec<f32> {
    let mut dst = vec![0.0f32; width * height * channels];

    let fill_column = |(x, col): (usize, &mut [f32])| {
        for y in 0..height {
            let from = (y * width + x) * channels;
            col[y * channels..(y + 1) * channels].copy_from_slice(&src[from..from + channels]);
        }
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(height * channels).enumerate().for_each(fill_column);
    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(height * channels).enumerate().for_each(fill_column);

    dst
}
