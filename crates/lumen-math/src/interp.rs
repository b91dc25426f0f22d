//! Interpolation utilities for per-pixel color math.
//!
//! - Linear interpolation ([`lerp`], [`mix`])
//! - Smooth interpolation ([`smoothstep`])
//! - Clamping utilities
//!
//! # Usage
//!
//! ```rust
//! use lumen_math::{lerp, smoothstep};
//!
//! let mid = lerp(0.0, 10.0, 0.5);
//! assert_eq!(mid, 5.0);
//!
//! let smooth = smoothstep(0.0, 1.0, 0.5);
//! assert_eq!(smooth, 0.5);
//! ```

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
/// For values outside [0, 1], the result is extrapolated.
///
/// # Formula
///
/// `a + (b - a) * t`
///
/// # Example
///
/// ```rust
/// use lumen_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Mix: alias for lerp, as spelled in shader languages.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    lerp(a, b, t)
}

/// Inverse linear interpolation.
///
/// Given a value between `a` and `b`, returns the corresponding `t` value.
/// Works for `b < a` as well. Returns 0 for a degenerate range.
///
/// # Example
///
/// ```rust
/// use lumen_math::inverse_lerp;
///
/// assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
/// assert_eq!(inverse_lerp(10.0, 0.0, 2.5), 0.75);
/// ```
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < 1e-10 {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Clamps a value to the range [min, max].
///
/// # Example
///
/// ```rust
/// use lumen_math::clamp;
///
/// assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
/// assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
/// assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
/// ```
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Clamps each channel of an RGB triple to [0, 1].
#[inline]
pub fn saturate3(rgb: [f32; 3]) -> [f32; 3] {
    [saturate(rgb[0]), saturate(rgb[1]), saturate(rgb[2])]
}

/// Hermite smoothstep interpolation.
///
/// Returns 0 at `edge0`, 1 at `edge1`, and smoothly interpolates between
/// them with a cubic polynomial, clamped outside the edge range.
///
/// Edges may be given in either order: `smoothstep(0.5, 0.0, x)` is a
/// falling edge that is 1 at `x <= 0` and 0 at `x >= 0.5`. Equal edges
/// degrade to [`step`].
///
/// # Formula
///
/// `t * t * (3 - 2 * t)` where `t = clamp((x - edge0) / (edge1 - edge0), 0, 1)`
///
/// # Example
///
/// ```rust
/// use lumen_math::smoothstep;
///
/// assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
/// assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
/// assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
/// assert_eq!(smoothstep(0.2, 0.0, 0.0), 1.0);
/// ```
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return step(edge0, x);
    }
    let t = saturate(inverse_lerp(edge0, edge1, x));
    t * t * (3.0 - 2.0 * t)
}

/// Step function.
///
/// Returns 0 for `x < edge`, 1 for `x >= edge`.
#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

/// Fract: returns the fractional part of a value, always in [0, 1).
///
/// # Example
///
/// ```rust
/// use lumen_math::fract;
///
/// assert!((fract(1.75) - 0.75).abs() < 1e-6);
/// assert!((fract(-0.25) - 0.75).abs() < 1e-6);
/// ```
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(mix(2.0, 4.0, 0.25), 2.5);
    }

    #[test]
    fn test_inverse_lerp() {
        assert_eq!(inverse_lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
        assert_eq!(inverse_lerp(0.0, 10.0, 10.0), 1.0);
        assert_eq!(inverse_lerp(1.0, 1.0, 3.0), 0.0);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(-0.5), 0.0);
        assert_eq!(saturate(0.5), 0.5);
        assert_eq!(saturate(1.5), 1.0);
        assert_eq!(saturate3([-1.0, 0.25, 2.0]), [0.0, 0.25, 1.0]);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);

        // Below edge0 and above edge1
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    }

    #[test]
    fn smoothstep_is_cubic_not_linear() {
        // t = 0.25 -> 3t^2 - 2t^3 = 0.15625
        assert_relative_eq!(smoothstep(0.0, 1.0, 0.25), 0.15625, epsilon = 1e-6);
        assert_relative_eq!(smoothstep(0.0, 1.0, 0.75), 0.84375, epsilon = 1e-6);
    }

    #[test]
    fn smoothstep_reversed_edges_mirror() {
        for i in 0..=20 {
            let x = i as f32 / 20.0;
            assert_relative_eq!(
                smoothstep(1.0, 0.0, x),
                1.0 - smoothstep(0.0, 1.0, x),
                epsilon = 1e-6
            );
        }
        assert_eq!(smoothstep(0.5, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(0.5, 0.0, 0.5), 0.0);
        assert_eq!(smoothstep(0.5, 0.0, 0.9), 0.0);
    }

    #[test]
    fn smoothstep_equal_edges_is_step() {
        assert_eq!(smoothstep(0.3, 0.3, 0.2), 0.0);
        assert_eq!(smoothstep(0.3, 0.3, 0.3), 1.0);
    }

    #[test]
    fn test_step() {
        assert_eq!(step(0.5, 0.25), 0.0);
        assert_eq!(step(0.5, 0.5), 1.0);
        assert_eq!(step(0.5, 0.75), 1.0);
    }

    #[test]
    fn test_fract() {
        assert!((fract(1.75) - 0.75).abs() < 1e-6);
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert_eq!(fract(2.0), 0.0);
    }
}
