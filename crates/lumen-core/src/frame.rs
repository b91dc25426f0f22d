//! Frame buffer type for post-processing.
//!
//! A [`Frame`] is the rendered scene color buffer handed to the
//! post-processing chain: RGBA `f32`, row-major, top-to-bottom, with alpha
//! interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! Color values are expected to be linear-ish in [0, 1]. Nothing here enforces
//! that; the operators clamp where their math requires it.
//!
//! # Usage
//!
//! ```rust
//! use lumen_core::Frame;
//!
//! let mut frame = Frame::new(64, 32);
//! frame.set_pixel(10, 5, [1.0, 0.5, 0.25, 1.0]);
//! assert_eq!(frame.pixel(10, 5), [1.0, 0.5, 0.25, 1.0]);
//! ```
//!
//! # Memory Management
//!
//! Pixel data lives in an [`Arc<Vec<f32>>`], so cloning a frame is cheap and
//! mutation is copy-on-write. Stages that pass a frame through untouched
//! don't pay for a copy.

use crate::{Error, Result};
use rayon::prelude::*;
use std::sync::Arc;

/// Number of interleaved channels per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// Owned RGBA `f32` color buffer.
#[derive(Clone, PartialEq)]
pub struct Frame {
    data: Arc<Vec<f32>>,
    width: u32,
    height: u32,
}

impl Frame {
    /// Creates a new frame filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            data: Arc::new(vec![0.0; len]),
            width,
            height,
        }
    }

    /// Creates a frame from existing interleaved RGBA data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 4`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lumen_core::Frame;
    ///
    /// let frame = Frame::from_data(2, 2, vec![0.5; 16]).unwrap();
    /// assert_eq!(frame.pixel_count(), 4);
    /// assert!(Frame::from_data(2, 2, vec![0.5; 15]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates a frame filled with a single RGBA value.
    pub fn filled(width: u32, height: u32, pixel: [f32; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates a frame from 8-bit RGBA data, mapping `0..=255` to `0.0..=1.0`.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let data = bytes.iter().map(|&b| b as f32 / 255.0).collect();
        Self::from_data(width, height, data)
    }

    /// Quantizes the frame to 8-bit RGBA, clamping to [0, 1] first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }

    /// Returns the frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the frame dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the frame has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the raw interleaved RGBA data.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the pixel data mutably, cloning it first if shared.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the frame and returns its data, copying only if shared.
    pub fn into_data(self) -> Vec<f32> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// Returns the pixel at (x, y), or an error if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<[f32; 4]> {
        if x < self.width && y < self.height {
            Ok(self.pixel(x, y))
        } else {
            Err(Error::out_of_bounds(x, y, self.width, self.height))
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [f32; 4]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        self.data_mut()[o..o + CHANNELS].copy_from_slice(&pixel);
    }

    /// Fills the entire frame with a pixel value.
    pub fn fill(&mut self, pixel: [f32; 4]) {
        for chunk in self.data_mut().chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Iterates over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [f32; 4]> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|c| [c[0], c[1], c[2], c[3]])
    }

    /// Applies `f` to every pixel in place, in parallel.
    ///
    /// `f` must be a pure per-pixel function; evaluation order is unspecified.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lumen_core::Frame;
    ///
    /// let mut frame = Frame::filled(8, 8, [0.25, 0.25, 0.25, 1.0]);
    /// frame.map_pixels(|[r, g, b, a]| [r * 2.0, g * 2.0, b * 2.0, a]);
    /// assert_eq!(frame.pixel(3, 3), [0.5, 0.5, 0.5, 1.0]);
    /// ```
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn([f32; 4]) -> [f32; 4] + Sync + Send,
    {
        self.data_mut()
            .par_chunks_exact_mut(CHANNELS)
            .for_each(|chunk| {
                let out = f([chunk[0], chunk[1], chunk[2], chunk[3]]);
                chunk.copy_from_slice(&out);
            });
    }

    /// Combines `other` into `self` pixel by pixel, in parallel.
    ///
    /// `f` receives `(self_pixel, other_pixel)` and returns the new value for
    /// `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the frames differ in size.
    pub fn combine<F>(&mut self, other: &Frame, f: F) -> Result<()>
    where
        F: Fn([f32; 4], [f32; 4]) -> [f32; 4] + Sync + Send,
    {
        self.ensure_same_size(other)?;
        self.data_mut()
            .par_chunks_exact_mut(CHANNELS)
            .zip(other.data.par_chunks_exact(CHANNELS))
            .for_each(|(dst, src)| {
                let out = f(
                    [dst[0], dst[1], dst[2], dst[3]],
                    [src[0], src[1], src[2], src[3]],
                );
                dst.copy_from_slice(&out);
            });
        Ok(())
    }

    /// Checks that `other` has the same dimensions as `self`.
    pub fn ensure_same_size(&self, other: &Frame) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(self.dimensions(), other.dimensions()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
