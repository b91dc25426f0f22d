//! # lumen-ops
//!
//! Post-processing operators applied to the viewer's rendered color buffer.
//!
//! # Modules
//!
//! - [`grading`] - The single-pass color-grading operator and its stages
//!   (exposure, contrast, tone regions, selective saturation, tint, gamma),
//!   host settings and parameter marshaling
//! - [`bloom`] - Luminance-thresholded bloom with additive composite
//! - [`chain`] - The [`PostEffect`] trait and ordered [`EffectChain`]
//! - [`blur`] - Separable box blur used by bloom
//!
//! # Example
//!
//! ```rust
//! use lumen_core::Frame;
//! use lumen_ops::grading::{marshal, ColorGrade, GradeSettings};
//! use lumen_ops::{Bloom, BloomParams, EffectChain};
//!
//! let settings = GradeSettings::viewer();
//! let grade = ColorGrade::new(marshal(&settings).params);
//! let bloom = Bloom::new(BloomParams::default()).unwrap();
//!
//! let chain = EffectChain::new().with(&grade).with(&bloom);
//! let frame = Frame::filled(16, 16, [0.5, 0.4, 0.3, 1.0]);
//! let out = chain.run(&frame).unwrap();
//! assert_eq!(out.dimensions(), (16, 16));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod bloom;
pub mod blur;
pub mod chain;
pub mod grading;

pub use bloom::{Bloom, BloomParams};
pub use chain::{EffectChain, PostEffect};
pub use error::{OpsError, OpsResult};
pub use grading::{ColorGrade, GradingParameters, StageOrder};
