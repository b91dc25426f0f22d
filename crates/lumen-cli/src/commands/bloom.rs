//! Bloom command
//!
//! Applies the bloom stage on its own.

use anyhow::Result;
use lumen_ops::{Bloom, BloomParams};
use tracing::{info, trace};

use crate::BloomArgs;

pub fn run(args: BloomArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), intensity = args.intensity, radius = args.radius, "bloom::run");

    let bloom = Bloom::new(BloomParams {
        intensity: args.intensity,
        radius: args.radius,
        threshold: args.threshold,
        smoothing: args.smoothing,
    })?;

    let frame = super::load_frame(&args.input)?;
    let radius_px = bloom.blur_radius_px(frame.width(), frame.height());
    info!(w = frame.width(), h = frame.height(), radius_px, "Applying bloom");

    if verbose > 0 {
        println!(
            "Applying bloom (intensity={}, radius={}px) to {}",
            args.intensity,
            radius_px,
            args.input.display()
        );
    }

    let output = bloom.process(&frame)?;
    super::save_frame(&args.output, &output)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
