//! Grade command
//!
//! Applies the color-grading operator with settings from a file or preset,
//! plus command-line overrides.

use anyhow::Result;
use lumen_ops::grading::{marshal, ColorGrade, StageOrder};
use tracing::{debug, info, trace};

use crate::GradeArgs;

pub fn run(args: GradeArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "grade::run");

    let mut settings = super::load_settings(&args.source)?.grade;
    args.overrides.apply_to(&mut settings);

    let marshaled = marshal(&settings);
    marshaled.log_diagnostics();
    debug!(params = ?marshaled.params, "Grading parameters");

    let order = if args.overrides.legacy_order {
        StageOrder::LegacyTonesLast
    } else {
        StageOrder::Canonical
    };
    let grade = ColorGrade::new(marshaled.params).with_order(order);

    let mut frame = super::load_frame(&args.input)?;
    info!(w = frame.width(), h = frame.height(), ?order, "Applying color grade");

    if verbose > 0 {
        println!("Grading {} ({}x{})", args.input.display(), frame.width(), frame.height());
    }

    grade.process_inplace(&mut frame);
    super::save_frame(&args.output, &frame)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
