//! Render command
//!
//! Drives a render session over a still image, the way the viewer drives
//! it with live scene frames.

use std::time::Instant;

use anyhow::{Context, Result};
use lumen_ops::grading::StageOrder;
use lumen_session::{RenderSession, StillFrame};
use tracing::{info, trace};

use crate::RenderArgs;

pub fn run(args: RenderArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), frames = args.frames, "render::run");

    let mut settings = super::load_settings(&args.source)?;
    args.overrides.apply_to(&mut settings.grade);
    if args.no_bloom {
        settings.effects.bloom = false;
    }
    if args.no_grade {
        settings.effects.color_adjustment = false;
    }

    let mut source = StillFrame::open(&args.input)
        .with_context(|| format!("Failed to load: {}", args.input.display()))?;
    let (mut session, _handle) = RenderSession::new(settings)?;
    if args.overrides.legacy_order {
        session.set_stage_order(StageOrder::LegacyTonesLast);
    }

    let started = Instant::now();
    let mut last = None;
    for _ in 0..args.frames {
        last = Some(session.render_next(&mut source)?);
    }
    let elapsed = started.elapsed();

    let frame = last.context("No frames rendered")?;
    let per_frame_ms = elapsed.as_secs_f64() * 1000.0 / args.frames as f64;
    info!(frames = session.frame_count(), per_frame_ms, "Render finished");

    if verbose > 0 {
        println!(
            "Rendered {} frame(s) of {} ({:.2} ms/frame)",
            session.frame_count(),
            args.input.display(),
            per_frame_ms
        );
    }

    super::save_frame(&args.output, &frame)
}
