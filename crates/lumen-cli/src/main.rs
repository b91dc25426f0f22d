//! lumen - post-processing CLI for the Lumen viewer
//!
//! Runs the viewer's grading and bloom stages on still images.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;

mod commands;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(author, version, about = "Lumen viewer post-processing CLI")]
#[command(long_about = "
Applies the Lumen viewer's post-processing (color grading and bloom) to
PNG images, headlessly.

Examples:
  lumen grade render.png -o graded.png --preset viewer
  lumen grade render.png -o graded.png --settings look.yaml --saturation 140
  lumen grade render.png -o warm.png --tint '#ffcc88' --tint-strength 30
  lumen bloom render.png -o glow.png --intensity 0.5 --threshold 0.7
  lumen render render.png -o final.png --settings look.yaml --frames 60
  lumen preset viewer -o look.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply color grading
    #[command(visible_alias = "g")]
    Grade(GradeArgs),

    /// Apply bloom
    #[command(visible_alias = "b")]
    Bloom(BloomArgs),

    /// Run the full effect chain through a render session
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// Print or save a settings preset
    #[command(visible_alias = "p")]
    Preset(PresetArgs),
}

/// Where settings come from, before overrides.
#[derive(Args, Clone, Default)]
pub struct SettingsSource {
    /// Settings file (YAML or JSON)
    #[arg(short, long, conflicts_with = "preset")]
    settings: Option<PathBuf>,

    /// Named preset (identity, viewer)
    #[arg(short, long)]
    preset: Option<String>,
}

/// Per-field grading overrides, in UI units.
#[derive(Args, Clone, Default)]
pub struct GradeOverrides {
    /// Output gamma (0.1..4)
    #[arg(long)]
    gamma: Option<f32>,

    /// Exposure (0..2, 1 = unchanged)
    #[arg(long)]
    exposure: Option<f32>,

    /// Contrast in percent
    #[arg(long)]
    contrast: Option<f32>,

    /// Saturation in percent
    #[arg(long)]
    saturation: Option<f32>,

    /// Red-band saturation in percent
    #[arg(long)]
    red: Option<f32>,

    /// Yellow-band saturation in percent
    #[arg(long)]
    yellow: Option<f32>,

    /// Highlights (-100..100)
    #[arg(long, allow_hyphen_values = true)]
    highlights: Option<f32>,

    /// Shadows (-100..100)
    #[arg(long, allow_hyphen_values = true)]
    shadows: Option<f32>,

    /// Whites (-100..100)
    #[arg(long, allow_hyphen_values = true)]
    whites: Option<f32>,

    /// Blacks (-100..100)
    #[arg(long, allow_hyphen_values = true)]
    blacks: Option<f32>,

    /// Tint color (#rrggbb)
    #[arg(long)]
    tint: Option<String>,

    /// Tint strength in percent
    #[arg(long)]
    tint_strength: Option<f32>,

    /// Apply tones after saturation and tint (older stage order)
    #[arg(long)]
    legacy_order: bool,
}

#[derive(Args)]
pub struct GradeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    source: SettingsSource,

    #[command(flatten)]
    overrides: GradeOverrides,
}

#[derive(Args)]
pub struct BloomArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Glow gain
    #[arg(long, default_value = "0.2")]
    intensity: f32,

    /// Blur radius relative to the shorter image side
    #[arg(long, default_value = "0.1")]
    radius: f32,

    /// Bright-pass luminance threshold
    #[arg(long, default_value = "0.8")]
    threshold: f32,

    /// Bright-pass transition width
    #[arg(long, default_value = "0.05")]
    smoothing: f32,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Input image (stands in for the scene renderer)
    input: PathBuf,

    /// Output image (last rendered frame)
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    source: SettingsSource,

    #[command(flatten)]
    overrides: GradeOverrides,

    /// Disable bloom
    #[arg(long)]
    no_bloom: bool,

    /// Disable color grading
    #[arg(long)]
    no_grade: bool,

    /// Number of frames to render
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,
}

#[derive(Args)]
pub struct PresetArgs {
    /// Preset name (identity, viewer)
    name: String,

    /// Write to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Sets up stderr logging and, if requested, a log file.
///
/// `RUST_LOG` takes precedence over `-v`. The returned guard flushes the
/// file writer on drop.
fn install_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    let (file_layer, guard) = match &cli.log {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("Failed to install logging")?;

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = install_tracing(&cli)?;

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Grade(args) => commands::grade::run(args, cli.verbose),
        Commands::Bloom(args) => commands::bloom::run(args, cli.verbose),
        Commands::Render(args) => commands::render::run(args, cli.verbose),
        Commands::Preset(args) => commands::preset::run(args),
    }
}
