//! Preset command
//!
//! Prints a named settings preset as YAML, or saves it to a file.

use anyhow::{Context, Result};
use lumen_session::Preset;

use crate::PresetArgs;

pub fn run(args: PresetArgs) -> Result<()> {
    let preset: Preset = args.name.parse()?;
    let settings = preset.settings();

    match &args.output {
        Some(path) => settings
            .save(path)
            .with_context(|| format!("Failed to save preset: {}", path.display()))?,
        None => print!("{}", settings.to_yaml_string()?),
    }

    Ok(())
}
