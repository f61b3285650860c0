//! Config validation command

use std::path::Path;

use anyhow::{Context, Result};
use glimmer_fireflies::FireflyConfig;

pub fn run(file: &str) -> Result<()> {
    let config = FireflyConfig::from_toml_file(Path::new(file))
        .with_context(|| format!("{} is not a valid firefly config", file))?;
    let resolved = config.resolve();

    println!("{}: ok", file);
    println!(
        "  emitters: {} (configured {}, {:?} device)",
        resolved.count, config.count, config.device.tier
    );
    println!(
        "  light budget: {} (configured {})",
        resolved.light_budget, config.light_budget
    );
    println!("  palette: {} color(s)", config.colors.len());
    println!("  max excursion: {:.2}", config.max_excursion());
    Ok(())
}
