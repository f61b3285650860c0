//! Preset listing command

use anyhow::{anyhow, Result};
use glimmer_fireflies::presets;

pub fn run(show: Option<&str>) -> Result<()> {
    if let Some(name) = show {
        let source = presets::source(name).ok_or_else(|| {
            anyhow!(
                "unknown preset '{}'; available: {}",
                name,
                presets::names().join(", ")
            )
        })?;
        print!("{}", source);
        return Ok(());
    }

    for name in presets::names() {
        let config = presets::load(name)?;
        println!(
            "{:<10} {:>4} emitters, budget {:>2}, radius {:>5.1}",
            name, config.count, config.light_budget, config.radius
        );
    }
    Ok(())
}
