//! Per-environment tuning, embedded as TOML

use glimmer_core::{GlimmerError, Result};

use crate::config::FireflyConfig;

const PRESETS: &[(&str, &str)] = &[
    ("forest", include_str!("../presets/forest.toml")),
    ("meadow", include_str!("../presets/meadow.toml")),
    ("lakeside", include_str!("../presets/lakeside.toml")),
];

/// Names of the embedded presets
pub fn names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}

/// Raw TOML of a preset
pub fn source(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, src)| *src)
}

/// Parse and validate a preset by name
pub fn load(name: &str) -> Result<FireflyConfig> {
    let src = source(name).ok_or_else(|| GlimmerError::UnknownPreset {
        name: name.to_string(),
        available: names().into_iter().map(String::from).collect(),
    })?;
    FireflyConfig::from_toml_str(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_parses() {
        for name in names() {
            let config = load(name).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(config.count > 0);
            assert!(config.light_budget > 0);
        }
    }

    #[test]
    fn unknown_preset_lists_alternatives() {
        let err = load("volcano").unwrap_err();
        match err {
            GlimmerError::UnknownPreset { available, .. } => {
                assert!(available.contains(&"forest".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
