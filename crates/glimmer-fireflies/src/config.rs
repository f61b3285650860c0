//! Firefly field configuration (parsed from TOML) and its validation

use std::path::Path;

use glimmer_core::{Color, GlimmerError, Result};
use glimmer_render::MAX_POINT_LIGHTS;
use log::warn;
use serde::{Deserialize, Deserializer};

use crate::device::DeviceProfile;

/// Largest pool a single field may allocate
pub const MAX_EMITTERS: usize = 4096;

/// Vertical spawn offset above the sampled ground height
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeightRange {
    pub min: f32,
    pub max: f32,
}

/// Per-axis amplitude of the float motion
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloatAmplitude {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl FloatAmplitude {
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Motion tuning shared by every emitter in the field
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovementConfig {
    /// Angular speed of the horizontal wander loop (radians per second)
    pub wander_speed: f32,
    /// Maximum horizontal distance the wander takes an emitter from its anchor
    pub wander_radius: f32,
    pub float_amplitude: FloatAmplitude,
    /// Angular speed of the float bob (radians per second)
    pub speed: f32,
}

/// Configuration for one firefly field.
///
/// Every field is required except `seed` (defaults to 1) and `device`
/// (defaults to the desktop profile, which scales nothing).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FireflyConfig {
    /// Emitters to spawn before device scaling
    pub count: usize,
    /// Palette as `#rrggbb` strings; each emitter picks one uniformly
    #[serde(deserialize_with = "deserialize_palette")]
    pub colors: Vec<Color>,
    pub height_range: HeightRange,
    /// Spawn disc radius around the origin
    pub radius: f32,
    /// Requested dynamic-light budget (K) before the device cap
    pub light_budget: usize,
    /// Fade progress per second
    pub fade_speed: f32,
    pub movement: MovementConfig,
    /// Visual body scale, also the culling sphere radius
    pub size: f32,
    /// Intensity of a fully faded-in light
    pub light_intensity: f32,
    /// Attenuation range of each point light
    pub light_distance: f32,
    /// Brightness floor of unlit bodies, in [0, 1]
    pub min_brightness: f32,
    #[serde(default = "default_seed")]
    pub seed: u32,
    #[serde(default)]
    pub device: DeviceProfile,
}

fn default_seed() -> u32 {
    1
}

/// Emitter count and light budget after the device profile is applied.
/// Computed once when a pool is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBudget {
    pub count: usize,
    pub light_budget: usize,
}

impl FireflyConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reject values the light system cannot honor. Nothing is clamped here.
    pub fn validate(&self) -> Result<()> {
        if self.count > MAX_EMITTERS {
            return Err(GlimmerError::out_of_range(
                "count",
                0.0,
                MAX_EMITTERS as f64,
                self.count as f64,
            ));
        }
        if self.colors.is_empty() {
            return Err(GlimmerError::InvalidConfig(
                "colors must name at least one palette entry".into(),
            ));
        }
        if let Some(bad) = self.colors.iter().find(|c| !c.is_valid()) {
            return Err(GlimmerError::InvalidColor(format!("{bad:?}")));
        }

        let HeightRange { min, max } = self.height_range;
        require_finite("height_range.min", min)?;
        require_finite("height_range.max", max)?;
        if min > max {
            return Err(GlimmerError::InvalidConfig(format!(
                "height_range.min ({min}) exceeds height_range.max ({max})"
            )));
        }

        require_non_negative("radius", self.radius)?;
        if self.light_budget > MAX_POINT_LIGHTS {
            return Err(GlimmerError::out_of_range(
                "light_budget",
                0.0,
                MAX_POINT_LIGHTS as f64,
                self.light_budget as f64,
            ));
        }
        require_positive("fade_speed", self.fade_speed)?;
        require_positive("size", self.size)?;

        let m = &self.movement;
        require_non_negative("movement.wander_speed", m.wander_speed)?;
        require_non_negative("movement.wander_radius", m.wander_radius)?;
        require_non_negative("movement.speed", m.speed)?;
        require_non_negative("movement.float_amplitude.x", m.float_amplitude.x)?;
        require_non_negative("movement.float_amplitude.y", m.float_amplitude.y)?;
        require_non_negative("movement.float_amplitude.z", m.float_amplitude.z)?;

        require_non_negative("light_intensity", self.light_intensity)?;
        require_positive("light_distance", self.light_distance)?;
        if !self.min_brightness.is_finite() || !(0.0..=1.0).contains(&self.min_brightness) {
            return Err(GlimmerError::out_of_range(
                "min_brightness",
                0.0,
                1.0,
                self.min_brightness as f64,
            ));
        }

        self.device.validate()
    }

    /// Apply the device profile. The budget cap is the one documented clamp.
    pub fn resolve(&self) -> ResolvedBudget {
        let light_budget = self.device.cap_budget(self.light_budget);
        if light_budget < self.light_budget {
            warn!(
                "Light budget {} capped to {} for {:?} device",
                self.light_budget, light_budget, self.device.tier
            );
        }
        ResolvedBudget {
            count: self.device.scale_count(self.count),
            light_budget,
        }
    }

    /// Furthest an animated position may sit from its anchor
    pub fn max_excursion(&self) -> f32 {
        self.movement.wander_radius + self.movement.float_amplitude.magnitude()
    }
}

fn deserialize_palette<'de, D>(deserializer: D) -> std::result::Result<Vec<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    raw.iter()
        .map(|s| Color::parse_hex(s).map_err(serde::de::Error::custom))
        .collect()
}

fn require_finite(field: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GlimmerError::InvalidConfig(format!("{field} must be finite")))
    }
}

fn require_non_negative(field: &str, value: f32) -> Result<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(GlimmerError::out_of_range(field, 0.0, f64::MAX, value as f64));
    }
    Ok(())
}

fn require_positive(field: &str, value: f32) -> Result<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(GlimmerError::InvalidConfig(format!(
            "{field} must be greater than zero, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_config(count: usize, light_budget: usize) -> FireflyConfig {
    FireflyConfig {
        count,
        colors: vec![Color::from_hex(0xFFEE88), Color::from_hex(0x99FF66)],
        height_range: HeightRange { min: 0.5, max: 2.5 },
        radius: 40.0,
        light_budget,
        fade_speed: 2.0,
        movement: MovementConfig {
            wander_speed: 0.3,
            wander_radius: 1.5,
            float_amplitude: FloatAmplitude {
                x: 0.2,
                y: 0.4,
                z: 0.2,
            },
            speed: 1.2,
        },
        size: 0.15,
        light_intensity: 2.0,
        light_distance: 6.0,
        min_brightness: 0.25,
        seed: 1,
        device: DeviceProfile::default(),
    }
}
