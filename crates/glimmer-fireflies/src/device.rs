//! Device tier and the scaling it applies to a firefly field

use glimmer_core::{GlimmerError, Result};
use glimmer_render::MAX_POINT_LIGHTS;
use serde::Deserialize;

/// Hardware class, decided once by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceTier {
    /// Phones and tablets: no dynamic lights, fewer bodies
    Mobile,
    /// Integrated GPUs: a handful of lights
    Low,
    #[default]
    Desktop,
}

impl DeviceTier {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mobile" => Some(Self::Mobile),
            "low" => Some(Self::Low),
            "desktop" => Some(Self::Desktop),
            _ => None,
        }
    }
}

/// Device capability resolved by the host and injected through the config.
///
/// In TOML only `tier` is required; `max_lights` and `count_scale` override
/// the tier's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "DeviceEntry")]
pub struct DeviceProfile {
    pub tier: DeviceTier,
    /// Upper bound on the light budget for this device
    pub max_lights: usize,
    /// Multiplier on the configured emitter count
    pub count_scale: f32,
}

impl DeviceProfile {
    pub fn for_tier(tier: DeviceTier) -> Self {
        match tier {
            DeviceTier::Mobile => Self {
                tier,
                max_lights: 0,
                count_scale: 0.5,
            },
            DeviceTier::Low => Self {
                tier,
                max_lights: 4,
                count_scale: 0.75,
            },
            DeviceTier::Desktop => Self {
                tier,
                max_lights: MAX_POINT_LIGHTS,
                count_scale: 1.0,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_lights > MAX_POINT_LIGHTS {
            return Err(GlimmerError::out_of_range(
                "device.max_lights",
                0.0,
                MAX_POINT_LIGHTS as f64,
                self.max_lights as f64,
            ));
        }
        if !self.count_scale.is_finite() || !(0.0..=1.0).contains(&self.count_scale) {
            return Err(GlimmerError::out_of_range(
                "device.count_scale",
                0.0,
                1.0,
                self.count_scale as f64,
            ));
        }
        Ok(())
    }

    /// Emitter count after device scaling
    pub fn scale_count(&self, count: usize) -> usize {
        (count as f32 * self.count_scale).round() as usize
    }

    /// Light budget after the device cap
    pub fn cap_budget(&self, budget: usize) -> usize {
        budget.min(self.max_lights)
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::for_tier(DeviceTier::Desktop)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DeviceEntry {
    tier: DeviceTier,
    max_lights: Option<usize>,
    count_scale: Option<f32>,
}

impl From<DeviceEntry> for DeviceProfile {
    fn from(entry: DeviceEntry) -> Self {
        let base = DeviceProfile::for_tier(entry.tier);
        Self {
            tier: entry.tier,
            max_lights: entry.max_lights.unwrap_or(base.max_lights),
            count_scale: entry.count_scale.unwrap_or(base.count_scale),
        }
    }
}
