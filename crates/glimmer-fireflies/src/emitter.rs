//! Per-emitter state: anchor, animated position, palette color, light slot

use glimmer_core::{Color, EmitterId, Vec3};
use glimmer_render::PointLight;

/// Random offsets that desynchronize the shared motion functions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    /// Offset of the wander loop angle
    pub wander: f32,
    /// Offset of the wander reach (how far out the loop swings)
    pub reach: f32,
    /// Offset of the float bob
    pub float: f32,
}

/// Selector target plus the interpolated value actually rendered
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActivityState {
    /// Chosen by the selector this frame
    pub is_active: bool,
    /// Current fade, always in [0, 1]
    pub fade_progress: f32,
}

/// A dynamic light owned by one emitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterLight {
    pub position: Vec3,
    pub color: Color,
    /// Intensity at full fade
    pub base_intensity: f32,
    /// Current intensity, `base_intensity * fade_progress`
    pub intensity: f32,
    pub range: f32,
    /// Whether the light is part of the scene
    pub attached: bool,
}

impl EmitterLight {
    pub fn new(position: Vec3, color: Color, base_intensity: f32, range: f32) -> Self {
        Self {
            position,
            color,
            base_intensity,
            intensity: 0.0,
            range,
            attached: false,
        }
    }

    pub fn to_point_light(&self) -> PointLight {
        PointLight {
            position: self.position.to_array(),
            range: self.range,
            color: self.color.rgb(),
            intensity: self.intensity,
        }
    }
}

/// One candidate glow source
#[derive(Debug, Clone)]
pub struct Emitter {
    pub id: EmitterId,
    pub base_position: Vec3,
    pub animated_position: Vec3,
    pub color: Color,
    pub phase: Phase,
    /// `None` in zero-light mode
    pub light: Option<EmitterLight>,
    pub activity: ActivityState,
}

impl Emitter {
    /// True when this emitter's light currently contributes to the scene
    pub fn is_lit(&self) -> bool {
        self.light.is_some_and(|l| l.intensity > 0.0)
    }

    /// Active and still dark: waiting for a light slot to free up
    pub fn awaiting_slot(&self) -> bool {
        self.light.is_some() && self.activity.is_active && self.activity.fade_progress <= 0.0
    }

    /// Push the current fade into the light's intensity
    pub fn apply_fade(&mut self) {
        let progress = self.activity.fade_progress;
        if let Some(light) = self.light.as_mut() {
            light.intensity = light.base_intensity * progress;
        }
    }
}
