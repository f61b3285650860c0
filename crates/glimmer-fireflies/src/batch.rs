//! Packs glow bodies into one instance buffer and lists the lit lights

use glimmer_render::{GlowInstance, InstanceBuffer, LightList, PointLight};

use crate::emitter::Emitter;
use crate::pool::EmitterPool;

/// Owns the renderer-facing buffers of one firefly field
pub struct BatchRenderer {
    instances: InstanceBuffer,
    lights: LightList,
    size: f32,
    min_brightness: f32,
}

impl BatchRenderer {
    /// One instance slot per emitter, one light slot per unit of budget
    pub fn new(pool: &EmitterPool, size: f32, min_brightness: f32) -> Self {
        Self {
            instances: InstanceBuffer::new(pool.len()),
            lights: LightList::new(pool.light_budget()),
            size,
            min_brightness,
        }
    }

    /// Body brightness for an emitter. Lit fields dim unlit bodies to the
    /// floor; zero-light fields render every body at full glow.
    fn brightness(&self, e: &Emitter, has_lights: bool) -> f32 {
        if !has_lights {
            return 1.0;
        }
        self.min_brightness + (1.0 - self.min_brightness) * e.activity.fade_progress
    }

    /// Write every body into the instance buffer and rebuild the light list.
    ///
    /// Lights go out selected-first, then the ones still fading out.
    pub fn upload(&mut self, pool: &EmitterPool) {
        let has_lights = pool.has_lights();
        for (i, e) in pool.emitters().iter().enumerate() {
            let b = self.brightness(e, has_lights);
            let color = e.color.scaled(b).with_alpha(b);
            self.instances.write(
                i,
                GlowInstance::new(e.animated_position.to_array(), self.size, color.to_array()),
            );
        }
        self.instances.mark_dirty();

        self.lights.clear();
        if !has_lights {
            return;
        }
        let emitters = pool.emitters();
        let selected = pool
            .active()
            .iter()
            .map(|id| &emitters[id.index()])
            .filter(|e| emits_light(e));
        let fading = emitters
            .iter()
            .filter(|e| !e.activity.is_active && emits_light(e));
        for e in selected.chain(fading) {
            let Some(light) = e.light else { continue };
            if !self.lights.push(light.to_point_light()) {
                break;
            }
        }
    }

    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> &mut InstanceBuffer {
        &mut self.instances
    }

    pub fn lights(&self) -> &[PointLight] {
        self.lights.as_slice()
    }

    /// Drop the lights and free the instance storage. Returns false when the
    /// buffers were already released.
    pub fn release(&mut self) -> bool {
        self.lights.clear();
        self.instances.release()
    }
}

fn emits_light(e: &Emitter) -> bool {
    e.is_lit() && e.light.is_some_and(|l| l.attached)
}
