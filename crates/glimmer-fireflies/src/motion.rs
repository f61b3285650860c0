//! Layered periodic motion around each emitter's anchor
//!
//! Positions are a pure function of animation time. Nothing integrates, so
//! the field cannot drift no matter how long it runs.

use glimmer_core::Vec3;

use crate::config::MovementConfig;
use crate::emitter::Phase;
use crate::pool::EmitterPool;

/// Ratio between the wander loop and the slower swell of its reach
const REACH_RATE: f64 = 0.37;

/// Horizontal wander: a loop whose reach swells between 0 and `wander_radius`.
/// Its length never exceeds `wander_radius`.
pub fn wander_offset(time: f64, phase: &Phase, movement: &MovementConfig) -> Vec3 {
    let speed = movement.wander_speed as f64;
    let angle = time * speed + phase.wander as f64;
    let swell = (time * speed * REACH_RATE + phase.reach as f64).sin();
    let reach = movement.wander_radius * (0.5 + 0.5 * swell as f32);
    Vec3::new(reach * angle.cos() as f32, 0.0, reach * angle.sin() as f32)
}

/// Float bob: independent sinusoid per axis, bounded by `float_amplitude`
pub fn float_offset(time: f64, phase: &Phase, movement: &MovementConfig) -> Vec3 {
    let t = time * movement.speed as f64 + phase.float as f64;
    let amp = &movement.float_amplitude;
    Vec3::new(
        amp.x * (t * 0.7).sin() as f32,
        amp.y * t.sin() as f32,
        amp.z * (t * 0.9).cos() as f32,
    )
}

/// Recompute every animated position for `animation_time` and carry each
/// light along with its body.
pub fn advance(pool: &mut EmitterPool, animation_time: f64, movement: &MovementConfig) {
    for e in pool.emitters_mut() {
        let offset = wander_offset(animation_time, &e.phase, movement)
            + float_offset(animation_time, &e.phase, movement);
        e.animated_position = e.base_position + offset;
        if let Some(light) = e.light.as_mut() {
            light.position = e.animated_position;
        }
    }
}
