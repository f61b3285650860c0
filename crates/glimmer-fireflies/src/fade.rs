//! Bounded-rate light fades with slot handoff
//!
//! Each light moves toward its selector target by at most `fade_speed * dt`
//! per frame. An active light that is still fully dark waits until fewer
//! than K lights are lit before it starts, so lights fading out keep their
//! slot until they reach zero and the lit count never exceeds the budget.

use crate::pool::EmitterPool;

/// Progress closer than this to its target counts as settled
pub const FADE_EPSILON: f32 = 1e-4;

fn move_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step * delta.signum()
    }
}

/// Advance every emitter's fade and apply it to its light intensity.
///
/// Returns the number of lights lit after the tick.
pub fn tick(pool: &mut EmitterPool, dt: f32, fade_speed: f32) -> usize {
    let budget = pool.light_budget();
    let step = (fade_speed * dt).max(0.0);
    let (emitters, priority) = pool.fade_parts();

    // Everything already lit, or heading to dark, moves freely
    for e in emitters.iter_mut() {
        if e.awaiting_slot() {
            continue;
        }
        let target = if e.activity.is_active { 1.0 } else { 0.0 };
        e.activity.fade_progress = move_toward(e.activity.fade_progress, target, step).clamp(0.0, 1.0);
        e.apply_fade();
    }

    let mut lit = emitters.iter().filter(|e| e.is_lit()).count();
    if step <= 0.0 {
        return lit;
    }

    // Admit waiting lights nearest first while slots remain
    for id in priority {
        if lit >= budget {
            break;
        }
        let e = &mut emitters[id.index()];
        if !e.awaiting_slot() {
            continue;
        }
        e.activity.fade_progress = move_toward(0.0, 1.0, step);
        e.apply_fade();
        if e.is_lit() {
            lit += 1;
        }
    }
    lit
}

/// True when every fade has reached its target
pub fn is_settled(pool: &EmitterPool) -> bool {
    pool.emitters().iter().all(|e| {
        let target = if e.activity.is_active { 1.0 } else { 0.0 };
        (target - e.activity.fade_progress).abs() <= FADE_EPSILON
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::select::Selector;
    use glimmer_core::Vec3;
    use glimmer_render::Camera;

    fn pool_at(anchors: &[Vec3], budget: usize) -> EmitterPool {
        let mut pool = EmitterPool::from_anchors(anchors, &test_config(0, budget)).unwrap();
        pool.attach_lights();
        pool
    }

    #[test]
    fn move_toward_never_overshoots() {
        assert_eq!(move_toward(0.9, 1.0, 0.5), 1.0);
        assert_eq!(move_toward(0.1, 0.0, 0.5), 0.0);
        assert!((move_toward(0.5, 1.0, 0.1) - 0.6).abs() < 1e-6);
        assert!((move_toward(0.5, 0.0, 0.1) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn fade_in_is_rate_limited() {
        let mut pool = pool_at(&[Vec3::new(0.0, 0.0, 5.0)], 1);
        Selector::new().select(&mut pool, &Camera::new());

        let dt: f32 = 1.0 / 60.0;
        let mut previous = 0.0;
        for _ in 0..40 {
            tick(&mut pool, dt, 2.0);
            let p = pool.emitters()[0].activity.fade_progress;
            assert!(p - previous <= 2.0 * dt + 1e-5);
            assert!(p <= 1.0);
            previous = p;
        }
        assert_eq!(previous, 1.0);
        assert!(is_settled(&pool));
    }

    #[test]
    fn fade_out_is_monotonic_and_reaches_zero() {
        let fade_speed: f32 = 2.0;
        let mut pool = pool_at(&[Vec3::new(0.0, 0.0, 5.0)], 1);
        pool.emitters_mut()[0].activity.fade_progress = 1.0;
        pool.emitters_mut()[0].apply_fade();
        // Selector leaves it inactive: the camera faces away
        let away = Camera::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        Selector::new().select(&mut pool, &away);

        let dt: f32 = 1.0 / 60.0;
        // One extra frame absorbs float rounding in the step sum
        let frames = (1.0 / fade_speed / dt).ceil() as usize + 1;
        let mut previous = pool.emitters()[0].light.unwrap().intensity;
        for _ in 0..frames {
            tick(&mut pool, dt, fade_speed);
            let intensity = pool.emitters()[0].light.unwrap().intensity;
            assert!(intensity <= previous);
            previous = intensity;
        }
        assert_eq!(previous, 0.0);
    }

    #[test]
    fn zero_dt_changes_nothing() {
        let mut pool = pool_at(&[Vec3::new(0.0, 0.0, 5.0)], 1);
        Selector::new().select(&mut pool, &Camera::new());
        assert_eq!(tick(&mut pool, 0.0, 2.0), 0);
        assert_eq!(pool.emitters()[0].activity.fade_progress, 0.0);
    }

    #[test]
    fn incoming_light_waits_for_outgoing_slot() {
        // Budget 1: emitter 0 is lit, then the camera turns to emitter 1
        let anchors = [Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -5.0)];
        let mut pool = pool_at(&anchors, 1);
        let mut selector = Selector::new();
        selector.select(&mut pool, &Camera::new());
        for _ in 0..60 {
            tick(&mut pool, 1.0 / 60.0, 2.0);
        }
        assert_eq!(pool.emitters()[0].activity.fade_progress, 1.0);

        let turned = Camera::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut saw_handoff = false;
        for _ in 0..90 {
            selector.select(&mut pool, &turned);
            let lit = tick(&mut pool, 1.0 / 60.0, 2.0);
            assert!(lit <= 1);
            assert_eq!(lit, pool.lit_count());
            if pool.emitters()[1].is_lit() {
                saw_handoff = true;
                assert!(!pool.emitters()[0].is_lit());
            }
        }
        assert!(saw_handoff);
        assert_eq!(pool.emitters()[1].activity.fade_progress, 1.0);
    }

    #[test]
    fn waiting_lights_admitted_nearest_first() {
        let anchors = [
            Vec3::new(0.0, 0.0, 9.0),
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 6.0),
        ];
        let mut pool = pool_at(&anchors, 3);
        Selector::new().select(&mut pool, &Camera::new());
        assert_eq!(tick(&mut pool, 0.1, 1.0), 3);
        assert!(pool.emitters().iter().all(|e| e.is_lit()));
    }
}
