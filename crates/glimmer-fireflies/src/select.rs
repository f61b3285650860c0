//! Frustum visibility and distance ranking for the light budget

use glimmer_core::EmitterId;
use glimmer_render::Camera;

use crate::pool::EmitterPool;

/// Picks which emitters may hold a dynamic light this frame.
///
/// Keeps its candidate scratch list between frames so selection does not
/// allocate once the pool has been seen at full visibility.
#[derive(Default)]
pub struct Selector {
    candidates: Vec<(EmitterId, f32)>,
    visible: usize,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitters that passed the frustum test in the last selection, lit or
    /// not
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// Rebuild the active set from the camera. Returns the new set, nearest
    /// first; equal distances keep pool order.
    pub fn select<'p>(&mut self, pool: &'p mut EmitterPool, camera: &Camera) -> &'p [EmitterId] {
        let budget = pool.light_budget();
        let radius = pool.cull_radius();
        let (emitters, active) = pool.selection_parts();

        active.clear();
        self.candidates.clear();
        for e in emitters.iter_mut() {
            e.activity.is_active = false;
        }

        let frustum = camera.frustum();
        let mut visible = 0;
        for e in emitters.iter() {
            if !frustum.intersects_sphere(e.animated_position, radius) {
                continue;
            }
            visible += 1;
            if budget == 0 || e.light.is_none() {
                continue;
            }
            let dist_sq = (e.animated_position - camera.position).length_squared();
            self.candidates.push((e.id, dist_sq));
        }
        self.visible = visible;

        // Stable sort: ties stay in pool index order
        self.candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        for &(id, _) in self.candidates.iter().take(budget) {
            emitters[id.index()].activity.is_active = true;
            active.push(id);
        }
        active
    }
}
