//! Dynamic point lights handed to the renderer each frame

use bytemuck::{Pod, Zeroable};

/// Point lights the forward shader's uniform block can hold. Light budgets
/// above this are a configuration error.
pub const MAX_POINT_LIGHTS: usize = 16;

/// A point light with range-based attenuation, laid out like the WGSL struct.
/// 32 bytes (2 x vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PointLight {
    pub position: [f32; 3],
    pub range: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            range: 10.0,
            color: [1.0, 1.0, 1.0],
            intensity: 0.0,
        }
    }
}

/// The bounded list of lights emitted for one frame.
///
/// Capacity is fixed at creation; pushes past it are refused.
#[derive(Debug)]
pub struct LightList {
    lights: Vec<PointLight>,
    capacity: usize,
}

impl LightList {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_POINT_LIGHTS);
        Self {
            lights: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    /// Add a light. Returns false when the list is already full.
    pub fn push(&mut self, light: PointLight) -> bool {
        if self.lights.len() >= self.capacity {
            return false;
        }
        self.lights.push(light);
        true
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn as_slice(&self) -> &[PointLight] {
        &self.lights
    }

    /// Raw bytes for a uniform/storage buffer write
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lights)
    }
}
