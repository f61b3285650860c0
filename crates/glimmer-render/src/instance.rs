//! Per-emitter instance data packed for a single instanced draw

use bytemuck::{Pod, Zeroable};
use log::debug;

/// GPU instance data for one glow body, matching WGSL `GlowInstance`.
/// 32 bytes, 16-byte aligned (2 rows of vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GlowInstance {
    /// World position + uniform scale packed into vec4
    pub pos_scale: [f32; 4], // xyz = position, w = scale
    /// Emissive color with alpha
    pub color: [f32; 4], // rgba
}

impl GlowInstance {
    pub fn new(position: [f32; 3], scale: f32, color: [f32; 4]) -> Self {
        Self {
            pos_scale: [position[0], position[1], position[2], scale],
            color,
        }
    }

    pub fn position(&self) -> [f32; 3] {
        [self.pos_scale[0], self.pos_scale[1], self.pos_scale[2]]
    }
}

/// Fixed-length staging buffer shared by every emitter.
///
/// The renderer copies it to the GPU when `take_dirty` reports a change,
/// then issues one instanced draw of `len()` bodies.
#[derive(Debug)]
pub struct InstanceBuffer {
    instances: Vec<GlowInstance>,
    dirty: bool,
    released: bool,
}

impl InstanceBuffer {
    /// One zeroed slot per emitter. The length never changes afterwards.
    pub fn new(len: usize) -> Self {
        Self {
            instances: vec![GlowInstance::zeroed(); len],
            dirty: true,
            released: false,
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Overwrite one slot. Writes to a released buffer or past the end are
    /// dropped.
    pub fn write(&mut self, index: usize, instance: GlowInstance) {
        if self.released {
            return;
        }
        if let Some(slot) = self.instances.get_mut(index) {
            *slot = instance;
        }
    }

    pub fn mark_dirty(&mut self) {
        if !self.released {
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the dirty flag. Returns true when the renderer must re-upload.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn as_slice(&self) -> &[GlowInstance] {
        &self.instances
    }

    /// Raw bytes for the vertex/storage buffer write
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Free the backing storage. Returns false if it was already released.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        debug!("Releasing instance buffer ({} slots)", self.instances.len());
        self.instances = Vec::new();
        self.dirty = false;
        self.released = true;
        true
    }
}
