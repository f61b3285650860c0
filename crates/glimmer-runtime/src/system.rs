//! Runtime system trait

use std::any::Any;

use glimmer_core::Result;
use glimmer_render::Camera;

/// Read-only inputs every system receives once per frame
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    /// Seconds since the previous frame (already clamped, zero while paused)
    pub dt: f32,
    /// The camera the frame is rendered from
    pub camera: &'a Camera,
}

/// Type-erased access to a registered system. Implemented for every
/// `'static` type, so systems never write it by hand.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A system that can be ticked by the frame loop
///
/// Systems are updated in registration order. Initialization takes
/// system-specific inputs, so it happens before registration.
pub trait RuntimeSystem: AsAny {
    /// Called once per frame
    fn update(&mut self, frame: &FrameContext<'_>) -> Result<()>;

    /// Called when the owning environment is torn down. Must tolerate
    /// repeated calls.
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
