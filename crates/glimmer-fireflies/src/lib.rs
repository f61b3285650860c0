//! Glimmer Fireflies - camera-aware instanced ambient lights
//!
//! Hundreds of glowing emitters share a small dynamic-light budget (K):
//! - Emitters anchored on terrain, animated by bounded periodic motion
//! - Frustum test plus distance ranking picks the K nearest visible each frame
//! - Bounded-rate fades with slot handoff, so lights never pop
//! - Every body packed into one instance buffer for a single draw call
//!
//! Per frame, in order: integrate → select → fade → upload.

pub mod batch;
pub mod config;
pub mod device;
pub mod emitter;
pub mod fade;
pub mod height;
pub mod motion;
pub mod pool;
pub mod presets;
pub mod rand;
pub mod select;

use std::time::{Duration, Instant};

use glimmer_core::{Result, Vec3};
use glimmer_render::{Camera, InstanceBuffer, PointLight};
use glimmer_runtime::{FrameContext, RuntimeSystem};
use log::{debug, info};

pub use batch::BatchRenderer;
pub use config::{FireflyConfig, FloatAmplitude, HeightRange, MovementConfig};
pub use device::{DeviceProfile, DeviceTier};
pub use emitter::{ActivityState, Emitter, EmitterLight};
pub use height::{FlatGround, HeightQuery};
pub use pool::EmitterPool;
pub use select::Selector;

/// What one update did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Emitters inside the frustum
    pub visible: usize,
    /// Emitters selected for a light
    pub active: usize,
    /// Lights with nonzero intensity after the fade
    pub lit: usize,
    /// Wall-clock cost of the update
    pub elapsed: Duration,
}

/// Live state of an initialized field
struct Field {
    pool: EmitterPool,
    selector: Selector,
    batch: BatchRenderer,
    movement: MovementConfig,
    fade_speed: f32,
    /// Sum of the deltas fed to `update`
    animation_time: f64,
}

enum Lifecycle {
    Uninitialized,
    Running(Box<Field>),
    Disposed,
}

/// The firefly subsystem for one environment activation
pub struct FireflySystem {
    state: Lifecycle,
    last_stats: FrameStats,
}

impl FireflySystem {
    pub fn new() -> Self {
        Self {
            state: Lifecycle::Uninitialized,
            last_stats: FrameStats::default(),
        }
    }

    /// Build the pool over the terrain and attach its lights. Initializing
    /// a running system disposes the previous field first.
    pub fn initialize<H>(&mut self, config: &FireflyConfig, height: &H) -> Result<()>
    where
        H: HeightQuery + ?Sized,
    {
        let pool = EmitterPool::initialize(config, height)?;
        self.start(pool, config);
        Ok(())
    }

    /// Like `initialize`, with one emitter per hand-placed anchor
    pub fn initialize_with_anchors(&mut self, config: &FireflyConfig, anchors: &[Vec3]) -> Result<()> {
        let pool = EmitterPool::from_anchors(anchors, config)?;
        self.start(pool, config);
        Ok(())
    }

    fn start(&mut self, mut pool: EmitterPool, config: &FireflyConfig) {
        if self.is_running() {
            info!("Re-initializing fireflies; disposing the previous field");
            self.dispose();
        }
        pool.attach_lights();
        motion::advance(&mut pool, 0.0, &config.movement);
        let batch = BatchRenderer::new(&pool, config.size, config.min_brightness);
        self.state = Lifecycle::Running(Box::new(Field {
            pool,
            selector: Selector::new(),
            batch,
            movement: config.movement,
            fade_speed: config.fade_speed,
            animation_time: 0.0,
        }));
        self.last_stats = FrameStats::default();
    }

    /// Advance one frame. A no-op before `initialize` and after `dispose`.
    /// Negative or non-finite `dt` counts as zero.
    pub fn update(&mut self, dt: f32, camera: &Camera) -> FrameStats {
        let Lifecycle::Running(field) = &mut self.state else {
            debug!("Firefly update ignored: system is not running");
            return FrameStats::default();
        };
        let started = Instant::now();
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        field.animation_time += dt as f64;
        motion::advance(&mut field.pool, field.animation_time, &field.movement);
        let active = field.selector.select(&mut field.pool, camera).len();
        let lit = fade::tick(&mut field.pool, dt, field.fade_speed);
        field.batch.upload(&field.pool);

        let stats = FrameStats {
            visible: field.selector.visible_count(),
            active,
            lit,
            elapsed: started.elapsed(),
        };
        self.last_stats = stats;
        stats
    }

    /// Detach every light and release the instance buffer. Safe to call
    /// before `initialize` and more than once; returns true only when
    /// something was released.
    pub fn dispose(&mut self) -> bool {
        match std::mem::replace(&mut self.state, Lifecycle::Disposed) {
            Lifecycle::Running(mut field) => {
                field.pool.detach_lights();
                field.batch.release();
                info!("Disposed firefly field ({} emitters)", field.pool.len());
                true
            }
            Lifecycle::Uninitialized => {
                self.state = Lifecycle::Uninitialized;
                debug!("Firefly dispose before initialize: nothing to release");
                false
            }
            Lifecycle::Disposed => false,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, Lifecycle::Running(_))
    }

    fn field(&self) -> Option<&Field> {
        match &self.state {
            Lifecycle::Running(field) => Some(field),
            _ => None,
        }
    }

    pub fn pool(&self) -> Option<&EmitterPool> {
        self.field().map(|f| &f.pool)
    }

    pub fn instances(&self) -> Option<&InstanceBuffer> {
        self.field().map(|f| f.batch.instances())
    }

    /// Renderer access to consume the dirty flag after uploading
    pub fn instances_mut(&mut self) -> Option<&mut InstanceBuffer> {
        match &mut self.state {
            Lifecycle::Running(field) => Some(field.batch.instances_mut()),
            _ => None,
        }
    }

    /// Point lights to draw this frame; empty unless running
    pub fn lights(&self) -> &[PointLight] {
        self.field().map(|f| f.batch.lights()).unwrap_or(&[])
    }

    pub fn animation_time(&self) -> f64 {
        self.field().map(|f| f.animation_time).unwrap_or(0.0)
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Every fade has reached its target
    pub fn is_settled(&self) -> bool {
        self.pool().map(fade::is_settled).unwrap_or(true)
    }
}

impl Default for FireflySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem for FireflySystem {
    fn update(&mut self, frame: &FrameContext<'_>) -> Result<()> {
        FireflySystem::update(self, frame.dt, frame.camera);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.dispose();
        Ok(())
    }

    fn name(&self) -> &str {
        "fireflies"
    }
}
