//! Glimmer Render - renderer-facing data for the ambient-light system
//!
//! Nothing here talks to a GPU directly. The host renderer consumes:
//! - `Camera`: view/projection matrices, read once per frame
//! - `Frustum`: six-plane culling volume built from a camera
//! - `InstanceBuffer`: packed `GlowInstance` data for one instanced draw
//! - `LightList`: the bounded set of dynamic `PointLight`s for this frame

pub mod camera;
pub mod frustum;
pub mod instance;
pub mod light;

pub use camera::Camera;
pub use frustum::{Frustum, Plane};
pub use instance::{GlowInstance, InstanceBuffer};
pub use light::{LightList, PointLight, MAX_POINT_LIGHTS};
