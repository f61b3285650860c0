//! Glimmer Core - Foundational types for the Glimmer crates
//!
//! This crate provides the core types that all other Glimmer crates depend on:
//! - `EmitterId` - Stable per-pool emitter identifiers
//! - `Vec3`, `Color` - Spatial and color types
//! - Column-major 4x4 matrix helpers
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{GlimmerError, Result};
pub use id::EmitterId;
pub use types::{mat4_inverse, mat4_mul, Color, Mat4, Vec3};
