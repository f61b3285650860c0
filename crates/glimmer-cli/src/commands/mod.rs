//! CLI command implementations

pub mod presets;
pub mod simulate;
pub mod validate;
