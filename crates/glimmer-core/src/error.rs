//! Error types for Glimmer

use thiserror::Error;

/// The main error type for Glimmer operations
#[derive(Debug, Error)]
pub enum GlimmerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown preset: {name} (available: {available:?})")]
    UnknownPreset {
        name: String,
        available: Vec<String>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

impl GlimmerError {
    /// Shorthand for a range violation on a named config field
    pub fn out_of_range(field: &str, min: f64, max: f64, value: f64) -> Self {
        GlimmerError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        }
    }
}

/// Result type alias for Glimmer operations
pub type Result<T> = std::result::Result<T, GlimmerError>;

impl From<toml::de::Error> for GlimmerError {
    fn from(err: toml::de::Error) -> Self {
        GlimmerError::TomlParseError(err.to_string())
    }
}
