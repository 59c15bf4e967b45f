// Error types for the configuration and CLI boundary.
//
// System generation itself is infallible: every branch has a documented
// default. Errors only arise when loading or validating a `GenerationConfig`.

use thiserror::Error;

/// Errors raised while loading or validating a generation config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("threshold `{name}` must be a percentile in 0..=100, got {value}")]
    InvalidThreshold { name: &'static str, value: u32 },

    #[error("habitable zone inner edge {inner} AU must be positive and below outer edge {outer} AU")]
    InvalidHabitableZone { inner: f64, outer: f64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
