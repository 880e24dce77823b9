//! Setup-time errors
//!
//! The tick itself never fails; everything here is raised while loading or
//! validating configuration and level scripts, before a session starts.

use thiserror::Error;

/// Invalid or unreadable simulation configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("damping must be within [0, 1], got {0}")]
    DampingOutOfRange(f32),
    #[error("spawn interval must be non-zero")]
    ZeroSpawnInterval,
    #[error("out_of_bounds_margin {margin} is inside spawn_offset {offset}; walls would be discarded on spawn")]
    MarginInsideSpawn { margin: f32, offset: f32 },
}

/// Malformed level script
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level script: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse level script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("row {row}: no cells")]
    EmptyRow { row: usize },
    #[error("row {row}: unknown direction type {value:?} (expected 0-3)")]
    UnknownDirection { row: usize, value: String },
    #[error("row {row}: invalid cell {value:?} (expected 0 or 1)")]
    InvalidFlag { row: usize, value: String },
}
