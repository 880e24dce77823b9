//! Wall Dodge - dodge falling walls with two discrete controls
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (motion, spawning, collisions, session state)
//! - `config`: Data-driven physics and arena parameters
//! - `input`: Mapping keyboard/classifier output to per-tick input

pub mod config;
pub mod error;
pub mod input;
pub mod sim;

pub use config::{SimulationConfig, SimultaneousPress};
pub use error::{ConfigError, LevelError};
pub use input::{ClassMap, Gesture, TickInput};

/// Game configuration constants (defaults for `SimulationConfig`)
pub mod consts {
    /// Simulation rate used by the headless runner (one tick per rendered frame)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Wall-clock milliseconds per tick at `TICK_RATE_HZ`
    pub const TICK_MS: u64 = 1000 / TICK_RATE_HZ as u64;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 500.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Acceleration per tick while a direction is held
    pub const PLAYER_ACCEL: f32 = 2.0;
    /// Speed limit (units per tick)
    pub const PLAYER_MAX_SPEED: f32 = 6.0;
    /// Velocity multiplier applied on ticks with no steering
    pub const PLAYER_DAMPING: f32 = 0.9;

    /// Obstacle defaults
    pub const OBSTACLE_SPEED: f32 = 3.0;
    /// Thickness of a wall along its direction of travel
    pub const WALL_THICKNESS: f32 = 50.0;
    /// How far outside the arena new walls appear
    pub const SPAWN_OFFSET: f32 = 50.0;
    /// Distance beyond the arena edges at which obstacles are discarded
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 100.0;

    /// Milliseconds between level row spawns
    pub const SPAWN_INTERVAL_MS: u64 = 3000;
}
