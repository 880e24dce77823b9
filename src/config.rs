//! Simulation configuration
//!
//! Every physics and arena parameter for one session, constructed once and
//! handed to `Session::new`. Loaded from JSON; missing fields fall back to
//! the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::input::ClassMap;
use crate::sim::Arena;

/// How the player responds when left and right are held on the same tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SimultaneousPress {
    /// Left takes precedence (accelerate left)
    #[default]
    LeftWins,
    /// Treated as no input (damp velocity)
    Neutral,
}

impl SimultaneousPress {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimultaneousPress::LeftWins => "left_wins",
            SimultaneousPress::Neutral => "neutral",
        }
    }
}

/// Session parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Acceleration magnitude per tick while steering
    pub acceleration: f32,
    /// Speed limit, units per tick
    pub max_speed: f32,
    /// Velocity multiplier on ticks without steering
    pub damping: f32,
    pub simultaneous_press: SimultaneousPress,

    // === Obstacles ===
    /// Constant obstacle speed, units per tick
    pub obstacle_speed: f32,
    pub wall_thickness: f32,
    pub spawn_offset: f32,
    pub out_of_bounds_margin: f32,

    // === Spawning ===
    /// Wall-clock milliseconds between level rows
    pub spawn_interval_ms: u64,
    /// Seed for obstacle color selection
    pub seed: u64,

    // === Classifier ===
    /// Classifier output index -> gesture label
    pub class_map: ClassMap,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            acceleration: PLAYER_ACCEL,
            max_speed: PLAYER_MAX_SPEED,
            damping: PLAYER_DAMPING,
            simultaneous_press: SimultaneousPress::LeftWins,

            obstacle_speed: OBSTACLE_SPEED,
            wall_thickness: WALL_THICKNESS,
            spawn_offset: SPAWN_OFFSET,
            out_of_bounds_margin: OUT_OF_BOUNDS_MARGIN,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            seed: 0,

            class_map: ClassMap::default(),
        }
    }
}

impl SimulationConfig {
    /// Arena bounds for this configuration
    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("wall_thickness", self.wall_thickness),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("acceleration", self.acceleration),
            ("max_speed", self.max_speed),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_offset", self.spawn_offset),
            ("out_of_bounds_margin", self.out_of_bounds_margin),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::DampingOutOfRange(self.damping));
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.out_of_bounds_margin < self.spawn_offset {
            return Err(ConfigError::MarginInsideSpawn {
                margin: self.out_of_bounds_margin,
                offset: self.spawn_offset,
            });
        }

        // Degenerate but defined: both wall clamps fire every tick
        if self.player_width >= self.arena_width {
            log::warn!(
                "player width {} does not fit arena width {}",
                self.player_width,
                self.arena_width
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_interval_ms, 3000);
        assert_eq!(config.max_speed, 6.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            SimulationConfig::from_json_str(r#"{"arena_width": 800, "simultaneous_press": "neutral"}"#)
                .unwrap();
        assert_eq!(config.arena_width, 800.0);
        assert_eq!(config.arena_height, ARENA_HEIGHT);
        assert_eq!(config.simultaneous_press, SimultaneousPress::Neutral);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SimulationConfig::from_json_str(r#"{"arena_width": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "arena_width", .. }));

        let err = SimulationConfig::from_json_str(r#"{"damping": 1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::DampingOutOfRange(_)));

        let err = SimulationConfig::from_json_str(r#"{"max_speed": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Negative { field: "max_speed", .. }));

        let err = SimulationConfig::from_json_str(r#"{"spawn_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroSpawnInterval));
    }

    #[test]
    fn test_rejects_margin_inside_spawn_offset() {
        let err = SimulationConfig::from_json_str(r#"{"out_of_bounds_margin": 10}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MarginInsideSpawn { margin, offset } if margin == 10.0 && offset == SPAWN_OFFSET
        ));

        // Equal is enough for a wall to survive its first step
        let config = SimulationConfig::from_json_str(r#"{"out_of_bounds_margin": 50}"#).unwrap();
        assert_eq!(config.out_of_bounds_margin, config.spawn_offset);
    }

    #[test]
    fn test_malformed_json() {
        let err = SimulationConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_demo_config_parses() {
        let config = SimulationConfig::from_json_str(include_str!("../demos/config.json")).unwrap();
        assert_eq!(config.seed, 1234);
        assert_eq!(config.class_map, ClassMap::default());
    }
}
