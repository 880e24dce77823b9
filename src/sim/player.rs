//! The player-controlled block
//!
//! Moves along the horizontal axis only. Holding a direction accelerates,
//! releasing lets velocity decay; arena walls stop it dead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Arena, Motion, Movable, Rect};
use crate::config::{SimulationConfig, SimultaneousPress};

/// Left/right signals for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
}

impl Steering {
    pub fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub motion: Motion,
    pub size: Vec2,
    /// Acceleration magnitude per tick
    pub accel: f32,
    pub max_speed: f32,
    pub damping: f32,
    pub simultaneous_press: SimultaneousPress,
    arena: Arena,
    bounds: Rect,
}

impl Player {
    /// Player centered in the arena, at rest
    pub fn new(config: &SimulationConfig) -> Self {
        let arena = config.arena();
        let size = Vec2::new(config.player_width, config.player_height);
        let pos = ((Vec2::new(arena.width, arena.height) - size) / 2.0).floor();
        Self::at(pos, config)
    }

    /// Player at an explicit position, at rest
    pub fn at(pos: Vec2, config: &SimulationConfig) -> Self {
        let size = Vec2::new(config.player_width, config.player_height);
        Self {
            motion: Motion::new(pos, Vec2::ZERO),
            size,
            accel: config.acceleration,
            max_speed: config.max_speed,
            damping: config.damping,
            simultaneous_press: config.simultaneous_press,
            arena: config.arena(),
            bounds: Rect::from_pos_size(pos, size),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.motion.pos
    }

    /// Horizontal velocity
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.motion.vel.x
    }

    /// Step one tick and return the new position
    pub fn update(&mut self, steering: Steering) -> Vec2 {
        let accel = match (steering.left, steering.right) {
            (true, false) => -self.accel,
            (false, true) => self.accel,
            (true, true) if self.simultaneous_press == SimultaneousPress::LeftWins => -self.accel,
            _ => {
                self.motion.vel.x *= self.damping;
                0.0
            }
        };

        self.motion.integrate(Vec2::new(accel, 0.0));

        // Walls stop the player dead
        if self.motion.pos.x <= 0.0 {
            self.motion.pos.x = 0.0;
            self.motion.vel.x = 0.0;
        }
        if self.motion.pos.x + self.size.x >= self.arena.width {
            self.motion.pos.x = self.arena.width - self.size.x;
            self.motion.vel.x = 0.0;
        }

        self.motion.clamp_speed(self.max_speed);
        self.bounds = Rect::from_pos_size(self.motion.pos, self.size);
        self.motion.pos
    }
}

impl Movable for Player {
    type Input = Steering;
    type Output = Vec2;

    fn advance(&mut self, input: Steering) -> Vec2 {
        self.update(input)
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
