//! Wall segments travelling across the arena at constant velocity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Arena, Motion, Movable, Rect};

/// A rectangular hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub motion: Motion,
    pub size: Vec2,
    /// Packed RGB, opaque to the simulation
    pub color: u32,
    arena: Arena,
    margin: f32,
    bounds: Rect,
}

impl Obstacle {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2, color: u32, arena: Arena, margin: f32) -> Self {
        Self {
            motion: Motion::new(pos, vel),
            size,
            color,
            arena,
            margin,
            bounds: Rect::from_pos_size(pos, size),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.motion.pos
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.motion.vel
    }

    /// Move one tick. `None` means the obstacle has left the arena and must
    /// be discarded; its bounding box is left stale.
    pub fn update(&mut self) -> Option<Vec2> {
        self.motion.integrate(Vec2::ZERO);

        if self.arena.is_outside(self.motion.pos, self.margin) {
            return None;
        }

        self.bounds = Rect::from_pos_size(self.motion.pos, self.size);
        Some(self.motion.pos)
    }
}

impl Movable for Obstacle {
    type Input = ();
    type Output = Option<Vec2>;

    fn advance(&mut self, _input: ()) -> Option<Vec2> {
        self.update()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
