//! Shared geometry and motion primitives
//!
//! Both the player and obstacles compose a `Motion` (position + velocity)
//! and expose an axis-aligned `Rect` through the `Movable` trait.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fixed-size playable area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if `pos` lies more than `margin` beyond any edge
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap on both axes (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Position and velocity integrated once per tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Motion {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Motion {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Apply acceleration, then move by the new velocity
    #[inline]
    pub fn integrate(&mut self, accel: Vec2) {
        self.vel += accel;
        self.pos += self.vel;
    }

    /// Clamp each velocity component to `[-max_speed, max_speed]`
    #[inline]
    pub fn clamp_speed(&mut self, max_speed: f32) {
        self.vel = self.vel.clamp(Vec2::splat(-max_speed), Vec2::splat(max_speed));
    }
}

/// Something that moves once per tick and occupies a rectangle
pub trait Movable {
    /// Per-tick control input
    type Input;
    /// What `advance` reports back
    type Output;

    /// Step one tick
    fn advance(&mut self, input: Self::Input) -> Self::Output;

    /// Bounding box as of the last successful step
    fn bounds(&self) -> Rect;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects() {
        let player = Rect::new(100.0, 100.0, 50.0, 50.0);
        assert!(player.intersects(&Rect::new(110.0, 110.0, 20.0, 20.0)));
        assert!(!player.intersects(&Rect::new(200.0, 200.0, 20.0, 20.0)));
        // Touching edges only
        assert!(!player.intersects(&Rect::new(150.0, 100.0, 20.0, 20.0)));
        // Overlap on one axis only
        assert!(!player.intersects(&Rect::new(110.0, 300.0, 20.0, 20.0)));
    }

    #[test]
    fn test_arena_is_outside() {
        let arena = Arena::new(500.0, 500.0);
        assert!(!arena.is_outside(Vec2::new(599.0, 0.0), 100.0));
        assert!(arena.is_outside(Vec2::new(601.0, 0.0), 100.0));
        assert!(arena.is_outside(Vec2::new(0.0, -100.5), 100.0));
        assert!(!arena.is_outside(Vec2::new(-100.0, 600.0), 100.0));
    }

    #[test]
    fn test_motion_integrate_and_clamp() {
        let mut motion = Motion::new(Vec2::ZERO, Vec2::new(5.0, 0.0));
        motion.integrate(Vec2::new(2.0, 0.0));
        assert_eq!(motion.vel.x, 7.0);
        assert_eq!(motion.pos.x, 7.0);

        motion.clamp_speed(6.0);
        assert_eq!(motion.vel.x, 6.0);
        // Position is not rewound
        assert_eq!(motion.pos.x, 7.0);
    }
}
