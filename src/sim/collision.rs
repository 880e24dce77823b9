//! Player vs. obstacle collision detection
//!
//! Plain AABB overlap. Any hit ends the session, so the scan stops at the
//! first one and reports which obstacle it was.

use super::motion::Movable;
use super::obstacle::Obstacle;

/// Index of the first obstacle overlapping `entity`
pub fn first_collision<M: Movable>(entity: &M, obstacles: &[Obstacle]) -> Option<usize> {
    let bounds = entity.bounds();
    obstacles.iter().position(|o| bounds.intersects(&o.bounds()))
}

/// True if `entity` overlaps any obstacle
pub fn check<M: Movable>(entity: &M, obstacles: &[Obstacle]) -> bool {
    first_collision(entity, obstacles).is_some()
}
