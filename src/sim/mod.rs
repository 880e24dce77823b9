//! Fixed-tick simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per rendered frame, no sub-tick integration
//! - Spawn timing from caller-supplied elapsed milliseconds only
//! - Seeded RNG only
//! - No rendering, capture, or file I/O during a tick

pub mod collision;
pub mod level;
pub mod motion;
pub mod obstacle;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{check as check_collision, first_collision};
pub use level::{Direction, LevelDecoder, LevelRow, LevelScript};
pub use motion::{Arena, Motion, Movable, Rect};
pub use obstacle::Obstacle;
pub use player::{Player, Steering};
pub use spawner::SpawnScheduler;
pub use state::{EndReason, ObstacleView, PALETTE, PLAYER_COLOR, Session, SessionPhase, Snapshot};
pub use tick::tick;
