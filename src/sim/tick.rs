//! Fixed-step simulation tick
//!
//! One call per rendered frame. Order within a tick: player, obstacles
//! (with pruning), spawner, collision, phase transition, snapshot.

use super::collision;
use super::player::Steering;
use super::state::{EndReason, Session, Snapshot};
use crate::input::TickInput;

/// Advance the session by one tick and return what to draw
pub fn tick(session: &mut Session, input: &TickInput) -> Snapshot {
    if session.is_terminated() {
        return session.snapshot();
    }

    if input.quit {
        session.terminate(EndReason::Quit);
        return session.snapshot();
    }

    session.time_ticks += 1;
    session.elapsed_ms = session.elapsed_ms.saturating_add(input.elapsed_ms);

    session.player.update(Steering::new(input.left, input.right));

    // Drop obstacles that left the arena, keeping spawn order
    let before = session.obstacles.len();
    session.obstacles.retain_mut(|o| o.update().is_some());
    let pruned = before - session.obstacles.len();
    if pruned > 0 {
        log::debug!("Pruned {} obstacles at tick {}", pruned, session.time_ticks);
    }

    if let Some(row) = session.scheduler_mut().poll(input.elapsed_ms) {
        let spawned = session.spawn_row(&row);
        log::info!(
            "Spawned {:?} wall ({} segments) at {} ms, {} rows left",
            row.direction,
            spawned,
            session.elapsed_ms,
            session.scheduler().remaining()
        );
    }

    if let Some(index) = collision::first_collision(&session.player, &session.obstacles) {
        log::debug!(
            "Player {:?} hit obstacle {:?}",
            session.player.pos(),
            session.obstacles[index].pos()
        );
        session.terminate(EndReason::Collision);
    }

    session.snapshot()
}
