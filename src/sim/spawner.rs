//! Timed level-row release
//!
//! Spawn cadence is wall-clock based and independent of the tick rate: each
//! tick reports how many real milliseconds passed and the scheduler fires at
//! most once per tick when a full interval has accumulated.

use std::collections::VecDeque;

use super::level::{LevelRow, LevelScript};

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    interval_ms: u64,
    /// Milliseconds accumulated toward the next firing
    accum_ms: u64,
    queue: VecDeque<LevelRow>,
    firings: u32,
}

impl SpawnScheduler {
    pub fn new(interval_ms: u64, script: LevelScript) -> Self {
        Self {
            interval_ms,
            accum_ms: 0,
            queue: script.rows.into(),
            firings: 0,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Rows not yet released
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of times the timer has fired (including no-op firings)
    pub fn firings(&self) -> u32 {
        self.firings
    }

    /// Advance the timer; returns the released row if it fired with rows left
    pub fn poll(&mut self, elapsed_ms: u64) -> Option<LevelRow> {
        self.accum_ms = self.accum_ms.saturating_add(elapsed_ms);
        if self.accum_ms < self.interval_ms {
            return None;
        }
        self.accum_ms -= self.interval_ms;
        self.fire()
    }

    /// Fire now: release the oldest row, or nothing once the script is spent
    pub fn fire(&mut self) -> Option<LevelRow> {
        self.firings += 1;
        self.queue.pop_front()
    }
}
