//! Session state and render snapshots
//!
//! A `Session` owns everything that changes during a run. Nothing outlives it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{LevelDecoder, LevelRow, LevelScript};
use super::motion::{Movable, Rect};
use super::obstacle::Obstacle;
use super::player::Player;
use super::spawner::SpawnScheduler;
use crate::config::SimulationConfig;

/// Wall colors, packed RGB. One is picked per released row.
pub const PALETTE: [u32; 6] = [0x2E86AB, 0xA23B72, 0xF18F01, 0xC73E1D, 0x3B1F2B, 0x44BBA4];

/// Player color, packed RGB
pub const PLAYER_COLOR: u32 = 0xCB6015;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Running,
    /// Final; no further ticks are simulated
    Terminated,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Player touched an obstacle
    Collision,
    /// External quit request
    Quit,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct Session {
    pub config: SimulationConfig,
    pub player: Player,
    /// Live obstacles in spawn order; mutated only by `tick`
    pub(crate) obstacles: Vec<Obstacle>,
    pub phase: SessionPhase,
    pub end_reason: Option<EndReason>,
    /// Ticks simulated while running
    pub time_ticks: u64,
    /// Wall-clock milliseconds simulated while running
    pub elapsed_ms: u64,
    scheduler: SpawnScheduler,
    decoder: LevelDecoder,
    rng: Pcg32,
}

impl Session {
    /// Start a run: player centered, no obstacles, level queued
    pub fn new(config: SimulationConfig, script: LevelScript) -> Self {
        log::info!(
            "Session start: arena {}x{}, {} level rows, spawn every {} ms, seed {}, both-pressed {}",
            config.arena_width,
            config.arena_height,
            script.len(),
            config.spawn_interval_ms,
            config.seed,
            config.simultaneous_press.as_str()
        );
        Self {
            player: Player::new(&config),
            obstacles: Vec::new(),
            phase: SessionPhase::Running,
            end_reason: None,
            time_ticks: 0,
            elapsed_ms: 0,
            scheduler: SpawnScheduler::new(config.spawn_interval_ms, script),
            decoder: LevelDecoder::new(&config),
            rng: Pcg32::seed_from_u64(config.seed),
            config,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == SessionPhase::Terminated
    }

    /// Live obstacles in spawn order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub(crate) fn scheduler_mut(&mut self) -> &mut SpawnScheduler {
        &mut self.scheduler
    }

    /// Every row released and every obstacle gone: the player survived the level
    pub fn is_cleared(&self) -> bool {
        self.scheduler.is_exhausted() && self.obstacles.is_empty()
    }

    /// Decode a row and append its obstacles; returns how many were added
    pub fn spawn_row(&mut self, row: &LevelRow) -> usize {
        let color = PALETTE[self.rng.random_range(0..PALETTE.len())];
        let batch = self.decoder.decode(row, color);
        let count = batch.len();
        self.obstacles.extend(batch);
        count
    }

    /// Move to the terminal phase (first reason wins)
    pub fn terminate(&mut self, reason: EndReason) {
        if self.is_terminated() {
            return;
        }
        self.phase = SessionPhase::Terminated;
        self.end_reason = Some(reason);
        log::info!(
            "Session over ({:?}) after {} ticks / {} ms",
            reason,
            self.time_ticks,
            self.elapsed_ms
        );
    }

    /// Render-relevant view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.bounds(),
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    rect: o.bounds(),
                    color: o.color,
                })
                .collect(),
            terminated: self.is_terminated(),
            end_reason: self.end_reason,
            ticks: self.time_ticks,
            elapsed_ms: self.elapsed_ms,
            rows_remaining: self.scheduler.remaining(),
        }
    }
}

/// One obstacle as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub rect: Rect,
    pub color: u32,
}

/// Per-tick output for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Rect,
    pub obstacles: Vec<ObstacleView>,
    pub terminated: bool,
    pub end_reason: Option<EndReason>,
    pub ticks: u64,
    /// Survival time so far
    pub elapsed_ms: u64,
    pub rows_remaining: usize,
}
