//! Wall Dodge headless runner
//!
//! Drives a session at the fixed tick rate with a simple autopilot in place of
//! the keyboard/gesture classifier, then prints the final snapshot as JSON.
//!
//! Usage: `wall-dodge [config.json] [level.json|level.csv]`

use std::error::Error;

use wall_dodge::consts::{TICK_MS, TICK_RATE_HZ};
use wall_dodge::sim::{LevelScript, Session, Snapshot, tick};
use wall_dodge::{SimulationConfig, TickInput};

/// Played when no level file is given
const DEMO_LEVEL: &str = "\
# direction,cells...
0,1,1,0,1,1
0,0,1,1,1,1
1,1,1,1,0,1
0,1,0,1,1,1
2,1,1,0,1,1
0,1,1,1,1,0
";

/// Hard stop for the demo (two minutes of play)
const MAX_TICKS: u64 = 120 * TICK_RATE_HZ as u64;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Wall Dodge (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let script = match args.next() {
        Some(path) => LevelScript::load(path)?,
        None => LevelScript::from_table_str(DEMO_LEVEL)?,
    };

    let arena_width = config.arena_width;
    let mut session = Session::new(config, script);
    let mut snapshot = session.snapshot();

    while !snapshot.terminated {
        if session.time_ticks >= MAX_TICKS || (session.is_cleared() && session.time_ticks > 0) {
            tick(&mut session, &TickInput::quit());
            snapshot = session.snapshot();
            break;
        }
        let input = autopilot(&snapshot, arena_width);
        snapshot = tick(&mut session, &input);
    }

    log::info!(
        "Survived {:.1} s ({} ticks), {} rows unspawned",
        snapshot.elapsed_ms as f64 / 1000.0,
        snapshot.ticks,
        snapshot.rows_remaining
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Steer away from the nearest obstacle closing in on the player's lane
fn autopilot(snapshot: &Snapshot, arena_width: f32) -> TickInput {
    const LOOKAHEAD: f32 = 150.0;

    let player = snapshot.player;
    let center = player.x + player.width / 2.0;

    let threat = snapshot
        .obstacles
        .iter()
        .map(|o| o.rect)
        .filter(|r| r.x < player.right() && player.x < r.right())
        .filter(|r| r.bottom() > player.y - LOOKAHEAD && r.y < player.bottom() + LOOKAHEAD)
        .min_by(|a, b| {
            let da = (a.y - player.y).abs();
            let db = (b.y - player.y).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(threat) = threat else {
        return TickInput::keys(false, false, TICK_MS);
    };

    // Head for whichever side of the threat has more room
    let room_left = threat.x;
    let room_right = arena_width - threat.right();
    let go_left = if room_left >= player.width && room_right >= player.width {
        center < threat.x + threat.width / 2.0
    } else {
        room_left > room_right
    };
    TickInput::keys(go_left, !go_left, TICK_MS)
}
