//! Level scripts and the wall decoder
//!
//! A level is an ordered list of rows. Each row is a strip of cells (1 = wall,
//! 0 = gap) plus the side of the arena the wall enters from. Decoding a row
//! merges contiguous filled cells into single obstacles.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::Arena;
use super::obstacle::Obstacle;
use crate::config::SimulationConfig;
use crate::error::LevelError;

/// Side a wall enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Falls from above (type 0)
    FromTop,
    /// Rises from below (type 1)
    FromBottom,
    /// Enters from the left edge (type 2)
    FromLeft,
    /// Enters from the right edge (type 3)
    FromRight,
}

impl Direction {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Direction::FromTop),
            1 => Some(Direction::FromBottom),
            2 => Some(Direction::FromLeft),
            3 => Some(Direction::FromRight),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Direction::FromTop => 0,
            Direction::FromBottom => 1,
            Direction::FromLeft => 2,
            Direction::FromRight => 3,
        }
    }

    /// Unit travel direction
    pub fn heading(&self) -> Vec2 {
        match self {
            Direction::FromTop => Vec2::new(0.0, 1.0),
            Direction::FromBottom => Vec2::new(0.0, -1.0),
            Direction::FromLeft => Vec2::new(1.0, 0.0),
            Direction::FromRight => Vec2::new(-1.0, 0.0),
        }
    }

    /// Top-left corner of the strip's first cell, `offset` outside the arena
    pub fn origin(&self, arena: Arena, offset: f32) -> Vec2 {
        match self {
            Direction::FromTop => Vec2::new(0.0, -offset),
            Direction::FromBottom => Vec2::new(0.0, arena.height + offset),
            Direction::FromLeft => Vec2::new(-offset, 0.0),
            Direction::FromRight => Vec2::new(arena.width + offset, 0.0),
        }
    }

    /// Walls moving vertically span the arena width; horizontal ones its height
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::FromTop | Direction::FromBottom)
    }
}

/// One strip of the level script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "RawRow")]
pub struct LevelRow {
    pub direction: Direction,
    /// true = wall, false = gap
    pub cells: Vec<bool>,
}

impl LevelRow {
    pub fn new(direction: Direction, cells: Vec<bool>) -> Self {
        Self { direction, cells }
    }

    /// Build from 0/1 flags
    pub fn from_flags(direction: Direction, flags: &[u8]) -> Self {
        Self::new(direction, flags.iter().map(|&f| f != 0).collect())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn parse(row: usize, direction: i64, flags: &[i64]) -> Result<Self, LevelError> {
        let direction = u8::try_from(direction)
            .ok()
            .and_then(Direction::from_index)
            .ok_or_else(|| LevelError::UnknownDirection {
                row,
                value: direction.to_string(),
            })?;
        if flags.is_empty() {
            return Err(LevelError::EmptyRow { row });
        }
        let cells = flags
            .iter()
            .map(|&flag| match flag {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(LevelError::InvalidFlag {
                    row,
                    value: other.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(direction, cells))
    }
}

/// Serialized form: `{"direction": 0, "flags": [1, 0, 1]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRow {
    direction: i64,
    flags: Vec<i64>,
}

impl From<LevelRow> for RawRow {
    fn from(row: LevelRow) -> Self {
        RawRow {
            direction: row.direction.index() as i64,
            flags: row.cells.iter().map(|&c| c as i64).collect(),
        }
    }
}

/// An ordered level, consumed front to back
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LevelScript {
    pub rows: Vec<LevelRow>,
}

impl LevelScript {
    pub fn new(rows: Vec<LevelRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse a JSON array of `{"direction", "flags"}` objects
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let raw: Vec<RawRow> = serde_json::from_str(json)?;
        let rows = raw
            .iter()
            .enumerate()
            .map(|(i, r)| LevelRow::parse(i + 1, r.direction, &r.flags))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::checked(rows))
    }

    /// Parse the tabular format: one `direction,flag,flag,...` row per line.
    /// Blank lines and `#` comments are skipped, as is a leading header line
    /// whose first cell is not a number.
    pub fn from_table_str(text: &str) -> Result<Self, LevelError> {
        let mut rows = Vec::new();
        let mut seen_data = false;

        for (line_no, line) in text.lines().enumerate() {
            let line_no = line_no + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split(',').map(str::trim);
            let first = fields.next().unwrap_or_default();
            let Ok(direction) = first.parse::<i64>() else {
                if !seen_data {
                    // Header
                    seen_data = true;
                    continue;
                }
                return Err(LevelError::UnknownDirection {
                    row: line_no,
                    value: first.to_string(),
                });
            };
            seen_data = true;

            let mut fields: Vec<&str> = fields.collect();
            // A single trailing comma is tolerated; any other empty cell is malformed
            if fields.last().is_some_and(|f| f.is_empty()) {
                fields.pop();
            }
            let flags = fields
                .into_iter()
                .map(|f| {
                    f.parse::<i64>().map_err(|_| LevelError::InvalidFlag {
                        row: line_no,
                        value: f.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(LevelRow::parse(line_no, direction, &flags)?);
        }

        Ok(Self::checked(rows))
    }

    /// Load from disk; `.json` files are parsed as JSON, anything else as a table
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let script = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&text)?,
            _ => Self::from_table_str(&text)?,
        };
        log::info!("Loaded {} level rows from {}", script.len(), path.display());
        Ok(script)
    }

    fn checked(rows: Vec<LevelRow>) -> Self {
        match rows.first() {
            None => log::warn!("Level script has no rows; nothing will spawn"),
            Some(first) if rows.iter().any(|r| r.len() != first.len()) => {
                log::warn!("Level rows have differing lengths; block sizes will vary")
            }
            Some(_) => {}
        }
        Self { rows }
    }
}

/// Turns level rows into obstacles
#[derive(Debug, Clone, Copy)]
pub struct LevelDecoder {
    pub arena: Arena,
    /// Obstacle speed, units per tick
    pub speed: f32,
    /// Wall thickness along the travel axis
    pub thickness: f32,
    /// Distance outside the arena where walls appear
    pub spawn_offset: f32,
    /// Out-of-bounds margin handed to each obstacle
    pub margin: f32,
}

impl LevelDecoder {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            arena: config.arena(),
            speed: config.obstacle_speed,
            thickness: config.wall_thickness,
            spawn_offset: config.spawn_offset,
            margin: config.out_of_bounds_margin,
        }
    }

    /// Cell size along the strip for a row of `len` cells (whole units)
    pub fn block_size(&self, direction: Direction, len: usize) -> f32 {
        if len == 0 {
            return 0.0;
        }
        let extent = if direction.is_vertical() {
            self.arena.width
        } else {
            self.arena.height
        };
        (extent / len as f32).floor()
    }

    /// Merge runs of filled cells into obstacles, all tagged with `color`
    pub fn decode(&self, row: &LevelRow, color: u32) -> Vec<Obstacle> {
        let direction = row.direction;
        let block = self.block_size(direction, row.len());
        let origin = direction.origin(self.arena, self.spawn_offset);
        let vel = direction.heading() * self.speed;

        let mut obstacles = Vec::new();
        let mut cursor = 0.0;
        let mut run = 0.0;

        // Trailing gap closes a final run
        for filled in row.cells.iter().copied().chain(std::iter::once(false)) {
            if filled {
                run += block;
                continue;
            }
            if run > 0.0 {
                let (pos, size) = if direction.is_vertical() {
                    (
                        origin + Vec2::new(cursor, 0.0),
                        Vec2::new(run, self.thickness),
                    )
                } else {
                    (
                        origin + Vec2::new(0.0, cursor),
                        Vec2::new(self.thickness, run),
                    )
                };
                obstacles.push(Obstacle::new(pos, size, vel, color, self.arena, self.margin));
                cursor += run + block;
                run = 0.0;
            } else {
                cursor += block;
            }
        }

        log::debug!(
            "Decoded {:?} row of {} cells into {} obstacles",
            direction,
            row.len(),
            obstacles.len()
        );
        obstacles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Movable;

    fn decoder() -> LevelDecoder {
        LevelDecoder::new(&SimulationConfig::default())
    }

    #[test]
    fn test_decode_two_runs_from_top() {
        let row = LevelRow::from_flags(Direction::FromTop, &[1, 1, 0, 1, 0]);
        let obstacles = decoder().decode(&row, 7);
        let block = 100.0;

        assert_eq!(obstacles.len(), 2);
        assert_eq!(obstacles[0].pos(), Vec2::new(0.0, -50.0));
        assert_eq!(obstacles[0].size, Vec2::new(2.0 * block, 50.0));
        assert_eq!(obstacles[1].pos(), Vec2::new(3.0 * block, -50.0));
        assert_eq!(obstacles[1].size, Vec2::new(block, 50.0));
        for obstacle in &obstacles {
            assert_eq!(obstacle.vel(), Vec2::new(0.0, 3.0));
            assert_eq!(obstacle.color, 7);
        }
    }

    #[test]
    fn test_all_zero_row_is_empty() {
        for len in 1..12 {
            let row = LevelRow::from_flags(Direction::FromLeft, &vec![0; len]);
            assert!(decoder().decode(&row, 0).is_empty());
        }
    }

    #[test]
    fn test_all_one_row_spans_arena() {
        let row = LevelRow::from_flags(Direction::FromBottom, &[1; 5]);
        let obstacles = decoder().decode(&row, 0);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].pos(), Vec2::new(0.0, 550.0));
        assert_eq!(obstacles[0].size.x, 500.0);
        assert_eq!(obstacles[0].vel(), Vec2::new(0.0, -3.0));
    }

    #[test]
    fn test_integer_block_width() {
        let row = LevelRow::from_flags(Direction::FromTop, &[1, 0, 1]);
        let obstacles = decoder().decode(&row, 0);
        // 500 / 3 -> 166
        assert_eq!(obstacles[0].size.x, 166.0);
        assert_eq!(obstacles[1].pos().x, 332.0);
    }

    #[test]
    fn test_horizontal_walls_are_transposed() {
        let row = LevelRow::from_flags(Direction::FromRight, &[0, 1, 1, 0, 1]);
        let obstacles = decoder().decode(&row, 0);
        assert_eq!(obstacles.len(), 2);
        assert_eq!(obstacles[0].pos(), Vec2::new(550.0, 100.0));
        assert_eq!(obstacles[0].size, Vec2::new(50.0, 200.0));
        assert_eq!(obstacles[1].pos(), Vec2::new(550.0, 400.0));
        assert_eq!(obstacles[0].vel(), Vec2::new(-3.0, 0.0));

        let row = LevelRow::from_flags(Direction::FromLeft, &[1, 0]);
        let obstacles = decoder().decode(&row, 0);
        assert_eq!(obstacles[0].pos(), Vec2::new(-50.0, 0.0));
        assert_eq!(obstacles[0].vel(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_decoded_obstacles_never_overlap() {
        let row = LevelRow::from_flags(Direction::FromTop, &[1, 0, 1, 1, 0, 0, 1, 0, 1, 1]);
        let obstacles = decoder().decode(&row, 0);
        assert_eq!(obstacles.len(), 4);
        for pair in obstacles.windows(2) {
            assert!(!pair[0].bounds().intersects(&pair[1].bounds()));
            assert!(pair[0].bounds().right() < pair[1].bounds().x);
        }
        let last = obstacles.last().unwrap().bounds();
        assert!(last.right() <= 500.0);
    }

    #[test]
    fn test_json_script() {
        let script = LevelScript::from_json_str(
            r#"[{"direction": 0, "flags": [1, 0, 1]}, {"direction": 3, "flags": [0, 1, 1]}]"#,
        )
        .unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.rows[1].direction, Direction::FromRight);
        assert_eq!(script.rows[1].cells, vec![false, true, true]);

        let json = serde_json::to_string(&script).unwrap();
        assert!(json.contains(r#""direction":3"#));
    }

    #[test]
    fn test_json_script_errors() {
        let err = LevelScript::from_json_str(r#"[{"direction": 0, "flags": [1]}, {"direction": 4, "flags": [1]}]"#)
            .unwrap_err();
        assert!(matches!(err, LevelError::UnknownDirection { row: 2, .. }));

        let err = LevelScript::from_json_str(r#"[{"direction": 1, "flags": [1, 2]}]"#).unwrap_err();
        assert!(matches!(err, LevelError::InvalidFlag { row: 1, .. }));

        let err = LevelScript::from_json_str(r#"[{"direction": 1, "flags": []}]"#).unwrap_err();
        assert!(matches!(err, LevelError::EmptyRow { row: 1 }));

        let err = LevelScript::from_json_str("[").unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }

    #[test]
    fn test_table_script() {
        let text = "type,c0,c1,c2,c3\n# opening wall\n0,1,1,0,1\n\n2, 0,1,1,1\n";
        let script = LevelScript::from_table_str(text).unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.rows[0], LevelRow::from_flags(Direction::FromTop, &[1, 1, 0, 1]));
        assert_eq!(script.rows[1], LevelRow::from_flags(Direction::FromLeft, &[0, 1, 1, 1]));
    }

    #[test]
    fn test_table_script_errors() {
        let err = LevelScript::from_table_str("0,1,0\nx,1,0\n").unwrap_err();
        assert!(matches!(err, LevelError::UnknownDirection { row: 2, .. }));

        let err = LevelScript::from_table_str("0,1,yes\n").unwrap_err();
        assert!(matches!(err, LevelError::InvalidFlag { row: 1, .. }));

        let err = LevelScript::from_table_str("3\n").unwrap_err();
        assert!(matches!(err, LevelError::EmptyRow { row: 1 }));

        let err = LevelScript::from_table_str("9,1,0\n").unwrap_err();
        assert!(matches!(err, LevelError::UnknownDirection { row: 1, .. }));
    }

    #[test]
    fn test_table_missing_cell_rejected() {
        let err = LevelScript::from_table_str("0,1,,0,1,0\n").unwrap_err();
        assert!(matches!(err, LevelError::InvalidFlag { row: 1, ref value } if value.is_empty()));

        let err = LevelScript::from_table_str("0,1,0\n2,1,0,,\n").unwrap_err();
        assert!(matches!(err, LevelError::InvalidFlag { row: 2, .. }));

        // Trailing comma is fine
        let script = LevelScript::from_table_str("0,1,0,1,\n").unwrap();
        assert_eq!(script.rows[0].len(), 3);
    }

    #[test]
    fn test_demo_level_parses() {
        let script = LevelScript::from_table_str(include_str!("../../demos/level.csv")).unwrap();
        assert_eq!(script.len(), 9);
        assert!(script.rows.iter().all(|r| r.len() == 5));
        assert_eq!(script.rows[5].direction, Direction::FromLeft);
    }
}
