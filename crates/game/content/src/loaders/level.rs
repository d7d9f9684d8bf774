//! Level data loader.
//!
//! Levels are RON files combining an ASCII layout with explicit placements:
//!
//! ```ron
//! (
//!     layout: [
//!         "#########",
//!         "#P..*...#",
//!         "#.##.##.#",
//!         "#.......#",
//!         "#########",
//!     ],
//!     gems: [(7, 3)],
//!     enemies: [
//!         (start: (7, 1), patrol: [(7, 1), (7, 3), (1, 3)]),
//!     ],
//! )
//! ```
//!
//! Layout glyphs: `#` wall, `.` floor, `P` player spawn, `*` gem.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, anyhow, bail};
use crakers_core::{Cell, EnemySpawn, GridMap, Level};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Level structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelRon {
    layout: Vec<String>,
    #[serde(default)]
    gems: Vec<(i32, i32)>,
    #[serde(default)]
    enemies: Vec<EnemyRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnemyRon {
    start: (i32, i32),
    patrol: Vec<(i32, i32)>,
}

/// Loader for levels from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load and validate a level from a RON file.
    pub fn load(path: &Path) -> LoadResult<Level> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid level file {}", path.display()))
    }

    /// Parse and validate a level from RON text.
    pub fn parse(content: &str) -> LoadResult<Level> {
        let data: LevelRon =
            ron::from_str(content).map_err(|e| anyhow!("Failed to parse level RON: {}", e))?;

        let map = GridMap::from_ascii(&data.layout).context("Malformed level layout")?;

        let mut player_spawn = None;
        let mut gems: BTreeSet<Cell> = data.gems.into_iter().map(Cell::from).collect();
        for (y, row) in data.layout.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                match glyph {
                    '#' | '.' => {}
                    'P' => {
                        if let Some(previous) = player_spawn.replace(cell) {
                            bail!("Layout has more than one player spawn: {previous} and {cell}");
                        }
                    }
                    '*' => {
                        gems.insert(cell);
                    }
                    other => bail!("Unknown layout glyph {other:?} at {cell}"),
                }
            }
        }
        let player_spawn = player_spawn.ok_or_else(|| anyhow!("Layout has no player spawn 'P'"))?;

        let enemies = data
            .enemies
            .into_iter()
            .map(|enemy| {
                EnemySpawn::new(
                    Cell::from(enemy.start),
                    enemy.patrol.into_iter().map(Cell::from).collect(),
                )
            })
            .collect();

        let level = Level {
            map,
            player_spawn,
            gems,
            enemies,
        };
        level.validate()?;
        Ok(level)
    }
}
