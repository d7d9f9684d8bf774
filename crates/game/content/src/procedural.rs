//! Seeded level generator for the classic Crakers arena.
//!
//! The arena is a walled rectangle with rows of optional wall posts, gems
//! scattered away from the player's corner, and a single enemy walking the
//! inner perimeter.

use std::collections::BTreeSet;

use crakers_core::{Cell, EnemySpawn, GridError, GridMap, Level, MapDimensions, PcgStream, TerrainKind};

/// Tunables for [`generate_level`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub width: u32,
    pub height: u32,
    pub gem_count: usize,
    /// Chance, in percent, that each wall post is placed.
    pub wall_chance: u32,
    /// Gem placement gives up after this many rolls.
    pub max_gem_attempts: usize,
}

impl GeneratorConfig {
    /// Smallest side that still leaves room for the perimeter patrol.
    pub const MIN_SIDE: u32 = 6;

    /// Gems stay further than this (Manhattan) from the player spawn.
    const SPAWN_CLEARANCE: u32 = 3;
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 18,
            height: 12,
            gem_count: 15,
            wall_chance: 70,
            max_gem_attempts: 100,
        }
    }
}

/// Builds a level from `seed`. The same seed and config always give the same level.
///
/// Sides smaller than [`GeneratorConfig::MIN_SIDE`] are widened to it.
pub fn generate_level(seed: u64, config: &GeneratorConfig) -> Result<Level, GridError> {
    let mut rng = PcgStream::new(seed);
    let width = config.width.max(GeneratorConfig::MIN_SIDE) as i32;
    let height = config.height.max(GeneratorConfig::MIN_SIDE) as i32;
    let dimensions = MapDimensions::new(width as u32, height as u32);

    let mut posts = BTreeSet::new();
    for y in (3..height - 3).step_by(4) {
        for x in (2..width - 2).step_by(3) {
            if rng.chance(config.wall_chance) {
                posts.insert(Cell::new(x, y));
            }
        }
    }

    let map = GridMap::from_fn(dimensions, |cell| {
        let border = cell.x == 0 || cell.y == 0 || cell.x == width - 1 || cell.y == height - 1;
        if border || posts.contains(&cell) {
            TerrainKind::Wall
        } else {
            TerrainKind::Floor
        }
    })?;

    let player_spawn = Cell::new(2, 2);
    let mut gems = BTreeSet::new();
    for _ in 0..config.max_gem_attempts {
        if gems.len() >= config.gem_count {
            break;
        }
        let cell = Cell::new(rng.range_i32(2, width - 3), rng.range_i32(2, height - 3));
        if !posts.contains(&cell) && cell.manhattan(player_spawn) > GeneratorConfig::SPAWN_CLEARANCE {
            gems.insert(cell);
        }
    }

    let (right, bottom) = (width - 3, height - 3);
    let patrol = vec![
        Cell::new(right, 2),
        Cell::new(right, bottom),
        Cell::new(2, bottom),
        Cell::new(2, 2),
    ];

    Ok(Level::new(map, player_spawn)
        .with_gems(gems)
        .with_enemy(EnemySpawn::new(Cell::new(right, 2), patrol)))
}

#[cfg(test)]
mod tests {
    use crakers_core::MapOracle;

    use super::*;

    #[test]
    fn same_seed_same_level() {
        let config = GeneratorConfig::default();
        assert_eq!(
            generate_level(99, &config).unwrap(),
            generate_level(99, &config).unwrap()
        );
    }

    #[test]
    fn generated_level_is_valid() {
        let config = GeneratorConfig::default();
        for seed in 0..50 {
            let level = generate_level(seed, &config).unwrap();
            assert_eq!(level.validate(), Ok(()), "seed {seed}");
            assert_eq!(level.map.dimensions(), MapDimensions::new(18, 12));
            assert!(level.gems.len() <= config.gem_count);
            assert!(!level.gems.is_empty());
            for gem in &level.gems {
                assert!(gem.manhattan(level.player_spawn) > 3);
            }
        }
    }

    #[test]
    fn border_is_walled_and_posts_stay_on_post_rows() {
        let level = generate_level(5, &GeneratorConfig::default()).unwrap();
        let map = &level.map;
        for cell in map.dimensions().cells() {
            let border = cell.x == 0 || cell.y == 0 || cell.x == 17 || cell.y == 11;
            if border {
                assert!(!map.is_walkable(cell));
            } else if !map.is_walkable(cell) {
                assert!(cell.y == 3 || cell.y == 7, "unexpected wall at {cell}");
                assert_eq!((cell.x - 2) % 3, 0, "unexpected wall at {cell}");
            }
        }
    }

    #[test]
    fn enemy_walks_inner_perimeter() {
        let level = generate_level(1, &GeneratorConfig::default()).unwrap();
        assert_eq!(level.enemies.len(), 1);
        let enemy = &level.enemies[0];
        assert_eq!(enemy.start, Cell::new(15, 2));
        assert_eq!(
            enemy.patrol,
            vec![
                Cell::new(15, 2),
                Cell::new(15, 9),
                Cell::new(2, 9),
                Cell::new(2, 2)
            ]
        );
    }

    #[test]
    fn tiny_configs_are_widened() {
        let config = GeneratorConfig {
            width: 2,
            height: 1,
            ..GeneratorConfig::default()
        };
        let level = generate_level(3, &config).unwrap();
        assert_eq!(level.map.dimensions(), MapDimensions::new(6, 6));
        assert_eq!(level.validate(), Ok(()));
    }
}
