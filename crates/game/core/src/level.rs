//! Level description handed from the level loader to a session.
use std::collections::BTreeSet;

use crate::ai::{AgentError, EnemyAgent};
use crate::config::AiConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::grid::{Cell, GridMap, MapOracle};

/// Blueprint for an enemy that exists when the level starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    pub start: Cell,
    /// Cyclic patrol route; must not be empty.
    pub patrol: Vec<Cell>,
}

impl EnemySpawn {
    pub fn new(start: Cell, patrol: Vec<Cell>) -> Self {
        Self { start, patrol }
    }

    pub fn spawn<M>(&self, map: &M, config: AiConfig) -> Result<EnemyAgent, AgentError>
    where
        M: MapOracle + ?Sized,
    {
        EnemyAgent::new(map, self.start, self.patrol.clone(), config)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("player spawn {cell} is not a walkable cell")]
    PlayerSpawnBlocked { cell: Cell },

    #[error("gem at {cell} is not on a walkable cell")]
    GemBlocked { cell: Cell },

    #[error("enemy #{index} is invalid: {source}")]
    Enemy {
        index: usize,
        #[source]
        source: AgentError,
    },
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerSpawnBlocked { .. } => "LEVEL_PLAYER_SPAWN_BLOCKED",
            Self::GemBlocked { .. } => "LEVEL_GEM_BLOCKED",
            Self::Enemy { .. } => "LEVEL_ENEMY_INVALID",
        }
    }
}

/// Static layout plus initial placement of the player, gems and enemies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub map: GridMap,
    pub player_spawn: Cell,
    pub gems: BTreeSet<Cell>,
    pub enemies: Vec<EnemySpawn>,
}

impl Level {
    pub fn new(map: GridMap, player_spawn: Cell) -> Self {
        Self {
            map,
            player_spawn,
            gems: BTreeSet::new(),
            enemies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_gems(mut self, gems: impl IntoIterator<Item = Cell>) -> Self {
        self.gems.extend(gems);
        self
    }

    #[must_use]
    pub fn with_enemy(mut self, enemy: EnemySpawn) -> Self {
        self.enemies.push(enemy);
        self
    }

    /// Checks that every placement sits on a walkable cell.
    pub fn validate(&self) -> Result<(), LevelError> {
        if !self.map.is_walkable(self.player_spawn) {
            return Err(LevelError::PlayerSpawnBlocked {
                cell: self.player_spawn,
            });
        }
        if let Some(&cell) = self.gems.iter().find(|&&gem| !self.map.is_walkable(gem)) {
            return Err(LevelError::GemBlocked { cell });
        }
        for (index, enemy) in self.enemies.iter().enumerate() {
            enemy
                .spawn(&self.map, AiConfig::default())
                .map_err(|source| LevelError::Enemy { index, source })?;
        }
        Ok(())
    }
}
