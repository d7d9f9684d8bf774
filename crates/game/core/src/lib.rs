//! Deterministic rules for the Crakers grid adventure.
//!
//! `crakers-core` owns the parts of the game that must behave identically on
//! every run: the static level grid, line-of-sight checks, A* planning and the
//! enemy patrol/chase/search state machine. Rendering, input and scoring live
//! outside this crate and talk to it through [`EnemyAgent::tick`] and the
//! read-only accessors on the agent.
pub mod ai;
pub mod config;
pub mod error;
pub mod grid;
pub mod level;
pub mod rng;

pub use ai::{
    AgentError, AgentState, EnemyAgent, MoveDecision, Path, PathError, PathResult, Plan,
    StateTransition, Tone, VisibilityResult, can_see, find_path, line_of_sight, observe,
};
pub use config::{AiConfig, GameConfig};
pub use error::{ErrorSeverity, GameError};
pub use grid::{Cell, Delta, Direction, GridError, GridMap, MapDimensions, MapOracle, TerrainKind};
pub use level::{EnemySpawn, Level, LevelError};
pub use rng::PcgStream;
