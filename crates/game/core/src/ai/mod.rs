//! Enemy AI: line of sight, A* planning and the patrol/chase/search agent.
//!
//! - [`vision`] answers "can this cell see that cell"
//! - [`path`] finds shortest 4-connected routes
//! - [`agent`] combines both into the per-tick decision loop
pub mod agent;
pub mod path;
pub mod state;
pub mod vision;

pub use agent::{AgentError, EnemyAgent, Plan};
pub use path::{Path, PathError, PathResult, find_path};
pub use state::{AgentState, MoveDecision, StateTransition, Tone};
pub use vision::{VisibilityResult, can_see, line_of_sight, observe};
