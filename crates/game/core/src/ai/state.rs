//! Agent states and how they are presented.

use crate::grid::Cell;

/// Alert level of an enemy.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AgentState {
    /// Walking the patrol route, unaware of the player.
    #[default]
    Patrol,
    /// Player in sight; pursuing their predicted cell.
    Chase,
    /// Sight lost; heading to the last known player cell.
    Search,
}

impl AgentState {
    /// Display tone used by the renderer to color-code the enemy.
    pub const fn tone(self) -> Tone {
        match self {
            AgentState::Patrol => Tone::Dark,
            AgentState::Search => Tone::Intermediate,
            AgentState::Chase => Tone::Bright,
        }
    }
}

/// Screen tones of the handheld palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Tone {
    Dark,
    Intermediate,
    Bright,
}

impl Tone {
    pub const fn hex(self) -> &'static str {
        match self {
            Tone::Dark => "#374224",
            Tone::Intermediate => "#8B9467",
            Tone::Bright => "#FFD23F",
        }
    }
}

/// Per-tick output of an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDecision {
    /// Step into this orthogonally adjacent, walkable cell.
    MoveTo(Cell),
    Stay,
}

impl MoveDecision {
    pub fn destination(self) -> Option<Cell> {
        match self {
            MoveDecision::MoveTo(cell) => Some(cell),
            MoveDecision::Stay => None,
        }
    }
}

/// State change performed during a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateTransition {
    pub from: AgentState,
    pub to: AgentState,
}
