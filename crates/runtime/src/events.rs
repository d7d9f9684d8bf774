//! Event types reported by [`crate::Session::step`].
use crakers_core::{Cell, StateTransition};

/// How a finished session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// Every gem was collected.
    Won,
    /// The player ran out of lives.
    Lost,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Running,
    Finished(Outcome),
}

impl SessionStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Running => None,
            Self::Finished(outcome) => Some(outcome),
        }
    }
}

/// Something observable that happened during one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    PlayerMoved { from: Cell, to: Cell },
    GemCollected { cell: Cell, remaining: usize },
    EnemyMoved { enemy: usize, from: Cell, to: Cell },
    EnemyStateChanged {
        enemy: usize,
        transition: StateTransition,
    },
    PlayerHit { enemy: usize, lives_left: u32 },
    Won,
    Lost,
}

/// Result of a single [`crate::Session::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Tick number this step simulated, starting at 1.
    pub tick: u64,
    pub events: Vec<SessionEvent>,
    pub status: SessionStatus,
}

impl StepReport {
    pub fn transitions(&self) -> impl Iterator<Item = (usize, StateTransition)> + '_ {
        self.events.iter().filter_map(|event| match event {
            SessionEvent::EnemyStateChanged { enemy, transition } => Some((*enemy, *transition)),
            _ => None,
        })
    }
}
