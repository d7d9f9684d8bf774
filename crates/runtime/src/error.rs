//! Error types surfaced by the session API.
use crakers_core::{ErrorSeverity, GameError, LevelError};
use thiserror::Error;

use crate::events::Outcome;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("level failed validation")]
    InvalidLevel(#[from] LevelError),

    #[error("session already finished ({outcome})")]
    SessionFinished { outcome: Outcome },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidLevel(_) => ErrorSeverity::Validation,
            Self::SessionFinished { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLevel(_) => "RUNTIME_INVALID_LEVEL",
            Self::SessionFinished { .. } => "RUNTIME_SESSION_FINISHED",
        }
    }
}
