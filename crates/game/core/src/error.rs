//! Common error infrastructure for crakers-core.
//!
//! Concrete errors (`GridError`, `PathError`, `AgentError`, `LevelError`) live
//! next to the code that raises them. This module only provides the shared
//! classification used by callers to decide how to react.
//!
//! A planner returning "no path" is deliberately not an error: it is a normal
//! outcome that agents answer with a stay decision.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The caller can retry with different arguments.
    ///
    /// Examples: planner asked for a cell outside the grid
    Recoverable,

    /// Malformed input that must be fixed before retrying.
    ///
    /// Examples: empty patrol route, tile count mismatch
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all crakers-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, used in logs and tests.
    fn error_code(&self) -> &'static str;
}
