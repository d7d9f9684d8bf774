//! Headless simulation of a Crakers session.
//!
//! A [`Session`] owns the level layout, the player, the remaining gems and one
//! [`crakers_core::EnemyAgent`] per enemy, and advances them together one tick
//! at a time. Callers feed it [`PlayerInput`] (usually from an
//! [`InputProvider`]) and react to the [`SessionEvent`]s in each
//! [`StepReport`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the tick pipeline
//! - [`player`] holds the player's position, lives and timers
//! - [`events`] describes what happened during a step
//! - [`providers`] supplies scripted or random player input
pub mod error;
pub mod events;
pub mod player;
pub mod providers;
pub mod session;

pub use error::{Result, RuntimeError};
pub use events::{Outcome, SessionEvent, SessionStatus, StepReport};
pub use player::{PlayerInput, PlayerState};
pub use providers::{InputProvider, ScriptedInput, WanderInput};
pub use session::{Session, SessionView};
