//! Screen state machine driven by the tick loop.
//!
//! The client only has two screens, so they form a closed enum rather than a
//! trait object registry. Shared state lives in [`AppState`] and is passed to
//! every hook explicitly.

use anyhow::Result;
use crakers_runtime::{InputProvider, Outcome, Session, SessionEvent};

use crate::config::ClientConfig;

/// State shared by every screen.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: ClientConfig,
    /// Ticks driven since the client started.
    pub tick: u64,
    /// Outcome of the most recent session; `None` while playing or after a timeout.
    pub last_outcome: Option<Outcome>,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            tick: 0,
            last_outcome: None,
        }
    }
}

pub enum Screen {
    Playing {
        session: Box<Session>,
        input: Box<dyn InputProvider + Send>,
    },
    Finished {
        outcome: Option<Outcome>,
        gems_left: usize,
        lives_left: u32,
    },
}

impl Screen {
    pub fn playing(session: Session, input: impl InputProvider + Send + 'static) -> Self {
        Self::Playing {
            session: Box::new(session),
            input: Box::new(input),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Playing { .. } => "playing",
            Self::Finished { .. } => "finished",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }

    pub fn on_enter(&mut self, app: &mut AppState) {
        tracing::info!("Entering {} screen at tick {}", self.name(), app.tick);
        match self {
            Self::Playing { session, .. } => {
                app.last_outcome = None;
                tracing::info!(
                    "{} gems to collect, {} lives",
                    session.gems().len(),
                    session.player().lives()
                );
            }
            Self::Finished {
                outcome,
                gems_left,
                lives_left,
            } => {
                app.last_outcome = *outcome;
                match outcome {
                    Some(Outcome::Won) => tracing::info!("All gems collected with {} lives left", lives_left),
                    Some(Outcome::Lost) => tracing::info!("Game over with {} gems left", gems_left),
                    None => tracing::warn!(
                        "Tick limit {} reached with {} gems left",
                        app.config.max_ticks,
                        gems_left
                    ),
                }
            }
        }
    }

    /// Advances the screen by one tick and returns the screen to switch to, if any.
    pub fn on_tick(&mut self, app: &mut AppState) -> Result<Option<Screen>> {
        app.tick += 1;
        let Self::Playing { session, input } = self else {
            return Ok(None);
        };

        let report = session.step_with(input.as_mut())?;
        for event in &report.events {
            match event {
                SessionEvent::GemCollected { remaining, .. } => {
                    tracing::info!("Gem collected, {} remaining", remaining);
                }
                SessionEvent::PlayerHit { lives_left, .. } => {
                    tracing::warn!("Player hit, {} lives left", lives_left);
                }
                _ => {}
            }
        }

        let outcome = report.status.outcome();
        if outcome.is_some() || session.tick() >= app.config.max_ticks {
            return Ok(Some(Screen::Finished {
                outcome,
                gems_left: session.gems().len(),
                lives_left: session.player().lives(),
            }));
        }
        Ok(None)
    }

    pub fn on_exit(&mut self, app: &mut AppState) {
        tracing::debug!("Leaving {} screen at tick {}", self.name(), app.tick);
    }
}

#[cfg(test)]
mod tests {
    use crakers_core::{Cell, Direction, GameConfig, GridMap, Level};
    use crakers_runtime::{PlayerInput, ScriptedInput};

    use super::*;

    fn session() -> Session {
        let map = GridMap::from_ascii(&["#####", "#...#", "#####"]).unwrap();
        let level = Level::new(map, Cell::new(1, 1)).with_gems([Cell::new(3, 1)]);
        Session::new(level, GameConfig::default()).unwrap()
    }

    #[test]
    fn winning_switches_to_finished() {
        let mut app = AppState::new(ClientConfig::default());
        let mut screen = Screen::playing(
            session(),
            ScriptedInput::new([PlayerInput::Move(Direction::East); 2]),
        );
        screen.on_enter(&mut app);

        assert!(screen.on_tick(&mut app).unwrap().is_none());
        let mut next = screen.on_tick(&mut app).unwrap().unwrap();
        screen.on_exit(&mut app);
        next.on_enter(&mut app);

        assert!(next.is_finished());
        assert_eq!(app.last_outcome, Some(Outcome::Won));
        assert_eq!(app.tick, 2);
        assert!(next.on_tick(&mut app).unwrap().is_none());
    }

    #[test]
    fn tick_limit_ends_without_outcome() {
        let config = ClientConfig {
            max_ticks: 3,
            ..ClientConfig::default()
        };
        let mut app = AppState::new(config);
        let mut screen = Screen::playing(session(), ScriptedInput::default());
        screen.on_enter(&mut app);

        assert!(screen.on_tick(&mut app).unwrap().is_none());
        assert!(screen.on_tick(&mut app).unwrap().is_none());
        let mut next = screen.on_tick(&mut app).unwrap().unwrap();
        next.on_enter(&mut app);
        assert!(matches!(
            next,
            Screen::Finished {
                outcome: None,
                gems_left: 1,
                lives_left: 3
            }
        ));
        assert_eq!(app.last_outcome, None);
    }
}
