//! Headless Crakers client.
//!
//! Assembles a session from environment configuration and drives it through
//! the [`screen::Screen`] state machine on a tick loop.

pub mod config;
pub mod screen;

use std::time::Duration;

use anyhow::{Context, Result};
use crakers_content::{ConfigLoader, GeneratorConfig, LevelLoader, generate_level};
use crakers_core::{GameConfig, Level};
use crakers_runtime::{Outcome, Session, WanderInput};

pub use config::ClientConfig;
pub use screen::{AppState, Screen};

/// Loads the game rules, falling back to the defaults when no file is configured.
pub fn load_game_config(config: &ClientConfig) -> Result<GameConfig> {
    match &config.config_path {
        Some(path) => {
            tracing::info!("Loading game config from {}", path.display());
            ConfigLoader::load(path)
        }
        None => Ok(GameConfig::default()),
    }
}

/// Loads the configured RON level or generates one from the seed.
pub fn load_level(config: &ClientConfig) -> Result<Level> {
    match &config.level_path {
        Some(path) => {
            tracing::info!("Loading level from {}", path.display());
            LevelLoader::load(path)
        }
        None => {
            tracing::info!("Generating level from seed {}", config.seed);
            generate_level(config.seed, &GeneratorConfig::default())
                .context("Failed to generate level")
        }
    }
}

/// Runs one session to completion and returns its outcome, or `None` on timeout.
pub async fn run(config: ClientConfig) -> Result<Option<Outcome>> {
    let game_config = load_game_config(&config)?;
    let level = load_level(&config)?;
    let session = Session::new(level, game_config)?;

    let mut ticker = (config.tick_millis > 0)
        .then(|| tokio::time::interval(Duration::from_millis(config.tick_millis)));

    let mut app = AppState::new(config.clone());
    let mut screen = Screen::playing(session, WanderInput::new(config.seed));
    screen.on_enter(&mut app);

    while !screen.is_finished() {
        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }
        if let Some(mut next) = screen.on_tick(&mut app)? {
            screen.on_exit(&mut app);
            next.on_enter(&mut app);
            screen = next;
        }
    }

    Ok(app.last_outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generated_session_runs_to_the_tick_limit_or_an_outcome() {
        let config = ClientConfig {
            tick_millis: 0,
            max_ticks: 200,
            ..ClientConfig::default()
        };
        let outcome = run(config.clone()).await.unwrap();
        assert_eq!(outcome, run(config).await.unwrap());
    }

    #[tokio::test]
    async fn missing_level_file_is_an_error() {
        let config = ClientConfig {
            level_path: Some("does/not/exist.ron".into()),
            tick_millis: 0,
            ..ClientConfig::default()
        };
        assert!(run(config).await.is_err());
    }
}
