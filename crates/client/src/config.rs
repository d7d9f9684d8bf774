//! Client configuration loaded from the process environment.

use std::env;
use std::path::PathBuf;

use crakers_core::GameConfig;

/// Headless client settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Seed for procedural levels and the wandering player.
    pub seed: u64,
    /// RON level to play instead of a generated one.
    pub level_path: Option<PathBuf>,
    /// TOML file overriding [`GameConfig`] defaults.
    pub config_path: Option<PathBuf>,
    /// Wall-clock pacing between ticks; `0` runs as fast as possible.
    pub tick_millis: u64,
    /// Session is abandoned after this many ticks.
    pub max_ticks: u64,
}

impl ClientConfig {
    pub const DEFAULT_SEED: u64 = 1;
    /// Five minutes of play at the default tick rate.
    pub const DEFAULT_MAX_TICKS: u64 = 6_000;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CRAKERS_SEED` - Level and input seed (default: 1)
    /// - `CRAKERS_LEVEL` - Path to a RON level (default: generated)
    /// - `CRAKERS_CONFIG` - Path to a TOML game config (default: built-in rules)
    /// - `CRAKERS_TICK_MS` - Milliseconds between ticks (default: 50)
    /// - `CRAKERS_MAX_TICKS` - Tick limit (default: 6000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = read_parsed(&lookup, "CRAKERS_SEED") {
            config.seed = seed;
        }
        config.level_path = read_path(&lookup, "CRAKERS_LEVEL");
        config.config_path = read_path(&lookup, "CRAKERS_CONFIG");
        if let Some(millis) = read_parsed(&lookup, "CRAKERS_TICK_MS") {
            config.tick_millis = millis;
        }
        if let Some(ticks) = read_parsed::<u64, _>(&lookup, "CRAKERS_MAX_TICKS") {
            config.max_ticks = ticks.max(1);
        }

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            level_path: None,
            config_path: None,
            tick_millis: GameConfig::TICK_MILLIS,
            max_ticks: Self::DEFAULT_MAX_TICKS,
        }
    }
}

fn read_parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

fn read_path<F>(lookup: &F, key: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}
