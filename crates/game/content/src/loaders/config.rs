//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use crakers_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Every key is optional; missing keys keep their [`GameConfig::default`] values.
///
/// ```toml
/// player_lives = 5
/// enemy_move_interval = 8
///
/// [ai]
/// vision_radius = 4
/// search_patience = 12
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crakers_core::AiConfig;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = ConfigLoader::parse(
            "player_lives = 5\n\n[ai]\nvision_radius = 4\nsearch_patience = 12\n",
        )
        .unwrap();
        assert_eq!(config.player_lives, 5);
        assert_eq!(config.dash_distance, GameConfig::DEFAULT_DASH_DISTANCE);
        assert_eq!(
            config.ai,
            AiConfig::default()
                .with_vision_radius(4)
                .with_search_patience(12)
        );
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(ConfigLoader::parse("player_lives = \"many\"").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enemy_move_interval = 4").unwrap();
        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.enemy_move_interval, 4);
    }
}
