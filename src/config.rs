//! Configuration for games run from the command line.
//!
//! Every field has a default: whatever a file leaves out is taken from the
//! standard 9x9 game with 10 walls per player and a depth-1 search bot.
//! Unknown sections are ignored.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::game::{validate_board_size, DEFAULT_BOARD_SIZE, DEFAULT_NUM_OF_WALLS};
use crate::minimax::SearchParams;

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct GameConfig {
    #[serde(default)]
    pub board: BoardConfig,

    #[serde(default)]
    pub bot: BotConfig,
}

/// Board dimensions in cells, and the wall supply of each player.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub walls_per_player: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_BOARD_SIZE,
            cols: DEFAULT_BOARD_SIZE,
            walls_per_player: DEFAULT_NUM_OF_WALLS,
        }
    }
}

/// Search bot tuning.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BotConfig {
    pub depth: u32,
    pub turn_weight: f32,
    pub walls_weight: f32,
    pub path_weight: f32,
}

impl Default for BotConfig {
    fn default() -> Self {
        let params = SearchParams::default();
        Self {
            depth: params.depth,
            turn_weight: params.turn_weight,
            walls_weight: params.walls_weight,
            path_weight: params.path_weight,
        }
    }
}

impl BotConfig {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            depth: self.depth,
            turn_weight: self.turn_weight,
            walls_weight: self.walls_weight,
            path_weight: self.path_weight,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        validate_board_size(self.board.rows, self.board.cols)?;
        anyhow::ensure!(self.bot.depth >= 1, "bot.depth must be at least 1");
        Ok(())
    }
}

/// Load a `GameConfig` from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig> {
    let contents = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
    let config: GameConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let yaml = r#"
board:
  rows: 7
  cols: 5
  walls_per_player: 4
bot:
  depth: 2
  turn_weight: 0.5
  walls_weight: 2.0
  path_weight: 4.0
renderer:
  theme: dark
"#;
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(f.path()).unwrap();
        assert_eq!(config.board.rows, 7);
        assert_eq!(config.board.cols, 5);
        assert_eq!(config.board.walls_per_player, 4);
        assert_eq!(config.bot.depth, 2);
        assert_eq!(config.bot.search_params().walls_weight, 2.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let yaml = r#"
board:
  walls_per_player: 3
"#;
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(f.path()).unwrap();
        assert_eq!(config.board.rows, 9);
        assert_eq!(config.board.cols, 9);
        assert_eq!(config.board.walls_per_player, 3);
        assert_eq!(config.bot, BotConfig::default());
        assert_eq!(config.bot.search_params(), SearchParams::default());
    }

    #[test]
    fn test_validate_rejects_even_board() {
        let yaml = r#"
board:
  rows: 8
"#;
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(f.path()).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("odd"));
    }

    #[test]
    fn test_load_config_bad_types() {
        let yaml = r#"
board:
  rows: nine
"#;
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();

        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/quoridor.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
