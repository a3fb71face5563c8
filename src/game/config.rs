use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::Direction;
use crate::clock::TickRate;

/// Default grid width in cells
pub const DEFAULT_GRID_WIDTH: usize = 30;
/// Default grid height in cells
pub const DEFAULT_GRID_HEIGHT: usize = 30;
/// Delay between the terminal step and the game-over notification
pub const GAME_OVER_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid dimensions {width}x{height} exceed the addressable range")]
    GridTooLarge { width: usize, height: usize },
    #[error("game-over delay must be non-zero")]
    ZeroGameOverDelay,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// How fast the simulation ticks
    pub tick_rate: TickRate,
    /// Direction the snake heads in after every start
    pub initial_direction: Direction,
    /// Milliseconds between the terminal step and the game-over callback
    pub game_over_delay_ms: u64,
    /// Seed for food placement; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            tick_rate: TickRate::default(),
            initial_direction: Direction::Right,
            game_over_delay_ms: GAME_OVER_DELAY_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tick_rate(mut self, rate: TickRate) -> Self {
        self.tick_rate = rate;
        self
    }

    pub fn game_over_delay(&self) -> Duration {
        Duration::from_millis(self.game_over_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.grid_width, self.grid_height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(ConfigError::GridTooLarge { width, height });
        }
        if self.game_over_delay_ms == 0 {
            return Err(ConfigError::ZeroGameOverDelay);
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate().context("Invalid config")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.tick_rate, TickRate::Medium);
        assert_eq!(config.game_over_delay(), Duration::from_millis(2000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12).with_seed(3);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        let config = GameConfig::new(0, 10);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_validate_rejects_zero_delay() {
        let config = GameConfig {
            game_over_delay_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroGameOverDelay));
    }

    #[test]
    fn test_load_partial_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_width": 12, "tick_rate": "fast", "seed": 9 }"#).unwrap();

        let config = GameConfig::from_json_file(&path).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, DEFAULT_GRID_HEIGHT);
        assert_eq!(config.tick_rate, TickRate::Fast);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "grid_height": 0 }"#).unwrap();

        assert!(GameConfig::from_json_file(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(GameConfig::from_json_file(&temp_dir.path().join("nope.json")).is_err());
    }
}
