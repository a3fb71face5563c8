//! Core game logic module for Snake
//!
//! This module contains all the game logic without any timing, I/O or
//! rendering dependencies. [`GameEngine::step`] advances the simulation by
//! exactly one tick; the [`crate::session`] module decides when that happens.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, GameOverReason, GameStatus, StepResult};
pub use food::{FoodPlacer, PlacementError};
pub use grid::{Cell, Grid};
pub use state::{Position, Snake};
