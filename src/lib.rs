//! Torus Snake - a deterministic snake simulation on a wrapping grid
//!
//! This library provides:
//! - Core game logic: movement, collision, growth, food (game module)
//! - A self-rescheduling tick clock with pause/resume/stop (clock module)
//! - A session task that drives both and publishes snapshots (session module)
//! - Keypad key to direction mapping (input module)
//! - A headless autopilot runner (modes module)

pub mod clock;
pub mod game;
pub mod input;
pub mod modes;
pub mod session;
