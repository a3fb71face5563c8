//! Headless mode: one game steered by a random autopilot.
//!
//! Nothing is drawn. The run ends when the game-over callback fires, when
//! the optional time limit passes, or on Ctrl+C, and the last published
//! frame is returned for the caller to report.

use std::future;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::time::{interval, sleep};

use crate::game::{Direction, GameConfig, GameOverReason};
use crate::session::{GameSession, Snapshot};

/// Chance per tick that the autopilot turns
const TURN_CHANCE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    GameOver(GameOverReason),
    TimeLimit,
    Interrupted,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub final_frame: Snapshot,
}

/// Random direction source that never reverses on itself
struct Autopilot {
    rng: StdRng,
    heading: Direction,
}

impl Autopilot {
    fn new(seed: Option<u64>, heading: Direction) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, heading }
    }

    /// A new heading, or `None` to keep going straight
    fn steer(&mut self) -> Option<Direction> {
        if !self.rng.gen_bool(TURN_CHANCE) {
            return None;
        }
        let turns: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| *d != self.heading && !d.is_opposite(self.heading))
            .collect();
        self.heading = turns[self.rng.gen_range(0..turns.len())];
        Some(self.heading)
    }
}

pub struct HeadlessMode {
    config: GameConfig,
    time_limit: Option<Duration>,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, time_limit: Option<Duration>) -> Self {
        Self { config, time_limit }
    }

    pub async fn run(&mut self) -> Result<RunReport> {
        let (over_tx, mut over_rx) = mpsc::unbounded_channel();
        let session = GameSession::spawn(self.config.clone(), move |reason| {
            let _ = over_tx.send(reason);
        })
        .context("Failed to create game session")?;

        let mut autopilot = Autopilot::new(self.config.seed, self.config.initial_direction);
        let mut steer_timer = interval(self.config.tick_rate.interval());

        let limit = self.time_limit;
        let time_limit = async move {
            match limit {
                Some(limit) => sleep(limit).await,
                None => future::pending().await,
            }
        };
        tokio::pin!(time_limit);

        info!(
            "headless run on a {}x{} grid at {} speed",
            self.config.grid_width, self.config.grid_height, self.config.tick_rate
        );
        session.start();

        let outcome = loop {
            tokio::select! {
                // Steer between ticks
                _ = steer_timer.tick() => {
                    if let Some(direction) = autopilot.steer() {
                        session.on_input(direction);
                    }
                }

                Some(reason) = over_rx.recv() => break RunOutcome::GameOver(reason),

                _ = &mut time_limit => break RunOutcome::TimeLimit,

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => break RunOutcome::Interrupted,
            }
        };

        let final_frame = session.snapshot();
        session.stop();
        session.shutdown().await;
        info!("headless run finished: {:?} after {} steps", outcome, final_frame.steps);

        Ok(RunReport {
            outcome,
            final_frame,
        })
    }
}
