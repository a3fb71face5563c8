use std::time::Duration;

use serde::Serialize;

use crate::clock::{SchedulerState, TickRate, TickScheduler};
use crate::game::{GameEngine, GameStatus, Grid};

/// Everything a view layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub grid: Grid,
    /// Game clock as of the last tick
    pub elapsed: Duration,
    pub clock: SchedulerState,
    pub rate: TickRate,
    pub status: GameStatus,
    /// Completed steps since the last start
    pub steps: u64,
    pub snake_length: usize,
}

impl Snapshot {
    pub fn capture(engine: &GameEngine, scheduler: &TickScheduler) -> Self {
        Self {
            grid: engine.grid().clone(),
            elapsed: scheduler.elapsed(),
            clock: scheduler.state(),
            rate: scheduler.rate(),
            status: engine.status(),
            steps: engine.steps(),
            snake_length: engine.snake().len(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.clock == SchedulerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.clock == SchedulerState::Paused
    }
}
