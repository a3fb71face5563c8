//! Self-rescheduling tick clock.
//!
//! [`TickScheduler`] is a plain state machine: it never sleeps and never
//! spawns. It holds at most one pending deadline; whoever drives it waits
//! until that deadline and calls [`TickScheduler::fire`], which decides
//! whether a step runs and schedules the following deadline itself.
//!
//! ```text
//! Stopped --start--> Running --pause--> Paused --resume--> Running
//!    ^                  |                  |
//!    +------stop--------+-------stop-------+
//! ```
//!
//! Pausing or stopping only flips the state. A deadline that was already
//! pending still fires once afterwards, sees the new state and schedules
//! nothing (the grace tick).

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use super::rate::TickRate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchedulerState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// What a timer firing asks the caller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fire {
    /// Run one simulation step; the next deadline is already scheduled
    Step,
    /// Grace tick or stray firing: do nothing
    Idle,
}

#[derive(Debug, Clone)]
pub struct TickScheduler {
    rate: TickRate,
    state: SchedulerState,
    started_at: Option<Instant>,
    elapsed: Duration,
    next_deadline: Option<Instant>,
}

impl TickScheduler {
    pub fn new(rate: TickRate) -> Self {
        Self {
            rate,
            state: SchedulerState::Stopped,
            started_at: None,
            elapsed: Duration::ZERO,
            next_deadline: None,
        }
    }

    /// Start from zero, dropping any pending deadline.
    ///
    /// The tick handler runs right away: it records the elapsed time and
    /// schedules the first deadline one interval from `now`.
    pub fn start(&mut self, now: Instant) {
        self.stop();
        self.next_deadline = None;
        self.started_at = Some(now);
        self.state = SchedulerState::Running;
        self.advance(now);
        debug!("tick clock started at {} ({:?} per tick)", self.rate, self.rate.interval());
    }

    /// Stop rescheduling; the pending deadline still fires once
    pub fn pause(&mut self) {
        match self.state {
            SchedulerState::Running => {
                self.state = SchedulerState::Paused;
                debug!("tick clock paused at {:?}", self.elapsed);
            }
            state => debug!("pause ignored while {:?}", state),
        }
    }

    /// Continue from the elapsed time recorded before the pause
    pub fn resume(&mut self, now: Instant) {
        match self.state {
            SchedulerState::Paused => {
                self.started_at = Some(now.checked_sub(self.elapsed).unwrap_or(now));
                self.state = SchedulerState::Running;
                self.next_deadline = Some(now + self.rate.interval());
                debug!("tick clock resumed at {:?}", self.elapsed);
            }
            state => debug!("resume ignored while {:?}", state),
        }
    }

    /// Halt and reset the elapsed time; safe to call from any state
    pub fn stop(&mut self) {
        if self.state != SchedulerState::Stopped {
            debug!("tick clock stopped after {:?}", self.elapsed);
        }
        self.state = SchedulerState::Stopped;
        self.elapsed = Duration::ZERO;
        self.started_at = None;
    }

    /// Handle the pending deadline firing at `now`
    pub fn fire(&mut self, now: Instant) -> Fire {
        self.next_deadline = None;
        if self.state != SchedulerState::Running {
            debug!("tick ignored while {:?}", self.state);
            return Fire::Idle;
        }
        self.advance(now);
        Fire::Step
    }

    fn advance(&mut self, now: Instant) {
        if let Some(started_at) = self.started_at {
            self.elapsed = now.saturating_duration_since(started_at);
        }
        self.next_deadline = Some(now + self.rate.interval());
    }

    /// Change the cadence; applies from the next scheduled deadline on
    pub fn set_rate(&mut self, rate: TickRate) {
        if rate != self.rate {
            debug!("tick rate changed from {} to {}", self.rate, rate);
            self.rate = rate;
        }
    }

    pub fn rate(&self) -> TickRate {
        self.rate
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == SchedulerState::Paused
    }

    /// Elapsed time as of the last tick; frozen while paused, zero while stopped
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// When the single pending firing is due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TickRate::default())
    }
}

/// Format elapsed time as `mm:ss`
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
