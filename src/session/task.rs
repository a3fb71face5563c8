use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};

use super::snapshot::Snapshot;
use crate::clock::{Fire, TickRate, TickScheduler};
use crate::game::{Direction, GameEngine, GameOverReason};

pub(crate) type GameOverCallback = Box<dyn FnMut(GameOverReason) + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Start,
    Pause,
    Resume,
    Stop,
    Input(Direction),
    SetRate(TickRate),
}

/// A game-over waiting for its delay to pass
struct Notice {
    due: Instant,
    reason: GameOverReason,
}

/// Sole owner of the engine and the scheduler.
///
/// Commands, ticks and game-over notices are all handled on this one task,
/// so a step never overlaps another step or a command.
pub(crate) struct SessionTask {
    engine: GameEngine,
    scheduler: TickScheduler,
    game_over_delay: Duration,
    notices: VecDeque<Notice>,
    on_game_over: GameOverCallback,
    snapshots: watch::Sender<Snapshot>,
}

impl SessionTask {
    pub(crate) fn new(
        engine: GameEngine,
        on_game_over: GameOverCallback,
    ) -> (Self, watch::Receiver<Snapshot>) {
        let scheduler = TickScheduler::new(engine.config().tick_rate);
        let (snapshots, receiver) = watch::channel(Snapshot::capture(&engine, &scheduler));
        let task = Self {
            game_over_delay: engine.config().game_over_delay(),
            engine,
            scheduler,
            notices: VecDeque::new(),
            on_game_over,
            snapshots,
        };
        (task, receiver)
    }

    pub(crate) async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        loop {
            let tick_at = self.scheduler.next_deadline();
            let notice_at = self.notices.front().map(|notice| notice.due);

            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },

                _ = wait_until(tick_at) => self.on_tick(),

                _ = wait_until(notice_at) => self.notify_game_over(),
            }
        }

        if !self.notices.is_empty() {
            debug!("dropping {} undelivered game-over notice(s)", self.notices.len());
        }
        debug!("session task finished");
    }

    fn handle(&mut self, command: Command) {
        let now = Instant::now();
        match command {
            Command::Start => {
                self.engine.start();
                self.scheduler.start(now);
            }
            Command::Pause => self.scheduler.pause(),
            Command::Resume => self.scheduler.resume(now),
            Command::Stop => self.scheduler.stop(),
            Command::Input(direction) => {
                self.engine.on_input(direction);
                // Nothing visible changes until the next tick
                return;
            }
            Command::SetRate(rate) => self.scheduler.set_rate(rate),
        }
        self.publish();
    }

    fn on_tick(&mut self) {
        let now = Instant::now();
        if self.scheduler.fire(now) == Fire::Idle {
            return;
        }

        let result = self.engine.step();
        debug!(
            "tick {} at {:?}: head {:?}, ate food: {}",
            self.engine.steps(),
            self.scheduler.elapsed(),
            self.engine.snake().head(),
            result.ate_food
        );

        if let Some(reason) = result.reason {
            self.scheduler.stop();
            self.notices.push_back(Notice {
                due: now + self.game_over_delay,
                reason,
            });
        }
        self.publish();
    }

    fn notify_game_over(&mut self) {
        if let Some(notice) = self.notices.pop_front() {
            info!("reporting game over: {:?}", notice.reason);
            (self.on_game_over)(notice.reason);
        }
    }

    fn publish(&self) {
        self.snapshots
            .send_replace(Snapshot::capture(&self.engine, &self.scheduler));
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
