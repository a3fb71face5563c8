use log::warn;
use tokio::sync::mpsc::{self, error::SendError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::snapshot::Snapshot;
use super::task::{Command, SessionTask};
use crate::clock::TickRate;
use crate::game::{ConfigError, Direction, GameConfig, GameEngine, GameOverReason};

/// Handle to a running game.
///
/// Every method only queues a command for the session task and returns
/// immediately; none of them can fail. The handle is `Send + Sync`, so view
/// and input code on other tasks or threads can share it.
///
/// # Example
///
/// ```rust,no_run
/// use torus_snake::game::{Direction, GameConfig};
/// use torus_snake::session::GameSession;
///
/// # async fn demo() -> anyhow::Result<()> {
/// let session = GameSession::spawn(GameConfig::default(), |reason| {
///     println!("game over: {reason:?}");
/// })?;
/// session.start();
/// session.on_input(Direction::Up);
/// let frame = session.snapshot();
/// println!("{}", frame.grid);
/// session.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct GameSession {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<Snapshot>,
    task: JoinHandle<()>,
}

impl GameSession {
    /// Spawn a session task on the current tokio runtime.
    ///
    /// `on_game_over` runs on the session task once per finished game,
    /// after the configured delay.
    pub fn spawn<F>(config: GameConfig, on_game_over: F) -> Result<Self, ConfigError>
    where
        F: FnMut(GameOverReason) + Send + 'static,
    {
        let engine = GameEngine::new(config)?;
        Ok(Self::with_engine(engine, on_game_over))
    }

    /// Spawn a session around an already built engine
    pub fn with_engine<F>(engine: GameEngine, on_game_over: F) -> Self
    where
        F: FnMut(GameOverReason) + Send + 'static,
    {
        let (commands, receiver) = mpsc::unbounded_channel();
        let (task, snapshots) = SessionTask::new(engine, Box::new(on_game_over));
        let task = tokio::spawn(task.run(receiver));

        Self {
            commands,
            snapshots,
            task,
        }
    }

    /// Reset the snake to the grid center and start ticking from zero
    pub fn start(&self) {
        self.send(Command::Start);
    }

    pub fn pause(&self) {
        self.send(Command::Pause);
    }

    pub fn resume(&self) {
        self.send(Command::Resume);
    }

    /// Halt ticking and reset the clock; the board is kept until the next start
    pub fn stop(&self) {
        self.send(Command::Stop);
    }

    /// Direction for the next tick; the last one sent before the tick wins
    pub fn on_input(&self, direction: Direction) {
        self.send(Command::Input(direction));
    }

    pub fn set_rate(&self, rate: TickRate) {
        self.send(Command::SetRate(rate));
    }

    /// The most recently published frame
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified whenever a new frame is published
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Close the command queue and wait for the task to finish.
    ///
    /// Game-over notices that are not yet due are dropped.
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        if let Err(err) = task.await {
            warn!("session task ended abnormally: {err}");
        }
    }

    fn send(&self, command: Command) {
        if let Err(SendError(command)) = self.commands.send(command) {
            warn!("session task is gone, dropping {:?}", command);
        }
    }
}
