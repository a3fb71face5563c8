use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{
    action::Direction,
    config::{ConfigError, GameConfig},
    food::{FoodPlacer, PlacementError},
    grid::Grid,
    state::{Position, Snake},
};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The head ran into the snake's own body
    SelfCollision,
    /// The snake fills the board and no food can be placed; a win
    BoardFull,
}

/// Lifecycle of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created but never started
    #[default]
    Ready,
    Running,
    Over(GameOverReason),
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether this step ended the game
    pub terminated: bool,
    /// Why the game ended, set only on the terminal step
    pub reason: Option<GameOverReason>,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            ate_food: false,
            terminated: false,
            reason: None,
        }
    }

    fn game_over(reason: GameOverReason, ate_food: bool) -> Self {
        Self {
            ate_food,
            terminated: true,
            reason: Some(reason),
        }
    }
}

/// The game engine that owns the snake, the pending direction and the food.
///
/// It knows nothing about time: something else calls [`GameEngine::step`]
/// once per tick.
pub struct GameEngine {
    config: GameConfig,
    snake: Snake,
    pending_direction: Direction,
    food: Option<Position>,
    grid: Grid,
    status: GameStatus,
    steps: u64,
    placer: FoodPlacer,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let placer = match config.seed {
            Some(seed) => FoodPlacer::seeded(seed),
            None => FoodPlacer::from_entropy(),
        };
        Self::with_placer(config, placer)
    }

    /// Create an engine with an explicit food placer
    pub fn with_placer(config: GameConfig, placer: FoodPlacer) -> Result<Self, ConfigError> {
        config.validate()?;
        let snake = Snake::new(Self::center(&config), config.initial_direction);
        let grid = Grid::project(config.grid_width, config.grid_height, &snake.body, None);
        Ok(Self {
            pending_direction: config.initial_direction,
            config,
            snake,
            food: None,
            grid,
            status: GameStatus::Ready,
            steps: 0,
            placer,
        })
    }

    fn center(config: &GameConfig) -> Position {
        Position::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        )
    }

    /// Reset to a single head segment at the grid center and mark the game running
    pub fn start(&mut self) {
        let direction = self.config.initial_direction;
        self.snake = Snake::new(Self::center(&self.config), direction);
        self.pending_direction = direction;
        self.food = None;
        self.steps = 0;
        self.status = GameStatus::Running;
        self.rebuild_grid();
        info!(
            "game started on a {}x{} grid at {:?}",
            self.config.grid_width,
            self.config.grid_height,
            self.snake.head()
        );
    }

    /// Replace the snake and food of a running game.
    ///
    /// Used to set up positions that a fresh start cannot reach quickly.
    /// Food on top of the snake is discarded, and so is an empty snake.
    #[cfg(test)]
    pub(crate) fn restore(&mut self, snake: Snake, food: Option<Position>) {
        if snake.is_empty() {
            return;
        }
        self.food = food.filter(|pos| !snake.body.contains(pos));
        self.pending_direction = snake.direction;
        self.snake = snake;
        self.status = GameStatus::Running;
        self.rebuild_grid();
    }

    /// Latch the direction for the next step; the last call before a tick wins
    pub fn on_input(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    /// Execute one step of the game
    pub fn step(&mut self) -> StepResult {
        if self.status != GameStatus::Running {
            return StepResult::idle();
        }

        if self.food.is_none() {
            if let Err(err) = self.place_food() {
                return self.finish(err.into(), false);
            }
        }

        let direction = self.pending_direction;
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let new_head = self.snake.head().wrapped_step(direction, width, height);

        // Checked after the shift: the cell the tail leaves is free to enter
        let moved = Snake {
            body: self.snake.shifted(new_head),
            direction,
        };
        if moved.collides_with_body(new_head) {
            return self.finish(GameOverReason::SelfCollision, false);
        }

        self.snake = moved;
        self.steps += 1;
        self.rebuild_grid();

        let ate_food = self.food == Some(new_head);
        if ate_food {
            let tail = self.snake.tail_extension(direction, width, height);
            if self.snake.body.contains(&tail) {
                self.food = None;
                self.rebuild_grid();
                return self.finish(GameOverReason::SelfCollision, true);
            }
            self.snake.body.push(tail);
            self.food = None;
            self.rebuild_grid();
            if let Err(err) = self.place_food() {
                return self.finish(err.into(), true);
            }
            debug!("food eaten, length now {}", self.snake.len());
        }

        StepResult {
            ate_food,
            terminated: false,
            reason: None,
        }
    }

    fn place_food(&mut self) -> Result<(), PlacementError> {
        let pos = self.placer.place(&self.grid)?;
        self.food = Some(pos);
        self.rebuild_grid();
        Ok(())
    }

    fn finish(&mut self, reason: GameOverReason, ate_food: bool) -> StepResult {
        self.status = GameStatus::Over(reason);
        info!(
            "game over after {} steps: {:?}, length {}",
            self.steps,
            reason,
            self.snake.len()
        );
        StepResult::game_over(reason, ate_food)
    }

    fn rebuild_grid(&mut self) {
        self.grid = Grid::project(
            self.config.grid_width,
            self.config.grid_height,
            &self.snake.body,
            self.food,
        );
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Direction the next step will move in
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Completed steps since the last start
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl From<PlacementError> for GameOverReason {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::BoardFull => GameOverReason::BoardFull,
        }
    }
}
