use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GameConfig, MIN_GRID_SIZE};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Freshly reset, waiting for the first start.
    Idle,
    Running,
    Paused,
    /// Terminal until the next reset.
    GameOver,
}

impl GameStatus {
    /// Returns true for every status except [`GameStatus::GameOver`].
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::GameOver
    }
}

/// What a single [`GameState::tick`] call did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed.
    Idle,
    /// The snake moved one cell.
    Moved,
    /// The snake moved onto the food and grew.
    Ate,
    /// The move would have entered the body; the game is over.
    Collided,
}

/// Owned copy of everything a renderer or score tracker reads.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    /// Body cells from head to tail.
    pub cells: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub status: GameStatus,
    pub direction: Direction,
    pub grid_size: u16,
    pub tick_count: u64,
}

impl Snapshot {
    #[must_use]
    pub fn head(&self) -> Position {
        self.cells[0]
    }
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    food: Food,
    score: u32,
    tick_count: u64,
    status: GameStatus,
    grid_size: u16,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics when `config.grid_size` is below [`MIN_GRID_SIZE`]; run
    /// [`GameConfig::validate`] on untrusted configs first.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    ///
    /// # Panics
    ///
    /// Same as [`GameState::new`].
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let grid_size = config.grid_size;
        assert!(
            grid_size >= MIN_GRID_SIZE,
            "grid size must be at least {MIN_GRID_SIZE}, got {grid_size}"
        );
        let snake = initial_snake(grid_size);
        let food = Food::spawn(&mut rng, grid_size, &snake);

        Self {
            snake,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Idle,
            grid_size,
            rng,
        }
    }

    /// Reinitializes snake, food, score and status; the game is left idle.
    pub fn reset(&mut self) {
        self.snake = initial_snake(self.grid_size);
        self.food = Food::spawn(&mut self.rng, self.grid_size, &self.snake);
        self.score = 0;
        self.tick_count = 0;
        self.status = GameStatus::Idle;
        info!("game reset on {0}x{0} board", self.grid_size);
    }

    /// Resets and immediately starts running.
    pub fn reset_and_start(&mut self) {
        self.reset();
        self.status = GameStatus::Running;
    }

    /// Toggles between running and paused. An idle game starts running.
    ///
    /// Has no effect after game over.
    pub fn start_pause(&mut self) {
        let next = match self.status {
            GameStatus::Idle | GameStatus::Paused => GameStatus::Running,
            GameStatus::Running => GameStatus::Paused,
            GameStatus::GameOver => return,
        };

        debug!("status {:?} -> {next:?}", self.status);
        self.status = next;
    }

    /// Buffers a direction change for the next tick.
    ///
    /// Ignored after game over and for reversals of a multi-cell snake.
    pub fn set_direction(&mut self, requested: Direction) {
        if !self.status.is_active() {
            return;
        }

        if !self.snake.request_direction(requested) {
            debug!(
                "ignored reversal {requested:?} while moving {:?}",
                self.snake.direction()
            );
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }

        self.snake.commit_direction();
        let new_head = self.snake.next_head_position(self.grid_size);

        // The pre-move body is the hazard set, tail included.
        if self.snake.occupies(new_head) {
            self.status = GameStatus::GameOver;
            info!(
                "self-collision at ({}, {}) with length {} and score {}",
                new_head.x,
                new_head.y,
                self.snake.len(),
                self.score
            );
            return TickOutcome::Collided;
        }

        self.tick_count += 1;

        if new_head == self.food.position {
            self.snake.advance(new_head, true);
            self.score += 1;
            self.food = Food::spawn(&mut self.rng, self.grid_size, &self.snake);
            debug!(
                "ate food, score {} length {}, next food at ({}, {})",
                self.score,
                self.snake.len(),
                self.food.position.x,
                self.food.position.y
            );
            return TickOutcome::Ate;
        }

        self.snake.advance(new_head, false);
        TickOutcome::Moved
    }

    /// Returns an owned copy of the current state for readers.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.snake.segments().copied().collect(),
            food: self.food.position,
            score: self.score,
            status: self.status,
            direction: self.snake.direction(),
            grid_size: self.grid_size,
            tick_count: self.tick_count,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn grid_size(&self) -> u16 {
        self.grid_size
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    /// Replaces the snake, e.g. to set up a scenario.
    ///
    /// Food covered by the new body is placed again on a free cell.
    ///
    /// # Panics
    ///
    /// Panics when any segment lies outside the board.
    pub fn set_snake(&mut self, snake: Snake) {
        assert!(
            snake.segments().all(|cell| cell.is_within_bounds(self.grid_size)),
            "snake segments must lie on the board"
        );
        self.snake = snake;

        if self.snake.occupies(self.food.position) {
            self.food = Food::spawn(&mut self.rng, self.grid_size, &self.snake);
        }
    }

    /// Moves the food, e.g. to set up a scenario.
    ///
    /// # Panics
    ///
    /// Panics when `food` is off the board or on the snake.
    pub fn set_food(&mut self, food: Food) {
        assert!(
            food.position.is_within_bounds(self.grid_size),
            "food must lie on the board"
        );
        assert!(
            !self.snake.occupies(food.position),
            "food must not overlap the snake"
        );
        self.food = food;
    }
}

fn initial_snake(grid_size: u16) -> Snake {
    let center = i32::from(grid_size / 2);
    Snake::new(Position::new(center, center), Direction::Right)
}
