use std::time::Instant;

use log::{debug, info};

use crate::config::{clamp_speed, GameConfig, SPEED_STEP_MS};
use crate::game::{GameState, GameStatus, Snapshot, TickOutcome};
use crate::input::GameInput;
use crate::scheduler::{tick_interval, IntervalScheduler, Scheduler};
use crate::score::{HighScoreTracker, ScoreStore};

/// Drives one engine with an injected scheduler and score store.
///
/// The session keeps the scheduler armed exactly while the game is running,
/// so a reset or game over can never be followed by a stale tick.
#[derive(Debug)]
pub struct Session<St, Sc = IntervalScheduler> {
    state: GameState,
    scheduler: Sc,
    scores: HighScoreTracker<St>,
    speed_ms: u64,
}

impl<St: ScoreStore> Session<St, IntervalScheduler> {
    /// Creates a session around `state` with a fresh interval scheduler.
    pub fn new(state: GameState, config: GameConfig, store: St) -> Self {
        Self::with_scheduler(state, config, store, IntervalScheduler::new())
    }
}

impl<St: ScoreStore, Sc: Scheduler> Session<St, Sc> {
    pub fn with_scheduler(state: GameState, config: GameConfig, store: St, scheduler: Sc) -> Self {
        Self {
            state,
            scheduler,
            scores: HighScoreTracker::load(store),
            speed_ms: clamp_speed(config.speed_ms),
        }
    }

    /// Applies one input. [`GameInput::Quit`] is left to the caller.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) {
        match input {
            GameInput::Direction(direction) => self.state.set_direction(direction),
            GameInput::StartPause => {
                self.state.start_pause();
                self.sync_scheduler(now);
            }
            GameInput::Reset => {
                self.scheduler.stop();
                self.state.reset();
            }
            GameInput::Faster => self.set_speed(self.speed_ms.saturating_sub(SPEED_STEP_MS), now),
            GameInput::Slower => self.set_speed(self.speed_ms + SPEED_STEP_MS, now),
            GameInput::Quit => {}
        }
    }

    /// Changes the tick period; a running schedule restarts with it.
    pub fn set_speed(&mut self, speed_ms: u64, now: Instant) {
        let speed_ms = clamp_speed(speed_ms);
        if speed_ms == self.speed_ms {
            return;
        }

        self.speed_ms = speed_ms;
        debug!("speed set to {speed_ms} ms");
        if self.scheduler.is_running() {
            self.scheduler.start(tick_interval(speed_ms), now);
        }
    }

    /// Ticks the engine if the scheduler says a tick is due.
    ///
    /// The score is reported after every tick that ran.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.scheduler.poll(now) {
            return None;
        }

        let outcome = self.state.tick();
        self.scores.report(self.state.score());

        if self.state.status() == GameStatus::GameOver {
            self.scheduler.stop();
            info!(
                "game over after {} ticks, score {}",
                self.state.tick_count(),
                self.state.score()
            );
        }

        Some(outcome)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.scores.best()
    }

    #[must_use]
    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.scheduler.is_running()
    }

    fn sync_scheduler(&mut self, now: Instant) {
        if self.state.status() == GameStatus::Running {
            self.scheduler.start(tick_interval(self.speed_ms), now);
        } else {
            self.scheduler.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::GameConfig;
    use crate::food::Food;
    use crate::game::{GameState, GameStatus, TickOutcome};
    use crate::input::{Direction, GameInput};
    use crate::score::MemoryScoreStore;
    use crate::snake::{Position, Snake};

    use super::Session;

    fn session(seed: u64) -> Session<MemoryScoreStore> {
        let config = GameConfig::default();
        Session::new(
            GameState::with_seed(config, seed),
            config,
            MemoryScoreStore::new(),
        )
    }

    #[test]
    fn nothing_ticks_before_start() {
        let mut session = session(1);
        let now = Instant::now();

        assert_eq!(session.update(now + Duration::from_secs(5)), None);
        assert!(!session.is_scheduled());
    }

    #[test]
    fn start_arms_scheduler_and_pause_disarms_it() {
        let mut session = session(2);
        let start = Instant::now();

        session.handle_input(GameInput::StartPause, start);
        assert!(session.is_scheduled());
        assert!(session.update(start + Duration::from_millis(160)).is_some());

        let paused_at = start + Duration::from_millis(200);
        session.handle_input(GameInput::StartPause, paused_at);
        assert_eq!(session.state().status(), GameStatus::Paused);
        assert_eq!(session.update(paused_at + Duration::from_secs(1)), None);
    }

    #[test]
    fn reset_stops_the_schedule() {
        let mut session = session(3);
        let start = Instant::now();

        session.handle_input(GameInput::StartPause, start);
        session.handle_input(GameInput::Reset, start);

        assert!(!session.is_scheduled());
        assert_eq!(session.state().status(), GameStatus::Idle);
        assert_eq!(session.update(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn speed_controls_clamp_and_restart() {
        let mut session = session(4);
        let start = Instant::now();
        session.handle_input(GameInput::StartPause, start);

        for _ in 0..20 {
            session.handle_input(GameInput::Faster, start);
        }
        assert_eq!(session.speed_ms(), 80);
        assert!(session.update(start + Duration::from_millis(80)).is_some());

        for _ in 0..30 {
            session.handle_input(GameInput::Slower, start);
        }
        assert_eq!(session.speed_ms(), 300);
    }

    #[test]
    fn eating_reports_a_new_high_score() {
        let config = GameConfig::default();
        let mut state = GameState::with_seed(config, 5);
        state.set_snake(Snake::new(Position::new(4, 4), Direction::Up));
        state.set_food(Food::new(Position::new(4, 3)));
        let mut session = Session::new(state, config, MemoryScoreStore::with_high_score(0));
        let start = Instant::now();
        session.handle_input(GameInput::StartPause, start);

        assert_eq!(
            session.update(start + Duration::from_millis(160)),
            Some(TickOutcome::Ate)
        );
        assert_eq!(session.high_score(), 1);
    }

    #[test]
    fn game_over_stops_the_schedule() {
        let config = GameConfig::default();
        let mut state = GameState::with_seed(config, 6);
        state.set_snake(Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(3, 1),
                Position::new(2, 1),
            ],
            Direction::Left,
        ));
        state.set_food(Food::new(Position::new(9, 9)));
        let mut session = Session::new(state, config, MemoryScoreStore::with_high_score(7));
        let start = Instant::now();
        session.handle_input(GameInput::StartPause, start);
        session.handle_input(GameInput::Direction(Direction::Up), start);

        assert_eq!(
            session.update(start + Duration::from_millis(160)),
            Some(TickOutcome::Collided)
        );
        assert!(!session.is_scheduled());
        assert_eq!(session.state().status(), GameStatus::GameOver);
        assert_eq!(session.high_score(), 7);

        session.handle_input(GameInput::StartPause, start);
        assert!(!session.is_scheduled());
    }
}
