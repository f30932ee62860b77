use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use super::{
    action::Input,
    apple::Apple,
    config::{GameSettings, RoundConfig},
    obstacles,
    round::{Outcome, RoundState},
    snake::Snake,
};

/// Points for a normal apple
pub const APPLE_POINTS: u32 = 10;
/// Points for a special apple
pub const SPECIAL_APPLE_POINTS: u32 = 20;
/// Chance that eating a normal apple brings out a special one
pub const SPECIAL_APPLE_CHANCE: f64 = 0.1;
/// A special apple always appears when the score reaches a multiple of this
pub const SPECIAL_APPLE_SCORE_STEP: u32 = 100;

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Paused,
    Resumed,
    /// The head wrapped around a border
    Teleported,
    AppleEaten,
    SpecialAppleSpawned,
    SpecialAppleEaten,
    SpecialAppleExpired,
    /// The chrono countdown ran out
    TimeUp,
    /// No free cell was left for the normal apple
    BoardFull,
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub outcome: Outcome,
    /// The player abandoned the round
    pub quit: bool,
    pub events: Vec<TickEvent>,
}

impl TickResult {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            quit: false,
            events: Vec::new(),
        }
    }
}

/// The game engine that handles all round logic
///
/// Owns the single random generator used for obstacle placement, apple
/// spawns and special-apple rolls.
pub struct GameEngine {
    settings: GameSettings,
    rng: StdRng,
}

impl GameEngine {
    /// Create an engine seeded from the settings, or from entropy
    pub fn new(settings: GameSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { settings, rng }
    }

    pub fn with_seed(settings: GameSettings, seed: u64) -> Self {
        Self {
            settings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Set up a fresh round
    pub fn start_round(&mut self, config: RoundConfig) -> RoundState {
        let grid = self.settings.grid;
        let snake = Snake::starting(&grid);
        let obstacles = obstacles::generate(config.difficulty, &grid, &snake, &mut self.rng);
        let apple = Apple::spawn(&grid, &snake, &obstacles, false, Duration::ZERO, &mut self.rng);

        info!(
            "Starting {} round with {} obstacles",
            config,
            obstacles.len()
        );

        RoundState {
            config,
            grid,
            snake,
            obstacles,
            apple,
            special_apple: None,
            score: 0,
            elapsed: Duration::ZERO,
            tick_interval: self.settings.tick_interval(),
            ticks: 0,
            paused: false,
            outcome: Outcome::Continue,
        }
    }

    /// Advance a round by one tick
    ///
    /// `dt` is the wall-clock time since the previous tick. It only counts
    /// toward the round clock when the round is running.
    pub fn tick(&mut self, state: &mut RoundState, input: Input, dt: Duration) -> TickResult {
        let mut result = TickResult::new(state.outcome);

        if state.is_over() {
            return result;
        }

        match input {
            Input::Turn(direction) => state.snake.set_pending_direction(direction),
            Input::TogglePause => {
                state.paused = !state.paused;
                result.events.push(if state.paused {
                    TickEvent::Paused
                } else {
                    TickEvent::Resumed
                });
            }
            Input::Quit => {
                info!("Round abandoned at score {}", state.score);
                result.quit = true;
                return result;
            }
            Input::None => {}
        }

        if state.paused {
            return result;
        }

        state.elapsed += dt;
        state.ticks += 1;

        if let Some(rules) = state.config.chrono_rules() {
            if state.elapsed >= rules.time_limit {
                result.events.push(TickEvent::TimeUp);
                let outcome = if state.score >= rules.victory_score {
                    Outcome::Victory
                } else {
                    Outcome::GameOver
                };
                return self.finish(state, result, outcome);
            }
        }

        let moved = state
            .snake
            .step(&state.grid, state.config.teleport_allowed(), state.score);
        state.score = moved.score;
        if moved.teleported {
            debug!("Teleported, score now {}", state.score);
            result.events.push(TickEvent::Teleported);
        }
        if moved.outcome == Outcome::GameOver {
            return self.finish(state, result, Outcome::GameOver);
        }

        if state
            .special_apple
            .as_ref()
            .is_some_and(|apple| apple.is_expired(state.elapsed))
        {
            debug!("Special apple expired");
            state.special_apple = None;
            result.events.push(TickEvent::SpecialAppleExpired);
        }

        let head = state.snake.head();
        let mut board_full = false;

        if state.apple.is_at(head) {
            state.snake.grow();
            state.score += APPLE_POINTS;
            result.events.push(TickEvent::AppleEaten);
            debug!("Apple eaten, score now {}", state.score);

            if !state
                .apple
                .respawn(&state.grid, &state.snake, &state.obstacles, &mut self.rng)
            {
                board_full = true;
                result.events.push(TickEvent::BoardFull);
            }

            if state.special_apple.is_none() && self.roll_special(state.score) {
                let special = Apple::spawn(
                    &state.grid,
                    &state.snake,
                    &state.obstacles,
                    true,
                    state.elapsed,
                    &mut self.rng,
                );
                if special.position.is_some() {
                    debug!("Special apple at {:?}", special.position);
                    state.special_apple = Some(special);
                    result.events.push(TickEvent::SpecialAppleSpawned);
                }
            }
        }

        if state
            .special_apple
            .as_ref()
            .is_some_and(|apple| apple.is_at(head))
        {
            state.snake.grow();
            state.snake.grow();
            state.score += SPECIAL_APPLE_POINTS;
            state.special_apple = None;
            result.events.push(TickEvent::SpecialAppleEaten);
            debug!("Special apple eaten, score now {}", state.score);
        }

        if state.snake.check_collision(&state.obstacles) {
            return self.finish(state, result, Outcome::GameOver);
        }

        if board_full {
            return self.finish(state, result, Outcome::Victory);
        }

        result
    }

    fn roll_special(&mut self, score: u32) -> bool {
        score % SPECIAL_APPLE_SCORE_STEP == 0 || self.rng.gen_bool(SPECIAL_APPLE_CHANCE)
    }

    fn finish(&self, state: &mut RoundState, mut result: TickResult, outcome: Outcome) -> TickResult {
        info!(
            "{} round ended: {:?} with score {} after {:.1}s",
            state.config,
            outcome,
            state.score,
            state.elapsed.as_secs_f64()
        );
        state.outcome = outcome;
        result.outcome = outcome;
        result
    }
}
