use std::time::Duration;

use super::apple::Apple;
use super::config::RoundConfig;
use super::grid::{Cell, GridGeometry};
use super::obstacles::ObstacleSet;
use super::snake::Snake;

/// Where a round stands after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    GameOver,
    Victory,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

/// Complete state of one play session
///
/// Created by [`GameEngine::start_round`](super::GameEngine::start_round)
/// and advanced by [`GameEngine::tick`](super::GameEngine::tick).
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub config: RoundConfig,
    pub grid: GridGeometry,
    pub snake: Snake,
    pub obstacles: ObstacleSet,
    pub apple: Apple,
    pub special_apple: Option<Apple>,
    pub score: u32,
    /// Round clock; frozen while paused
    pub elapsed: Duration,
    /// Time between two ticks
    pub tick_interval: Duration,
    pub ticks: u64,
    pub paused: bool,
    pub outcome: Outcome,
}

impl RoundState {
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Countdown left in chrono mode
    pub fn time_remaining(&self) -> Option<Duration> {
        self.config
            .chrono_rules()
            .map(|rules| rules.time_limit.saturating_sub(self.elapsed))
    }

    /// Everything the presentation needs to draw this round
    pub fn snapshot(&self, high_score: u32) -> RenderSnapshot {
        let mut obstacles: Vec<Cell> = self.obstacles.iter().copied().collect();
        obstacles.sort();

        RenderSnapshot {
            grid: self.grid,
            config: self.config,
            snake: self.snake.body.clone(),
            obstacles,
            apple: self.apple.position.map(|cell| AppleView {
                cell,
                special: self.apple.special,
            }),
            special_apple: self.special_apple.as_ref().and_then(|apple| {
                apple.position.map(|cell| SpecialAppleView {
                    cell,
                    remaining_fraction: apple.remaining_fraction(self.elapsed),
                })
            }),
            score: self.score,
            high_score: high_score.max(self.score),
            elapsed: self.elapsed,
            time_remaining: self.time_remaining(),
            paused: self.paused,
            outcome: self.outcome,
        }
    }
}

/// The normal apple as drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppleView {
    pub cell: Cell,
    pub special: bool,
}

/// The special apple as drawn, with its countdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialAppleView {
    pub cell: Cell,
    /// Remaining lifetime in `[0, 1]`
    pub remaining_fraction: f64,
}

/// Read-only view of a round for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub grid: GridGeometry,
    pub config: RoundConfig,
    /// Head first
    pub snake: Vec<Cell>,
    pub obstacles: Vec<Cell>,
    pub apple: Option<AppleView>,
    pub special_apple: Option<SpecialAppleView>,
    pub score: u32,
    pub high_score: u32,
    pub elapsed: Duration,
    /// Only in chrono mode
    pub time_remaining: Option<Duration>,
    pub paused: bool,
    pub outcome: Outcome,
}
