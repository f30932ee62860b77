use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

use super::grid::{Cell, GridGeometry};
use super::obstacles::ObstacleSet;
use super::snake::Snake;

/// Lifetime of a special apple
pub const SPECIAL_APPLE_LIFETIME: Duration = Duration::from_secs(10);

/// An apple on the board
///
/// Normal apples live until eaten. Special apples also expire
/// [`SPECIAL_APPLE_LIFETIME`] after they appear. Timestamps are on the round
/// clock, so a paused round does not age its apples.
#[derive(Debug, Clone, PartialEq)]
pub struct Apple {
    /// `None` when the board had no free cell at spawn time
    pub position: Option<Cell>,
    pub special: bool,
    /// Round time at which the apple appeared
    pub spawned_at: Duration,
    pub time_limit: Duration,
}

impl Apple {
    /// Place a new apple on a random free cell
    pub fn spawn<R: Rng + ?Sized>(
        grid: &GridGeometry,
        snake: &Snake,
        obstacles: &ObstacleSet,
        special: bool,
        now: Duration,
        rng: &mut R,
    ) -> Self {
        Self {
            position: random_free_cell(grid, snake, obstacles, rng),
            special,
            spawned_at: now,
            time_limit: SPECIAL_APPLE_LIFETIME,
        }
    }

    /// Move the apple to a random free cell
    ///
    /// Returns false and keeps the old position when the board is full.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        grid: &GridGeometry,
        snake: &Snake,
        obstacles: &ObstacleSet,
        rng: &mut R,
    ) -> bool {
        match random_free_cell(grid, snake, obstacles, rng) {
            Some(cell) => {
                self.position = Some(cell);
                true
            }
            None => false,
        }
    }

    pub fn is_at(&self, cell: Cell) -> bool {
        self.position == Some(cell)
    }

    /// Time left before a special apple disappears
    pub fn remaining(&self, now: Duration) -> Duration {
        let age = now.saturating_sub(self.spawned_at);
        self.time_limit.saturating_sub(age)
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        self.special && self.remaining(now).is_zero()
    }

    /// Remaining lifetime in `[0, 1]`, for countdown bars
    pub fn remaining_fraction(&self, now: Duration) -> f64 {
        if self.time_limit.is_zero() {
            return 0.0;
        }
        (self.remaining(now).as_secs_f64() / self.time_limit.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Pick a uniformly random cell free of snake and obstacles
pub fn random_free_cell<R: Rng + ?Sized>(
    grid: &GridGeometry,
    snake: &Snake,
    obstacles: &ObstacleSet,
    rng: &mut R,
) -> Option<Cell> {
    let free: Vec<Cell> = grid
        .cells()
        .filter(|cell| !snake.occupies(*cell) && !obstacles.contains(cell))
        .collect();

    free.choose(rng).copied()
}
