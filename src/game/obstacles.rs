//! Obstacle layouts per difficulty

use rand::Rng;
use std::collections::HashSet;

use super::config::Difficulty;
use super::grid::{Cell, GridGeometry};
use super::snake::Snake;

/// Cells the snake dies on; fixed for the lifetime of a round
pub type ObstacleSet = HashSet<Cell>;

/// Random interior obstacles placed on hard
pub const HARD_INTERIOR_OBSTACLES: usize = 10;

/// Build the obstacle set for a round
///
/// Easy has none, medium walls off the border, hard adds
/// [`HARD_INTERIOR_OBSTACLES`] random interior cells that avoid the snake and
/// each other. Interior cells are drawn from columns `1..cols-1` and rows
/// `2..rows-1`.
pub fn generate<R: Rng + ?Sized>(
    difficulty: Difficulty,
    grid: &GridGeometry,
    snake: &Snake,
    rng: &mut R,
) -> ObstacleSet {
    let mut obstacles = ObstacleSet::new();

    if difficulty == Difficulty::Easy {
        return obstacles;
    }

    obstacles.extend(grid.border_cells());

    if difficulty == Difficulty::Hard {
        place_interior(&mut obstacles, grid, snake, HARD_INTERIOR_OBSTACLES, rng);
    }

    obstacles
}

fn place_interior<R: Rng + ?Sized>(
    obstacles: &mut ObstacleSet,
    grid: &GridGeometry,
    snake: &Snake,
    count: usize,
    rng: &mut R,
) {
    let (x_range, y_range) = (1..grid.columns() - 1, 2..grid.rows() - 1);
    if x_range.is_empty() || y_range.is_empty() {
        return;
    }

    let free = x_range
        .clone()
        .flat_map(|x| y_range.clone().map(move |y| Cell::new(x, y)))
        .filter(|cell| !snake.occupies(*cell) && !obstacles.contains(cell))
        .count();

    // Rejection sampling always terminates once we never ask for more than fits
    for _ in 0..count.min(free) {
        loop {
            let candidate = Cell::new(
                rng.gen_range(x_range.clone()),
                rng.gen_range(y_range.clone()),
            );
            if !snake.occupies(candidate) && obstacles.insert(candidate) {
                break;
            }
        }
    }
}
