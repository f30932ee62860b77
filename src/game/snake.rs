use std::collections::HashSet;

use super::action::Direction;
use super::grid::{Cell, GridGeometry};
use super::round::Outcome;

/// Points lost each time the snake wraps around a border
pub const TELEPORT_PENALTY: u32 = 10;

/// Result of moving the snake one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// `Continue` or `GameOver`
    pub outcome: Outcome,
    /// Score after any teleport penalty
    pub score: u32,
    /// Whether the head wrapped around a border
    pub teleported: bool,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Direction applied on the last move
    pub direction: Direction,
    /// Direction requested for the next move
    pub pending_direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self {
            body,
            direction,
            pending_direction: direction,
        }
    }

    /// The snake every round starts with: pixels (100,100) (80,100) (60,100)
    /// heading right
    pub fn starting(grid: &GridGeometry) -> Self {
        Self::new(grid.from_pixels(100, 100), Direction::Right, 3)
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[1..]
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Queue a heading for the next move; reversing onto the body is ignored
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.pending_direction = direction;
        }
    }

    /// Advance one cell in the pending direction
    ///
    /// With `teleport_allowed` the head wraps to the opposite edge and the
    /// score drops by [`TELEPORT_PENALTY`] (never below zero). Reaching zero
    /// through a teleport ends the round. Without it, leaving the grid ends
    /// the round. Either way a fatal move leaves the body where it was.
    pub fn step(&mut self, grid: &GridGeometry, teleport_allowed: bool, score: u32) -> MoveResult {
        if !self.direction.is_opposite(self.pending_direction) {
            self.direction = self.pending_direction;
        }

        let mut head = self.head().moved_in_direction(self.direction);
        let mut score = score;
        let mut teleported = false;

        if !grid.contains(head) {
            if !teleport_allowed {
                return MoveResult {
                    outcome: Outcome::GameOver,
                    score,
                    teleported,
                };
            }

            head = grid.wrap(head);
            teleported = true;
            score = score.saturating_sub(TELEPORT_PENALTY);

            if score == 0 {
                return MoveResult {
                    outcome: Outcome::GameOver,
                    score,
                    teleported,
                };
            }
        }

        self.body.insert(0, head);
        self.body.pop();

        MoveResult {
            outcome: Outcome::Continue,
            score,
            teleported,
        }
    }

    /// Append a copy of the tail; it separates from the tail on the next move
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    /// Head overlaps its own body or an obstacle
    pub fn check_collision(&self, obstacles: &HashSet<Cell>) -> bool {
        let head = self.head();
        self.body_segments().contains(&head) || obstacles.contains(&head)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
