use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Per-tick input signal fed into a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Request a new heading for the next move
    Turn(Direction),
    /// Pause or resume the round
    TogglePause,
    /// Abandon the round
    Quit,
    /// Keep going
    None,
}

impl From<Direction> for Input {
    fn from(direction: Direction) -> Self {
        Input::Turn(direction)
    }
}
