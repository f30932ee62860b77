//! Core round logic for Snake
//!
//! This module contains all the game rules without any I/O or rendering
//! dependencies: movement, teleportation, obstacles, apples and the
//! score/time state machine of a round.

pub mod action;
pub mod apple;
pub mod config;
pub mod engine;
pub mod grid;
pub mod obstacles;
pub mod round;
pub mod snake;

// Re-export commonly used types
pub use action::{Direction, Input};
pub use apple::Apple;
pub use config::{ChronoRules, Difficulty, GameMode, GameSettings, RoundConfig};
pub use engine::{GameEngine, TickEvent, TickResult};
pub use grid::{Cell, GridGeometry};
pub use obstacles::ObstacleSet;
pub use round::{AppleView, Outcome, RenderSnapshot, RoundState, SpecialAppleView};
pub use snake::{MoveResult, Snake};
