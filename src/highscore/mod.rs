//! Best-score persistence per (mode, difficulty)
//!
//! Provides:
//! - `HighScoreStore` trait with file-backed and in-memory implementations
//! - `ScoreBoard`, which keeps the game running on an in-memory best score
//!   when the backing store fails

pub mod board;
pub mod store;

pub use board::{RecordResult, ScoreBoard};
pub use store::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
