//! Arcade Snake - a terminal Snake game with classic and chrono modes
//!
//! This library provides:
//! - Core round logic, free of I/O (game module)
//! - Persistent best scores per mode and difficulty (highscore module)
//! - Screen flow and the interactive loop (app module)
//! - Key mapping (input module)
//! - TUI rendering and sound cues (render module)

pub mod app;
pub mod game;
pub mod highscore;
pub mod input;
pub mod render;
