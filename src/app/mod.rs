//! Screen flow and the interactive terminal loop

pub mod router;
pub mod runner;
pub mod screen;

pub use router::Router;
pub use runner::App;
pub use screen::{Menu, MenuItem, RoundSummary, Screen, Session};
