//! Terminal presentation: screen drawing and sound cues

pub mod renderer;
pub mod sound;

pub use renderer::Renderer;
pub use sound::{SoundCue, SoundPlayer};
