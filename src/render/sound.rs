use log::debug;
use std::io::{stderr, Write};

/// Something worth a sound during play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    Teleport,
    GameOver,
    Victory,
}

/// Rings the terminal bell for sound cues
///
/// Terminals offer no real audio, so every cue maps to the bell. A failed
/// write is ignored.
pub struct SoundPlayer {
    enabled: bool,
}

impl SoundPlayer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn play(&self, cue: SoundCue) {
        if !self.enabled {
            return;
        }
        debug!("Sound: {:?}", cue);
        let mut out = stderr();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }

    pub fn play_all(&self, cues: &[SoundCue]) {
        // At most one bell per tick
        if let Some(cue) = cues.last() {
            self.play(*cue);
        }
    }
}

impl Default for SoundPlayer {
    fn default() -> Self {
        Self::new(true)
    }
}
