use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::game::RoundConfig;

/// Storage for one best score per round configuration
pub trait HighScoreStore {
    /// Best score recorded for `config`, 0 when none
    fn get(&self, config: RoundConfig) -> Result<u32>;

    /// Record `score` if it beats the stored one
    ///
    /// Returns whether the stored value changed.
    fn set(&mut self, config: RoundConfig, score: u32) -> Result<bool>;
}

/// One decimal text file per configuration, `highscore_{mode}_{difficulty}.txt`
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    dir: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, config: RoundConfig) -> PathBuf {
        self.dir.join(format!("highscore_{}.txt", config.key()))
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn get(&self, config: RoundConfig) -> Result<u32> {
        let path = self.path_for(config);
        if !path.exists() {
            return Ok(0);
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read high score from {:?}", path))?;
        text.trim()
            .parse::<u32>()
            .with_context(|| format!("Malformed high score in {:?}", path))
    }

    fn set(&mut self, config: RoundConfig, score: u32) -> Result<bool> {
        if score <= self.get(config)? {
            return Ok(false);
        }

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {:?}", self.dir))?;

        let path = self.path_for(config);
        std::fs::write(&path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", path))?;

        Ok(true)
    }
}

/// Scores kept for the lifetime of the process only
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    scores: HashMap<String, u32>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn get(&self, config: RoundConfig) -> Result<u32> {
        Ok(self.scores.get(&config.key()).copied().unwrap_or(0))
    }

    fn set(&mut self, config: RoundConfig, score: u32) -> Result<bool> {
        let best = self.scores.entry(config.key()).or_insert(0);
        if score > *best {
            *best = score;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
