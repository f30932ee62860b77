use log::{info, warn};
use std::collections::HashMap;

use super::store::HighScoreStore;
use crate::game::RoundConfig;

/// What happened when a finished round was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordResult {
    /// Best score for the configuration after recording
    pub best: u32,
    /// The round beat the previous best
    pub new_best: bool,
    /// The backing store accepted the write
    pub persisted: bool,
}

/// Best scores for the running session, backed by a persistent store
///
/// Store failures never interrupt play: they are logged, remembered for
/// display, and the board carries on with its in-memory copy.
pub struct ScoreBoard {
    store: Box<dyn HighScoreStore + Send>,
    session: HashMap<RoundConfig, u32>,
    last_error: Option<String>,
}

impl ScoreBoard {
    pub fn new(store: impl HighScoreStore + Send + 'static) -> Self {
        Self {
            store: Box::new(store),
            session: HashMap::new(),
            last_error: None,
        }
    }

    /// Best known score for `config`
    pub fn best(&mut self, config: RoundConfig) -> u32 {
        let session = self.session.get(&config).copied().unwrap_or(0);
        match self.store.get(config) {
            Ok(stored) => stored.max(session),
            Err(e) => {
                warn!("Could not read high score for {}: {:#}", config.key(), e);
                self.last_error = Some(format!("{:#}", e));
                session
            }
        }
    }

    /// Record the final score of a round
    pub fn record(&mut self, config: RoundConfig, score: u32) -> RecordResult {
        let previous = self.best(config);
        let best = previous.max(score);
        self.session.insert(config, best);

        let persisted = match self.store.set(config, score) {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    "Could not save high score {} for {}, keeping it in memory: {:#}",
                    score,
                    config.key(),
                    e
                );
                self.last_error = Some(format!("{:#}", e));
                false
            }
        };

        let new_best = score > previous;
        if new_best {
            info!("New best for {}: {}", config.key(), score);
        }

        RecordResult {
            best,
            new_best,
            persisted,
        }
    }

    /// Message of the most recent store failure, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Difficulty, GameMode};
    use crate::highscore::{FileHighScoreStore, MemoryHighScoreStore};
    use anyhow::{bail, Result};
    use tempfile::TempDir;

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn get(&self, _config: RoundConfig) -> Result<u32> {
            bail!("disk unplugged")
        }

        fn set(&mut self, _config: RoundConfig, _score: u32) -> Result<bool> {
            bail!("disk unplugged")
        }
    }

    fn classic_medium() -> RoundConfig {
        RoundConfig::new(GameMode::Classic, Difficulty::Medium)
    }

    #[test]
    fn test_record_tracks_best() {
        let mut board = ScoreBoard::new(MemoryHighScoreStore::new());

        let first = board.record(classic_medium(), 40);
        assert!(first.new_best);
        assert!(first.persisted);
        assert_eq!(first.best, 40);

        let second = board.record(classic_medium(), 30);
        assert!(!second.new_best);
        assert_eq!(second.best, 40);
        assert_eq!(board.best(classic_medium()), 40);
    }

    #[test]
    fn test_reads_through_to_files() {
        let dir = TempDir::new().unwrap();
        let mut store = FileHighScoreStore::new(dir.path());
        store.set(classic_medium(), 90).unwrap();

        let mut board = ScoreBoard::new(FileHighScoreStore::new(dir.path()));
        assert_eq!(board.best(classic_medium()), 90);

        board.record(classic_medium(), 150);
        assert_eq!(store.get(classic_medium()).unwrap(), 150);
    }

    #[test]
    fn test_falls_back_to_memory_on_failure() {
        let mut board = ScoreBoard::new(BrokenStore);

        assert_eq!(board.best(classic_medium()), 0);
        assert!(board.last_error().unwrap().contains("disk unplugged"));
        board.clear_error();

        let result = board.record(classic_medium(), 70);
        assert!(!result.persisted);
        assert!(result.new_best);
        assert!(board.last_error().is_some());

        assert_eq!(board.best(classic_medium()), 70);
        let lower = board.record(classic_medium(), 20);
        assert!(!lower.new_best);
        assert_eq!(lower.best, 70);
    }
}
