use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::grid::GridGeometry;
use super::snake::Snake;

/// Difficulty tier of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Borders teleport, no obstacles
    Easy,
    /// Border wall
    Medium,
    /// Border wall plus random interior obstacles
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game mode of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Open-ended, ends only on game over
    Classic,
    /// Countdown with a score threshold for victory
    Chrono,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Classic, GameMode::Chrono];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Chrono => "chrono",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time limit and score threshold of a chrono round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChronoRules {
    pub time_limit: Duration,
    pub victory_score: u32,
}

/// Immutable parameters of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundConfig {
    pub difficulty: Difficulty,
    pub mode: GameMode,
}

impl RoundConfig {
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self { difficulty, mode }
    }

    /// Only easy rounds wrap around the borders
    pub fn teleport_allowed(&self) -> bool {
        self.difficulty == Difficulty::Easy
    }

    /// Countdown rules, present only in chrono mode
    pub fn chrono_rules(&self) -> Option<ChronoRules> {
        if self.mode != GameMode::Chrono {
            return None;
        }

        let (secs, victory_score) = match self.difficulty {
            Difficulty::Easy => (180, 500),
            Difficulty::Medium => (120, 300),
            Difficulty::Hard => (60, 200),
        };

        Some(ChronoRules {
            time_limit: Duration::from_secs(secs),
            victory_score,
        })
    }

    /// Stable key for persisted data, e.g. `chrono_hard`
    pub fn key(&self) -> String {
        format!("{}_{}", self.mode, self.difficulty)
    }
}

impl fmt::Display for RoundConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.mode, self.difficulty)
    }
}

/// Smallest playfield side, in cells, that fits the starting snake
pub const MIN_GRID_CELLS: i32 = 8;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Playfield geometry
    pub grid: GridGeometry,
    /// Milliseconds between two game ticks
    pub tick_interval_ms: u64,
    /// Fixed rng seed, random when absent
    pub seed: Option<u64>,
    /// Directory holding the high-score files
    pub scores_dir: PathBuf,
    /// Ring the terminal bell on game events
    pub sound: bool,
    /// Where log output goes
    pub log_file: PathBuf,
    /// Log level name (error, warn, info, debug, trace, off)
    pub log_level: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid: GridGeometry::default(),
            tick_interval_ms: 100,
            seed: None,
            scores_dir: PathBuf::from("highscore"),
            sound: true,
            log_file: PathBuf::from("arcade_snake.log"),
            log_level: "info".to_string(),
        }
    }
}

impl GameSettings {
    /// Load settings from a JSON file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: GameSettings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings in {:?}", path))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate settings values
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be greater than zero");
        }

        let grid = &self.grid;
        if grid.cell_size <= 0 {
            bail!("cell_size must be positive, got {}", grid.cell_size);
        }
        if grid.width_px % grid.cell_size != 0 || grid.height_px % grid.cell_size != 0 {
            bail!(
                "playfield {}x{} is not a multiple of cell size {}",
                grid.width_px,
                grid.height_px,
                grid.cell_size
            );
        }
        if grid.columns() < MIN_GRID_CELLS || grid.rows() < MIN_GRID_CELLS {
            bail!(
                "playfield must be at least {MIN_GRID_CELLS}x{MIN_GRID_CELLS} cells, got {}x{}",
                grid.columns(),
                grid.rows()
            );
        }

        // The starting snake must sit clear of the border wall
        let start = Snake::starting(grid);
        if let Some(cell) = start
            .body
            .iter()
            .find(|cell| !grid.contains(**cell) || grid.is_border(**cell))
        {
            bail!(
                "starting snake does not fit a {}x{} playfield of {} px cells (segment at {:?})",
                grid.columns(),
                grid.rows(),
                grid.cell_size,
                cell
            );
        }

        self.log_level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("unknown log level '{}'", self.log_level))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GameSettings::default();
        assert_eq!(settings.grid.columns(), 40);
        assert_eq!(settings.grid.rows(), 30);
        assert_eq!(settings.tick_interval(), Duration::from_millis(100));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_chrono_rules() {
        let easy = RoundConfig::new(GameMode::Chrono, Difficulty::Easy).chrono_rules();
        let medium = RoundConfig::new(GameMode::Chrono, Difficulty::Medium).chrono_rules();
        let hard = RoundConfig::new(GameMode::Chrono, Difficulty::Hard).chrono_rules();

        assert_eq!(easy.map(|r| (r.time_limit.as_secs(), r.victory_score)), Some((180, 500)));
        assert_eq!(medium.map(|r| (r.time_limit.as_secs(), r.victory_score)), Some((120, 300)));
        assert_eq!(hard.map(|r| (r.time_limit.as_secs(), r.victory_score)), Some((60, 200)));

        assert!(RoundConfig::new(GameMode::Classic, Difficulty::Hard)
            .chrono_rules()
            .is_none());
    }

    #[test]
    fn test_teleport_only_on_easy() {
        assert!(RoundConfig::new(GameMode::Classic, Difficulty::Easy).teleport_allowed());
        assert!(!RoundConfig::new(GameMode::Classic, Difficulty::Medium).teleport_allowed());
        assert!(!RoundConfig::new(GameMode::Chrono, Difficulty::Hard).teleport_allowed());
    }

    #[test]
    fn test_round_key() {
        let config = RoundConfig::new(GameMode::Chrono, Difficulty::Hard);
        assert_eq!(config.key(), "chrono_hard");
    }

    #[test]
    fn test_invalid_settings() {
        let zero_tick = GameSettings {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(zero_tick.validate().is_err());

        let ragged = GameSettings {
            grid: GridGeometry::new(810, 600, 20),
            ..Default::default()
        };
        assert!(ragged.validate().is_err());

        let tiny = GameSettings {
            grid: GridGeometry::new(140, 140, 20),
            ..Default::default()
        };
        assert!(tiny.validate().is_err());

        // 8x8 cells, but the start at pixel (100,100) lands on column 1
        let coarse = GameSettings {
            grid: GridGeometry::new(480, 480, 60),
            ..Default::default()
        };
        assert!(coarse.validate().is_err());

        let bad_level = GameSettings {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_valid_settings_start_clear_of_walls() {
        let settings = GameSettings {
            grid: GridGeometry::new(264, 264, 33),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());

        let start = Snake::starting(&settings.grid);
        assert!(start
            .body
            .iter()
            .all(|cell| settings.grid.contains(*cell) && !settings.grid.is_border(*cell)));
    }

    #[test]
    fn test_partial_settings_json() {
        let settings: GameSettings =
            serde_json::from_str(r#"{ "tick_interval_ms": 80, "seed": 7 }"#).unwrap();
        assert_eq!(settings.tick_interval_ms, 80);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.grid, GridGeometry::default());
    }

    #[test]
    fn test_load_settings_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "sound": false, "scores_dir": "scores" }"#).unwrap();

        let settings = GameSettings::load(&path).unwrap();
        assert!(!settings.sound);
        assert_eq!(settings.scores_dir, PathBuf::from("scores"));

        assert!(GameSettings::load(&dir.path().join("missing.json")).is_err());
    }
}
