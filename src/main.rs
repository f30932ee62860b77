use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

use arcade_snake::app::{App, Router};
use arcade_snake::game::{Difficulty, GameEngine, GameMode, GameSettings, RoundConfig};
use arcade_snake::highscore::{FileHighScoreStore, ScoreBoard};
use arcade_snake::render::SoundPlayer;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Terminal Snake with classic and chrono modes")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start a round in this mode right away (needs --difficulty)
    #[arg(long, value_enum, requires = "difficulty")]
    mode: Option<GameMode>,

    /// Difficulty of the round started with --mode
    #[arg(long, value_enum, requires = "mode")]
    difficulty: Option<Difficulty>,

    /// Seed for obstacle and apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between game ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Directory holding the high-score files
    #[arg(long)]
    scores_dir: Option<PathBuf>,

    /// Do not ring the terminal bell
    #[arg(long)]
    no_sound: bool,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace, off)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Settings file (or defaults) with command-line values on top
    fn settings(&self) -> Result<GameSettings> {
        let mut settings = match &self.config {
            Some(path) => GameSettings::load(path)?,
            None => GameSettings::default(),
        };

        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_interval_ms = tick_ms;
        }
        if let Some(dir) = &self.scores_dir {
            settings.scores_dir = dir.clone();
        }
        if self.no_sound {
            settings.sound = false;
        }
        if let Some(path) = &self.log_file {
            settings.log_file = path.clone();
        }
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn init_logging(path: &Path, level: &str) -> Result<()> {
    let level: LevelFilter = level
        .parse()
        .map_err(|_| anyhow!("unknown log level '{}'", level))?;
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    init_logging(&settings.log_file, &settings.log_level)?;
    info!("Starting with {:?}", settings);

    let scores = ScoreBoard::new(FileHighScoreStore::new(settings.scores_dir.clone()));
    let sound = SoundPlayer::new(settings.sound);
    let tick_interval = settings.tick_interval();

    let mut router = Router::new(GameEngine::new(settings), scores);
    if let (Some(mode), Some(difficulty)) = (cli.mode, cli.difficulty) {
        router.start_round(RoundConfig::new(mode, difficulty));
    }

    App::new(router, sound, tick_interval).run().await
}
