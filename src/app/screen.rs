use crate::game::{Difficulty, GameMode, Outcome, RenderSnapshot, RoundConfig, RoundState};

/// An entry of a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Credits,
    Quit,
    Mode(GameMode),
    Difficulty(Difficulty),
    Replay,
    Menu,
    Back,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Start => "Start",
            MenuItem::Credits => "Credits",
            MenuItem::Quit => "Quit",
            MenuItem::Mode(GameMode::Classic) => "Classic mode",
            MenuItem::Mode(GameMode::Chrono) => "Chrono mode",
            MenuItem::Difficulty(Difficulty::Easy) => "Easy",
            MenuItem::Difficulty(Difficulty::Medium) => "Medium",
            MenuItem::Difficulty(Difficulty::Hard) => "Hard",
            MenuItem::Replay => "Replay",
            MenuItem::Menu => "Menu",
            MenuItem::Back => "Back",
        }
    }
}

/// A vertical list of choices with a highlighted entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: String,
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

impl Menu {
    pub fn new(title: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            title: title.into(),
            items,
            selected: 0,
        }
    }

    pub fn main() -> Self {
        Self::new(
            "Snake",
            vec![MenuItem::Start, MenuItem::Credits, MenuItem::Quit],
        )
    }

    pub fn modes() -> Self {
        let mut items: Vec<MenuItem> = GameMode::ALL.iter().copied().map(MenuItem::Mode).collect();
        items.push(MenuItem::Back);
        Self::new("Choose a game mode", items)
    }

    pub fn difficulties(mode: GameMode) -> Self {
        let mut items: Vec<MenuItem> = Difficulty::ALL
            .iter()
            .copied()
            .map(MenuItem::Difficulty)
            .collect();
        items.push(MenuItem::Back);
        Self::new(format!("Choose a difficulty ({mode})"), items)
    }

    pub fn result() -> Self {
        Self::new("", vec![MenuItem::Replay, MenuItem::Menu])
    }

    /// Move the highlight, wrapping at both ends
    pub fn move_selection(&mut self, down: bool) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    pub fn current(&self) -> Option<MenuItem> {
        self.items.get(self.selected).copied()
    }
}

/// A round being played, with the best score it is measured against
#[derive(Debug, Clone)]
pub struct Session {
    pub round: RoundState,
    pub best: u32,
}

impl Session {
    pub fn snapshot(&self) -> RenderSnapshot {
        self.round.snapshot(self.best)
    }
}

/// How a finished round went, for the result screen
#[derive(Debug, Clone)]
pub struct RoundSummary {
    pub config: RoundConfig,
    pub outcome: Outcome,
    pub score: u32,
    pub high_score: u32,
    pub new_best: bool,
    /// Set when the score could not be saved
    pub store_error: Option<String>,
    /// Last frame of the round
    pub snapshot: RenderSnapshot,
    pub menu: Menu,
}

/// Every screen of the application
#[derive(Debug, Clone)]
pub enum Screen {
    MainMenu(Menu),
    ModeMenu(Menu),
    DifficultyMenu { mode: GameMode, menu: Menu },
    Credits,
    Playing(Box<Session>),
    Finished(Box<RoundSummary>),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::MainMenu(_) => "main menu",
            Screen::ModeMenu(_) => "mode menu",
            Screen::DifficultyMenu { .. } => "difficulty menu",
            Screen::Credits => "credits",
            Screen::Playing(_) => "playing",
            Screen::Finished(_) => "result",
        }
    }
}
