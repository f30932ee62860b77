use log::{debug, info};
use std::collections::VecDeque;
use std::time::Duration;

use super::screen::{Menu, MenuItem, RoundSummary, Screen, Session};
use crate::game::{
    Direction, GameEngine, GameMode, Input, Outcome, RoundConfig, RoundState, TickEvent,
};
use crate::highscore::ScoreBoard;
use crate::input::KeyAction;
use crate::render::SoundCue;

/// Inputs buffered between two ticks
const INPUT_BUFFER: usize = 3;

/// Finite-state screen router
///
/// Holds the current screen as data and switches screens in response to key
/// actions and round outcomes. Rounds advance only through [`Router::tick`].
pub struct Router {
    screen: Screen,
    engine: GameEngine,
    scores: ScoreBoard,
    pending_inputs: VecDeque<Input>,
    should_quit: bool,
}

impl Router {
    pub fn new(engine: GameEngine, scores: ScoreBoard) -> Self {
        Self {
            screen: Screen::MainMenu(Menu::main()),
            engine,
            scores,
            pending_inputs: VecDeque::with_capacity(INPUT_BUFFER),
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn scores(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    /// Leave whatever is on screen and start a round
    pub fn start_round(&mut self, config: RoundConfig) {
        let round = self.engine.start_round(config);
        let best = self.scores.best(config);
        self.pending_inputs.clear();
        self.switch_to(Screen::Playing(Box::new(Session { round, best })));
    }

    /// React to a key press on the current screen
    pub fn handle_key(&mut self, action: KeyAction) {
        if action == KeyAction::Quit {
            self.should_quit = true;
            return;
        }

        let next = match &mut self.screen {
            Screen::Playing(_) => {
                self.queue_round_input(action);
                None
            }
            Screen::Credits => match action {
                KeyAction::Confirm | KeyAction::Back => Some(Screen::MainMenu(Menu::main())),
                _ => None,
            },
            Screen::MainMenu(menu) => match navigate(menu, &action) {
                Some(MenuItem::Start) => Some(Screen::ModeMenu(Menu::modes())),
                Some(MenuItem::Credits) => Some(Screen::Credits),
                Some(MenuItem::Quit) => {
                    self.should_quit = true;
                    None
                }
                _ => None,
            },
            Screen::ModeMenu(menu) => {
                if action == KeyAction::Back {
                    Some(Screen::MainMenu(Menu::main()))
                } else {
                    match navigate(menu, &action) {
                        Some(MenuItem::Mode(mode)) => Some(Screen::DifficultyMenu {
                            mode,
                            menu: Menu::difficulties(mode),
                        }),
                        Some(MenuItem::Back) => Some(Screen::MainMenu(Menu::main())),
                        _ => None,
                    }
                }
            }
            Screen::DifficultyMenu { mode, menu } => {
                let mode = *mode;
                if action == KeyAction::Back {
                    Some(Screen::ModeMenu(Menu::modes()))
                } else {
                    match navigate(menu, &action) {
                        Some(MenuItem::Difficulty(difficulty)) => {
                            self.start_round(RoundConfig::new(mode, difficulty));
                            return;
                        }
                        Some(MenuItem::Back) => Some(Screen::ModeMenu(Menu::modes())),
                        _ => None,
                    }
                }
            }
            Screen::Finished(summary) => {
                let config = summary.config;
                let choice = match action {
                    KeyAction::Restart => Some(MenuItem::Replay),
                    KeyAction::Back => Some(MenuItem::Menu),
                    _ => navigate(&mut summary.menu, &action),
                };
                match choice {
                    Some(MenuItem::Replay) => {
                        self.start_round(config);
                        return;
                    }
                    Some(MenuItem::Menu) => Some(difficulty_menu(config.mode)),
                    _ => None,
                }
            }
        };

        if let Some(screen) = next {
            self.switch_to(screen);
        }
    }

    /// Advance the round on screen, if any, by one tick
    pub fn tick(&mut self, dt: Duration) -> Vec<SoundCue> {
        let Screen::Playing(session) = &mut self.screen else {
            return Vec::new();
        };

        let input = self.pending_inputs.pop_front().unwrap_or(Input::None);
        let result = self.engine.tick(&mut session.round, input, dt);

        let mut cues: Vec<SoundCue> = result
            .events
            .iter()
            .filter_map(|event| match event {
                TickEvent::AppleEaten | TickEvent::SpecialAppleEaten => Some(SoundCue::Eat),
                TickEvent::Teleported => Some(SoundCue::Teleport),
                _ => None,
            })
            .collect();

        if result.quit {
            let mode = session.round.config.mode;
            self.pending_inputs.clear();
            self.switch_to(difficulty_menu(mode));
            return cues;
        }

        match result.outcome {
            Outcome::Continue => {}
            Outcome::GameOver => cues.push(SoundCue::GameOver),
            Outcome::Victory => cues.push(SoundCue::Victory),
        }

        if result.outcome.is_terminal() {
            let summary = summarize(&session.round, &mut self.scores);
            self.switch_to(Screen::Finished(Box::new(summary)));
        }

        cues
    }

    fn queue_round_input(&mut self, action: KeyAction) {
        let input = match action {
            KeyAction::GameAction(input) => input,
            KeyAction::Back => {
                // Abandoning jumps ahead of any buffered steering
                self.pending_inputs.clear();
                Input::Quit
            }
            _ => return,
        };

        // Pausing is never dropped, only steering is capped
        if input == Input::TogglePause || self.pending_inputs.len() < INPUT_BUFFER {
            self.pending_inputs.push_back(input);
        }
    }

    fn switch_to(&mut self, screen: Screen) {
        debug!("Screen: {} -> {}", self.screen.name(), screen.name());
        if let Screen::Playing(session) = &screen {
            info!("Playing {}", session.round.config);
        }
        self.screen = screen;
    }
}

/// Record a finished round and describe it for the result screen
fn summarize(round: &RoundState, scores: &mut ScoreBoard) -> RoundSummary {
    let config = round.config;

    scores.clear_error();
    let record = scores.record(config, round.score);

    RoundSummary {
        config,
        outcome: round.outcome,
        score: round.score,
        high_score: record.best,
        new_best: record.new_best,
        store_error: scores.last_error().map(str::to_string),
        snapshot: round.snapshot(record.best),
        menu: Menu::result(),
    }
}

fn difficulty_menu(mode: GameMode) -> Screen {
    Screen::DifficultyMenu {
        mode,
        menu: Menu::difficulties(mode),
    }
}

/// Apply arrow keys to a menu and return the item picked with Enter
fn navigate(menu: &mut Menu, action: &KeyAction) -> Option<MenuItem> {
    match action {
        KeyAction::GameAction(Input::Turn(Direction::Up)) => {
            menu.move_selection(false);
            None
        }
        KeyAction::GameAction(Input::Turn(Direction::Down)) => {
            menu.move_selection(true);
            None
        }
        KeyAction::Confirm => menu.current(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Difficulty, GameSettings, Snake};
    use crate::highscore::{HighScoreStore, MemoryHighScoreStore};

    const TICK: Duration = Duration::from_millis(100);

    fn router() -> Router {
        Router::new(
            GameEngine::with_seed(GameSettings::default(), 3),
            ScoreBoard::new(MemoryHighScoreStore::new()),
        )
    }

    fn down() -> KeyAction {
        KeyAction::GameAction(Input::Turn(Direction::Down))
    }

    fn session(router: &mut Router) -> &mut Session {
        match &mut router.screen {
            Screen::Playing(session) => &mut **session,
            other => panic!("expected a round, got {}", other.name()),
        }
    }

    #[test]
    fn test_menu_path_to_round() {
        let mut router = router();

        router.handle_key(KeyAction::Confirm); // Start
        assert!(matches!(router.screen(), Screen::ModeMenu(_)));

        router.handle_key(down());
        router.handle_key(KeyAction::Confirm); // Chrono
        assert!(matches!(
            router.screen(),
            Screen::DifficultyMenu {
                mode: GameMode::Chrono,
                ..
            }
        ));

        router.handle_key(down());
        router.handle_key(down());
        router.handle_key(KeyAction::Confirm); // Hard
        let session = session(&mut router);
        assert_eq!(
            session.round.config,
            RoundConfig::new(GameMode::Chrono, Difficulty::Hard)
        );
    }

    #[test]
    fn test_back_navigation() {
        let mut router = router();
        router.handle_key(KeyAction::Confirm);
        router.handle_key(KeyAction::Confirm);
        assert!(matches!(router.screen(), Screen::DifficultyMenu { .. }));

        router.handle_key(KeyAction::Back);
        assert!(matches!(router.screen(), Screen::ModeMenu(_)));
        router.handle_key(KeyAction::Back);
        assert!(matches!(router.screen(), Screen::MainMenu(_)));
    }

    #[test]
    fn test_credits_and_quit() {
        let mut router = router();
        router.handle_key(down());
        router.handle_key(KeyAction::Confirm);
        assert!(matches!(router.screen(), Screen::Credits));

        router.handle_key(KeyAction::Back);
        assert!(matches!(router.screen(), Screen::MainMenu(_)));

        router.handle_key(KeyAction::Quit);
        assert!(router.should_quit());
    }

    #[test]
    fn test_quit_menu_item() {
        let mut router = router();
        router.handle_key(KeyAction::GameAction(Input::Turn(Direction::Up)));
        router.handle_key(KeyAction::Confirm);
        assert!(router.should_quit());
    }

    #[test]
    fn test_steering_reaches_round() {
        let mut router = router();
        router.start_round(RoundConfig::new(GameMode::Classic, Difficulty::Easy));
        session(&mut router).round.apple.position = Some(Cell::new(30, 25));

        router.handle_key(down());
        router.tick(TICK);

        assert_eq!(session(&mut router).round.snake.head(), Cell::new(5, 6));
    }

    #[test]
    fn test_buffered_turns_apply_one_per_tick() {
        let mut router = router();
        router.start_round(RoundConfig::new(GameMode::Classic, Difficulty::Easy));
        session(&mut router).round.apple.position = Some(Cell::new(30, 25));

        router.handle_key(down());
        router.handle_key(KeyAction::GameAction(Input::Turn(Direction::Left)));
        router.tick(TICK);
        router.tick(TICK);

        assert_eq!(session(&mut router).round.snake.head(), Cell::new(4, 6));
    }

    #[test]
    fn test_pause_queues_behind_full_buffer() {
        let mut router = router();
        router.start_round(RoundConfig::new(GameMode::Classic, Difficulty::Easy));
        session(&mut router).round.apple.position = Some(Cell::new(30, 25));

        router.handle_key(down());
        router.handle_key(KeyAction::GameAction(Input::Turn(Direction::Left)));
        router.handle_key(down());
        // A fourth turn overflows the buffer
        router.handle_key(KeyAction::GameAction(Input::Turn(Direction::Right)));
        router.handle_key(KeyAction::GameAction(Input::TogglePause));

        for _ in 0..4 {
            router.tick(TICK);
        }

        let session = session(&mut router);
        assert!(session.round.paused);
        assert_eq!(session.round.snake.head(), Cell::new(4, 7));
        assert_eq!(session.round.snake.direction, Direction::Down);
    }

    #[test]
    fn test_abandon_round_returns_to_difficulty_menu() {
        let mut router = router();
        router.start_round(RoundConfig::new(GameMode::Chrono, Difficulty::Medium));
        session(&mut router).round.score = 500;

        router.handle_key(KeyAction::Back);
        router.tick(TICK);

        assert!(matches!(
            router.screen(),
            Screen::DifficultyMenu {
                mode: GameMode::Chrono,
                ..
            }
        ));
        // Abandoned rounds are not recorded
        let config = RoundConfig::new(GameMode::Chrono, Difficulty::Medium);
        assert_eq!(router.scores().best(config), 0);
    }

    #[test]
    fn test_game_over_records_score() {
        let mut router = router();
        let config = RoundConfig::new(GameMode::Classic, Difficulty::Medium);
        router.start_round(config);
        {
            let session = session(&mut router);
            session.round.apple.position = Some(Cell::new(30, 25));
            session.round.score = 60;
            session.round.snake = Snake::new(Cell::new(38, 10), Direction::Right, 3);
        }

        let cues = router.tick(TICK);
        assert_eq!(cues, vec![SoundCue::GameOver]);

        let Screen::Finished(summary) = router.screen() else {
            panic!("expected the result screen");
        };
        assert_eq!(summary.outcome, Outcome::GameOver);
        assert_eq!(summary.score, 60);
        assert_eq!(summary.high_score, 60);
        assert!(summary.new_best);
        assert!(summary.store_error.is_none());
        assert_eq!(router.scores().best(config), 60);
    }

    #[test]
    fn test_replay_and_menu_from_result() {
        let mut router = router();
        let config = RoundConfig::new(GameMode::Chrono, Difficulty::Hard);
        router.start_round(config);
        session(&mut router).round.elapsed = Duration::from_secs(60);
        router.tick(TICK);
        assert!(matches!(router.screen(), Screen::Finished(_)));

        router.handle_key(KeyAction::Restart);
        assert_eq!(session(&mut router).round.config, config);
        assert_eq!(session(&mut router).round.score, 0);

        session(&mut router).round.elapsed = Duration::from_secs(60);
        router.tick(TICK);
        router.handle_key(down());
        router.handle_key(KeyAction::Confirm);
        assert!(matches!(
            router.screen(),
            Screen::DifficultyMenu {
                mode: GameMode::Chrono,
                ..
            }
        ));
    }

    #[test]
    fn test_victory_cue() {
        let mut router = router();
        router.start_round(RoundConfig::new(GameMode::Chrono, Difficulty::Hard));
        {
            let session = session(&mut router);
            session.round.score = 200;
            session.round.elapsed = Duration::from_secs(60);
        }

        let cues = router.tick(TICK);
        assert_eq!(cues, vec![SoundCue::Victory]);
    }

    #[test]
    fn test_round_best_comes_from_store() {
        let mut store = MemoryHighScoreStore::new();
        let config = RoundConfig::new(GameMode::Classic, Difficulty::Hard);
        store.set(config, 130).unwrap();
        let mut router = Router::new(
            GameEngine::with_seed(GameSettings::default(), 3),
            ScoreBoard::new(store),
        );

        router.start_round(config);
        assert_eq!(session(&mut router).best, 130);
    }

    #[test]
    fn test_tick_outside_round_is_noop() {
        let mut router = router();
        assert!(router.tick(TICK).is_empty());
        assert!(matches!(router.screen(), Screen::MainMenu(_)));
    }
}
