use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Input};

/// What a key press means, before the current screen interprets it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Steering or pausing; arrows also move menu selections
    GameAction(Input),
    Confirm,
    Back,
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::GameAction(Input::Turn(Direction::Up)),
            KeyCode::Down => KeyAction::GameAction(Input::Turn(Direction::Down)),
            KeyCode::Left => KeyAction::GameAction(Input::Turn(Direction::Left)),
            KeyCode::Right => KeyAction::GameAction(Input::Turn(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::GameAction(Input::Turn(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::GameAction(Input::Turn(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::GameAction(Input::Turn(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::GameAction(Input::Turn(Direction::Right))
            }

            KeyCode::Char(' ') => KeyAction::GameAction(Input::TogglePause),

            // Controls
            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Esc | KeyCode::Backspace => KeyAction::Back,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            press(KeyCode::Up),
            KeyAction::GameAction(Input::Turn(Direction::Up))
        );
        assert_eq!(
            press(KeyCode::Down),
            KeyAction::GameAction(Input::Turn(Direction::Down))
        );
        assert_eq!(
            press(KeyCode::Left),
            KeyAction::GameAction(Input::Turn(Direction::Left))
        );
        assert_eq!(
            press(KeyCode::Right),
            KeyAction::GameAction(Input::Turn(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(
            press(KeyCode::Char('w')),
            KeyAction::GameAction(Input::Turn(Direction::Up))
        );
        assert_eq!(
            press(KeyCode::Char('a')),
            KeyAction::GameAction(Input::Turn(Direction::Left))
        );
        assert_eq!(
            press(KeyCode::Char('s')),
            KeyAction::GameAction(Input::Turn(Direction::Down))
        );
        assert_eq!(
            press(KeyCode::Char('d')),
            KeyAction::GameAction(Input::Turn(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::GameAction(Input::Turn(Direction::Up))
        );
    }

    #[test]
    fn test_pause_key() {
        assert_eq!(
            press(KeyCode::Char(' ')),
            KeyAction::GameAction(Input::TogglePause)
        );
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(press(KeyCode::Enter), KeyAction::Confirm);
        assert_eq!(press(KeyCode::Esc), KeyAction::Back);
        assert_eq!(press(KeyCode::Backspace), KeyAction::Back);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);

        let q_upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(InputHandler::new().handle_key_event(q_upper), KeyAction::Quit);
    }

    #[test]
    fn test_restart_key() {
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::new().handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
