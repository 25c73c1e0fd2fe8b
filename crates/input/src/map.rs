//! Key mapping from terminal events to game actions.
//!
//! Letter keys are matched case-insensitively so Caps Lock does not change the
//! controls. Anything with Ctrl held is left to [`should_quit`].

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn char_action(c: char) -> Option<GameAction> {
    match c.to_ascii_lowercase() {
        'a' | 'h' => Some(GameAction::MoveLeft),
        'd' | 'l' => Some(GameAction::MoveRight),
        's' | 'j' => Some(GameAction::SoftDrop),
        'w' | 'k' | 'x' => Some(GameAction::RotateCw),
        'z' | 'y' => Some(GameAction::RotateCcw),
        ' ' => Some(GameAction::HardDrop),
        'p' => Some(GameAction::Pause),
        'r' => Some(GameAction::Restart),
        _ => None,
    }
}

/// Map keyboard input to game actions.
///
/// Key releases are ignored; presses and auto-repeats both map.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::RotateCw),
        KeyCode::Enter => Some(GameAction::Pause),
        KeyCode::Char(c) => char_action(c),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
