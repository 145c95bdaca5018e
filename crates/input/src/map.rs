//! Key mapping from terminal events to game commands.
//!
//! The same key means different things on different screens (Up moves a menu
//! highlight but rotates a piece), so mapping is keyed by the visible screen.

use crate::types::{Command, ScreenKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press on `screen` to a command.
///
/// `q` / Ctrl+C quit and `s` toggles sound on every screen, including while
/// playing; every other key is looked up in the key map of `screen`.
pub fn map_key(key: KeyEvent, screen: ScreenKind) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }
    if matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S')) {
        return Some(Command::ToggleSound);
    }

    match screen {
        ScreenKind::Menu | ScreenKind::Options => menu_key(key),
        ScreenKind::Paused => match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
            _ => menu_key(key),
        },
        ScreenKind::Playing => playing_key(key),
        ScreenKind::GameOver => game_over_key(key),
    }
}

fn menu_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(Command::MenuUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(Command::MenuDown),
        KeyCode::Enter => Some(Command::MenuConfirm),
        KeyCode::Esc => Some(Command::MenuCancel),
        _ => None,
    }
}

fn playing_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(Command::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(Command::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),

        _ => None,
    }
}

fn game_over_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => Some(Command::GoToMenu),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
