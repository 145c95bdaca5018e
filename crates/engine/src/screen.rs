//! Screen state machine
//!
//! [`transition`] is a pure function from the current screen and one command
//! to the next screen plus the side effect the engine must carry out. Every
//! `(screen, command)` pair is matched explicitly; commands a screen does not
//! react to leave it unchanged with [`Effect::None`].

use crate::menu::{MainItem, MenuModel, OptionsItem, PauseItem};
use crate::types::{Command, ScreenKind};

/// The screen being shown, with any per-screen menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu(MenuModel<MainItem>),
    Options(MenuModel<OptionsItem>),
    Playing,
    Paused(MenuModel<PauseItem>),
    GameOver,
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Menu(MenuModel::new())
    }
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Menu(_) => ScreenKind::Menu,
            Screen::Options(_) => ScreenKind::Options,
            Screen::Playing => ScreenKind::Playing,
            Screen::Paused(_) => ScreenKind::Paused,
            Screen::GameOver => ScreenKind::GameOver,
        }
    }

    /// Highlighted entry of the visible menu, if this screen has one.
    pub fn selected_index(&self) -> Option<usize> {
        match self {
            Screen::Menu(menu) => Some(menu.selected_index()),
            Screen::Options(menu) => Some(menu.selected_index()),
            Screen::Paused(menu) => Some(menu.selected_index()),
            Screen::Playing | Screen::GameOver => None,
        }
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Reset the session and start playing.
    NewGame,
    ToggleSound,
    /// Stop the program.
    Quit,
    /// Forward a piece-control command to the running session.
    Play(Command),
}

/// Next screen and effect for `command` on `screen`.
pub fn transition(screen: Screen, command: Command) -> (Screen, Effect) {
    // Valid on every screen.
    match command {
        Command::Quit => return (screen, Effect::Quit),
        Command::ToggleSound => return (screen, Effect::ToggleSound),
        _ => {}
    }

    match screen {
        Screen::Menu(menu) => main_menu(menu, command),
        Screen::Options(menu) => options_menu(menu, command),
        Screen::Playing => playing(command),
        Screen::Paused(menu) => pause_menu(menu, command),
        Screen::GameOver => game_over(command),
    }
}

fn main_menu(menu: MenuModel<MainItem>, command: Command) -> (Screen, Effect) {
    match command {
        Command::MenuUp => (Screen::Menu(menu.up()), Effect::None),
        Command::MenuDown => (Screen::Menu(menu.down()), Effect::None),
        Command::MenuConfirm => match menu.selected() {
            MainItem::Play => (Screen::Playing, Effect::NewGame),
            MainItem::Options => (Screen::Options(MenuModel::new()), Effect::None),
            MainItem::Exit => (Screen::Menu(menu), Effect::Quit),
        },
        Command::MenuCancel => (Screen::Menu(menu), Effect::Quit),
        _ => (Screen::Menu(menu), Effect::None),
    }
}

fn options_menu(menu: MenuModel<OptionsItem>, command: Command) -> (Screen, Effect) {
    let back = Screen::Menu(MenuModel::with_selected(MainItem::Options));
    match command {
        Command::MenuUp => (Screen::Options(menu.up()), Effect::None),
        Command::MenuDown => (Screen::Options(menu.down()), Effect::None),
        Command::MenuConfirm => match menu.selected() {
            OptionsItem::Sound => (Screen::Options(menu), Effect::ToggleSound),
            OptionsItem::Back => (back, Effect::None),
        },
        Command::MenuCancel => (back, Effect::None),
        _ => (Screen::Options(menu), Effect::None),
    }
}

fn playing(command: Command) -> (Screen, Effect) {
    match command {
        Command::Pause | Command::MenuCancel => (Screen::Paused(MenuModel::new()), Effect::None),
        cmd if cmd.is_piece_control() => (Screen::Playing, Effect::Play(cmd)),
        _ => (Screen::Playing, Effect::None),
    }
}

fn pause_menu(menu: MenuModel<PauseItem>, command: Command) -> (Screen, Effect) {
    match command {
        Command::MenuUp => (Screen::Paused(menu.up()), Effect::None),
        Command::MenuDown => (Screen::Paused(menu.down()), Effect::None),
        Command::Pause | Command::MenuCancel => (Screen::Playing, Effect::None),
        Command::MenuConfirm => match menu.selected() {
            PauseItem::Resume => (Screen::Playing, Effect::None),
            PauseItem::MainMenu => (Screen::Menu(MenuModel::new()), Effect::None),
            PauseItem::Quit => (Screen::Paused(menu), Effect::Quit),
        },
        _ => (Screen::Paused(menu), Effect::None),
    }
}

fn game_over(command: Command) -> (Screen, Effect) {
    match command {
        Command::Restart => (Screen::Playing, Effect::NewGame),
        Command::GoToMenu | Command::MenuCancel => (Screen::Menu(MenuModel::new()), Effect::None),
        _ => (Screen::GameOver, Effect::None),
    }
}
