//! Menu models - wrap-around selection over a closed set of items.

use std::fmt;
use std::marker::PhantomData;

/// A closed set of menu entries, in display order.
pub trait MenuItem: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;
}

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainItem {
    Play,
    Options,
    Exit,
}

impl MenuItem for MainItem {
    const ALL: &'static [Self] = &[MainItem::Play, MainItem::Options, MainItem::Exit];

    fn label(self) -> &'static str {
        match self {
            MainItem::Play => "Play",
            MainItem::Options => "Options",
            MainItem::Exit => "Exit",
        }
    }
}

/// Options menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsItem {
    Sound,
    Back,
}

impl MenuItem for OptionsItem {
    const ALL: &'static [Self] = &[OptionsItem::Sound, OptionsItem::Back];

    fn label(self) -> &'static str {
        match self {
            OptionsItem::Sound => "Sound",
            OptionsItem::Back => "Back",
        }
    }
}

/// Pause menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseItem {
    Resume,
    MainMenu,
    Quit,
}

impl MenuItem for PauseItem {
    const ALL: &'static [Self] = &[PauseItem::Resume, PauseItem::MainMenu, PauseItem::Quit];

    fn label(self) -> &'static str {
        match self {
            PauseItem::Resume => "Resume",
            PauseItem::MainMenu => "Main Menu",
            PauseItem::Quit => "Quit",
        }
    }
}

/// Selection state of one menu.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MenuModel<T: MenuItem> {
    selected: usize,
    _items: PhantomData<T>,
}

impl<T: MenuItem> MenuModel<T> {
    /// Menu with the first item highlighted.
    pub fn new() -> Self {
        Self::at(0)
    }

    /// Menu with `item` highlighted.
    pub fn with_selected(item: T) -> Self {
        let index = T::ALL
            .iter()
            .position(|&candidate| candidate == item)
            .unwrap_or(0);
        Self::at(index)
    }

    fn at(selected: usize) -> Self {
        assert!(!T::ALL.is_empty(), "menu has no items");
        Self {
            selected,
            _items: PhantomData,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> T {
        T::ALL[self.selected]
    }

    pub fn items(&self) -> &'static [T] {
        T::ALL
    }

    /// Move the highlight up, wrapping to the last item.
    pub fn up(mut self) -> Self {
        let len = T::ALL.len();
        self.selected = (self.selected + len - 1) % len;
        self
    }

    /// Move the highlight down, wrapping to the first item.
    pub fn down(mut self) -> Self {
        self.selected = (self.selected + 1) % T::ALL.len();
        self
    }
}

impl<T: MenuItem> Default for MenuModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: MenuItem> fmt::Debug for MenuModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuModel")
            .field("selected", &self.selected())
            .finish()
    }
}
