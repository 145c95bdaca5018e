use crate::core::{DenseGrid, Piece};
use crate::types::{PieceKind, ScreenKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Rebuild the piece this snapshot describes.
    pub fn piece(&self) -> Piece {
        Piece {
            kind: self.kind,
            rotation: self.rotation,
            x: self.x,
            y: self.y,
        }
    }
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub screen: ScreenKind,
    /// Highlighted menu entry on menu screens.
    pub selected: Option<usize>,
    pub sound_enabled: bool,
    /// Visible locked cells, `board[row][col]`.
    pub board: DenseGrid,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    /// Landing row of the active piece.
    pub ghost_y: Option<i32>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl Snapshot {
    /// Whether the frame shows a live game (piece control and ghost).
    pub fn playable(&self) -> bool {
        self.screen == ScreenKind::Playing
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            screen: ScreenKind::Menu,
            selected: None,
            sound_enabled: false,
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            ghost_y: None,
            score: 0,
            level: 0,
            lines: 0,
        }
    }
}
