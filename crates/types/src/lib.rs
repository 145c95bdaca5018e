//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no dependencies so it can be shared by the
//! game rules (`core`), the screen state machine (`engine`), key mapping
//! (`input`) and the terminal view (`term`).
//!
//! # Coordinates
//!
//! Grid positions are `(row, col)` pairs of signed integers:
//!
//! - **col** ranges `0..BOARD_WIDTH` (left to right)
//! - **row** grows downwards; rows `0..BOARD_HEIGHT` are visible, negative rows
//!   are the hidden area above the playfield where new pieces spawn
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_GRAVITY_MS` | 800 | Gravity interval at level 1 |
//! | `GRAVITY_DECREMENT_MS` | 50 | Interval reduction per level |
//! | `MIN_GRAVITY_MS` | 50 | Fastest gravity interval |
//! | `TARGET_FPS` | 60 | Default frame rate of the game loop |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(2), PieceKind::T);
//! assert!(Command::HardDrop.is_piece_control());
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: i32 = 10;

/// Visible board height in cells (20 rows)
pub const BOARD_HEIGHT: i32 = 20;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval at level 1 (milliseconds per row)
pub const INITIAL_GRAVITY_MS: u64 = 800;

/// Gravity interval reduction for each level above 1
pub const GRAVITY_DECREMENT_MS: u64 = 50;

/// Fastest possible gravity interval
pub const MIN_GRAVITY_MS: u64 = 50;

/// Default frame rate of the game loop
pub const TARGET_FPS: u32 = 60;

/// Line clear points at level 1, indexed by lines cleared at once.
///
/// Any other count scores nothing. Points are multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Positional offsets `(dx, dy)` tried in order when a bare rotation collides.
pub const WALL_KICKS: [(i32, i32); 6] = [(1, 0), (-1, 0), (2, 0), (-2, 0), (0, -1), (0, -2)];

/// Absolute grid coordinate `(row, col)`.
pub type GridPos = (i32, i32);

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven tetromino piece kinds
///
/// Each kind has a fixed color:
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red (mirror of S)
/// - **J**: Blue
/// - **L**: Orange (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in canonical order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Kind for a canonical index (`0..7`).
    ///
    /// Panics on an out-of-range index; callers only ever derive the index from
    /// a bounded random draw.
    pub fn from_index(index: usize) -> Self {
        assert!(index < Self::ALL.len(), "piece kind index out of range: {index}");
        Self::ALL[index]
    }

    /// Canonical index of this kind.
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Fixed display color of this kind.
    pub fn color(self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0, 255, 255),
            PieceKind::O => Rgb::new(255, 255, 0),
            PieceKind::T => Rgb::new(128, 0, 128),
            PieceKind::S => Rgb::new(0, 255, 0),
            PieceKind::Z => Rgb::new(255, 0, 0),
            PieceKind::J => Rgb::new(0, 0, 255),
            PieceKind::L => Rgb::new(255, 165, 0),
        }
    }
}

/// Discrete commands consumed by the game engine.
///
/// Produced by the input layer; which commands a screen reacts to is decided
/// by the engine's transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Move the active piece one row down
    SoftDrop,
    /// Drop the active piece to its landing row
    HardDrop,
    /// Rotate clockwise (with wall kicks)
    RotateCw,
    /// Rotate counter-clockwise (with wall kicks)
    RotateCcw,
    /// Pause while playing, resume while paused
    Pause,
    MenuUp,
    MenuDown,
    MenuConfirm,
    MenuCancel,
    ToggleSound,
    /// Start a fresh session from the game over screen
    Restart,
    /// Leave the game over screen for the main menu
    GoToMenu,
    /// Terminate the program
    Quit,
}

impl Command {
    /// Whether this command manipulates the active piece.
    pub fn is_piece_control(&self) -> bool {
        matches!(
            self,
            Command::MoveLeft
                | Command::MoveRight
                | Command::SoftDrop
                | Command::HardDrop
                | Command::RotateCw
                | Command::RotateCcw
        )
    }
}

/// Which screen the engine is showing. Carried in render snapshots and used by
/// the input layer to pick a key map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenKind {
    #[default]
    Menu,
    Options,
    Playing,
    Paused,
    GameOver,
}
