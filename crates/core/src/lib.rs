//! Core game rules - pure, deterministic, and testable
//!
//! This crate holds the piece/grid model of the game. It has **zero
//! dependencies** on UI, timing sources, or I/O:
//!
//! - **Deterministic**: the piece factory is seeded, so the same seed replays
//!   the same game
//! - **Testable**: every rule is a plain function or method on plain data
//! - **Portable**: usable headless, from the terminal front end, or from tests
//!
//! # Module Structure
//!
//! - [`piece`]: tetromino families, rotation matrices, occupied cells
//! - [`factory`]: seeded random piece generation without immediate repeats
//! - [`board`]: sparse occupancy grid, collision, locking, line clears, ghost row
//! - [`scoring`]: points table, leveling, gravity interval
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, PieceFactory};
//!
//! let mut board = Board::new();
//! let mut factory = PieceFactory::new(12345);
//!
//! let mut piece = factory.next_piece(None);
//! assert!(board.is_valid_position(&piece, None, None));
//!
//! piece.y = board.ghost_position(&piece);
//! board.lock_piece(&piece);
//! assert_eq!(board.len(), 4);
//! ```

pub mod board;
pub mod factory;
pub mod piece;
pub mod scoring;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{clear_full_lines, BlockedCells, Board, ClearedRows, DenseGrid};
pub use factory::{spawn_piece, spawn_position, PieceFactory, SimpleRng};
pub use piece::{rotations, Piece, PieceCells, ShapeMatrix};
pub use scoring::{gravity_interval, level_for_lines, line_clear_points};
