//! Board module - sparse occupancy grid
//!
//! The board is 10 columns wide with 20 visible rows. Locked cells are kept in a
//! map keyed by `(row, col)` instead of a dense array because a piece may lock
//! with cells above the visible area (negative rows). Those cells still block
//! later spawns, which is how topping out is detected.
//!
//! Invariant: every stored cell has `0 <= col < BOARD_WIDTH` and
//! `row < BOARD_HEIGHT`. Rows may be negative.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{GridPos, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

/// Locked cells keyed by `(row, col)`.
pub type BlockedCells = BTreeMap<GridPos, Rgb>;

/// Rows removed by one clear, bottom to top.
pub type ClearedRows = ArrayVec<i32, { BOARD_HEIGHT as usize }>;

/// Dense view of the visible rows, built only for rendering.
pub type DenseGrid = [[Option<Rgb>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    blocked: BlockedCells,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            blocked: BlockedCells::new(),
        }
    }

    /// Build a board from an existing occupancy map.
    ///
    /// Panics if any entry breaks the column/row invariant.
    pub fn from_cells(blocked: BlockedCells) -> Self {
        for &pos in blocked.keys() {
            assert_in_bounds(pos);
        }
        Self { blocked }
    }

    pub fn width(&self) -> i32 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> i32 {
        BOARD_HEIGHT
    }

    /// Read-only occupancy map.
    pub fn blocked_cells(&self) -> &BlockedCells {
        &self.blocked
    }

    /// Color locked at `(row, col)`, if any.
    pub fn get(&self, row: i32, col: i32) -> Option<Rgb> {
        self.blocked.get(&(row, col)).copied()
    }

    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.blocked.contains_key(&(row, col))
    }

    /// Number of locked cells (including hidden ones).
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Lock a single cell.
    ///
    /// Panics if the column is outside the board or the row is at or below
    /// the bottom edge.
    pub fn fill(&mut self, row: i32, col: i32, color: Rgb) {
        assert_in_bounds((row, col));
        self.blocked.insert((row, col), color);
    }

    /// Remove every locked cell.
    pub fn clear(&mut self) {
        self.blocked.clear();
    }

    /// Whether every cell of `piece` (at its anchor, or at the overridden
    /// anchor) lies within the side walls, above the floor, and off every
    /// locked cell. There is no ceiling.
    pub fn is_valid_position(
        &self,
        piece: &Piece,
        override_x: Option<i32>,
        override_y: Option<i32>,
    ) -> bool {
        piece
            .occupied_cells(override_x, override_y)
            .iter()
            .all(|&(row, col)| {
                (0..BOARD_WIDTH).contains(&col)
                    && row < BOARD_HEIGHT
                    && !self.blocked.contains_key(&(row, col))
            })
    }

    /// Merge the piece's cells into the board, tagged with its color.
    ///
    /// Cells at or below the floor are dropped. Returns how many cells were
    /// stored.
    pub fn lock_piece(&mut self, piece: &Piece) -> usize {
        let color = piece.color();
        let mut stored = 0;
        for (row, col) in piece.cells() {
            if row < BOARD_HEIGHT {
                self.fill(row, col, color);
                stored += 1;
            }
        }
        stored
    }

    /// Check if a visible row is completely filled
    pub fn is_row_full(&self, row: i32) -> bool {
        (0..BOARD_WIDTH).all(|col| self.blocked.contains_key(&(row, col)))
    }

    /// Rows that are currently full, scanned bottom to top.
    pub fn full_rows(&self) -> ClearedRows {
        (0..BOARD_HEIGHT)
            .rev()
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Remove every full row and shift the cells above down.
    ///
    /// Each surviving cell moves down by the number of cleared rows below it.
    /// Returns the cleared rows (bottom to top); the board is left untouched
    /// when none are full.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let cleared = self.full_rows();
        if cleared.is_empty() {
            return cleared;
        }

        let old = std::mem::take(&mut self.blocked);
        self.blocked = old
            .into_iter()
            .filter(|((row, _), _)| !cleared.contains(row))
            .map(|((row, col), color)| {
                let shift = cleared.iter().filter(|&&r| r > row).count() as i32;
                ((row + shift, col), color)
            })
            .collect();

        cleared
    }

    /// Clear full lines; returns how many were removed.
    pub fn clear_full_lines(&mut self) -> usize {
        self.clear_full_rows().len()
    }

    /// Lowest row the piece's anchor can reach by falling straight down.
    ///
    /// Used for the drop preview and hard drop. Returns the current row when
    /// the piece cannot move down at all.
    pub fn ghost_position(&self, piece: &Piece) -> i32 {
        let mut row = piece.y;
        while self.is_valid_position(piece, None, Some(row + 1)) {
            row += 1;
        }
        row
    }

    /// Write the visible rows into a dense grid, dropping hidden cells.
    pub fn write_dense(&self, out: &mut DenseGrid) {
        for row in out.iter_mut() {
            row.fill(None);
        }
        for (&(row, col), &color) in self.blocked.range((0i32, 0i32)..) {
            out[row as usize][col as usize] = Some(color);
        }
    }

    pub fn to_dense(&self) -> DenseGrid {
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.write_dense(&mut grid);
        grid
    }
}

/// Clear full lines of a bare occupancy map.
///
/// Returns the number of cleared rows and the rebuilt map; the input comes
/// back unchanged when no row is full.
pub fn clear_full_lines(blocked: BlockedCells) -> (usize, BlockedCells) {
    let mut board = Board::from_cells(blocked);
    let count = board.clear_full_lines();
    (count, board.blocked)
}

fn assert_in_bounds((row, col): GridPos) {
    assert!(
        (0..BOARD_WIDTH).contains(&col) && row < BOARD_HEIGHT,
        "cell ({row}, {col}) is outside the board"
    );
}
