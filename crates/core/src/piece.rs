//! Piece module - tetromino shapes and rotation states
//!
//! Each family stores its rotation states as small boolean matrices (row-major,
//! `1` = occupied). The anchor `(x, y)` of a piece is the grid column/row of the
//! matrix's top-left corner, so a piece can sit partly (or entirely) above the
//! visible rows before it locks.

use arrayvec::ArrayVec;

use crate::types::{GridPos, PieceKind, Rgb};

/// One rotation state: rows of cells, `1` marks an occupied cell.
pub type ShapeMatrix = &'static [&'static [u8]];

/// Occupied cells of a piece in absolute grid coordinates.
pub type PieceCells = ArrayVec<GridPos, 4>;

const I_SHAPES: &[ShapeMatrix] = &[&[&[1, 1, 1, 1]], &[&[1], &[1], &[1], &[1]]];

const O_SHAPES: &[ShapeMatrix] = &[&[&[1, 1], &[1, 1]]];

const T_SHAPES: &[ShapeMatrix] = &[
    &[&[0, 1, 0], &[1, 1, 1]],
    &[&[1, 0], &[1, 1], &[1, 0]],
    &[&[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1], &[1, 1], &[0, 1]],
];

const S_SHAPES: &[ShapeMatrix] = &[&[&[0, 1, 1], &[1, 1, 0]], &[&[1, 0], &[1, 1], &[0, 1]]];

const Z_SHAPES: &[ShapeMatrix] = &[&[&[1, 1, 0], &[0, 1, 1]], &[&[0, 1], &[1, 1], &[1, 0]]];

const J_SHAPES: &[ShapeMatrix] = &[
    &[&[1, 0, 0], &[1, 1, 1]],
    &[&[1, 1], &[1, 0], &[1, 0]],
    &[&[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1], &[0, 1], &[1, 1]],
];

const L_SHAPES: &[ShapeMatrix] = &[
    &[&[0, 0, 1], &[1, 1, 1]],
    &[&[1, 0], &[1, 0], &[1, 1]],
    &[&[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1], &[0, 1], &[0, 1]],
];

/// All rotation states of a piece family, base rotation first.
pub fn rotations(kind: PieceKind) -> &'static [ShapeMatrix] {
    match kind {
        PieceKind::I => I_SHAPES,
        PieceKind::O => O_SHAPES,
        PieceKind::T => T_SHAPES,
        PieceKind::S => S_SHAPES,
        PieceKind::Z => Z_SHAPES,
        PieceKind::J => J_SHAPES,
        PieceKind::L => L_SHAPES,
    }
}

/// `(height, width)` of a rotation matrix.
pub fn matrix_dimensions(matrix: ShapeMatrix) -> (i32, i32) {
    let height = matrix.len() as i32;
    let width = matrix.first().map_or(0, |row| row.len()) as i32;
    (height, width)
}

/// A falling tetromino instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Index into the family's rotation states.
    pub rotation: usize,
    /// Grid column of the matrix origin.
    pub x: i32,
    /// Grid row of the matrix origin (negative while above the board).
    pub y: i32,
}

impl Piece {
    /// Create a piece in its base rotation with its matrix origin at `(x, y)`.
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Number of distinct rotation states of this piece's family.
    pub fn rotation_count(&self) -> usize {
        rotations(self.kind).len()
    }

    /// Matrix of the active rotation state.
    pub fn matrix(&self) -> ShapeMatrix {
        rotations(self.kind)[self.rotation]
    }

    /// `(height, width)` of the active rotation matrix.
    pub fn dimensions(&self) -> (i32, i32) {
        matrix_dimensions(self.matrix())
    }

    /// Step the rotation index forwards (clockwise) or backwards, wrapping.
    ///
    /// No collision checking happens here; callers validate the result and
    /// revert if needed.
    pub fn rotate(&mut self, clockwise: bool) {
        let count = self.rotation_count();
        if count <= 1 {
            return;
        }
        let step = if clockwise { 1 } else { -1 };
        self.rotation = (self.rotation as i64 + step).rem_euclid(count as i64) as usize;
    }

    /// Absolute `(row, col)` of every occupied cell.
    ///
    /// `override_x`/`override_y` replace the anchor for hypothetical placement
    /// tests without mutating the piece.
    pub fn occupied_cells(&self, override_x: Option<i32>, override_y: Option<i32>) -> PieceCells {
        let x = override_x.unwrap_or(self.x);
        let y = override_y.unwrap_or(self.y);

        let mut cells = PieceCells::new();
        for (dr, row) in self.matrix().iter().enumerate() {
            for (dc, &filled) in row.iter().enumerate() {
                if filled != 0 {
                    // More than four cells means a corrupt shape table.
                    cells.push((y + dr as i32, x + dc as i32));
                }
            }
        }
        assert_eq!(cells.len(), 4, "{:?} rotation {} is not a tetromino", self.kind, self.rotation);
        cells
    }

    /// Cells at the current anchor.
    pub fn cells(&self) -> PieceCells {
        self.occupied_cells(None, None)
    }
}
