//! Play session - one game from first spawn to top-out
//!
//! Ties together board, pieces, factory and scoring. It handles gravity
//! timing, movement and rotation with wall kicks, locking, line clears and
//! leveling. Screen handling lives in the engine; a session only knows how to
//! play.

use std::time::Duration;

use tracing::{debug, info};

use crate::core::{gravity_interval, level_for_lines, line_clear_points, Board, Piece, PieceFactory};
use crate::types::{Command, WALL_KICKS};

/// Result of one lock-and-advance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub lines_cleared: u32,
    /// Points awarded for the clear.
    pub points: u32,
    /// Level after the clear.
    pub level: u32,
    pub level_up: bool,
    /// The next piece could not spawn; the game is over.
    pub topped_out: bool,
}

/// State of one game in progress.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    active: Option<Piece>,
    next: Option<Piece>,
    factory: PieceFactory,
    score: u32,
    lines: u32,
    level: u32,
    gravity_timer: Duration,
    gravity_interval: Duration,
}

impl Session {
    /// Create a session with a fresh board and the first two pieces drawn.
    pub fn new(seed: u32) -> Self {
        let mut session = Self {
            board: Board::new(),
            active: None,
            next: None,
            factory: PieceFactory::new(seed),
            score: 0,
            lines: 0,
            level: 1,
            gravity_timer: Duration::ZERO,
            gravity_interval: gravity_interval(1),
        };
        session.reset();
        session
    }

    /// Start over: empty board, zeroed counters, new active and next piece.
    ///
    /// The factory keeps its random stream, so consecutive games differ.
    pub fn reset(&mut self) {
        self.board.clear();
        let active = self.factory.next_piece(None);
        self.next = Some(self.factory.next_piece(Some(active.kind)));
        self.active = Some(active);
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.gravity_timer = Duration::ZERO;
        self.gravity_interval = gravity_interval(self.level);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up positions in tests.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    /// Replace the active piece (used to script positions in tests and tools).
    pub fn set_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn gravity_interval(&self) -> Duration {
        self.gravity_interval
    }

    pub fn gravity_timer(&self) -> Duration {
        self.gravity_timer
    }

    pub fn seed(&self) -> u32 {
        self.factory.seed()
    }

    /// Landing row of the active piece, for the drop preview.
    pub fn ghost_row(&self) -> Option<i32> {
        self.active.map(|piece| self.board.ghost_position(&piece))
    }

    /// Apply a piece-control command. Returns whether the piece changed.
    ///
    /// Commands that are not piece controls are ignored.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::RotateCw => self.try_rotate(true),
            Command::RotateCcw => self.try_rotate(false),
            _ => false,
        }
    }

    /// Try to move the active piece; rejected moves leave it in place.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let (x, y) = (piece.x + dx, piece.y + dy);
        if self.board.is_valid_position(piece, Some(x), Some(y)) {
            piece.x = x;
            piece.y = y;
            return true;
        }

        false
    }

    /// Move down one row; a successful step restarts the gravity timer.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.gravity_timer = Duration::ZERO;
        }
        moved
    }

    /// Jump to the landing row and arm gravity so the next update locks.
    pub fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        piece.y = self.board.ghost_position(piece);
        self.gravity_timer = self.gravity_interval;
        true
    }

    /// Rotate in place, or at the first wall-kick offset that fits.
    ///
    /// If nothing fits, rotation and position stay as they were.
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let before = *piece;
        piece.rotate(clockwise);
        if piece.rotation == before.rotation {
            // Single-state family.
            return false;
        }

        if self.board.is_valid_position(piece, None, None) {
            return true;
        }

        for (dx, dy) in WALL_KICKS {
            let (x, y) = (before.x + dx, before.y + dy);
            if self.board.is_valid_position(piece, Some(x), Some(y)) {
                piece.x = x;
                piece.y = y;
                return true;
            }
        }

        *piece = before;
        false
    }

    /// Advance gravity by `dt`.
    ///
    /// Steps the piece down once per elapsed interval. When a step is blocked
    /// the piece locks and the next one is spawned; gravity processing for
    /// this frame stops there and the leftover time carries over.
    pub fn update(&mut self, dt: Duration) -> Option<LockOutcome> {
        self.active?;

        self.gravity_timer += dt;
        while self.gravity_timer >= self.gravity_interval {
            self.gravity_timer -= self.gravity_interval;
            if !self.try_move(0, 1) {
                return self.lock_and_advance();
            }
        }

        None
    }

    /// Lock the active piece, clear lines, score, and spawn the next piece.
    ///
    /// Returns `None` when there is no active piece.
    pub fn lock_and_advance(&mut self) -> Option<LockOutcome> {
        let locked = self.active.take()?;
        self.board.lock_piece(&locked);

        let lines_cleared = self.board.clear_full_lines() as u32;
        let mut points = 0;
        let mut level_up = false;
        if lines_cleared > 0 {
            points = line_clear_points(lines_cleared as usize, self.level);
            self.score = self.score.saturating_add(points);
            self.lines += lines_cleared;

            let new_level = level_for_lines(self.lines);
            if new_level > self.level {
                self.level = new_level;
                self.gravity_interval = gravity_interval(new_level);
                level_up = true;
                info!(
                    level = new_level,
                    interval_ms = self.gravity_interval.as_millis() as u64,
                    "level up"
                );
            }
        }

        // The queued piece becomes active; its kind is excluded from the new draw.
        let active = match self.next.take() {
            Some(piece) => piece,
            None => self.factory.next_piece(Some(locked.kind)),
        };
        self.next = Some(self.factory.next_piece(Some(active.kind)));
        self.active = Some(active);

        let topped_out = !self.board.is_valid_position(&active, None, None);

        debug!(
            kind = ?locked.kind,
            row = locked.y,
            col = locked.x,
            lines_cleared,
            points,
            topped_out,
            "piece locked"
        );

        Some(LockOutcome {
            lines_cleared,
            points,
            level: self.level,
            level_up,
            topped_out,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
