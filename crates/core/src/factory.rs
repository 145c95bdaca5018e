//! Piece factory - randomized piece generation with anti-repetition
//!
//! Kinds are drawn uniformly from the seven families. When the caller names
//! the previous kind and the draw hits it, the factory redraws exactly once,
//! from the six remaining kinds, so an immediate repeat can never be emitted.
//!
//! Also provides a simple LCG so every game is reproducible from its seed.

use crate::piece::{matrix_dimensions, rotations, Piece};
use crate::types::{PieceKind, BOARD_WIDTH};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max
    }

    /// Current internal state (usable as a seed to continue the stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Starting column and row for a kind: horizontally centered on its base
/// rotation, with the whole bounding box above row 0.
pub fn spawn_position(kind: PieceKind) -> (i32, i32) {
    let (height, width) = matrix_dimensions(rotations(kind)[0]);
    (BOARD_WIDTH / 2 - width / 2, -height)
}

/// A fresh piece of `kind` at its spawn position.
pub fn spawn_piece(kind: PieceKind) -> Piece {
    let (x, y) = spawn_position(kind);
    Piece::new(kind, x, y)
}

/// Randomized piece source.
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: SimpleRng,
    /// Kind of the most recently emitted piece.
    last_kind: Option<PieceKind>,
}

impl PieceFactory {
    /// Create a new factory with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            last_kind: None,
        }
    }

    /// Draw a kind, avoiding `previous` on the immediate result.
    pub fn next_kind(&mut self, previous: Option<PieceKind>) -> PieceKind {
        let mut kind = PieceKind::from_index(self.rng.next_range(7) as usize);

        if let Some(prev) = previous {
            if kind == prev {
                // Single resample over the other six kinds.
                let offset = 1 + self.rng.next_range(6) as usize;
                kind = PieceKind::from_index((prev.index() + offset) % 7);
            }
        }

        self.last_kind = Some(kind);
        kind
    }

    /// Draw a new piece at its spawn position.
    pub fn next_piece(&mut self, previous: Option<PieceKind>) -> Piece {
        spawn_piece(self.next_kind(previous))
    }

    /// Kind of the most recently emitted piece.
    pub fn last_kind(&self) -> Option<PieceKind> {
        self.last_kind
    }

    /// Current RNG state (for restarting a game with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_spawn_positions_are_centered_and_hidden() {
        assert_eq!(spawn_position(PieceKind::I), (3, -1));
        assert_eq!(spawn_position(PieceKind::O), (4, -2));
        assert_eq!(spawn_position(PieceKind::T), (4, -2));
        assert_eq!(spawn_position(PieceKind::L), (4, -2));

        for kind in PieceKind::ALL {
            let piece = spawn_piece(kind);
            assert!(piece.cells().iter().all(|&(row, _)| row < 0), "{kind:?}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceFactory::new(7);
        let mut b = PieceFactory::new(7);
        let mut prev = None;
        for _ in 0..50 {
            let ka = a.next_kind(prev);
            let kb = b.next_kind(prev);
            assert_eq!(ka, kb);
            prev = Some(ka);
        }
    }

    #[test]
    fn test_all_kinds_appear() {
        let mut factory = PieceFactory::new(2024);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[factory.next_kind(None).index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_last_kind_tracks_emitted_piece() {
        let mut factory = PieceFactory::new(3);
        assert_eq!(factory.last_kind(), None);
        let piece = factory.next_piece(None);
        assert_eq!(factory.last_kind(), Some(piece.kind));
    }
}
