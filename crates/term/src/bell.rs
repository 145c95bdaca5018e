//! Terminal bell as the game's sound output.

use std::io::{self, Write};

use crate::engine::AudioSink;

/// Rings the terminal bell (BEL) when a piece locks.
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
}

impl TerminalBell {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn piece_locked(&mut self) {
        // Write errors are ignored.
        let _ = self.out.write_all(b"\x07").and_then(|()| self.out.flush());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_writes_bel() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.piece_locked();
        bell.piece_locked();
        assert_eq!(bell.into_inner(), b"\x07\x07");
    }

    #[test]
    fn line_clears_are_silent() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.lines_cleared(4);
        assert!(bell.into_inner().is_empty());
    }
}
