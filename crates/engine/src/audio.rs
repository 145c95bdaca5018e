//! Sound effects hook.
//!
//! The engine calls the sink only while sound is enabled.

/// Receives game sound events.
pub trait AudioSink {
    /// A piece locked into the board.
    fn piece_locked(&mut self);

    /// One or more lines were cleared by the last lock.
    fn lines_cleared(&mut self, _count: u32) {}
}

/// Silent sink for headless play and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAudio;

impl AudioSink for NoAudio {
    fn piece_locked(&mut self) {}
}

impl<A: AudioSink + ?Sized> AudioSink for &mut A {
    fn piece_locked(&mut self) {
        (**self).piece_locked();
    }

    fn lines_cleared(&mut self, count: u32) {
        (**self).lines_cleared(count);
    }
}
