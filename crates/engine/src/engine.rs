//! Game engine - screen flow around a play session
//!
//! The engine owns the current [`Screen`], the [`Session`] being played, the
//! sound flag and the audio sink. Commands go through [`transition`]; the
//! returned [`Effect`] is carried out here. Time only advances while playing.

use std::time::Duration;

use tracing::{debug, info};

use crate::audio::AudioSink;
use crate::screen::{transition, Effect, Screen};
use crate::session::{LockOutcome, Session};
use crate::snapshot::{ActiveSnapshot, Snapshot};
use crate::types::{Command, ScreenKind};

/// Startup options for an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the piece factory.
    pub seed: u32,
    pub sound_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            sound_enabled: true,
        }
    }
}

pub struct Engine<A: AudioSink> {
    screen: Screen,
    session: Session,
    sound_enabled: bool,
    running: bool,
    last_lock: Option<LockOutcome>,
    audio: A,
}

impl<A: AudioSink> Engine<A> {
    /// Create an engine on the main menu.
    pub fn new(config: EngineConfig, audio: A) -> Self {
        Self {
            screen: Screen::default(),
            session: Session::new(config.seed),
            sound_enabled: config.sound_enabled,
            running: true,
            last_lock: None,
            audio,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn screen_kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access for scripted setups (tests, benches).
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// `false` once a quit has been requested.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Most recent lock outcome, cleared on read.
    pub fn take_last_lock(&mut self) -> Option<LockOutcome> {
        self.last_lock.take()
    }

    /// Apply one command to the current screen.
    pub fn apply_command(&mut self, command: Command) {
        if !self.running {
            return;
        }

        let (next, effect) = transition(self.screen, command);
        if next.kind() != self.screen.kind() {
            debug!(from = ?self.screen.kind(), to = ?next.kind(), ?command, "screen change");
        }
        self.screen = next;

        match effect {
            Effect::None => {}
            Effect::NewGame => self.start_new_game(),
            Effect::ToggleSound => {
                self.sound_enabled = !self.sound_enabled;
                debug!(sound_enabled = self.sound_enabled, "sound toggled");
            }
            Effect::Quit => {
                info!(screen = ?self.screen.kind(), "quit requested");
                self.running = false;
            }
            Effect::Play(cmd) => {
                self.session.apply(cmd);
            }
        }
    }

    /// Reset the session and show the playfield.
    pub fn start_new_game(&mut self) {
        self.session.reset();
        self.last_lock = None;
        self.screen = Screen::Playing;
        info!(seed = self.session.seed(), "new game");
    }

    /// Advance the game by `dt`. Does nothing outside the playing screen.
    pub fn update(&mut self, dt: Duration) {
        if self.screen != Screen::Playing {
            return;
        }

        let Some(outcome) = self.session.update(dt) else {
            return;
        };
        self.handle_lock(outcome);
    }

    fn handle_lock(&mut self, outcome: LockOutcome) {
        if self.sound_enabled {
            self.audio.piece_locked();
            if outcome.lines_cleared > 0 {
                self.audio.lines_cleared(outcome.lines_cleared);
            }
        }

        if outcome.topped_out {
            info!(
                score = self.session.score(),
                level = self.session.level(),
                lines = self.session.lines(),
                "game over"
            );
            self.screen = Screen::GameOver;
        }

        self.last_lock = Some(outcome);
    }

    /// Fill `out` with the current render state without allocating.
    pub fn snapshot_into(&self, out: &mut Snapshot) {
        out.screen = self.screen.kind();
        out.selected = self.screen.selected_index();
        out.sound_enabled = self.sound_enabled;
        self.session.board().write_dense(&mut out.board);
        out.active = self.session.active().map(ActiveSnapshot::from);
        out.next = self.session.next().map(|piece| piece.kind);
        out.ghost_y = self.session.ghost_row();
        out.score = self.session.score();
        out.level = self.session.level();
        out.lines = self.session.lines();
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut snap = Snapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NoAudio;
    use crate::core::Piece;
    use crate::types::{PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

    #[derive(Debug, Default)]
    struct CountingAudio {
        locks: u32,
        lines: u32,
    }

    impl AudioSink for CountingAudio {
        fn piece_locked(&mut self) {
            self.locks += 1;
        }

        fn lines_cleared(&mut self, count: u32) {
            self.lines += count;
        }
    }

    fn engine(sound_enabled: bool) -> Engine<CountingAudio> {
        Engine::new(
            EngineConfig {
                seed: 42,
                sound_enabled,
            },
            CountingAudio::default(),
        )
    }

    fn drop_and_tick(engine: &mut Engine<CountingAudio>) {
        engine.apply_command(Command::HardDrop);
        engine.update(Duration::from_millis(16));
    }

    #[test]
    fn starts_on_main_menu() {
        let engine = Engine::new(EngineConfig::default(), NoAudio);
        assert_eq!(engine.screen_kind(), ScreenKind::Menu);
        assert!(engine.is_running());
        assert!(engine.sound_enabled());
    }

    #[test]
    fn update_is_frozen_outside_playing() {
        let mut engine = engine(true);
        let before = engine.session().active();
        engine.update(Duration::from_secs(10));
        assert_eq!(engine.session().active(), before);

        engine.apply_command(Command::MenuConfirm);
        engine.apply_command(Command::Pause);
        let paused = engine.session().active();
        engine.update(Duration::from_secs(10));
        assert_eq!(engine.session().active(), paused);
    }

    #[test]
    fn lock_notifies_audio_when_enabled() {
        let mut engine = engine(true);
        engine.apply_command(Command::MenuConfirm);
        drop_and_tick(&mut engine);
        assert_eq!(engine.audio().locks, 1);
        assert!(engine.take_last_lock().is_some());
        assert!(engine.take_last_lock().is_none());
    }

    #[test]
    fn lock_is_silent_when_sound_disabled() {
        let mut engine = engine(false);
        engine.apply_command(Command::MenuConfirm);
        drop_and_tick(&mut engine);
        assert_eq!(engine.audio().locks, 0);
        assert!(engine.take_last_lock().is_some());
    }

    #[test]
    fn toggling_sound_mid_game_gates_next_lock() {
        let mut engine = engine(true);
        engine.apply_command(Command::MenuConfirm);
        engine.apply_command(Command::ToggleSound);
        drop_and_tick(&mut engine);
        assert_eq!(engine.audio().locks, 0);

        engine.apply_command(Command::ToggleSound);
        drop_and_tick(&mut engine);
        assert_eq!(engine.audio().locks, 1);
    }

    #[test]
    fn line_clear_reports_to_audio() {
        let mut engine = engine(true);
        engine.apply_command(Command::MenuConfirm);
        let gray = Rgb::new(128, 128, 128);
        let session = engine.session_mut();
        for col in 0..BOARD_WIDTH - 4 {
            session.board_mut().fill(BOARD_HEIGHT - 1, col, gray);
        }
        session.set_active(Piece::new(PieceKind::I, BOARD_WIDTH - 4, 0));

        drop_and_tick(&mut engine);
        assert_eq!(engine.audio().lines, 1);
        assert_eq!(engine.session().score(), 40);
    }

    #[test]
    fn blocked_spawn_ends_game() {
        let mut engine = engine(true);
        engine.apply_command(Command::MenuConfirm);
        let gray = Rgb::new(128, 128, 128);
        let session = engine.session_mut();
        for row in -4..0 {
            for col in 0..BOARD_WIDTH {
                session.board_mut().fill(row, col, gray);
            }
        }
        session.set_active(Piece::new(PieceKind::O, 0, BOARD_HEIGHT - 2));

        engine.update(Duration::from_millis(800));
        assert_eq!(engine.screen_kind(), ScreenKind::GameOver);
        assert!(engine.take_last_lock().unwrap().topped_out);

        // Frozen until restarted.
        engine.update(Duration::from_secs(5));
        assert_eq!(engine.screen_kind(), ScreenKind::GameOver);

        engine.apply_command(Command::Restart);
        assert_eq!(engine.screen_kind(), ScreenKind::Playing);
        assert!(engine.session().board().is_empty());
    }

    #[test]
    fn quit_stops_engine() {
        let mut engine = engine(true);
        engine.apply_command(Command::Quit);
        assert!(!engine.is_running());

        // Further commands are ignored.
        engine.apply_command(Command::MenuConfirm);
        assert_eq!(engine.screen_kind(), ScreenKind::Menu);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut engine = engine(false);
        let snap = engine.snapshot();
        assert_eq!(snap.screen, ScreenKind::Menu);
        assert_eq!(snap.selected, Some(0));
        assert!(!snap.sound_enabled);

        engine.apply_command(Command::MenuConfirm);
        let snap = engine.snapshot();
        assert!(snap.playable());
        assert_eq!(snap.selected, None);
        assert_eq!(snap.level, 1);
        let active = snap.active.unwrap();
        assert_eq!(active.piece(), engine.session().active().unwrap());
        assert_eq!(snap.next, engine.session().next().map(|p| p.kind));
        assert_eq!(snap.ghost_y, engine.session().ghost_row());
    }
}
