//! Integration tests for the game loop: engine, session and screen flow

use std::time::Duration;

use blockfall::core::Piece;
use blockfall::engine::{AudioSink, Engine, EngineConfig, NoAudio, Screen, Session};
use blockfall::types::{Command, PieceKind, Rgb, ScreenKind, BOARD_HEIGHT, BOARD_WIDTH};

const FRAME: Duration = Duration::from_millis(16);
const GRAY: Rgb = Rgb::new(128, 128, 128);

fn playing_engine(seed: u32) -> Engine<NoAudio> {
    let mut engine = Engine::new(
        EngineConfig {
            seed,
            sound_enabled: false,
        },
        NoAudio,
    );
    engine.apply_command(Command::MenuConfirm);
    assert_eq!(engine.screen_kind(), ScreenKind::Playing);
    engine
}

fn vertical_i(col: i32) -> Piece {
    let mut piece = Piece::new(PieceKind::I, col, -4);
    piece.rotate(true);
    piece
}

/// Place `piece` as the active piece, hard drop it and let the lock happen.
fn drop_piece<A: AudioSink>(engine: &mut Engine<A>, piece: Piece) {
    engine.session_mut().set_active(piece);
    engine.apply_command(Command::HardDrop);
    engine.update(FRAME);
}

#[test]
fn test_game_lifecycle() {
    let mut engine = Engine::new(EngineConfig::default(), NoAudio);
    assert_eq!(engine.screen_kind(), ScreenKind::Menu);

    engine.apply_command(Command::MenuConfirm);
    assert_eq!(engine.screen_kind(), ScreenKind::Playing);
    assert!(engine.session().active().is_some());
    assert!(engine.session().next().is_some());

    engine.apply_command(Command::Pause);
    assert_eq!(engine.screen_kind(), ScreenKind::Paused);
    engine.apply_command(Command::Pause);
    assert_eq!(engine.screen_kind(), ScreenKind::Playing);
}

#[test]
fn test_hard_drops_complete_a_line() {
    let mut engine = playing_engine(12345);
    let level = engine.session().level();

    // Columns 0..=8 of the bottom row, leaving column 9 open.
    drop_piece(&mut engine, Piece::new(PieceKind::I, 0, -1));
    drop_piece(&mut engine, Piece::new(PieceKind::I, 4, -1));
    drop_piece(&mut engine, vertical_i(8));
    assert_eq!(engine.session().score(), 0);
    assert_eq!(engine.session().board().len(), 12);

    drop_piece(&mut engine, vertical_i(9));

    let outcome = engine.take_last_lock().unwrap();
    assert_eq!(outcome.lines_cleared, 1);
    assert_eq!(engine.session().score(), 40 * level);
    assert_eq!(engine.session().lines(), 1);

    // Bottom row is gone; the two vertical bars dropped by one row.
    let board = engine.session().board();
    assert_eq!(board.len(), 6);
    for col in 0..8 {
        assert!(!board.is_occupied(BOARD_HEIGHT - 1, col));
    }
    for row in BOARD_HEIGHT - 3..BOARD_HEIGHT {
        assert!(board.is_occupied(row, 8));
        assert!(board.is_occupied(row, 9));
    }
    assert!(!board.is_occupied(BOARD_HEIGHT - 4, 8));
}

#[test]
fn test_tetris_scoring_and_leveling() {
    let mut engine = playing_engine(7);

    let mut expected_score = 0;
    for round in 1..=4u32 {
        let level_before = engine.session().level();
        let board = engine.session_mut().board_mut();
        for row in BOARD_HEIGHT - 4..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH - 1 {
                board.fill(row, col, GRAY);
            }
        }
        drop_piece(&mut engine, vertical_i(BOARD_WIDTH - 1));

        expected_score += 1200 * level_before;
        assert_eq!(engine.session().score(), expected_score, "round {round}");
        assert_eq!(engine.session().lines(), 4 * round);
        assert!(engine.session().board().is_empty());
    }

    // 16 lines: level 2 since the third tetris, which still scored at level 1.
    assert_eq!(engine.session().level(), 2);
    assert_eq!(expected_score, 1200 * 3 + 2400);
    assert_eq!(engine.session().gravity_interval(), Duration::from_millis(750));
}

#[test]
fn test_level_boundaries() {
    let mut session = Session::new(3);
    let clear_one_line = |session: &mut Session| {
        for col in 0..BOARD_WIDTH - 1 {
            session.board_mut().fill(BOARD_HEIGHT - 1, col, GRAY);
        }
        let mut piece = vertical_i(BOARD_WIDTH - 1);
        piece.y = BOARD_HEIGHT - 4;
        session.set_active(piece);
        let outcome = session.lock_and_advance().unwrap();
        assert_eq!(outcome.lines_cleared, 1);
        session.board_mut().clear();
        outcome
    };

    for _ in 0..9 {
        assert!(!clear_one_line(&mut session).level_up);
    }
    assert_eq!(session.level(), 1);

    assert!(clear_one_line(&mut session).level_up);
    assert_eq!(session.level(), 2);

    for _ in 0..9 {
        clear_one_line(&mut session);
    }
    assert_eq!(session.lines(), 19);
    assert_eq!(session.level(), 2);

    clear_one_line(&mut session);
    assert_eq!(session.level(), 3);
}

#[test]
fn test_full_spawn_region_ends_game() {
    let mut engine = playing_engine(99);
    let board = engine.session_mut().board_mut();
    for row in -4..0 {
        for col in 0..BOARD_WIDTH {
            board.fill(row, col, GRAY);
        }
    }

    drop_piece(&mut engine, Piece::new(PieceKind::O, 0, 10));
    assert_eq!(engine.screen_kind(), ScreenKind::GameOver);
    assert!(engine.take_last_lock().unwrap().topped_out);

    // Back to the menu, then a fresh game starts from an empty board.
    engine.apply_command(Command::GoToMenu);
    assert_eq!(engine.screen_kind(), ScreenKind::Menu);
    engine.apply_command(Command::MenuConfirm);
    assert_eq!(engine.screen_kind(), ScreenKind::Playing);
    assert!(engine.session().board().is_empty());
    assert_eq!(engine.session().score(), 0);
}

#[test]
fn test_stacking_to_the_top_ends_game() {
    let mut engine = playing_engine(4242);
    for _ in 0..200 {
        if engine.screen_kind() == ScreenKind::GameOver {
            break;
        }
        engine.apply_command(Command::HardDrop);
        engine.update(FRAME);
    }
    assert_eq!(engine.screen_kind(), ScreenKind::GameOver);

    // Input other than restart/menu does nothing now.
    let before = engine.snapshot();
    engine.apply_command(Command::MoveLeft);
    engine.update(Duration::from_secs(3));
    assert_eq!(engine.snapshot(), before);

    engine.apply_command(Command::Restart);
    assert_eq!(engine.screen_kind(), ScreenKind::Playing);
}

#[test]
fn test_gravity_moves_piece_over_time() {
    let mut engine = playing_engine(1);
    let start = engine.session().active().unwrap().y;

    // 50 frames of 16ms = 800ms = one row at level 1.
    for _ in 0..50 {
        engine.update(FRAME);
    }
    assert_eq!(engine.session().active().unwrap().y, start + 1);
}

#[test]
fn test_menu_navigation_flow() {
    let mut engine = Engine::new(EngineConfig::default(), NoAudio);

    // Main menu -> Options -> toggle sound -> back.
    engine.apply_command(Command::MenuDown);
    engine.apply_command(Command::MenuConfirm);
    assert_eq!(engine.screen_kind(), ScreenKind::Options);
    assert!(engine.sound_enabled());
    engine.apply_command(Command::MenuConfirm);
    assert!(!engine.sound_enabled());
    assert_eq!(engine.screen_kind(), ScreenKind::Options);

    engine.apply_command(Command::MenuCancel);
    assert_eq!(engine.screen_kind(), ScreenKind::Menu);
    assert_eq!(engine.screen().selected_index(), Some(1));

    // Pause menu -> Main Menu.
    engine.apply_command(Command::MenuUp);
    engine.apply_command(Command::MenuConfirm);
    assert_eq!(engine.screen_kind(), ScreenKind::Playing);
    engine.apply_command(Command::MenuCancel);
    assert!(matches!(engine.screen(), Screen::Paused(_)));
    engine.apply_command(Command::MenuDown);
    engine.apply_command(Command::MenuConfirm);
    assert_eq!(engine.screen_kind(), ScreenKind::Menu);
    assert_eq!(engine.screen().selected_index(), Some(0));

    // Exit.
    engine.apply_command(Command::MenuUp);
    engine.apply_command(Command::MenuConfirm);
    assert!(!engine.is_running());
}

#[test]
fn test_paused_game_is_frozen() {
    let mut engine = playing_engine(5);
    engine.apply_command(Command::Pause);
    let before = engine.snapshot();

    engine.update(Duration::from_secs(10));
    engine.apply_command(Command::HardDrop);
    engine.apply_command(Command::MoveLeft);

    let after = engine.snapshot();
    assert_eq!(after.active, before.active);
    assert_eq!(after.board, before.board);
}

#[derive(Default)]
struct Counter(u32);

impl AudioSink for Counter {
    fn piece_locked(&mut self) {
        self.0 += 1;
    }
}

#[test]
fn test_sound_flag_gates_lock_sound() {
    let mut engine = Engine::new(
        EngineConfig {
            seed: 8,
            sound_enabled: true,
        },
        Counter::default(),
    );
    engine.apply_command(Command::MenuConfirm);

    drop_piece(&mut engine, Piece::new(PieceKind::O, 0, 0));
    assert_eq!(engine.audio().0, 1);

    engine.apply_command(Command::ToggleSound);
    drop_piece(&mut engine, Piece::new(PieceKind::O, 4, 0));
    assert_eq!(engine.audio().0, 1);
}
