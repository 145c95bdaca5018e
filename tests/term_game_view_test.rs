use blockfall::engine::{ActiveSnapshot, Engine, EngineConfig, NoAudio, Snapshot};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::{Command, PieceKind, ScreenKind};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

fn playing_snapshot() -> Snapshot {
    let mut engine = Engine::new(EngineConfig::default(), NoAudio);
    engine.apply_command(Command::MenuConfirm);
    engine.snapshot()
}

#[test]
fn term_view_renders_main_menu_with_highlight() {
    let engine = Engine::new(EngineConfig::default(), NoAudio);
    let fb = GameView::default().render(&engine.snapshot(), Viewport::new(40, 20));
    let text = screen_text(&fb);

    assert!(text.contains("BLOCKFALL"));
    assert!(text.contains("> Play <"));
    assert!(text.contains("Options"));
    assert!(text.contains("Exit"));
    assert!(!text.contains("> Exit <"));
}

#[test]
fn term_view_renders_options_with_sound_state() {
    let mut engine = Engine::new(EngineConfig::default(), NoAudio);
    engine.apply_command(Command::MenuDown);
    engine.apply_command(Command::MenuConfirm);
    let view = GameView::default();

    let text = screen_text(&view.render(&engine.snapshot(), Viewport::new(40, 20)));
    assert!(text.contains("OPTIONS"));
    assert!(text.contains("> Sound: ON <"));

    engine.apply_command(Command::MenuConfirm);
    let text = screen_text(&view.render(&engine.snapshot(), Viewport::new(40, 20)));
    assert!(text.contains("> Sound: OFF <"));
}

#[test]
fn term_view_renders_border_corners() {
    let snap = playing_snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = playing_snapshot();
    snap.board[19][0] = Some(PieceKind::I.color());
    snap.active = None;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0, y0).unwrap().style.fg, PieceKind::I.color());
}

#[test]
fn term_view_hides_cells_above_the_board() {
    let mut snap = playing_snapshot();
    // Vertical I straddling the top edge: rows -2..=1.
    snap.active = Some(ActiveSnapshot {
        kind: PieceKind::I,
        rotation: 1,
        x: 0,
        y: -2,
    });
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(1, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1, 2).unwrap().ch, '█');
    assert_ne!(fb.get(1, 3).unwrap().ch, '█');
}

#[test]
fn term_view_draws_ghost_at_landing_row() {
    let mut snap = playing_snapshot();
    snap.active = Some(ActiveSnapshot {
        kind: PieceKind::O,
        rotation: 0,
        x: 0,
        y: 0,
    });
    snap.ghost_y = Some(18);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(1, 1 + 18).unwrap().ch, '░');
    assert_eq!(fb.get(1, 1 + 19).unwrap().ch, '░');
    assert_eq!(fb.get(1, 1).unwrap().ch, '█');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = playing_snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    // Wider than the 22x22 board frame to allow a panel.
    let text = screen_text(&GameView::default().render(&snap, Viewport::new(60, 22)));
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("NEXT"));
    assert!(text.contains("SOUND"));
}

#[test]
fn term_view_overlays_pause_menu() {
    let mut engine = Engine::new(EngineConfig::default(), NoAudio);
    engine.apply_command(Command::MenuConfirm);
    engine.apply_command(Command::Pause);
    engine.apply_command(Command::MenuDown);

    let snap = engine.snapshot();
    assert_eq!(snap.screen, ScreenKind::Paused);
    let text = screen_text(&GameView::default().render(&snap, Viewport::new(60, 24)));
    assert!(text.contains("PAUSED"));
    assert!(text.contains("Resume"));
    assert!(text.contains("> Main Menu <"));
    assert!(text.contains("Quit"));
}

#[test]
fn term_view_overlays_game_over() {
    let mut snap = playing_snapshot();
    snap.screen = ScreenKind::GameOver;
    snap.score = 4200;

    let text = screen_text(&GameView::default().render(&snap, Viewport::new(60, 24)));
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("SCORE 4200"));
}

#[test]
fn term_view_render_into_reuses_framebuffer() {
    let snap = playing_snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(1, 1);

    view.render_into(&snap, Viewport::new(30, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 24));
    assert_eq!(fb, view.render(&snap, Viewport::new(30, 24)));
}

#[test]
fn term_view_draws_ghost_only_while_playing() {
    let mut snap = playing_snapshot();
    snap.active = Some(ActiveSnapshot {
        kind: PieceKind::O,
        rotation: 0,
        x: 0,
        y: -1,
    });
    snap.ghost_y = Some(18);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(1, 1 + 19).unwrap().ch, '░');

    for screen in [ScreenKind::Paused, ScreenKind::GameOver] {
        snap.screen = screen;
        let text = screen_text(&GameView::default().render(&snap, Viewport::new(22, 22)));
        assert!(!text.contains('░'), "{screen:?} shows a ghost");
        assert!(text.contains('█'), "{screen:?} hides the active piece");
    }
}
