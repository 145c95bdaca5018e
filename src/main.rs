//! Blockfall terminal runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout). One loop iteration is one frame: drain input,
//! advance the engine by the real elapsed time, render.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use blockfall::engine::{Engine, Snapshot};
use blockfall::input::map_key;
use blockfall::term::{FrameBuffer, GameView, TerminalBell, TerminalRenderer, Viewport};
use blockfall::{logging, Settings};

fn main() -> Result<()> {
    let settings = Settings::from_env().context("invalid configuration")?;
    logging::init(settings.log_path.as_deref())?;
    info!(
        seed = settings.seed,
        sound = settings.sound_enabled,
        fps = settings.fps,
        "starting"
    );

    let mut term = TerminalRenderer::stdout();
    term.enter()?;

    let result = run(&mut term, &settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, settings: &Settings) -> Result<()> {
    let mut engine = Engine::new(settings.engine_config(), TerminalBell::stdout());

    let view = GameView::default();
    let mut snap = Snapshot::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    let frame = settings.frame_duration();
    let mut last_frame = Instant::now();

    while engine.is_running() {
        // Input until the next frame is due.
        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            // Drain everything already queued so held keys do not lag.
            loop {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if let Some(cmd) = map_key(key, engine.screen_kind()) {
                            engine.apply_command(cmd);
                        }
                    }
                    Event::Resize(_, _) => term.invalidate(),
                    _ => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if last_frame.elapsed() < frame {
            continue;
        }

        let now = Instant::now();
        let dt = now - last_frame;
        last_frame = now;
        engine.update(dt);

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        engine.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }

    info!(score = engine.session().score(), "exiting");
    Ok(())
}
