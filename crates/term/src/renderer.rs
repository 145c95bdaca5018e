//! Flushes framebuffers to a terminal.
//!
//! Every frame goes through one encoder: rows that differ from the previous
//! frame are split into spans of changed cells and only those spans are
//! repainted. With no usable previous frame (first draw, resize, `invalidate`)
//! the screen is cleared and every row counts as one changed span.
//!
//! Style changes are tracked by a [`Pen`], so a run of same-colored board
//! cells costs one color escape rather than one per cell.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
    QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Double-buffered terminal output.
///
/// Writes to stdout in the game; tests hand it a `Vec<u8>`.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Last frame sent to the terminal.
    shown: FrameBuffer,
    /// `shown` no longer matches the screen.
    stale: bool,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: FrameBuffer::new(0, 0),
            stale: true,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.stale = true;
        self.write_buf()
    }

    /// Undo everything `enter` did.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.write_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint the whole screen on the next draw (after a resize).
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Draw `fb`, then swap it with the previously shown frame.
    ///
    /// The caller gets the old buffer back and must fully redraw it before the
    /// next call; `GameView::render_into` does.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let shown = (!self.stale).then_some(&self.shown);
        encode_frame(shown, fb, &mut self.buf)?;
        if !self.buf.is_empty() {
            self.write_buf()?;
        }

        std::mem::swap(&mut self.shown, fb);
        self.stale = false;
        Ok(())
    }

    fn write_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `shown` into `next` on screen.
///
/// `None`, or a frame of another size, means the screen content is unknown.
fn encode_frame(shown: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    let mut pen = Pen::default();
    let shown = shown.filter(|s| s.width() == next.width() && s.height() == next.height());

    match shown {
        Some(shown) => {
            for y in 0..next.height() {
                let (before, after) = (shown.row(y), next.row(y));
                if before == after {
                    continue;
                }
                for span in changed_spans(before, after) {
                    paint(out, &mut pen, span.start as u16, y, &after[span])?;
                }
            }
        }
        None => {
            out.queue(terminal::Clear(ClearType::All))?;
            for y in 0..next.height() {
                paint(out, &mut pen, 0, y, next.row(y))?;
            }
        }
    }

    if pen.style.is_some() {
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn paint(out: &mut Vec<u8>, pen: &mut Pen, x: u16, y: u16, cells: &[Cell]) -> io::Result<()> {
    out.queue(cursor::MoveTo(x, y))?;
    for cell in cells {
        pen.switch(out, cell.style)?;
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

/// Column ranges where `before` and `after` differ, adjacent cells merged.
fn changed_spans<'a>(before: &'a [Cell], after: &'a [Cell]) -> impl Iterator<Item = Range<usize>> + 'a {
    let len = before.len().min(after.len());
    let mut x = 0;
    std::iter::from_fn(move || {
        let start = (x..len).find(|&i| before[i] != after[i])?;
        let end = (start..len).find(|&i| before[i] == after[i]).unwrap_or(len);
        x = end;
        Some(start..end)
    })
}

/// Current terminal style; only emits escapes for what changes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn switch(&mut self, out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
        let last = self.style.replace(style);
        if last == Some(style) {
            return Ok(());
        }

        // SGR reset also drops both colors.
        let reset = last.map_or(true, |l| l.bold != style.bold || l.dim != style.dim);
        if reset {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if reset || last.map(|l| l.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(true_color(style.fg)))?;
        }
        if reset || last.map(|l| l.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(true_color(style.bg)))?;
        }
        Ok(())
    }
}

fn true_color(Rgb { r, g, b }: Rgb) -> Color {
    Color::Rgb { r, g, b }
}
