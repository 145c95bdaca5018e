//! GameView: maps an engine [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::rotations;
use crate::engine::{MainItem, MenuItem, OptionsItem, PauseItem, Snapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ScreenKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const HIGHLIGHT: Rgb = Rgb::new(255, 215, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoardFrame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for every game screen.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    /// Render the current frame into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        match snap.screen {
            ScreenKind::Menu => self.draw_main_menu(fb, snap, viewport),
            ScreenKind::Options => self.draw_options(fb, snap, viewport),
            ScreenKind::Playing => {
                self.draw_playfield(fb, snap, viewport);
            }
            ScreenKind::Paused => {
                let frame = self.draw_playfield(fb, snap, viewport);
                self.draw_pause_menu(fb, snap, frame);
            }
            ScreenKind::GameOver => {
                let frame = self.draw_playfield(fb, snap, viewport);
                self.draw_game_over(fb, snap, frame);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_main_menu(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport) {
        let top = viewport.height.saturating_sub(8) / 2;
        let title = CellStyle::new(HIGHLIGHT, SCREEN_BG).bold();
        fb.put_str_centered(0, viewport.width, top, "BLOCKFALL", title);

        let selected = snap.selected.unwrap_or(0);
        for (i, item) in MainItem::ALL.iter().enumerate() {
            let y = top + 3 + i as u16;
            draw_menu_entry(fb, viewport.width, y, item.label(), i == selected);
        }

        let hint = CellStyle::new(TEXT, SCREEN_BG).dim();
        fb.put_str_centered(0, viewport.width, top + 7, "arrows move  enter select", hint);
    }

    fn draw_options(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport) {
        let top = viewport.height.saturating_sub(6) / 2;
        let title = CellStyle::new(HIGHLIGHT, SCREEN_BG).bold();
        fb.put_str_centered(0, viewport.width, top, "OPTIONS", title);

        let selected = snap.selected.unwrap_or(0);
        for (i, item) in OptionsItem::ALL.iter().enumerate() {
            let y = top + 3 + i as u16;
            let label = match item {
                OptionsItem::Sound if snap.sound_enabled => "Sound: ON",
                OptionsItem::Sound => "Sound: OFF",
                OptionsItem::Back => item.label(),
            };
            draw_menu_entry(fb, viewport.width, y, label, i == selected);
        }
    }

    /// Board, pieces and side panel. Returns the board frame for overlays.
    fn draw_playfield(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport) -> BoardFrame {
        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame = BoardFrame {
            x: viewport.width.saturating_sub(board_px_w + 2) / 2,
            y: viewport.height.saturating_sub(board_px_h + 2) / 2,
            w: board_px_w + 2,
            h: board_px_h + 2,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        // Background for play area.
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);

        // Border.
        draw_border(fb, frame.x, frame.y, frame.w, frame.h, border);

        // Locked board cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, frame, x as i32, y as i32, *color),
                    None => self.draw_empty_cell(fb, frame, x as u16, y as u16),
                }
            }
        }

        if let Some(active) = snap.active {
            let piece = active.piece();

            // Ghost piece, only while the game is live.
            if let Some(ghost_y) = snap.ghost_y.filter(|_| snap.playable()) {
                let ghost_style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
                for (row, col) in piece.occupied_cells(None, Some(ghost_y)) {
                    if let Some((x, y)) = visible_cell(row, col) {
                        self.fill_cell_rect(fb, frame, x, y, '░', ghost_style);
                    }
                }
            }

            // Active piece; rows above the board stay hidden.
            for (row, col) in piece.cells() {
                self.draw_block(fb, frame, col, row, piece.color());
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);
        frame
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: BoardFrame, col: i32, row: i32, color: Rgb) {
        let Some((x, y)) = visible_cell(row, col) else {
            return;
        };
        let style = CellStyle::new(color, PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: BoardFrame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport, frame: BoardFrame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::new(TEXT, SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(kind) = snap.next {
            let style = CellStyle::new(kind.color(), SCREEN_BG).bold();
            for (dy, cells) in rotations(kind)[0].iter().enumerate() {
                for (dx, &filled) in cells.iter().enumerate() {
                    if filled != 0 {
                        let px = panel_x + (dx as u16) * self.cell_w;
                        let py = y + (dy as u16) * self.cell_h;
                        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
                    }
                }
            }
        }
        y = y.saturating_add(5);

        fb.put_str(panel_x, y, "SOUND", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, if snap.sound_enabled { "ON" } else { "OFF" }, value);
    }

    fn draw_pause_menu(&self, fb: &mut FrameBuffer, snap: &Snapshot, frame: BoardFrame) {
        let top = frame.y.saturating_add(frame.h / 2).saturating_sub(3);
        let box_style = CellStyle::new(TEXT, SCREEN_BG);
        fb.fill_rect(frame.x + 1, top, frame.w - 2, 7, ' ', box_style);

        let title = CellStyle::new(HIGHLIGHT, SCREEN_BG).bold();
        fb.put_str_centered(frame.x, frame.w, top + 1, "PAUSED", title);

        let selected = snap.selected.unwrap_or(0);
        for (i, item) in PauseItem::ALL.iter().enumerate() {
            let y = top + 3 + i as u16;
            draw_menu_entry_in(fb, frame.x, frame.w, y, item.label(), i == selected);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &Snapshot, frame: BoardFrame) {
        let top = frame.y.saturating_add(frame.h / 2).saturating_sub(3);
        let box_style = CellStyle::new(TEXT, SCREEN_BG);
        fb.fill_rect(frame.x + 1, top, frame.w - 2, 6, ' ', box_style);

        let title = CellStyle::new(Rgb::new(255, 80, 80), SCREEN_BG).bold();
        fb.put_str_centered(frame.x, frame.w, top + 1, "GAME OVER", title);

        let value = CellStyle::new(TEXT, SCREEN_BG);
        let label = "SCORE ";
        let digits = count_digits(snap.score);
        let line_w = label.len() as u16 + digits;
        let x = frame.x.saturating_add(frame.w.saturating_sub(line_w) / 2);
        fb.put_str(x, top + 2, label, value);
        fb.put_u32(x + label.len() as u16, top + 2, snap.score, value);

        let hint = CellStyle::new(TEXT, SCREEN_BG).dim();
        fb.put_str_centered(frame.x, frame.w, top + 4, "R retry  M menu", hint);
    }
}

/// Terminal cell for a grid position, if it is on the visible board.
fn visible_cell(row: i32, col: i32) -> Option<(u16, u16)> {
    if (0..BOARD_WIDTH).contains(&col) && (0..BOARD_HEIGHT).contains(&row) {
        Some((col as u16, row as u16))
    } else {
        None
    }
}

fn draw_menu_entry(fb: &mut FrameBuffer, width: u16, y: u16, label: &str, selected: bool) {
    draw_menu_entry_in(fb, 0, width, y, label, selected);
}

fn draw_menu_entry_in(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, label: &str, selected: bool) {
    let style = if selected {
        CellStyle::new(HIGHLIGHT, SCREEN_BG).bold()
    } else {
        CellStyle::new(TEXT, SCREEN_BG)
    };
    fb.put_str_centered(x, w, y, label, style);

    if selected {
        let len = label.chars().count() as u16;
        let start = x.saturating_add(w.saturating_sub(len) / 2);
        fb.put_char(start.saturating_sub(2), y, '>', style);
        fb.put_char(start.saturating_add(len).saturating_add(1), y, '<', style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn count_digits(mut n: u32) -> u16 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
