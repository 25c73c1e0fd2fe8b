//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{ActiveSnapshot, GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, RunState, BOARD_HEIGHT, BOARD_WIDTH};

/// Neon palette indexed by color id (`0` is the empty background).
pub const PALETTE: [Rgb; 8] = [
    Rgb::hex(0x000000),
    Rgb::hex(0xFF0D72),
    Rgb::hex(0x0DC2FF),
    Rgb::hex(0x0DFF72),
    Rgb::hex(0xF538FF),
    Rgb::hex(0xFF8E0D),
    Rgb::hex(0xFFE138),
    Rgb::hex(0x3877FF),
];

const FIELD_BG: Rgb = Rgb::hex(0x0A0A12);
const GRID_DOT: Rgb = Rgb::hex(0x23232E);
const FRAME: Rgb = Rgb::hex(0x8A2BE2);
const BLOCK: char = '█';

/// Color for a cell value, `None` for empty or out-of-range ids.
pub fn cell_color(cell: Cell) -> Option<Rgb> {
    match cell {
        0 => None,
        c => PALETTE.get(c as usize).copied(),
    }
}

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen placement of the board frame, computed once per frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (w, h) = self.frame_size();
        let layout = Layout {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        self.draw_border(fb, layout);

        for (y, row) in snap.grid.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell_color(cell) {
                    Some(color) => self.draw_block(fb, layout, x, y, color),
                    None => self.draw_empty(fb, layout, x, y),
                }
            }
        }

        if let Some(active) = &snap.active {
            self.draw_active(fb, layout, active);
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        match snap.run_state {
            RunState::Running => {}
            RunState::Paused => self.draw_overlay(fb, layout, &["PAUSED"]),
            RunState::GameOver => self.draw_overlay(fb, layout, &["GAME OVER", "PRESS P"]),
            RunState::NotStarted => self.draw_overlay(fb, layout, &["PRESS P", "TO START"]),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, l: Layout) {
        let style = CellStyle::new(FRAME, Rgb::default()).bold();
        let (right, bottom) = (l.x + l.w - 1, l.y + l.h - 1);

        fb.put_char(l.x, l.y, '╔', style);
        fb.put_char(right, l.y, '╗', style);
        fb.put_char(l.x, bottom, '╚', style);
        fb.put_char(right, bottom, '╝', style);
        for x in l.x + 1..right {
            fb.put_char(x, l.y, '═', style);
            fb.put_char(x, bottom, '═', style);
        }
        for y in l.y + 1..bottom {
            fb.put_char(l.x, y, '║', style);
            fb.put_char(right, y, '║', style);
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, l: Layout, x: u16, y: u16) {
        let style = CellStyle::new(GRID_DOT, FIELD_BG);
        self.fill_board_cell(fb, l, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, l: Layout, x: u16, y: u16, color: Rgb) {
        let style = CellStyle::new(color, FIELD_BG).bold();
        self.fill_board_cell(fb, l, x, y, BLOCK, style);
    }

    fn draw_active(&self, fb: &mut FrameBuffer, l: Layout, active: &ActiveSnapshot) {
        for (x, y, c) in active.cells() {
            // Cells hanging above the top edge are not drawn.
            if !(0..BOARD_WIDTH as i32).contains(&x) || !(0..BOARD_HEIGHT as i32).contains(&y) {
                continue;
            }
            if let Some(color) = cell_color(c) {
                self.draw_block(fb, l, x as u16, y as u16, color);
            }
        }
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        l: Layout,
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = l.x + 1 + x * self.cell_w;
        let py = l.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, vp: Viewport, l: Layout) {
        let panel_x = l.x.saturating_add(l.w).saturating_add(2);
        if panel_x.saturating_add(10) > vp.width {
            return;
        }

        let label = CellStyle::new(Rgb::hex(0x0DC2FF), Rgb::default()).bold();
        let value = CellStyle::new(Rgb::new(230, 230, 230), Rgb::default());

        let mut y = l.y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, &next);
        }
    }

    /// Draw the queued piece matrix at a fixed screen position.
    fn draw_preview(&self, fb: &mut FrameBuffer, x0: u16, y0: u16, piece: &Piece) {
        for (dx, dy, c) in piece.shape.colored_minos() {
            let Some(color) = cell_color(c) else {
                continue;
            };
            let style = CellStyle::new(color, Rgb::default()).bold();
            let px = x0 + dx as u16 * self.cell_w;
            let py = y0 + dy as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, BLOCK, style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, l: Layout, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::default()).bold();
        let top = (l.y + l.h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = l.x + l.w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}
