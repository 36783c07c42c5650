//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{EngineSnapshot, GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};
use crate::types::{ColorId, FlowState};

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

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 14;

const MENU_LINES: [&str; 9] = [
    "T W O T R I S",
    "",
    "ENTER  start",
    "Q      quit",
    "",
    "LEFT   W A S D",
    "RIGHT  arrows",
    "ESC    pause",
    "Z      menu",
];

/// Renders the menu, or the shared board with both pieces and a score panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self::new(2, 1)
    }
}

/// Top-left corner of the board frame, in terminal coordinates.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let engine = match (snap.flow, snap.engine.as_ref()) {
            (FlowState::Start, _) | (_, None) => {
                self.draw_menu(fb, viewport);
                return;
            }
            (_, Some(engine)) => engine,
        };

        let frame = self.board_frame(engine, viewport);
        self.draw_board(fb, engine, frame);
        self.draw_side_panel(fb, snap, engine, viewport, frame);

        match snap.flow {
            FlowState::Paused => {
                self.draw_overlay(fb, frame, &["PAUSED", "ESC resume", "Z menu"]);
            }
            FlowState::GameOver => {
                self.draw_overlay(fb, frame, &["GAME OVER", "ENTER restart", "Z menu"]);
            }
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn board_frame(&self, engine: &EngineSnapshot, viewport: Viewport) -> Frame {
        let w = engine.cols as u16 * self.cell_w + 2;
        let h = engine.rows as u16 * self.cell_h + 2;
        let y = viewport.height.saturating_sub(h) / 2;
        // Leave room for the panel on the right when the terminal allows it.
        let spare = viewport.width.saturating_sub(w);
        let x = if spare >= PANEL_MIN_WIDTH + 2 {
            spare.saturating_sub(PANEL_MIN_WIDTH + 2) / 2
        } else {
            spare / 2
        };
        Frame { x, y, w, h }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, engine: &EngineSnapshot, frame: Frame) {
        let border = if engine.power_active {
            CellStyle::new(Rgb::new(255, 200, 40), Rgb::default()).bold()
        } else {
            CellStyle::new(Rgb::new(200, 200, 200), Rgb::default())
        };
        fb.draw_box(frame.x, frame.y, frame.w, frame.h, border);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for y in 0..engine.rows as i8 {
            for x in 0..engine.cols as i8 {
                match engine.cell(x, y) {
                    Some(color) => self.draw_block(fb, frame, engine, x, y, color),
                    None => self.fill_cell(fb, frame, x as u16, y as u16, '·', empty),
                }
            }
        }

        self.draw_piece(fb, frame, engine, &engine.left);
        self.draw_piece(fb, frame, engine, &engine.right);
    }

    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        engine: &EngineSnapshot,
        piece: &PieceSnapshot,
    ) {
        for (x, y) in piece.cells() {
            self.draw_block(fb, frame, engine, x, y, piece.color);
        }
    }

    /// Draw one colored block; cells off the board (above the top) are skipped.
    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        engine: &EngineSnapshot,
        x: i8,
        y: i8,
        color: ColorId,
    ) {
        if x < 0 || y < 0 || x >= engine.cols as i8 || y >= engine.rows as i8 {
            return;
        }
        let style = CellStyle::new(Rgb::from(color), BOARD_BG).bold();
        self.fill_cell(fb, frame, x as u16, y as u16, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        engine: &EngineSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if viewport.width.saturating_sub(panel_x) < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::default());
        let mut y = frame.y;

        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, engine.score, value);
        y += 3;

        fb.put_str(panel_x, y, "MULTIPLIER", label);
        let x = fb.put_str(panel_x, y + 1, "x", value);
        fb.put_u32(x, y + 1, engine.multiplier, value);
        y += 3;

        fb.put_str(panel_x, y, "POWER", label);
        if engine.power_active {
            let hot = CellStyle::new(Rgb::new(255, 200, 40), Rgb::default()).bold();
            let secs = engine.power_remaining_ms.div_ceil(1000).min(u32::MAX as u64) as u32;
            let x = fb.put_u32(panel_x, y + 1, secs, hot);
            fb.put_str(x, y + 1, "s", hot);
        } else {
            fb.put_str(panel_x, y + 1, "-", value);
        }
        y += 3;

        fb.put_str(panel_x, y, "GAME", label);
        let x = fb.put_str(panel_x, y + 1, "#", value);
        fb.put_u32(x, y + 1, snap.episode_id, value);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::default()).bold();
        let top = (frame.y + frame.h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let w = line.chars().count() as u16;
            let x = frame.x + frame.w.saturating_sub(w) / 2;
            fb.put_str(x, top + i as u16, line, style);
        }
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let title = CellStyle::new(Rgb::new(255, 165, 0), Rgb::default()).bold();
        let body = CellStyle::default();
        let top = viewport.height.saturating_sub(MENU_LINES.len() as u16) / 2;
        let width = MENU_LINES
            .iter()
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let left = viewport.width.saturating_sub(width) / 2;

        for (i, line) in MENU_LINES.iter().enumerate() {
            let style = if i == 0 { title } else { body };
            fb.put_str(left, top + i as u16, line, style);
        }
    }
}
