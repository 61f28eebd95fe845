//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board pixels are scaled down to terminal cells: one column per
//! `COL_PX` pixels and one row per `ROW_PX` pixels, which places grid
//! neighbours three columns apart and one row up or down. A die is drawn as a
//! three-column token such as `[4]`.

use crate::core::geometry::{canonical_position, grid_origin};
use crate::core::{FlashFrame, GameSnapshot, Visual};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Banner, GridPos, Point, MOVE_QUEUE_LEN, QUEUE_SLOT_WIDTH, ROCK};

const COL_PX: f32 = 6.0;
const ROW_PX: f32 = 10.0;

/// Inner width of the board frame in columns.
pub const BOARD_VIEW_WIDTH: u16 = 47;
/// Inner height of the board frame in rows.
pub const BOARD_VIEW_HEIGHT: u16 = 17;
/// Frame row of grid row/col (0, 0), counted from the top of the inner area.
const ORIGIN_ROW: i32 = 9;

/// Columns per queue slot in the move strip.
const SLOT_COLS: i32 = 5;
/// Rows above the board frame used by the move strip.
const QUEUE_ROWS: u16 = 2;

/// Width reserved right of the board for the side panel.
const PANEL_WIDTH: u16 = 18;

const BOARD_BG: Rgb = Rgb::new(24, 26, 36);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const HOVER_BG: Rgb = Rgb::new(70, 70, 110);

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

/// Terminal cell rectangle of the board area (inside the frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardArea {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl BoardArea {
    /// Terminal cell of the left edge of a die drawn at `position`, if inside.
    pub fn to_term(&self, position: Point) -> Option<(u16, u16)> {
        let origin = grid_origin();
        let col = 1 + ((position.x - origin.x) / COL_PX).round() as i32;
        let row = ORIGIN_ROW + ((position.y - origin.y) / ROW_PX).round() as i32;
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some((self.x + col as u16, self.y + row as u16))
    }

    /// Board-surface point under a terminal cell, aimed at the middle line of
    /// the top face of any die drawn across that cell.
    pub fn to_board_point(&self, column: u16, row: u16) -> Option<Point> {
        if column < self.x
            || row < self.y
            || column >= self.x + self.width
            || row >= self.y + self.height
        {
            return None;
        }
        let origin = grid_origin();
        let col = (column - self.x) as f32 - 1.0;
        let row = (row - self.y) as f32 - ORIGIN_ROW as f32;
        Some(Point::new(
            origin.x + col * COL_PX + 10.0,
            origin.y + row * ROW_PX + 8.0,
        ))
    }
}

/// A lightweight terminal renderer for the dice board.
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Where the board lands inside `viewport`.
    pub fn board_area(&self, viewport: Viewport) -> BoardArea {
        let frame_w = BOARD_VIEW_WIDTH + 2;
        let frame_h = BOARD_VIEW_HEIGHT + 2 + QUEUE_ROWS;
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_WIDTH) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardArea {
            x: start_x + 1,
            y: start_y + QUEUE_ROWS + 1,
            width: BOARD_VIEW_WIDTH,
            height: BOARD_VIEW_HEIGHT,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_cursor(snap, None, viewport, fb);
    }

    /// Render with a keyboard cursor marker on `cursor`.
    pub fn render_into_with_cursor(
        &self,
        snap: &GameSnapshot,
        cursor: Option<GridPos>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let area = self.board_area(viewport);
        let frame_x = area.x - 1;
        let frame_y = area.y - 1;
        let frame_w = area.width + 2;
        let frame_h = area.height + 2;

        let floor = CellStyle::new(Rgb::new(70, 74, 90), BOARD_BG).dim();
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let board_bg = CellStyle::new(floor.fg, BOARD_BG);
        fb.fill_rect(area.x, area.y, area.width, area.height, ' ', board_bg);
        self.draw_border(fb, frame_x, frame_y, frame_w, frame_h, border);

        for shadow in &snap.shadows {
            if let Some((x, y)) = area.to_term(*shadow) {
                fb.put_str(x, y, " · ", floor);
            }
        }

        if let Some(cell) = cursor {
            if let Some((x, y)) = area.to_term(canonical_position(cell)) {
                let marker = CellStyle::new(Rgb::new(255, 255, 255), HOVER_BG).bold();
                fb.put_str(x, y, "< >", marker);
            }
        }

        for die in &snap.dice {
            let Some((x, y)) = area.to_term(die.position) else {
                continue;
            };
            let hovered = snap.hovered == Some(die.cell);
            self.draw_die(fb, x, y, die.value, die.visual, hovered);
        }

        let label = CellStyle::new(Rgb::new(250, 220, 90), BOARD_BG).bold();
        for floating in &snap.floating {
            if let Some((x, y)) = area.to_term(floating.position) {
                let x = fb.put_str(x, y, "+", label);
                fb.put_u32(x, y, floating.points, label);
            }
        }

        self.draw_queue(fb, snap, frame_x, frame_y.saturating_sub(QUEUE_ROWS), frame_w);
        self.draw_side_panel(fb, snap, viewport, frame_x + frame_w + 2, frame_y);

        if let Some(banner) = snap.banner {
            self.draw_banner(fb, frame_x, frame_y, frame_w, frame_h, banner);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_die(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        value: i8,
        visual: Visual,
        hovered: bool,
    ) {
        let bg = if hovered { HOVER_BG } else { BOARD_BG };
        let face = face_color(value);
        let digit = if value > ROCK {
            char::from(b'0' + value as u8)
        } else {
            ' '
        };

        match visual {
            Visual::Normal if value == ROCK => {
                fb.put_str(x, y, "▓▓▓", CellStyle::new(face, bg));
            }
            Visual::Normal => {
                let style = CellStyle::new(face, bg).bold();
                fb.put_char(x, y, '[', style);
                fb.put_char(x + 1, y, digit, style);
                fb.put_char(x + 2, y, ']', style);
            }
            Visual::Flash(FlashFrame::Solid) => {
                let style = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(250, 250, 250)).bold();
                fb.put_char(x, y, '[', style);
                fb.put_char(x + 1, y, digit, style);
                fb.put_char(x + 2, y, ']', style);
            }
            Visual::Flash(FlashFrame::Wireframe) => {
                fb.put_str(x, y, "[ ]", CellStyle::new(Rgb::new(250, 250, 250), bg));
            }
            Visual::Fading { alpha } => {
                let mut style = CellStyle::new(face.blend(BOARD_BG, alpha), bg);
                style.dim = alpha < 128;
                fb.put_char(x, y, '[', style);
                fb.put_char(x + 1, y, digit, style);
                fb.put_char(x + 2, y, ']', style);
            }
        }
    }

    fn draw_queue(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16, w: u16) {
        let style = CellStyle::new(Rgb::new(160, 160, 170), PANEL_BG);
        let active = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(60, 90, 60)).bold();

        let strip_w = SLOT_COLS * MOVE_QUEUE_LEN as i32;
        let strip_x = x as i32 + (w as i32 - strip_w) / 2;
        let shift = snap.queue_offset_x * SLOT_COLS / QUEUE_SLOT_WIDTH;

        for (i, slot) in snap.queue.iter().enumerate() {
            let Some(mv) = slot.mv else {
                continue;
            };
            let rel = i as i32 * SLOT_COLS + shift;
            if rel < 0 || rel + SLOT_COLS > strip_w {
                continue;
            }
            let sx = (strip_x + rel) as u16;
            let slot_style = if slot.active { active } else { style };
            fb.put_char(sx + 1, y, if slot.active { '[' } else { ' ' }, slot_style);
            fb.put_char(sx + 2, y, mv.direction.arrow(), slot_style);
            fb.put_char(sx + 3, y, if slot.active { ']' } else { ' ' }, slot_style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ACTIVE", label);
        y = y.saturating_add(1);
        if let Some(mv) = snap.queue.iter().find(|s| s.active).and_then(|s| s.mv) {
            let x = fb.put_str(panel_x, y, mv.direction.as_str(), value);
            fb.put_char(x + 1, y, mv.direction.arrow(), value);
        }
        y = y.saturating_add(2);

        for line in ["arrows: cursor", "enter: select", "n: next level", "r: restart", "q: quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, banner: Banner) {
        let mid_y = y.saturating_add(h / 2);
        let title = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let hint = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let text = banner.title();
        let tx = x.saturating_add(w.saturating_sub(text.chars().count() as u16) / 2);
        fb.put_str(tx, mid_y, text, title);

        let next = match banner {
            Banner::Won | Banner::Complete => "n: next level  r: restart",
            Banner::GameOver => "r: restart",
        };
        let nx = x.saturating_add(w.saturating_sub(next.chars().count() as u16) / 2);
        fb.put_str(nx, mid_y.saturating_add(1), next, hint);
    }
}

fn face_color(value: i8) -> Rgb {
    match value {
        1 => Rgb::new(230, 90, 90),
        2 => Rgb::new(240, 170, 70),
        3 => Rgb::new(240, 230, 90),
        4 => Rgb::new(110, 220, 120),
        5 => Rgb::new(90, 160, 240),
        6 => Rgb::new(200, 120, 230),
        _ => Rgb::new(120, 120, 120),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_grid_maps_inside_board_area() {
        let area = GameView::default().board_area(Viewport::new(80, 24));
        for row in 0..8 {
            for col in 0..8 {
                let (x, y) = area
                    .to_term(canonical_position(GridPos::new(row, col)))
                    .expect("cell on screen");
                assert!(x + 3 <= area.x + area.width);
                assert!(y < area.y + area.height);
            }
        }
    }

    #[test]
    fn neighbours_are_three_columns_apart() {
        let area = GameView::default().board_area(Viewport::new(80, 24));
        let a = area.to_term(canonical_position(GridPos::new(3, 3))).unwrap();
        let b = area.to_term(canonical_position(GridPos::new(3, 4))).unwrap();
        let c = area.to_term(canonical_position(GridPos::new(4, 3))).unwrap();
        assert_eq!((b.0 - a.0, a.1 - b.1), (3, 1));
        assert_eq!((c.0 - a.0, c.1 - a.1), (3, 1));
    }

    #[test]
    fn off_screen_positions_are_skipped() {
        let area = GameView::default().board_area(Viewport::new(80, 24));
        let above = canonical_position(GridPos::new(0, 7)).offset(0.0, -320.0);
        assert_eq!(area.to_term(above), None);
    }

    #[test]
    fn top_anchor_starts_at_row_zero() {
        let area = GameView::new()
            .with_anchor_y(AnchorY::Top)
            .board_area(Viewport::new(80, 40));
        assert_eq!(area.y, QUEUE_ROWS + 1);
    }

    #[test]
    fn clicks_outside_board_area_are_rejected() {
        let area = GameView::default().board_area(Viewport::new(80, 24));
        assert_eq!(area.to_board_point(0, 0), None);
        assert!(area.to_board_point(area.x, area.y).is_some());
    }
}
