//! BoardView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::time::Duration;

use rand::Rng;

use crate::core::GameState;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, Tile};

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

/// Session colors. Tile edge and face are re-rolled for every new game;
/// bombs, flags and numbers keep a fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub tile_edge: Rgb,
    pub tile_face: Rgb,
    pub board_bg: Rgb,
    pub bomb: Rgb,
    pub flag: Rgb,
    pub cursor_bg: Rgb,
}

impl Theme {
    pub const fn classic() -> Self {
        Self {
            tile_edge: Rgb::new(160, 160, 170),
            tile_face: Rgb::new(90, 90, 110),
            board_bg: Rgb::new(30, 30, 40),
            bomb: Rgb::new(220, 60, 60),
            flag: Rgb::new(240, 200, 80),
            cursor_bg: Rgb::new(70, 110, 160),
        }
    }

    /// Roll random tile colors for a fresh game.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            tile_edge: Rgb::new(rng.random(), rng.random(), rng.random()),
            tile_face: Rgb::new(rng.random(), rng.random(), rng.random()),
            ..Self::classic()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

/// Computed board placement within a viewport.
#[derive(Debug, Clone, Copy)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// A lightweight terminal renderer for the minefield.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    theme: Theme,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            theme: Theme::classic(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn layout(&self, board_w: u16, board_h: u16, viewport: Viewport) -> Layout {
        let frame_w = board_w * self.cell_w + 2;
        let frame_h = board_h * self.cell_h + 2;
        Layout {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Translate terminal coordinates to a board cell.
    ///
    /// Returns `None` for coordinates on the frame or outside the board.
    pub fn hit_test(
        &self,
        game: &GameState,
        viewport: Viewport,
        col: u16,
        row: u16,
    ) -> Option<(u16, u16)> {
        let board = game.board();
        let layout = self.layout(board.width(), board.height(), viewport);
        let inner_x = col.checked_sub(layout.start_x + 1)?;
        let inner_y = row.checked_sub(layout.start_y + 1)?;
        let x = inner_x / self.cell_w;
        let y = inner_y / self.cell_h;
        if x < board.width() && y < board.height() {
            Some((x, y))
        } else {
            None
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport and fully repainted.
    pub fn render_into(
        &self,
        game: &GameState,
        cursor: (u16, u16),
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Default::default());

        let board = game.board();
        let layout = self.layout(board.width(), board.height(), viewport);

        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.draw_frame(
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        let show_cursor = game.status() == GameStatus::Playing;
        for index in 0..board.len() {
            let (x, y) = board.coord_of(index);
            let is_cursor = show_cursor && (x, y) == cursor;
            self.draw_tile(fb, layout, x, y, board.tile(index), board.number(index), is_cursor);
        }

        self.draw_side_panel(fb, game, viewport, layout);

        match game.status() {
            GameStatus::Won => self.draw_overlay(fb, layout, "CLEARED", game.elapsed()),
            GameStatus::Lost => self.draw_overlay(fb, layout, "BOOM", game.elapsed()),
            GameStatus::Idle | GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, game: &GameState, cursor: (u16, u16), viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(game, cursor, viewport, &mut fb);
        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        x: u16,
        y: u16,
        tile: Tile,
        number: u8,
        is_cursor: bool,
    ) {
        let theme = &self.theme;
        let px = layout.start_x + 1 + x * self.cell_w;
        let py = layout.start_y + 1 + y * self.cell_h;

        if tile.covered {
            // Edge color shaded over the face color reads as a raised tile.
            let bg = if is_cursor { theme.cursor_bg } else { theme.tile_face };
            let covered = CellStyle::plain(theme.tile_edge, bg);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '▒', covered);
            if tile.flagged {
                let flag = CellStyle::bold(theme.flag, bg);
                fb.put_char(px + (self.cell_w - 1) / 2, py + self.cell_h / 2, '⚑', flag);
            }
            return;
        }

        let bg = if is_cursor { theme.cursor_bg } else { theme.board_bg };
        if tile.bomb {
            let bomb = CellStyle::plain(theme.bomb, bg);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', bomb);
        } else if number > 0 {
            let digit = CellStyle::bold(number_color(number), bg);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', digit);
            fb.put_char(
                px + (self.cell_w - 1) / 2,
                py + self.cell_h / 2,
                (b'0' + number) as char,
                digit,
            );
        } else {
            let empty = CellStyle::plain(theme.board_bg, bg);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', empty);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        game: &GameState,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout.start_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::bold(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0));
        let value = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = CellStyle {
            dim: true,
            ..value
        };

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "BOMBS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, game.config().bombs() as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "FLAGS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, game.board().flag_count() as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MODE", label);
        y = y.saturating_add(1);
        if game.flag_mode() {
            fb.put_str(panel_x, y, "FLAG", CellStyle::bold(self.theme.flag, Rgb::new(0, 0, 0)));
        } else {
            fb.put_str(panel_x, y, "DIG", value);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        fb.put_str(
            panel_x,
            y,
            &format_hms(game.elapsed().unwrap_or(Duration::ZERO)),
            value,
        );
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "space dig", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "f flag mode", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "r new game", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "q quit", hint);
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        text: &str,
        elapsed: Option<Duration>,
    ) {
        let line = match elapsed {
            Some(d) => format!("{} {}", text, format_hms(d)),
            None => text.to_string(),
        };
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = line.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::bold(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        fb.put_str(x, mid_y, &line, style);
    }
}

/// Classic per-number digit colors, adjusted for dark backgrounds.
fn number_color(number: u8) -> Rgb {
    match number {
        1 => Rgb::new(90, 140, 255),
        2 => Rgb::new(90, 200, 90),
        3 => Rgb::new(235, 80, 80),
        4 => Rgb::new(150, 100, 240),
        5 => Rgb::new(200, 140, 70),
        6 => Rgb::new(80, 200, 200),
        7 => Rgb::new(230, 230, 230),
        _ => Rgb::new(160, 160, 160),
    }
}

/// Format a play duration as `HH:MM:SS`.
pub fn format_hms(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms_zero_pads() {
        assert_eq!(format_hms(Duration::ZERO), "00:00:00");
        assert_eq!(format_hms(Duration::from_secs(61)), "00:01:01");
        assert_eq!(format_hms(Duration::from_secs(3600 * 2 + 60 * 3 + 4)), "02:03:04");
    }

    #[test]
    fn test_number_colors_are_distinct_for_low_counts() {
        assert_ne!(number_color(1), number_color(2));
        assert_ne!(number_color(2), number_color(3));
    }
}
