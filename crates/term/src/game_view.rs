//! LevelView: maps a [`LevelSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! | Element | Glyphs |
//! |---------|--------|
//! | Platform | `▀▀` |
//! | Ladder | `╟╢` |
//! | Coin / gem | `()` / `<>` |
//! | Ninja facing left / right | `◄█` / `█►` |
//! | Ninja on a ladder | `╠╣` |
//!
//! Ninjas move in pixels, so they are placed at the nearest half tile
//! horizontally and the nearest tile vertically.

use crate::core::{Extra, LevelSnapshot, LevelState, NinjaSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Colour, HorizontalDirection};

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

const PLAY_BG: Rgb = Rgb::new(20, 22, 34);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Top-left corner of the play area (inside the border).
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

/// A lightweight terminal renderer for one level.
pub struct LevelView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for LevelView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl LevelView {
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

    /// Render a level into an existing framebuffer.
    ///
    /// Does not allocate once the framebuffer has the viewport's size.
    pub fn render_into(
        &self,
        snap: &LevelSnapshot,
        paused: bool,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).cell(' '));

        let area_w = (snap.width as u16).saturating_mul(self.cell_w);
        let area_h = (snap.height as u16).saturating_mul(self.cell_h);
        let frame_w = area_w.saturating_add(2);
        let frame_h = area_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let origin = Origin {
            x: start_x + 1,
            y: start_y + 1,
        };

        let bg = CellStyle::new(Rgb::new(60, 60, 80), PLAY_BG);
        fb.fill_rect(origin.x, origin.y, area_w, area_h, ' ', bg);
        self.draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for y in 0..snap.height {
            for x in 0..snap.width {
                self.draw_tile(fb, origin, snap, x, y);
            }
        }

        for enemy in &snap.enemies {
            self.draw_ninja(fb, origin, snap, enemy, false);
        }
        self.draw_ninja(fb, origin, snap, &snap.player, snap.player_dead);

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if let Some(text) = overlay_text(snap.state, paused) {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &LevelSnapshot, paused: bool, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, paused, viewport, &mut fb);
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

    fn draw_tile(&self, fb: &mut FrameBuffer, origin: Origin, snap: &LevelSnapshot, x: usize, y: usize) {
        // Ladders and pickups sit on top of the platform row they share.
        let glyphs = match snap.extra(x, y) {
            Extra::Ladder => Some((['╟', '╢'], Rgb::new(190, 140, 80), false)),
            Extra::Coin => Some((['(', ')'], Rgb::new(250, 210, 60), true)),
            Extra::Gem => Some((['<', '>'], Rgb::new(90, 230, 230), true)),
            Extra::Empty if snap.is_platform(x, y) => {
                Some((['▀', '▀'], Rgb::new(150, 110, 70), false))
            }
            Extra::Empty => None,
        };
        let Some((pair, fg, bold)) = glyphs else {
            return;
        };
        let mut style = CellStyle::new(fg, PLAY_BG);
        style.bold = bold;
        self.put_pair(
            fb,
            origin.x + (x as u16) * self.cell_w,
            origin.y + (y as u16) * self.cell_h,
            pair,
            style,
        );
    }

    fn draw_ninja(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        snap: &LevelSnapshot,
        ninja: &NinjaSnapshot,
        dead: bool,
    ) {
        if snap.tile_size <= 0.0 {
            return;
        }
        let col_px = snap.tile_size / self.cell_w as f32;
        let col = (ninja.x / col_px).round();
        let row = ((ninja.y + snap.tile_size / 2.0) / snap.tile_size).floor();

        let max_col = (snap.width as u16).saturating_mul(self.cell_w);
        if col < 0.0 || row < 0.0 || row >= snap.height as f32 {
            return;
        }
        let col = col as u16;
        if col >= max_col {
            return;
        }

        let fg = match ninja.colour {
            Colour::Blue => Rgb::new(80, 160, 255),
            Colour::Red => Rgb::new(235, 70, 70),
        };
        let pair = if dead {
            ['x', 'x']
        } else if ninja.climbing.is_climbing() {
            ['╠', '╣']
        } else {
            match ninja.facing {
                HorizontalDirection::Left => ['◄', '█'],
                HorizontalDirection::Right => ['█', '►'],
            }
        };
        let mut style = CellStyle::new(fg, PLAY_BG).bold();
        style.dim = dead;

        let y = origin.y + (row as u16) * self.cell_h;
        for (i, ch) in pair.iter().enumerate().take(self.cell_w as usize) {
            let c = col + i as u16;
            if c < max_col {
                fb.put_char(origin.x + c, y, *ch, style);
            }
        }
    }

    /// Fill one tile: first glyph in the left half, second in the right.
    fn put_pair(&self, fb: &mut FrameBuffer, px: u16, py: u16, pair: [char; 2], style: CellStyle) {
        let half = self.cell_w.div_ceil(2);
        for dy in 0..self.cell_h {
            for dx in 0..self.cell_w {
                let ch = if dx < half { pair[0] } else { pair[1] };
                fb.put_char(px + dx, py + dy, ch, style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &LevelSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level_number, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "COINS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.coins_left as u32, value);
        y = y.saturating_add(2);

        const KEYS: [&str; 5] = ["←→ move", "↑↓ climb", "SPC jump", "P pause", "R restart"];
        for line in KEYS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn overlay_text(state: LevelState, paused: bool) -> Option<&'static str> {
    if paused {
        return Some("PAUSED");
    }
    match state {
        LevelState::Playing => None,
        LevelState::PlayerDead => Some("CAUGHT!"),
        LevelState::PlayerWon | LevelState::Complete => Some("LEVEL CLEAR"),
        LevelState::Failed => Some("TRY AGAIN"),
    }
}
