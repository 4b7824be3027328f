//! Half-block pixel surface for the terminal.
//!
//! Every terminal cell shows two vertical pixels using '▀' (foreground =
//! top pixel, background = bottom pixel). The game's 360×600 logical space
//! is scaled onto that grid; text is kept as cell-aligned labels and drawn
//! over the pixels.

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect as Area,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::core::constants::{HEIGHT, WIDTH};
use crate::core::surface::{
    arc_contains, triangle_contains, Font, Paint, Rect, Rgba, Surface, TextAlign,
};

const CLEAR: Rgba = Rgba::hex(0x000000);

/// Text snapped to a terminal cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub color: Rgba,
    pub bold: bool,
}

#[derive(Debug, Clone)]
pub struct Raster {
    cols: u16,
    rows: u16,
    w: usize,
    h: usize, // pixel height = rows * 2
    px: Vec<Rgba>,
    labels: Vec<Label>,
}

impl Raster {
    pub fn new(cols: u16, rows: u16) -> Self {
        let (w, h) = (cols as usize, rows as usize * 2);
        Self {
            cols,
            rows,
            w,
            h,
            px: vec![CLEAR; w * h],
            labels: Vec::new(),
        }
    }

    /// Match a new canvas area. Contents are cleared when the size changes.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if cols != self.cols || rows != self.rows {
            *self = Raster::new(cols, rows);
        }
    }

    /// Blank the pixels and drop all labels.
    pub fn clear(&mut self) {
        self.px.fill(CLEAR);
        self.labels.clear();
    }

    pub fn pixel_size(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.px[y * self.w + x]
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    // pixels per logical unit
    fn scale(&self) -> (f64, f64) {
        (self.w as f64 / WIDTH, self.h as f64 / HEIGHT)
    }

    fn blend(&mut self, x: usize, y: usize, c: Rgba) {
        let dst = &mut self.px[y * self.w + x];
        *dst = c.over(*dst);
    }

    /// Pixel centers covered by `[lo, hi)` in logical units.
    fn span(lo: f64, hi: f64, scale: f64, max: usize) -> Range<usize> {
        let start = (lo * scale - 0.5).ceil().max(0.0) as usize;
        let end = ((hi * scale - 0.5).ceil().max(0.0) as usize).min(max);
        start.min(end)..end
    }

    fn fill_region(&mut self, bounds: Rect, color: Rgba, inside: impl Fn(f64, f64) -> bool) {
        let (sx, sy) = self.scale();
        for py in Self::span(bounds.y, bounds.bottom(), sy, self.h) {
            let ly = (py as f64 + 0.5) / sy;
            for px in Self::span(bounds.x, bounds.right(), sx, self.w) {
                let lx = (px as f64 + 0.5) / sx;
                if inside(lx, ly) {
                    self.blend(px, py, color);
                }
            }
        }
    }
}

impl Default for Raster {
    fn default() -> Self {
        Raster::new(0, 0)
    }
}

impl Surface for Raster {
    fn width(&self) -> f64 {
        WIDTH
    }

    fn height(&self) -> f64 {
        HEIGHT
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        let (sx, sy) = self.scale();
        for py in Self::span(rect.y, rect.bottom(), sy, self.h) {
            let color = paint.color_at((py as f64 + 0.5) / sy);
            for px in Self::span(rect.x, rect.right(), sx, self.w) {
                self.blend(px, py, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, line_width: f64) {
        let (sx, sy) = self.scale();
        if sx == 0.0 || sy == 0.0 {
            return;
        }
        // At least one pixel thick so thin outlines survive downscaling
        let tx = line_width.max(1.0 / sx);
        let ty = line_width.max(1.0 / sy);
        let paint = Paint::Solid(color);
        let edges = [
            Rect::new(rect.x - tx / 2.0, rect.y - ty / 2.0, rect.w + tx, ty),
            Rect::new(rect.x - tx / 2.0, rect.bottom() - ty / 2.0, rect.w + tx, ty),
            Rect::new(rect.x - tx / 2.0, rect.y + ty / 2.0, tx, rect.h - ty),
            Rect::new(rect.right() - tx / 2.0, rect.y + ty / 2.0, tx, rect.h - ty),
        ];
        for edge in edges {
            if edge.w > 0.0 && edge.h > 0.0 {
                self.fill_rect(edge, paint);
            }
        }
    }

    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Rgba) {
        let bounds = Rect::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0);
        self.fill_region(bounds, color, |x, y| {
            arc_contains(cx, cy, radius, start, end, x, y)
        });
    }

    fn fill_triangle(&mut self, points: [(f64, f64); 3], color: Rgba) {
        let xs = points.map(|p| p.0);
        let ys = points.map(|p| p.1);
        let min = |v: [f64; 3]| v.iter().copied().fold(f64::INFINITY, f64::min);
        let max = |v: [f64; 3]| v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bounds = Rect::new(min(xs), min(ys), max(xs) - min(xs), max(ys) - min(ys));
        self.fill_region(bounds, color, |x, y| triangle_contains(points, x, y));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: Font, align: TextAlign, color: Rgba) {
        if self.cols == 0 || self.rows == 0 {
            return;
        }
        let cols_per_unit = self.cols as f64 / WIDTH;
        let rows_per_unit = self.rows as f64 / HEIGHT;
        let len = text.chars().count() as f64;

        let mut col = x * cols_per_unit;
        if align == TextAlign::Center {
            col -= len / 2.0;
        }
        // Baseline to the middle of the glyph box
        let row = ((y - font.size * 0.35) * rows_per_unit).floor();
        if row < 0.0 || row >= self.rows as f64 {
            return;
        }

        let col = col.round().max(0.0) as u16;
        if col >= self.cols {
            return;
        }
        let room = (self.cols - col) as usize;
        self.labels.push(Label {
            col,
            row: row as u16,
            text: text.chars().take(room).collect(),
            color,
            bold: font.bold,
        });
    }
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

impl Widget for &Raster {
    fn render(self, area: Area, buf: &mut Buffer) {
        let cols = self.cols.min(area.width);
        let rows = self.rows.min(area.height);
        for row in 0..rows {
            for col in 0..cols {
                let top = self.pixel(col as usize, row as usize * 2);
                let bottom = self.pixel(col as usize, row as usize * 2 + 1);
                buf.get_mut(area.x + col, area.y + row)
                    .set_char('\u{2580}')
                    .set_fg(to_color(top))
                    .set_bg(to_color(bottom));
            }
        }

        for label in &self.labels {
            if label.row >= rows || label.col >= cols {
                continue;
            }
            let mut style = Style::default().fg(to_color(label.color));
            if label.bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            buf.set_stringn(
                area.x + label.col,
                area.y + label.row,
                &label.text,
                (cols - label.col) as usize,
                style,
            );
        }
    }
}
