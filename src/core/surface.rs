//! Drawing surface abstraction.
//!
//! The renderer only talks to [`Surface`], a small set of canvas-like
//! primitives over logical units (y grows downward). Hosts implement it for
//! their backend; [`DrawList`] records the calls so tests can inspect them.

use std::f64::consts::TAU;

/// Straight (non-premultiplied) RGBA color, alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::hex(0xffffff);

    /// Opaque color from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Rgba {
        Rgba {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba { a, ..self }
    }

    /// Linear blend; `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: (self.a as f64 + (other.a as f64 - self.a as f64) * t) as f32,
        }
    }

    /// Source-over composite onto an opaque backdrop.
    pub fn over(self, backdrop: Rgba) -> Rgba {
        if self.a >= 1.0 {
            return Rgba { a: 1.0, ..self };
        }
        Rgba {
            a: 1.0,
            ..backdrop.lerp(Rgba { a: 1.0, ..self }, self.a as f64)
        }
    }
}

/// Fill style: a flat color or a top-to-bottom gradient between two rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    VerticalGradient {
        y0: f64,
        y1: f64,
        top: Rgba,
        bottom: Rgba,
    },
}

impl Paint {
    pub fn color_at(&self, y: f64) -> Rgba {
        match *self {
            Paint::Solid(c) => c,
            Paint::VerticalGradient {
                y0,
                y1,
                top,
                bottom,
            } => {
                if y1 <= y0 {
                    return top;
                }
                top.lerp(bottom, (y - y0) / (y1 - y0))
            }
        }
    }
}

impl From<Rgba> for Paint {
    fn from(c: Rgba) -> Self {
        Paint::Solid(c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// `x` is the left edge of the text
    #[default]
    Start,
    /// `x` is the horizontal center of the text
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
}

impl Font {
    pub const fn bold(size: f64) -> Font {
        Font { size, bold: true }
    }

    pub const fn regular(size: f64) -> Font {
        Font { size, bold: false }
    }
}

/// 2D drawing primitives the renderer paints with.
pub trait Surface {
    /// Logical width in surface units.
    fn width(&self) -> f64;
    /// Logical height in surface units.
    fn height(&self) -> f64;

    fn fill_rect(&mut self, rect: Rect, paint: Paint);
    fn stroke_rect(&mut self, rect: Rect, color: Rgba, line_width: f64);
    /// Fill the region enclosed by the arc and the chord joining its ends.
    /// Angles are radians, clockwise from +x (y grows downward).
    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Rgba);
    fn fill_triangle(&mut self, points: [(f64, f64); 3], color: Rgba);
    /// Draw text with its baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: Font, align: TextAlign, color: Rgba);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        self.fill_arc(cx, cy, radius, 0.0, TAU, color);
    }
}

/// Whether `(px, py)` lies inside the arc-plus-chord region drawn by
/// [`Surface::fill_arc`].
pub fn arc_contains(cx: f64, cy: f64, radius: f64, start: f64, end: f64, px: f64, py: f64) -> bool {
    let (dx, dy) = (px - cx, py - cy);
    if dx * dx + dy * dy > radius * radius {
        return false;
    }
    let sweep = end - start;
    if sweep.abs() >= TAU {
        return true;
    }

    // The chord splits the disc; keep the side that holds the arc's midpoint
    let (ax, ay) = (cx + radius * start.cos(), cy + radius * start.sin());
    let (bx, by) = (cx + radius * end.cos(), cy + radius * end.sin());
    let mid = start + sweep / 2.0;
    let (mx, my) = (cx + radius * mid.cos(), cy + radius * mid.sin());

    let side = |x: f64, y: f64| (bx - ax) * (y - ay) - (by - ay) * (x - ax);
    let arc_side = side(mx, my);
    let p_side = side(px, py);
    p_side == 0.0 || p_side.signum() == arc_side.signum()
}

/// Whether `(px, py)` lies inside (or on an edge of) the triangle.
pub fn triangle_contains(points: [(f64, f64); 3], px: f64, py: f64) -> bool {
    let [(x0, y0), (x1, y1), (x2, y2)] = points;
    let edge = |ax: f64, ay: f64, bx: f64, by: f64| (bx - ax) * (py - ay) - (by - ay) * (px - ax);
    let d0 = edge(x0, y0, x1, y1);
    let d1 = edge(x1, y1, x2, y2);
    let d2 = edge(x2, y2, x0, y0);
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    StrokeRect {
        rect: Rect,
        color: Rgba,
        line_width: f64,
    },
    FillArc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        color: Rgba,
    },
    FillTriangle {
        points: [(f64, f64); 3],
        color: Rgba,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font: Font,
        align: TextAlign,
        color: Rgba,
    },
}

/// A [`Surface`] that records every call in order.
#[derive(Debug, Clone)]
pub struct DrawList {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text strings in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Replay the recorded calls onto another surface.
    pub fn replay(&self, target: &mut impl Surface) {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::FillRect { rect, paint } => target.fill_rect(*rect, *paint),
                DrawCommand::StrokeRect {
                    rect,
                    color,
                    line_width,
                } => target.stroke_rect(*rect, *color, *line_width),
                DrawCommand::FillArc {
                    cx,
                    cy,
                    radius,
                    start,
                    end,
                    color,
                } => target.fill_arc(*cx, *cy, *radius, *start, *end, *color),
                DrawCommand::FillTriangle { points, color } => {
                    target.fill_triangle(*points, *color)
                }
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    font,
                    align,
                    color,
                } => target.fill_text(text, *x, *y, *font, *align, *color),
            }
        }
    }
}

impl Surface for DrawList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.commands.push(DrawCommand::FillRect { rect, paint });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, line_width: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillArc {
            cx,
            cy,
            radius,
            start,
            end,
            color,
        });
    }

    fn fill_triangle(&mut self, points: [(f64, f64); 3], color: Rgba) {
        self.commands.push(DrawCommand::FillTriangle { points, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: Font, align: TextAlign, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font,
            align,
            color,
        });
    }
}
