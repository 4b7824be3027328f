//! Terminal chrome around the game canvas.

pub mod raster;

pub use raster::Raster;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::constants::{HEIGHT, WIDTH};

pub const HEADER_TITLE: &str = "Flappy Bird";
pub const HEADER_SUBTITLE: &str = "A tiny remake built right here";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub canvas: Rect,
    pub footer: Rect,
}

/// Split the screen into header, canvas and footer. The canvas keeps the
/// game's aspect ratio and is centered horizontally.
pub fn layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let body = chunks[1];

    // Each cell holds two pixels vertically and is about twice as tall as
    // it is wide, so one row spans 2 * WIDTH / HEIGHT columns.
    let fit_rows = (body.width as f64 * HEIGHT / (2.0 * WIDTH)).floor() as u16;
    let rows = body.height.min(fit_rows);
    let cols = ((rows as f64 * 2.0 * WIDTH / HEIGHT).round() as u16).min(body.width);
    let canvas = Rect {
        x: body.x + (body.width - cols) / 2,
        y: body.y,
        width: cols,
        height: rows,
    };

    AppLayout {
        header: chunks[0],
        canvas,
        footer: chunks[2],
    }
}

/// Whether the cell at (`col`, `row`) lies inside `rect`.
pub fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Draw the whole screen: header, the rasterized game frame and the hints.
pub fn draw_app(frame: &mut Frame, layout: &AppLayout, raster: &Raster) {
    // The layout may predate a shrink; never write past the buffer
    let screen = frame.size();
    render_header(frame, layout.header.intersection(screen));
    frame.render_widget(raster, layout.canvas.intersection(screen));
    render_footer(frame, layout.footer.intersection(screen));
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            HEADER_TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            HEADER_SUBTITLE,
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let controls = [
        ("[Esc]", "Back Home"),
        ("[Space]", "Flap"),
        ("[Click]", "Flap"),
        ("[R]", "Restart"),
    ];
    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
