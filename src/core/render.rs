//! Renderer: paints a [`GameState`] onto a [`Surface`].
//!
//! Pure with respect to game state. Layers, back to front: sky and drifting
//! dots, ground band, pipes, bird, HUD panels, and the start / game-over
//! modal whenever the game is not running.

use std::f64::consts::PI;

use super::constants::{GROUND_HEIGHT, GROUND_LINE, HEIGHT, STAR_COUNT, STAR_DRIFT, STAR_SIZE, WIDTH};
use super::game_state::{Bird, GameState, Pipe};
use super::surface::{Font, Paint, Rect, Rgba, Surface, TextAlign};

const SKY_TOP: Rgba = Rgba::hex(0x0f172a);
const SKY_BOTTOM: Rgba = Rgba::hex(0x1e293b);
const STAR: Rgba = Rgba::WHITE.with_alpha(0.08);
const GROUND: Rgba = Rgba::hex(0x0b1220);
const GROUND_EDGE: Rgba = Rgba::hex(0x0ea5e9);
const GROUND_EDGE_HEIGHT: f64 = 4.0;

const PIPE_FILL: Rgba = Rgba::hex(0x22d3ee);
const PIPE_STROKE: Rgba = Rgba::hex(0x06b6d4);
const PIPE_LINE_WIDTH: f64 = 3.0;

const BIRD_BODY: Rgba = Rgba::hex(0x38bdf8);
const BIRD_WING: Rgba = Rgba::hex(0x7dd3fc);
const BIRD_EYE: Rgba = Rgba::WHITE;
const BIRD_PUPIL: Rgba = Rgba::hex(0x0f172a);
const BIRD_BEAK: Rgba = Rgba::hex(0xf59e0b);

const HUD_TEXT: Rgba = Rgba::hex(0xe2e8f0);
const HUD_SCORE: Rgba = Rgba::hex(0x22d3ee);
const HUD_BEST: Rgba = Rgba::hex(0xfbbf24);
const HUD_PANEL: Rgba = Rgba::hex(0x0f172a);

const MODAL_FILL: Rgba = Rgba::hex(0x020617).with_alpha(0.6);
const MODAL_STROKE: Rgba = Rgba::hex(0x38bdf8).with_alpha(0.5);
const MODAL_SUBTEXT: Rgba = Rgba::hex(0x94a3b8);

pub const TITLE_START: &str = "Flappy Bird";
pub const TITLE_GAME_OVER: &str = "Game Over";
pub const HINT_FLAP: &str = "Tap / Click / Space to flap";
pub const HINT_RESTART: &str = "Press R to restart";

/// Paint one full frame.
pub fn render(state: &GameState, surface: &mut impl Surface) {
    draw_background(state.frame, surface);
    for pipe in &state.pipes {
        draw_pipe(pipe, surface);
    }
    draw_bird(&state.bird, surface);
    draw_hud(state, surface);
    if !state.is_running() {
        draw_modal(state.is_game_over(), surface);
    }
}

/// Score formatted for the HUD: at least two digits.
pub fn pad_score(n: u32) -> String {
    format!("{:02}", n)
}

/// Horizontal position of background dot `i` at `frame`.
pub fn star_x(i: usize, frame: u64) -> f64 {
    (i as f64 * 97.0 + frame as f64 * STAR_DRIFT) % WIDTH
}

fn draw_background(frame: u64, surface: &mut impl Surface) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, WIDTH, HEIGHT),
        Paint::VerticalGradient {
            y0: 0.0,
            y1: HEIGHT,
            top: SKY_TOP,
            bottom: SKY_BOTTOM,
        },
    );

    for i in 0..STAR_COUNT {
        let y = (i as f64 * 53.0) % GROUND_LINE;
        surface.fill_rect(
            Rect::new(star_x(i, frame), y, STAR_SIZE, STAR_SIZE),
            Paint::Solid(STAR),
        );
    }

    surface.fill_rect(
        Rect::new(0.0, GROUND_LINE, WIDTH, GROUND_HEIGHT),
        Paint::Solid(GROUND),
    );
    surface.fill_rect(
        Rect::new(0.0, GROUND_LINE, WIDTH, GROUND_EDGE_HEIGHT),
        Paint::Solid(GROUND_EDGE),
    );
}

fn draw_pipe(pipe: &Pipe, surface: &mut impl Surface) {
    let top = Rect::new(pipe.x, 0.0, pipe.width, pipe.gap_top);
    let bottom = Rect::new(pipe.x, pipe.gap_bottom, pipe.width, GROUND_LINE - pipe.gap_bottom);
    for segment in [top, bottom] {
        surface.fill_rect(segment, Paint::Solid(PIPE_FILL));
        surface.stroke_rect(segment, PIPE_STROKE, PIPE_LINE_WIDTH);
    }
}

fn draw_bird(bird: &Bird, surface: &mut impl Surface) {
    let Bird { x, y, radius: r, .. } = *bird;

    surface.fill_circle(x, y, r, BIRD_BODY);
    surface.fill_arc(x - 6.0, y, r * 0.6, PI * 0.2, PI * 1.8, BIRD_WING);
    surface.fill_circle(x + 6.0, y - 4.0, 3.0, BIRD_EYE);
    surface.fill_circle(x + 7.0, y - 4.0, 1.5, BIRD_PUPIL);
    surface.fill_triangle(
        [(x + r - 4.0, y - 2.0), (x + r + 8.0, y + 2.0), (x + r - 4.0, y + 6.0)],
        BIRD_BEAK,
    );
}

fn draw_hud(state: &GameState, surface: &mut impl Surface) {
    surface.fill_rect(
        Rect::new(10.0, 10.0, 90.0, 48.0),
        Paint::Solid(HUD_PANEL.with_alpha(0.6)),
    );
    surface.fill_text("Score", 18.0, 30.0, Font::bold(20.0), TextAlign::Start, HUD_TEXT);
    surface.fill_text(
        &pad_score(state.score),
        18.0,
        52.0,
        Font::bold(22.0),
        TextAlign::Start,
        HUD_SCORE,
    );

    surface.fill_rect(
        Rect::new(WIDTH - 110.0, 10.0, 100.0, 48.0),
        Paint::Solid(HUD_PANEL.with_alpha(0.5)),
    );
    surface.fill_text("Best", WIDTH - 100.0, 30.0, Font::bold(16.0), TextAlign::Start, HUD_TEXT);
    surface.fill_text(
        &pad_score(state.best),
        WIDTH - 100.0,
        52.0,
        Font::bold(20.0),
        TextAlign::Start,
        HUD_BEST,
    );
}

fn draw_modal(game_over: bool, surface: &mut impl Surface) {
    let panel = Rect::new(30.0, HEIGHT / 2.0 - 80.0, WIDTH - 60.0, 140.0);
    surface.fill_rect(panel, Paint::Solid(MODAL_FILL));
    surface.stroke_rect(panel, MODAL_STROKE, 1.0);

    let cx = WIDTH / 2.0;
    let title = if game_over { TITLE_GAME_OVER } else { TITLE_START };
    surface.fill_text(
        title,
        cx,
        HEIGHT / 2.0 - 40.0,
        Font::bold(24.0),
        TextAlign::Center,
        HUD_TEXT,
    );
    surface.fill_text(
        HINT_FLAP,
        cx,
        HEIGHT / 2.0 - 12.0,
        Font::regular(16.0),
        TextAlign::Center,
        MODAL_SUBTEXT,
    );
    surface.fill_text(
        HINT_RESTART,
        cx,
        HEIGHT / 2.0 + 12.0,
        Font::regular(16.0),
        TextAlign::Center,
        MODAL_SUBTEXT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::game_state::{PipeId, RunState};
    use crate::core::surface::{DrawCommand, DrawList};
    use std::f64::consts::TAU;

    fn rendered(state: &GameState) -> DrawList {
        let mut list = DrawList::new(WIDTH, HEIGHT);
        render(state, &mut list);
        list
    }

    #[test]
    fn test_pad_score() {
        assert_eq!(pad_score(0), "00");
        assert_eq!(pad_score(7), "07");
        assert_eq!(pad_score(42), "42");
        assert_eq!(pad_score(123), "123");
    }

    #[test]
    fn test_star_drift_wraps() {
        assert_eq!(star_x(0, 0), 0.0);
        assert_eq!(star_x(1, 0), 97.0);
        assert_eq!(star_x(0, 10), 2.0);
        assert_eq!(star_x(4, 0), 388.0 - 360.0);
        assert!(star_x(39, 1_000_000) < WIDTH);
    }

    #[test]
    fn test_idle_frame_shows_start_modal() {
        let state = GameState::new(&GameConfig::default(), 3);
        let list = rendered(&state);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(
            texts,
            vec!["Score", "00", "Best", "03", TITLE_START, HINT_FLAP, HINT_RESTART]
        );
    }

    #[test]
    fn test_game_over_title() {
        let mut state = GameState::new(&GameConfig::default(), 0);
        state.run_state = RunState::GameOver;
        let list = rendered(&state);
        assert!(list.texts().any(|t| t == TITLE_GAME_OVER));
        assert!(!list.texts().any(|t| t == TITLE_START));
    }

    #[test]
    fn test_running_frame_has_no_modal() {
        let mut state = GameState::new(&GameConfig::default(), 0);
        state.run_state = RunState::Running;
        state.score = 5;
        let list = rendered(&state);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts, vec!["Score", "05", "Best", "00"]);
    }

    #[test]
    fn test_background_painted_first() {
        let state = GameState::new(&GameConfig::default(), 0);
        let list = rendered(&state);
        assert!(matches!(
            list.commands()[0],
            DrawCommand::FillRect {
                rect: Rect { w, h, .. },
                paint: Paint::VerticalGradient { .. },
            } if w == WIDTH && h == HEIGHT
        ));
        // gradient + stars + ground + ground edge
        let fills_before_bird = list
            .commands()
            .iter()
            .take_while(|c| !matches!(c, DrawCommand::FillArc { .. }))
            .count();
        assert_eq!(fills_before_bird, 1 + STAR_COUNT + 2);
    }

    #[test]
    fn test_pipe_segments() {
        let mut state = GameState::new(&GameConfig::default(), 0);
        state.run_state = RunState::Running;
        state.pipes.push(Pipe {
            id: PipeId(1),
            x: 150.0,
            width: 70.0,
            gap_top: 200.0,
            gap_bottom: 340.0,
            scored: false,
        });
        let list = rendered(&state);
        let strokes: Vec<Rect> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(
            strokes,
            vec![
                Rect::new(150.0, 0.0, 70.0, 200.0),
                Rect::new(150.0, 340.0, 70.0, 160.0),
            ]
        );
    }

    #[test]
    fn test_bird_layers() {
        let state = GameState::new(&GameConfig::default(), 0);
        let list = rendered(&state);
        let arcs: Vec<(f64, f64, f64)> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillArc { cx, cy, radius, .. } => Some((*cx, *cy, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(
            arcs,
            vec![
                (80.0, 300.0, 16.0),
                (74.0, 300.0, 16.0 * 0.6),
                (86.0, 296.0, 3.0),
                (87.0, 296.0, 1.5),
            ]
        );
        assert!(list.commands().iter().any(|c| matches!(
            c,
            DrawCommand::FillTriangle { points, .. } if points[1] == (104.0, 302.0)
        )));
    }

    #[test]
    fn test_render_does_not_mutate_state() {
        let mut state = GameState::new(&GameConfig::default(), 2);
        state.run_state = RunState::Running;
        state.frame = 77;
        let before = format!("{:?}", state);
        rendered(&state);
        assert_eq!(format!("{:?}", state), before);
    }

    #[test]
    fn test_full_circle_uses_tau() {
        let state = GameState::new(&GameConfig::default(), 0);
        let list = rendered(&state);
        let body = list
            .commands()
            .iter()
            .find(|c| matches!(c, DrawCommand::FillArc { .. }))
            .unwrap();
        assert!(matches!(body, DrawCommand::FillArc { start, end, .. } if *start == 0.0 && *end == TAU));
    }
}
