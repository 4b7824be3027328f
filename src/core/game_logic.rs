//! Simulation step and run-state commands.
//!
//! [`process_tick`] advances a running game by exactly one frame: physics,
//! pipe spawning and scrolling, scoring, then collision. The commands
//! ([`flap`], [`start`], [`reset`]) are the only other ways state changes.

use super::config::GameConfig;
use super::constants::{GROUND_LINE, PIPE_OFFSCREEN_MARGIN, PIPE_SPAWN_OFFSET, WIDTH};
use super::game_state::{Bird, GameState, Pipe, PipeId, RunState};
use crate::store::{write_best, BestScoreStore};
use rand::Rng;

/// What ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Ground,
    Ceiling,
    Pipe(PipeId),
}

/// Everything that happened during one simulation frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Pipe spawned this frame
    pub spawned: Option<PipeId>,
    /// Pipes whose trailing edge the bird crossed this frame
    pub pipes_passed: u32,
    /// Best score increased this frame
    pub new_best: bool,
    /// Set when the run ended this frame
    pub collision: Option<Collision>,
}

/// Set the bird's velocity to the flap impulse. Ignored after GameOver.
pub fn flap(state: &mut GameState, config: &GameConfig) -> bool {
    if state.is_game_over() {
        return false;
    }
    state.bird.vy = config.flap_impulse;
    true
}

/// Idle -> Running. Returns false from any other state.
pub fn start(state: &mut GameState) -> bool {
    if state.run_state != RunState::Idle {
        return false;
    }
    state.run_state = RunState::Running;
    true
}

/// Back to the Idle starting values. Best is kept.
pub fn reset(state: &mut GameState, config: &GameConfig) {
    state.bird = Bird::new(config);
    state.pipes.clear();
    state.frame = 0;
    state.score = 0;
    state.run_state = RunState::Idle;
}

/// Push a new pipe just past the right edge with a random gap center.
pub fn spawn_pipe<R: Rng>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> PipeId {
    let (lo, hi) = config.gap_center_band();
    let center = if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    };
    let id = state.allocate_pipe_id();
    state.pipes.push(Pipe {
        id,
        x: WIDTH + PIPE_SPAWN_OFFSET,
        width: config.pipe_width,
        gap_top: center - config.pipe_gap / 2.0,
        gap_bottom: center + config.pipe_gap / 2.0,
        scored: false,
    });
    id
}

/// Ground or ceiling contact. Touching the boundary counts.
pub fn hits_bounds(bird: &Bird) -> Option<Collision> {
    if bird.bottom() >= GROUND_LINE {
        Some(Collision::Ground)
    } else if bird.top() <= 0.0 {
        Some(Collision::Ceiling)
    } else {
        None
    }
}

/// True when the bird overlaps the pipe horizontally and is not fully inside the gap.
pub fn hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let within_x = bird.right() >= pipe.x && bird.left() <= pipe.trailing_edge();
    let outside_gap = bird.top() < pipe.gap_top || bird.bottom() > pipe.gap_bottom;
    within_x && outside_gap
}

/// Advance a running game by one frame. Does nothing unless Running.
///
/// A new best is written to `store` immediately; a failed write is logged
/// and play continues.
pub fn process_tick<R, S>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
    store: &mut S,
) -> TickResult
where
    R: Rng,
    S: BestScoreStore + ?Sized,
{
    let mut result = TickResult::default();
    if !state.is_running() {
        return result;
    }

    state.frame += 1;

    // Semi-implicit Euler
    state.bird.vy += config.gravity;
    state.bird.y += state.bird.vy;

    if state.frame % config.spawn_interval == 0 {
        result.spawned = Some(spawn_pipe(state, config, rng));
    }

    for pipe in &mut state.pipes {
        pipe.x -= config.pipe_speed;
    }
    state
        .pipes
        .retain(|p| p.trailing_edge() > -PIPE_OFFSCREEN_MARGIN);

    let bird_x = state.bird.x;
    for pipe in &mut state.pipes {
        if !pipe.scored && bird_x > pipe.trailing_edge() {
            pipe.scored = true;
            state.score += 1;
            result.pipes_passed += 1;
        }
    }
    if state.score > state.best {
        state.best = state.score;
        result.new_best = true;
        if let Err(e) = write_best(store, state.best) {
            log::warn!("failed to persist best score {}: {}", state.best, e);
        }
    }

    result.collision = hits_bounds(&state.bird).or_else(|| {
        state
            .pipes
            .iter()
            .find(|p| hits_pipe(&state.bird, p))
            .map(|p| Collision::Pipe(p.id))
    });
    if result.collision.is_some() {
        state.run_state = RunState::GameOver;
    }

    result
}
