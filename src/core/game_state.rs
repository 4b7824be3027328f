//! Owned simulation snapshot: bird, active pipes, frame counter and scores.

use super::config::GameConfig;
use super::constants::HEIGHT;

/// The player's bird. `x` never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    /// Center, in surface units from the top (y grows downward)
    pub y: f64,
    /// Vertical velocity per frame (positive = falling)
    pub vy: f64,
    pub radius: f64,
}

impl Bird {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.bird_x,
            y: HEIGHT / 2.0,
            vy: 0.0,
            radius: config.bird_radius,
        }
    }

    pub fn top(&self) -> f64 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.radius
    }

    pub fn left(&self) -> f64 {
        self.x - self.radius
    }

    pub fn right(&self) -> f64 {
        self.x + self.radius
    }
}

/// Session-unique pipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PipeId(pub u64);

/// A top/bottom pipe pair with a passable gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: PipeId,
    /// Leading (left) edge
    pub x: f64,
    pub width: f64,
    /// Bottom edge of the top segment
    pub gap_top: f64,
    /// Top edge of the bottom segment
    pub gap_bottom: f64,
    /// Set once the bird has passed the trailing edge
    pub scored: bool,
}

impl Pipe {
    pub fn trailing_edge(&self) -> f64 {
        self.x + self.width
    }

    pub fn gap_height(&self) -> f64 {
        self.gap_bottom - self.gap_top
    }
}

/// Idle (waiting for the first activate), Running, or GameOver (awaiting restart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    /// Frames simulated since the last reset
    pub frame: u64,
    pub score: u32,
    /// Highest score ever recorded, seeded from the best-score store
    pub best: u32,
    pub run_state: RunState,
    next_pipe_id: u64,
}

impl GameState {
    /// Fresh Idle state with `best` carried in from persistence.
    pub fn new(config: &GameConfig, best: u32) -> Self {
        Self {
            bird: Bird::new(config),
            pipes: Vec::new(),
            frame: 0,
            score: 0,
            best,
            run_state: RunState::Idle,
            next_pipe_id: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    /// Ids keep counting across resets so they stay unique for the session.
    pub(crate) fn allocate_pipe_id(&mut self) -> PipeId {
        let id = PipeId(self.next_pipe_id);
        self.next_pipe_id += 1;
        id
    }
}
