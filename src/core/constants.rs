// Playfield (logical surface units; y grows downward)
pub const WIDTH: f64 = 360.0;
pub const HEIGHT: f64 = 600.0;
pub const GROUND_HEIGHT: f64 = 100.0;
pub const GROUND_LINE: f64 = HEIGHT - GROUND_HEIGHT;

// Bird
pub const BIRD_X: f64 = 80.0;
pub const BIRD_RADIUS: f64 = 16.0;

// Physics (per frame)
pub const GRAVITY: f64 = 0.5;
pub const FLAP_IMPULSE: f64 = -8.0;

// Pipes
pub const PIPE_GAP: f64 = 140.0;
pub const PIPE_WIDTH: f64 = 70.0;
pub const PIPE_SPEED: f64 = 2.5;
pub const PIPE_SPAWN_INTERVAL: u64 = 90;
/// Spawned pipes start this far past the right edge.
pub const PIPE_SPAWN_OFFSET: f64 = 20.0;
/// Gap centers stay at least this far from the ceiling and the ground line.
pub const PIPE_GAP_MARGIN: f64 = 120.0;
/// Pipes are dropped once their trailing edge is this far left of x = 0.
pub const PIPE_OFFSCREEN_MARGIN: f64 = 10.0;

// Background
pub const STAR_COUNT: usize = 40;
pub const STAR_SIZE: f64 = 2.0;
pub const STAR_DRIFT: f64 = 0.2;

// Loop timing (~60 Hz display cadence)
pub const FRAME_INTERVAL_MS: u64 = 16;

// Persistence
pub const BEST_SCORE_KEY: &str = "flappy-best";
pub const STORE_FILE: &str = "store.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "flappy.log";
