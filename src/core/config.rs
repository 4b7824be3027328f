//! Gameplay tunables.
//!
//! Defaults come from [`crate::core::constants`]. Players can override any
//! subset in `~/.flappy/config.json`; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::constants::*;
use crate::utils::persistence::{load_json_or_default, save_json, save_path};

/// Physics and pipe tuning for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Added to the bird's vertical velocity every frame
    pub gravity: f64,

    /// Velocity a flap sets (negative = upward)
    pub flap_impulse: f64,

    /// Vertical opening between a pipe's segments
    pub pipe_gap: f64,

    pub pipe_width: f64,

    /// Leftward pipe movement per frame
    pub pipe_speed: f64,

    /// A pipe spawns every `spawn_interval` frames
    pub spawn_interval: u64,

    /// Minimum distance from a gap center to the ceiling or ground line
    pub gap_margin: f64,

    pub bird_x: f64,
    pub bird_radius: f64,

    /// Host frame cadence in milliseconds
    pub frame_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            pipe_gap: PIPE_GAP,
            pipe_width: PIPE_WIDTH,
            pipe_speed: PIPE_SPEED,
            spawn_interval: PIPE_SPAWN_INTERVAL,
            gap_margin: PIPE_GAP_MARGIN,
            bird_x: BIRD_X,
            bird_radius: BIRD_RADIUS,
            frame_interval_ms: FRAME_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Load `~/.flappy/config.json`, falling back to defaults.
    pub fn load() -> Self {
        match save_path(CONFIG_FILE) {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::warn!("no config directory, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load and sanitize the config at `path`. When no file exists yet the
    /// result is written there so players have a template to edit.
    pub fn load_from(path: &Path) -> Self {
        let config = load_json_or_default::<GameConfig>(path).sanitized();
        if !path.exists() {
            match save_json(path, &config) {
                Ok(()) => log::info!("wrote default config to {}", path.display()),
                Err(e) => log::warn!("could not write {}: {}", path.display(), e),
            }
        }
        config
    }

    /// Replace values that would break the simulation with their defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f64, d: f64| if v.is_finite() && v > 0.0 { v } else { d };

        let mut cfg = Self {
            gravity: if self.gravity.is_finite() {
                self.gravity
            } else {
                defaults.gravity
            },
            flap_impulse: if self.flap_impulse.is_finite() && self.flap_impulse < 0.0 {
                self.flap_impulse
            } else {
                defaults.flap_impulse
            },
            pipe_gap: positive(self.pipe_gap, defaults.pipe_gap),
            pipe_width: positive(self.pipe_width, defaults.pipe_width),
            pipe_speed: positive(self.pipe_speed, defaults.pipe_speed),
            spawn_interval: if self.spawn_interval == 0 {
                defaults.spawn_interval
            } else {
                self.spawn_interval
            },
            gap_margin: if self.gap_margin.is_finite() && self.gap_margin >= 0.0 {
                self.gap_margin
            } else {
                defaults.gap_margin
            },
            bird_x: if self.bird_x.is_finite() && (0.0..WIDTH).contains(&self.bird_x) {
                self.bird_x
            } else {
                defaults.bird_x
            },
            bird_radius: positive(self.bird_radius, defaults.bird_radius),
            frame_interval_ms: if self.frame_interval_ms == 0 {
                defaults.frame_interval_ms
            } else {
                self.frame_interval_ms
            },
        };

        // The gap-center band must be non-empty
        if cfg.gap_margin * 2.0 > GROUND_LINE {
            cfg.gap_margin = defaults.gap_margin;
        }
        cfg
    }

    /// Inclusive range a spawned pipe's gap center is drawn from.
    pub fn gap_center_band(&self) -> (f64, f64) {
        (self.gap_margin, GROUND_LINE - self.gap_margin)
    }
}
