//! Logger setup.
//!
//! The game owns the terminal's alternate screen, so log records go to
//! `~/.flappy/flappy.log` instead of stderr. `RUST_LOG` overrides the
//! default `info` filter.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use super::persistence::save_path;
use crate::core::constants::LOG_FILE;

/// Send log output to `~/.flappy/flappy.log`.
pub fn init() -> io::Result<()> {
    init_at(&save_path(LOG_FILE)?)
}

/// Send log output to `path` (appending). A logger that is already
/// installed is left in place.
pub fn init_at(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let result = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    if result.is_err() {
        log::debug!("logger already initialized");
    }
    Ok(())
}
