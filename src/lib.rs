//! Flappy - a tiny Flappy Bird remake.
//!
//! The game itself lives in [`core`] and never touches a terminal: it draws
//! through the [`core::surface::Surface`] trait, is paced by a
//! [`core::game_loop::FrameScheduler`] and persists its best score through
//! [`store::BestScoreStore`]. The terminal host in [`host`], [`ui`] and
//! [`input`] supplies all three.

pub mod cli;
pub mod core;
pub mod host;
pub mod input;
pub mod store;
pub mod terminal;
pub mod ui;
pub mod utils;

pub use crate::core::config::GameConfig;
pub use crate::core::game_loop::GameLoop;
pub use crate::core::game_state::{GameState, RunState};
pub use crate::store::{BestScoreStore, FileStore, MemoryStore};
