//! Host-independent game core: state, simulation, rendering, input, loop.

pub mod config;
pub mod constants;
pub mod game_logic;
pub mod game_loop;
pub mod game_state;
pub mod input;
pub mod render;
pub mod surface;
