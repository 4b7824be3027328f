//! Input controller: raw pointer/key events to game commands.

use super::config::GameConfig;
use super::game_logic::{flap, reset, start};
use super::game_state::GameState;

/// Host-independent input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer down / tap anywhere on the surface
    PointerDown,
    Key(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Up,
    Enter,
    Char(char),
    Other,
}

/// Logical commands the game understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start if not running (resetting first after GameOver), then flap
    Activate,
    /// Discard the current run and return to Idle
    Restart,
}

/// Result of routing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    pub command: Option<Command>,
    /// The host should suppress the key's default action (e.g. page scroll)
    pub prevent_default: bool,
}

/// Map an event to a command. Pure; does not touch game state.
pub fn map_event(event: InputEvent) -> InputOutcome {
    match event {
        InputEvent::PointerDown => InputOutcome {
            command: Some(Command::Activate),
            prevent_default: false,
        },
        InputEvent::Key(Key::Space | Key::Up | Key::Enter) => InputOutcome {
            command: Some(Command::Activate),
            prevent_default: true,
        },
        InputEvent::Key(Key::Char('r' | 'R')) => InputOutcome {
            command: Some(Command::Restart),
            prevent_default: false,
        },
        InputEvent::Key(_) => InputOutcome::default(),
    }
}

/// Apply a command to the game. Returns true when a run was started.
pub fn apply_command(state: &mut GameState, config: &GameConfig, command: Command) -> bool {
    match command {
        Command::Activate => {
            let mut started = false;
            if !state.is_running() {
                if state.is_game_over() {
                    reset(state, config);
                }
                started = start(state);
            }
            flap(state, config);
            started
        }
        Command::Restart => {
            reset(state, config);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game_state::{Pipe, PipeId, RunState};

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            map_event(InputEvent::PointerDown).command,
            Some(Command::Activate)
        );
        assert_eq!(
            map_event(InputEvent::Key(Key::Space)),
            InputOutcome {
                command: Some(Command::Activate),
                prevent_default: true,
            }
        );
        assert_eq!(
            map_event(InputEvent::Key(Key::Char('r'))).command,
            Some(Command::Restart)
        );
        assert_eq!(
            map_event(InputEvent::Key(Key::Char('R'))).command,
            Some(Command::Restart)
        );
        assert_eq!(map_event(InputEvent::Key(Key::Char('x'))), InputOutcome::default());
        assert_eq!(map_event(InputEvent::Key(Key::Other)), InputOutcome::default());
    }

    #[test]
    fn test_activate_from_idle_starts_and_flaps() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0);
        assert!(apply_command(&mut state, &config, Command::Activate));
        assert!(state.is_running());
        assert_eq!(state.bird.vy, config.flap_impulse);
    }

    #[test]
    fn test_activate_while_running_only_flaps() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0);
        apply_command(&mut state, &config, Command::Activate);
        state.bird.vy = 5.0;
        state.score = 3;

        assert!(!apply_command(&mut state, &config, Command::Activate));
        assert!(state.is_running());
        assert_eq!(state.bird.vy, config.flap_impulse);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_activate_after_game_over_resets_then_starts() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 4);
        state.run_state = RunState::GameOver;
        state.score = 4;
        state.frame = 200;
        state.pipes.push(Pipe {
            id: PipeId(0),
            x: 50.0,
            width: 70.0,
            gap_top: 200.0,
            gap_bottom: 340.0,
            scored: true,
        });

        assert!(apply_command(&mut state, &config, Command::Activate));
        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.best, 4);
        assert_eq!(state.bird.vy, config.flap_impulse);
    }

    #[test]
    fn test_restart_does_not_auto_start() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0);
        apply_command(&mut state, &config, Command::Activate);
        state.score = 2;

        assert!(!apply_command(&mut state, &config, Command::Restart));
        assert_eq!(state.run_state, RunState::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.bird.vy, 0.0);
    }
}
