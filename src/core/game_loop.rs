//! Loop driver shared by every host.
//!
//! A host owns a display-cadence scheduler and calls [`GameLoop::on_frame`]
//! whenever the frame it was asked for comes due. Each frame runs at most
//! one simulation step, always renders, then asks for the next frame.
//! [`GameLoop::teardown`] cancels the outstanding request and stops input.

use rand::Rng;

use super::config::GameConfig;
use super::game_logic::{process_tick, TickResult};
use super::game_state::GameState;
use super::input::{apply_command, map_event, InputEvent, InputOutcome};
use super::render::render;
use super::surface::Surface;
use crate::store::{read_best, BestScoreStore};

/// Opaque id for one pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host hook that invokes the loop once per display refresh.
pub trait FrameScheduler {
    /// Ask for one more frame callback.
    fn request_frame(&mut self) -> FrameHandle;
    /// Drop a pending request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Owns the game and drives it one frame at a time.
pub struct GameLoop<R, S> {
    state: GameState,
    config: GameConfig,
    rng: R,
    store: S,
    pending: Option<FrameHandle>,
    listening: bool,
}

impl<R: Rng, S: BestScoreStore> GameLoop<R, S> {
    /// Build an Idle game, seeding the best score from `store`.
    pub fn new(config: GameConfig, rng: R, store: S) -> Self {
        let best = read_best(&store);
        Self {
            state: GameState::new(&config, best),
            config,
            rng,
            store,
            pending: None,
            listening: false,
        }
    }

    /// Start listening for input and request the first frame. Calling it
    /// again while attached does nothing.
    pub fn attach(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.listening {
            return;
        }
        self.listening = true;
        self.pending = Some(scheduler.request_frame());
        log::info!("game loop attached (best {})", self.state.best);
    }

    /// Run one frame: step if running, render, re-arm.
    ///
    /// Frames that arrive after teardown (or before attach) are ignored.
    pub fn on_frame(
        &mut self,
        scheduler: &mut impl FrameScheduler,
        surface: &mut impl Surface,
    ) -> TickResult {
        if self.pending.take().is_none() {
            return TickResult::default();
        }

        let result = if self.state.is_running() {
            process_tick(&mut self.state, &self.config, &mut self.rng, &mut self.store)
        } else {
            TickResult::default()
        };

        if result.new_best {
            log::info!("new best score: {}", self.state.best);
        }
        if let Some(collision) = result.collision {
            log::info!(
                "game over at frame {} ({:?}), score {}",
                self.state.frame,
                collision,
                self.state.score
            );
        }

        render(&self.state, surface);
        self.pending = Some(scheduler.request_frame());
        result
    }

    /// Route one input event. Ignored unless attached.
    pub fn handle_event(&mut self, event: InputEvent) -> InputOutcome {
        if !self.listening {
            return InputOutcome::default();
        }
        let outcome = map_event(event);
        if let Some(command) = outcome.command {
            if apply_command(&mut self.state, &self.config, command) {
                log::debug!("run started");
            }
        }
        outcome
    }

    /// Cancel the pending frame and stop accepting input. Idempotent.
    pub fn teardown(&mut self, scheduler: &mut impl FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        if self.listening {
            self.listening = false;
            log::info!("game loop torn down (best {})", self.state.best);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_attached(&self) -> bool {
        self.listening
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{BEST_SCORE_KEY, HEIGHT, WIDTH};
    use crate::core::input::Key;
    use crate::core::surface::DrawList;
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Scheduler that just counts requests and cancellations.
    #[derive(Default)]
    struct CountingScheduler {
        next: u64,
        requested: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next += 1;
            let handle = FrameHandle(self.next);
            self.requested.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }
    }

    fn new_loop(store: MemoryStore) -> GameLoop<ChaCha8Rng, MemoryStore> {
        GameLoop::new(
            GameConfig::default(),
            ChaCha8Rng::seed_from_u64(12345),
            store,
        )
    }

    #[test]
    fn test_best_seeded_from_store() {
        let game = new_loop(MemoryStore::with_value(BEST_SCORE_KEY, "11"));
        assert_eq!(game.state().best, 11);
        assert!(!game.is_attached());
        assert!(game.pending_frame().is_none());
    }

    #[test]
    fn test_attach_requests_exactly_one_frame() {
        let mut game = new_loop(MemoryStore::new());
        let mut scheduler = CountingScheduler::default();
        game.attach(&mut scheduler);
        game.attach(&mut scheduler);
        assert_eq!(scheduler.requested.len(), 1);
        assert_eq!(game.pending_frame(), Some(FrameHandle(1)));
    }

    #[test]
    fn test_each_frame_renders_and_rearms() {
        let mut game = new_loop(MemoryStore::new());
        let mut scheduler = CountingScheduler::default();
        let mut surface = DrawList::new(WIDTH, HEIGHT);
        game.attach(&mut scheduler);

        for n in 0..3 {
            surface.clear();
            game.on_frame(&mut scheduler, &mut surface);
            assert!(!surface.commands().is_empty());
            assert_eq!(scheduler.requested.len(), n + 2);
        }
        // Idle: no simulation
        assert_eq!(game.state().frame, 0);
    }

    #[test]
    fn test_running_frames_step_once_each() {
        let mut game = new_loop(MemoryStore::new());
        let mut scheduler = CountingScheduler::default();
        let mut surface = DrawList::new(WIDTH, HEIGHT);
        game.attach(&mut scheduler);

        game.handle_event(InputEvent::PointerDown);
        assert!(game.state().is_running());
        game.on_frame(&mut scheduler, &mut surface);
        game.on_frame(&mut scheduler, &mut surface);
        assert_eq!(game.state().frame, 2);
    }

    #[test]
    fn test_teardown_cancels_pending_and_ignores_input() {
        let mut game = new_loop(MemoryStore::new());
        let mut scheduler = CountingScheduler::default();
        let mut surface = DrawList::new(WIDTH, HEIGHT);
        game.attach(&mut scheduler);
        game.on_frame(&mut scheduler, &mut surface);

        game.teardown(&mut scheduler);
        assert_eq!(scheduler.cancelled, vec![FrameHandle(2)]);
        assert!(!game.is_attached());

        // Ghost input and stale frames are dropped
        let outcome = game.handle_event(InputEvent::Key(Key::Space));
        assert_eq!(outcome, InputOutcome::default());
        assert!(!game.state().is_running());

        surface.clear();
        game.on_frame(&mut scheduler, &mut surface);
        assert!(surface.commands().is_empty());
        assert_eq!(scheduler.requested.len(), 2);

        // Second teardown is a no-op
        game.teardown(&mut scheduler);
        assert_eq!(scheduler.cancelled.len(), 1);
    }

    #[test]
    fn test_space_reports_prevent_default() {
        let mut game = new_loop(MemoryStore::new());
        let mut scheduler = CountingScheduler::default();
        game.attach(&mut scheduler);
        let outcome = game.handle_event(InputEvent::Key(Key::Space));
        assert!(outcome.prevent_default);
        assert!(game.state().is_running());
    }
}
