//! Terminal host: frame cadence, event pump and drawing.
//!
//! [`DeadlineScheduler`] stands in for a display refresh callback. It holds
//! at most one pending frame with a deadline; the pump sleeps in
//! `event::poll` until that deadline, handing any input to the game in the
//! meantime, then fires the frame and draws the result.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event;
use rand::Rng;
use ratatui::{backend::Backend, Terminal};

use crate::core::game_loop::{FrameHandle, FrameScheduler, GameLoop};
use crate::input::{translate, HostInput};
use crate::store::BestScoreStore;
use crate::ui::{self, Raster};

/// Fixed-interval frame scheduler driven by [`Instant`] deadlines.
#[derive(Debug)]
pub struct DeadlineScheduler {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameHandle, Instant)>,
    last_fired: Option<Instant>,
}

impl DeadlineScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            pending: None,
            last_fired: None,
        }
    }

    /// Deadline of the pending frame, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, at)| at)
    }

    /// Hand out the pending frame if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, at)) if at <= now => {
                self.pending = None;
                self.last_fired = Some(now);
                Some(handle)
            }
            _ => None,
        }
    }

    fn schedule_at(&mut self, now: Instant) -> Instant {
        // Keep a steady cadence from the last frame, but never queue a
        // burst of catch-up frames after a stall.
        match self.last_fired {
            Some(last) => (last + self.interval).max(now),
            None => now + self.interval,
        }
    }
}

impl FrameScheduler for DeadlineScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        let at = self.schedule_at(Instant::now());
        self.pending = Some((handle, at));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}

/// Run the game on `terminal` until the player heads home.
///
/// The loop is attached on entry and always torn down on exit, even when
/// drawing or reading events fails.
pub fn run<B, R, S>(terminal: &mut Terminal<B>, game: &mut GameLoop<R, S>) -> io::Result<()>
where
    B: Backend,
    R: Rng,
    S: BestScoreStore,
{
    let interval = Duration::from_millis(game.config().frame_interval_ms);
    let mut scheduler = DeadlineScheduler::new(interval);
    let mut raster = Raster::default();

    game.attach(&mut scheduler);
    let result = pump(terminal, game, &mut scheduler, &mut raster);
    game.teardown(&mut scheduler);
    result
}

fn pump<B, R, S>(
    terminal: &mut Terminal<B>,
    game: &mut GameLoop<R, S>,
    scheduler: &mut DeadlineScheduler,
    raster: &mut Raster,
) -> io::Result<()>
where
    B: Backend,
    R: Rng,
    S: BestScoreStore,
{
    while let Some(deadline) = scheduler.deadline() {
        let timeout = deadline.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            let canvas = ui::layout(terminal.size()?).canvas;
            match translate(&event::read()?, canvas) {
                HostInput::Game(input) => {
                    game.handle_event(input);
                }
                HostInput::Home => {
                    log::info!("back home");
                    return Ok(());
                }
                HostInput::Ignored => {}
            }
            continue;
        }

        if scheduler.take_due(Instant::now()).is_none() {
            continue;
        }
        let layout = ui::layout(terminal.size()?);
        raster.resize(layout.canvas.width, layout.canvas.height);
        raster.clear();
        game.on_frame(scheduler, raster);
        terminal.draw(|frame| ui::draw_app(frame, &layout, raster))?;
    }
    Ok(())
}
