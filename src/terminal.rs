//! Raw-mode terminal session.
//!
//! [`TerminalGuard`] owns the ratatui terminal and puts the tty back the way
//! it found it when dropped, whichever way the session ends.

use std::io::{self, Stdout};

use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Returns the first error, logging any later ones. Every result has already
/// been produced by the caller, so every step has run.
pub fn first_error<I>(results: I) -> io::Result<()>
where
    I: IntoIterator<Item = io::Result<()>>,
{
    let mut first = None;
    for result in results {
        if let Err(e) = result {
            match first {
                None => first = Some(e),
                Some(_) => log::warn!("terminal restore step failed: {}", e),
            }
        }
    }
    first.map_or(Ok(()), Err)
}

/// Leaves raw mode, mouse capture and the alternate screen, and shows the
/// cursor. Safe to call more than once.
pub fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    first_error([
        disable_raw_mode(),
        stdout.execute(DisableMouseCapture).map(drop),
        stdout.execute(LeaveAlternateScreen).map(drop),
        stdout.execute(Show).map(drop),
    ])
}

/// Restores the terminal before the default hook prints, so panic messages
/// land on the normal screen.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Err(e) = restore_terminal() {
            eprintln!("could not restore terminal: {}", e);
        }
        default_hook(info);
    }));
}

pub struct TerminalGuard {
    terminal: Tui,
    restored: bool,
}

impl TerminalGuard {
    /// Enters raw mode, the alternate screen and mouse capture. A failure
    /// part way through undoes the steps already taken.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        match Self::open_screen() {
            Ok(terminal) => Ok(Self {
                terminal,
                restored: false,
            }),
            Err(e) => {
                if let Err(restore_err) = restore_terminal() {
                    log::warn!("terminal restore after failed setup: {}", restore_err);
                }
                Err(e)
            }
        }
    }

    fn open_screen() -> io::Result<Tui> {
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }

    /// Restores now and reports the outcome; dropping does the same silently.
    pub fn restore(mut self) -> io::Result<()> {
        self.restored = true;
        restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(e) = restore_terminal() {
                log::error!("could not restore terminal: {}", e);
            }
        }
    }
}
