use std::io;

use rand::{rngs::StdRng, SeedableRng};

use flappy::cli::{self, CliCommand, PlayOptions};
use flappy::core::constants::BEST_SCORE_KEY;
use flappy::terminal::{self, TerminalGuard};
use flappy::utils::{build_info, logging};
use flappy::{host, BestScoreStore, FileStore, GameConfig, GameLoop, MemoryStore};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match cli::parse_args(&args) {
        Ok(CliCommand::Play(options)) => options,
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            print!("{}", cli::USAGE);
            return Ok(());
        }
        Ok(CliCommand::ResetBest) => {
            let mut store = FileStore::open_default()?;
            store.remove(BEST_SCORE_KEY)?;
            println!("Best score cleared ({}).", store.path().display());
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'flappy --help' for usage.");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init() {
        eprintln!("Warning: could not open log file: {}", e);
    }
    log::info!("{}", build_info::version_line());

    let mut game = GameLoop::new(GameConfig::load(), seeded_rng(&options), open_store(&options));

    terminal::install_panic_hook();
    let mut guard = TerminalGuard::enter()?;

    let result = host::run(guard.terminal(), &mut game);

    // Cleanup terminal even if the game loop failed
    let restored = guard.restore();
    if let Err(e) = &result {
        log::error!("game loop failed: {}", e);
    }
    result.and(restored)?;

    println!("Best score: {}", game.state().best);
    Ok(())
}

fn seeded_rng(options: &PlayOptions) -> StdRng {
    let seed = options.seed.unwrap_or_else(rand::random);
    log::info!("pipe seed {}", seed);
    StdRng::seed_from_u64(seed)
}

fn open_store(options: &PlayOptions) -> Box<dyn BestScoreStore> {
    if options.ephemeral {
        return Box::new(MemoryStore::new());
    }
    match FileStore::open_default() {
        Ok(store) => {
            log::info!("best score store at {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::warn!("best score store unavailable, scores won't persist: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}
