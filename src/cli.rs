//! Command-line arguments.

pub const USAGE: &str = "\
Flappy - a tiny Flappy Bird remake for the terminal

Usage: flappy [options]

Options:
  --seed <N>     Seed the pipe generator for a repeatable run
  --ephemeral    Keep the best score in memory only
  --reset-best   Clear the saved best score and exit
  --version      Show version information
  --help         Show this help message

Controls:
  Space / Up / Enter / click   Flap (starts a run)
  R                            Restart
  Esc / q                      Quit
";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayOptions {
    pub seed: Option<u64>,
    pub ephemeral: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Play(PlayOptions),
    ResetBest,
    Version,
    Help,
}

/// Parse arguments (without the program name). `--help`, `--version` and
/// `--reset-best` win over play options wherever they appear.
pub fn parse_args(args: &[String]) -> Result<CliCommand, String> {
    let mut options = PlayOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--reset-best" => return Ok(CliCommand::ResetBest),
            "--ephemeral" => options.ephemeral = true,
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--seed needs a value".to_string())?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(CliCommand::Play(options))
}
