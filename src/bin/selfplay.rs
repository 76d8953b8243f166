//! Self-play game generation CLI.
//!
//! Plays squadron games between two AI players and writes one JSON record
//! per game (JSONL) to stdout or a file.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{ArgAction, Parser};
use tracing::{error, info};

use squadron::logging::init_logging;
use squadron::selfplay::{self, SelfPlayConfig};

/// Generate self-play games with AI on both sides.
#[derive(Parser, Debug)]
#[command(name = "selfplay", version, about)]
struct Args {
    /// Number of games to play.
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Rounds played per game.
    #[arg(long, default_value_t = 6)]
    rounds: u32,

    /// Largest squad generated per side.
    #[arg(long, default_value_t = 4)]
    max_ships: usize,

    /// Number of parallel threads.
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Random seed, 0 for entropy.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file path (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress the summary.
    #[arg(long)]
    quiet: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = SelfPlayConfig {
        num_games: args.games,
        rounds: args.rounds,
        max_ships: args.max_ships,
        threads: args.threads,
        seed: args.seed,
    };
    info!(?config, "self-play starting");

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            error!(error = %e, "self-play failed");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    if !args.quiet {
        info!(
            games = games.len(),
            elapsed_s = elapsed.as_secs_f64(),
            "self-play complete"
        );
        selfplay::log_summary(&games);
    }

    let result = match &args.output {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };

    match result {
        Ok(()) => {
            if let Some(path) = &args.output {
                info!(games = games.len(), path = %path.display(), "wrote games");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to write output");
            ExitCode::FAILURE
        }
    }
}
