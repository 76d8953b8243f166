//! Squadron -- a starship-miniatures rules engine driven over a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::{error, info};

use squadron::config::GameConfig;
use squadron::engine::{Engine, EngineError};
use squadron::logging::init_logging;
use squadron::protocol::{parse_command, Command};

/// Rules engine for a two-player starship-miniatures game.
#[derive(Parser, Debug)]
#[command(name = "squadron", version, about)]
struct Args {
    /// JSON file with game configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Executes one command. Returns `Ok(false)` when the loop should stop.
fn dispatch<W: Write>(engine: &mut Engine, cmd: Command, out: &mut W) -> Result<bool, EngineError> {
    match cmd {
        Command::Squadron => engine.handle_squadron(out)?,
        Command::IsReady => engine.handle_isready(out)?,
        Command::SetOption { name, value } => engine.set_option(&name, value.as_deref())?,
        Command::NewGame => engine.new_game(),
        Command::Faction { player, faction } => engine.handle_faction(player, faction, out)?,
        Command::PlayerType { player, kind } => engine.set_player_kind(player, kind),
        Command::AddShip { player, pilot, upgrades } => {
            engine.handle_addship(player, &pilot, &upgrades, out)?
        }
        Command::CopyShip { player, index } => engine.handle_copyship(player, index, out)?,
        Command::RemoveShip { player, index } => engine.remove_ship(player, index)?,
        Command::ChangePilot { player, index, pilot } => {
            engine.handle_changepilot(player, index, &pilot, out)?
        }
        Command::Obstacle { kind, x, y, radius } => engine.place_obstacle(kind, x, y, radius),
        Command::Mine { x, y, radius } => engine.place_mine(x, y, radius),
        Command::Start => engine.handle_start(out)?,
        Command::Assign { ship, maneuver } => engine.handle_assign(ship, maneuver, out)?,
        Command::Select { ship } => engine.handle_select(ship, out)?,
        Command::Reveal => engine.handle_reveal(out)?,
        Command::Action(action) => engine.handle_action(action, out)?,
        Command::Next => engine.handle_next(out)?,
        Command::Go => engine.handle_go(out)?,
        Command::Status => engine.handle_status(out)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Runs the protocol loop until `quit` or end of input.
fn run(mut engine: Engine) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = line?;

        let result = match parse_command(&line) {
            Ok(Some(cmd)) => dispatch(&mut engine, cmd, &mut out),
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error {}", e)?;
                out.flush()?;
                continue;
            }
        };

        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(EngineError::Io(e)) => return Err(e),
            Err(e) => {
                writeln!(out, "error {}", e)?;
                out.flush()?;
            }
        }
    }
    out.flush()
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => match GameConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    info!(?config, "engine starting");

    match run(Engine::new(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "protocol loop failed");
            ExitCode::FAILURE
        }
    }
}
