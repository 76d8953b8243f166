//! Command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the main loop dispatches on.

use thiserror::Error;
use tracing::debug;

use super::notation::{parse_maneuver, NotationError};
use crate::board::{ActionKind, Faction, Maneuver, ObstacleKind, PlayerKind, PlayerNo, ShipId};

/// A parsed controller-to-engine command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Protocol handshake; engine replies with id, options, `squadronok`.
    Squadron,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Discard the roster and any game in progress.
    NewGame,

    Faction { player: PlayerNo, faction: Faction },

    PlayerType { player: PlayerNo, kind: PlayerKind },

    /// `addship <p> <pilot> [upgrade...]`
    AddShip { player: PlayerNo, pilot: String, upgrades: Vec<String> },

    CopyShip { player: PlayerNo, index: usize },

    RemoveShip { player: PlayerNo, index: usize },

    /// `changepilot <p> <index> <pilot>`
    ChangePilot { player: PlayerNo, index: usize, pilot: String },

    /// `obstacle <asteroid|debris> <x> <y> <r>`
    Obstacle { kind: ObstacleKind, x: f64, y: f64, radius: f64 },

    /// `mine <x> <y> <r>`
    Mine { x: f64, y: f64, radius: f64 },

    /// Build the game from the roster and enter Planning.
    Start,

    /// `assign <ship> <code>`
    Assign { ship: ShipId, maneuver: Maneuver },

    Select { ship: ShipId },

    Reveal,

    /// `action <focus|evade|skip>`; `None` skips.
    Action(Option<ActionKind>),

    Next,

    /// Let AI-controlled players act until a human is needed.
    Go,

    Status,

    Quit,
}

/// Errors for malformed arguments to a known command.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown player '{0}'")]
    UnknownPlayer(String),

    #[error("unknown faction '{0}'")]
    UnknownFaction(String),

    #[error("unknown player type '{0}'")]
    UnknownPlayerType(String),

    #[error("unknown obstacle kind '{0}'")]
    UnknownObstacle(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Parses a single line of input.
///
/// Returns `Ok(None)` for empty lines and unknown commands, which are
/// ignored. Malformed arguments to a known command are an error.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Ok(None);
    };

    let cmd = match head {
        "squadron" => Command::Squadron,
        "isready" => Command::IsReady,
        "newgame" => Command::NewGame,
        "start" => Command::Start,
        "reveal" => Command::Reveal,
        "next" => Command::Next,
        "go" => Command::Go,
        "status" => Command::Status,
        "quit" => Command::Quit,

        "setoption" => parse_setoption(&tokens)?,
        "faction" => parse_faction(&tokens)?,
        "playertype" => parse_playertype(&tokens)?,
        "addship" => parse_addship(&tokens)?,
        "copyship" => {
            let (player, index) = parse_player_index(&tokens, "copyship <p1|p2> <index>")?;
            Command::CopyShip { player, index }
        }
        "removeship" => {
            let (player, index) = parse_player_index(&tokens, "removeship <p1|p2> <index>")?;
            Command::RemoveShip { player, index }
        }
        "changepilot" => parse_changepilot(&tokens)?,
        "obstacle" => parse_obstacle(&tokens)?,
        "mine" => parse_mine(&tokens)?,
        "assign" => parse_assign(&tokens)?,
        "select" => parse_select(&tokens)?,
        "action" => parse_action(&tokens)?,

        other => {
            debug!(command = other, "ignoring unknown command");
            return Ok(None);
        }
    };
    Ok(Some(cmd))
}

fn player(token: &str) -> Result<PlayerNo, ParseError> {
    PlayerNo::from_name(token).ok_or_else(|| ParseError::UnknownPlayer(token.to_string()))
}

fn number<T: std::str::FromStr>(token: &str) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber(token.to_string()))
}

fn ship_id(token: &str) -> Result<ShipId, ParseError> {
    number(token).map(ShipId)
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, ParseError> {
    const USAGE: &str = "setoption name <id> [value <x>]";
    if tokens.len() < 3 || tokens[1] != "name" {
        return Err(ParseError::Usage(USAGE));
    }

    let (name, value) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            if name_parts.is_empty() {
                return Err(ParseError::Usage(USAGE));
            }
            let value_parts = &tokens[vi + 1..];
            let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Ok(Command::SetOption { name, value })
}

fn parse_faction(tokens: &[&str]) -> Result<Command, ParseError> {
    let [_, p, f] = tokens else {
        return Err(ParseError::Usage("faction <p1|p2> <rebels|empire>"));
    };
    let faction = Faction::from_name(f).ok_or_else(|| ParseError::UnknownFaction(f.to_string()))?;
    Ok(Command::Faction { player: player(p)?, faction })
}

fn parse_playertype(tokens: &[&str]) -> Result<Command, ParseError> {
    let [_, p, k] = tokens else {
        return Err(ParseError::Usage("playertype <p1|p2> <human|ai>"));
    };
    let kind = PlayerKind::from_name(k).ok_or_else(|| ParseError::UnknownPlayerType(k.to_string()))?;
    Ok(Command::PlayerType { player: player(p)?, kind })
}

fn parse_addship(tokens: &[&str]) -> Result<Command, ParseError> {
    if tokens.len() < 3 {
        return Err(ParseError::Usage("addship <p1|p2> <pilot> [upgrade...]"));
    }
    Ok(Command::AddShip {
        player: player(tokens[1])?,
        pilot: tokens[2].to_string(),
        upgrades: tokens[3..].iter().map(|s| s.to_string()).collect(),
    })
}

fn parse_player_index(tokens: &[&str], usage: &'static str) -> Result<(PlayerNo, usize), ParseError> {
    let [_, p, i] = tokens else {
        return Err(ParseError::Usage(usage));
    };
    Ok((player(p)?, number(i)?))
}

fn parse_changepilot(tokens: &[&str]) -> Result<Command, ParseError> {
    let [_, p, i, pilot] = tokens else {
        return Err(ParseError::Usage("changepilot <p1|p2> <index> <pilot>"));
    };
    Ok(Command::ChangePilot { player: player(p)?, index: number(i)?, pilot: pilot.to_string() })
}

fn parse_obstacle(tokens: &[&str]) -> Result<Command, ParseError> {
    let [_, k, x, y, r] = tokens else {
        return Err(ParseError::Usage("obstacle <asteroid|debris> <x> <y> <r>"));
    };
    let kind = ObstacleKind::from_name(k).ok_or_else(|| ParseError::UnknownObstacle(k.to_string()))?;
    Ok(Command::Obstacle { kind, x: number(x)?, y: number(y)?, radius: number(r)? })
}

fn parse_mine(tokens: &[&str]) -> Result<Command, ParseError> {
    let [_, x, y, r] = tokens else {
        return Err(ParseError::Usage("mine <x> <y> <r>"));
    };
    Ok(Command::Mine { x: number(x)?, y: number(y)?, radius: number(r)? })
}

fn parse_assign(tokens: &[&str]) -> Result<Command, ParseError> {
    let [_, ship, code] = tokens else {
        return Err(ParseError::Usage("assign <ship> <speed.direction.bearing>"));
    };
    Ok(Command::Assign { ship: ship_id(ship)?, maneuver: parse_maneuver(code)? })
}

fn parse_select(tokens: &[&str]) -> Result<Command, ParseError> {
    let [_, ship] = tokens else {
        return Err(ParseError::Usage("select <ship>"));
    };
    Ok(Command::Select { ship: ship_id(ship)? })
}

fn parse_action(tokens: &[&str]) -> Result<Command, ParseError> {
    let [_, a] = tokens else {
        return Err(ParseError::Usage("action <focus|evade|skip>"));
    };
    if a.eq_ignore_ascii_case("skip") {
        return Ok(Command::Action(None));
    }
    ActionKind::from_name(a)
        .map(|kind| Command::Action(Some(kind)))
        .ok_or_else(|| ParseError::UnknownAction(a.to_string()))
}
