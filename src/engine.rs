//! Engine state management.
//!
//! Holds the roster being built, table setup, the game in progress, and
//! the runtime configuration. Each protocol command maps to one method here;
//! methods write their responses to the supplied writer.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ai::autoplay_step;
use crate::board::{ActionKind, Faction, Maneuver, ObstacleKind, PlayerKind, PlayerNo, ShipId};
use crate::config::{ConfigError, GameConfig, OPTIONS};
use crate::phase::{PhaseError, PhaseId, PhaseKind};
use crate::roster::{Roster, RosterError};
use crate::session::Session;

/// Upper bound on autoplay steps for one `go`.
const MAX_GO_STEPS: usize = 10_000;

/// Errors reported back to the controller as `error <message>`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no game in progress")]
    NoGame,

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Placement {
    Obstacle { kind: ObstacleKind, x: f64, y: f64, radius: f64 },
    Mine { x: f64, y: f64, radius: f64 },
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub config: GameConfig,
    pub roster: Roster,
    pub session: Option<Session>,
    placements: Vec<Placement>,
    rng: SmallRng,
}

fn seeded_rng(seed: u64) -> SmallRng {
    if seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(seed)
    }
}

impl Engine {
    pub fn new(config: GameConfig) -> Self {
        Engine {
            roster: Roster::new(config.max_ships_per_squad),
            session: None,
            placements: Vec::new(),
            rng: seeded_rng(config.seed),
            config,
        }
    }

    /// Discards the roster, table setup, and any game in progress.
    pub fn new_game(&mut self) {
        self.roster = Roster::new(self.config.max_ships_per_squad);
        self.placements.clear();
        self.session = None;
    }

    /// Applies a `setoption` override to the configuration.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), EngineError> {
        self.config.apply_option(name, value.unwrap_or(""))?;
        self.roster.set_max_ships(self.config.max_ships_per_squad);
        if name.eq_ignore_ascii_case("seed") {
            self.rng = seeded_rng(self.config.seed);
        }
        debug!(name, value, "option set");
        Ok(())
    }

    /// Handles the handshake: writes id, options, protocol_version, and squadronok.
    pub fn handle_squadron<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "id name squadron")?;
        writeln!(out, "id author squadron")?;
        for (name, kind) in OPTIONS {
            writeln!(out, "option name {} type {}", name, kind)?;
        }
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "squadronok")?;
        out.flush()
    }

    pub fn handle_isready<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    pub fn handle_faction<W: Write>(
        &mut self,
        player: PlayerNo,
        faction: Faction,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let removed = self.roster.set_faction(player, faction);
        writeln!(out, "removed {}", removed)?;
        out.flush()?;
        Ok(())
    }

    pub fn set_player_kind(&mut self, player: PlayerNo, kind: PlayerKind) {
        self.roster.set_player_kind(player, kind);
    }

    pub fn handle_addship<W: Write>(
        &mut self,
        player: PlayerNo,
        pilot: &str,
        upgrades: &[String],
        out: &mut W,
    ) -> Result<(), EngineError> {
        let upgrades: Vec<&str> = upgrades.iter().map(String::as_str).collect();
        let index = self.roster.add_ship(player, pilot, &upgrades)?;
        writeln!(out, "added {} {}", player.name(), index)?;
        out.flush()?;
        Ok(())
    }

    pub fn handle_copyship<W: Write>(
        &mut self,
        player: PlayerNo,
        index: usize,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let index = self.roster.copy_ship(player, index)?;
        writeln!(out, "added {} {}", player.name(), index)?;
        out.flush()?;
        Ok(())
    }

    pub fn remove_ship(&mut self, player: PlayerNo, index: usize) -> Result<(), EngineError> {
        self.roster.remove_ship(player, index)?;
        Ok(())
    }

    pub fn handle_changepilot<W: Write>(
        &mut self,
        player: PlayerNo,
        index: usize,
        pilot: &str,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let dropped = self.roster.change_pilot(player, index, pilot)?;
        write!(out, "changed {} {}", player.name(), index)?;
        if !dropped.is_empty() {
            write!(out, " dropped {}", dropped.join(" "))?;
        }
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    /// Records an obstacle for the next game, and places it on the current
    /// table if a game is running.
    pub fn place_obstacle(&mut self, kind: ObstacleKind, x: f64, y: f64, radius: f64) {
        self.place(Placement::Obstacle { kind, x, y, radius });
    }

    pub fn place_mine(&mut self, x: f64, y: f64, radius: f64) {
        self.place(Placement::Mine { x, y, radius });
    }

    fn place(&mut self, placement: Placement) {
        if let Some(session) = self.session.as_mut() {
            apply_placement(session, placement);
        }
        self.placements.push(placement);
    }

    /// Builds the game from the roster and enters Planning.
    pub fn handle_start<W: Write>(&mut self, out: &mut W) -> Result<(), EngineError> {
        let game = self.roster.build_game(&self.config)?;
        let mut session = Session::new(game);
        for placement in &self.placements {
            apply_placement(&mut session, *placement);
        }
        info!(ships = session.game().ships.len(), "game started");
        self.session = Some(session);
        self.flush_session(None, out)
    }

    pub fn handle_assign<W: Write>(&mut self, ship: ShipId, maneuver: Maneuver, out: &mut W) -> Result<(), EngineError> {
        self.play(out, |s| s.assign_maneuver(ship, maneuver))
    }

    pub fn handle_select<W: Write>(&mut self, ship: ShipId, out: &mut W) -> Result<(), EngineError> {
        self.play(out, |s| s.select_ship(ship))
    }

    pub fn handle_reveal<W: Write>(&mut self, out: &mut W) -> Result<(), EngineError> {
        self.play(out, Session::reveal)
    }

    pub fn handle_action<W: Write>(&mut self, action: Option<ActionKind>, out: &mut W) -> Result<(), EngineError> {
        self.play(out, |s| match action {
            Some(kind) => s.perform_action(kind),
            None => s.skip_action(),
        })
    }

    pub fn handle_next<W: Write>(&mut self, out: &mut W) -> Result<(), EngineError> {
        self.play(out, |s| s.next().map(|_| ()))
    }

    /// Lets AI-controlled players act until a human is needed or the round
    /// ends.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> Result<(), EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NoGame)?;
        let before = session.current().map(|a| a.header.id);
        let round = session.game().round;
        let kinds = session.game().players.map(|p| p.kind);
        let controls = |p: PlayerNo| kinds[p.index()] == PlayerKind::HotacAi;

        let mut result = Ok(());
        for _ in 0..MAX_GO_STEPS {
            match autoplay_step(session, &mut self.rng, &controls) {
                Ok(true) => {
                    let next_round = session.game().round > round
                        && session.current_kind() == Some(PhaseKind::Planning);
                    if next_round {
                        break;
                    }
                }
                Ok(false) => break,
                Err(e) => {
                    result = Err(e.into());
                    break;
                }
            }
        }
        self.flush_session(before, out)?;
        result
    }

    pub fn handle_status<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        let session = self.session.as_ref().ok_or(EngineError::NoGame)?;
        let json = serde_json::to_string(&session.snapshot()).map_err(std::io::Error::from)?;
        writeln!(out, "status {}", json)?;
        out.flush()?;
        Ok(())
    }

    /// Runs one session operation, then reports what it produced. Events
    /// and advisories are reported even when the operation fails.
    fn play<W, F>(&mut self, out: &mut W, op: F) -> Result<(), EngineError>
    where
        W: Write,
        F: FnOnce(&mut Session) -> Result<(), PhaseError>,
    {
        let session = self.session.as_mut().ok_or(EngineError::NoGame)?;
        let before = session.current().map(|a| a.header.id);
        let result = op(session);
        self.flush_session(before, out)?;
        result.map_err(EngineError::from)
    }

    /// Writes pending events and advisories, then the phase name if the
    /// active phase is no longer `before`.
    fn flush_session<W: Write>(&mut self, before: Option<PhaseId>, out: &mut W) -> Result<(), EngineError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        for event in session.drain_events() {
            match serde_json::to_string(&event) {
                Ok(json) => writeln!(out, "event {}", json)?,
                Err(e) => warn!(error = %e, "failed to encode event"),
            }
        }
        for advisory in session.drain_advisories() {
            writeln!(out, "warning {} {}", advisory.player.name(), advisory.text)?;
        }
        if let Some(active) = session.current() {
            if Some(active.header.id) != before {
                writeln!(out, "phase {}", active.header.name)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn apply_placement(session: &mut Session, placement: Placement) {
    let game = session.game_mut();
    match placement {
        Placement::Obstacle { kind, x, y, radius } => {
            game.place_obstacle(kind, x, y, radius);
        }
        Placement::Mine { x, y, radius } => {
            game.place_mine(x, y, radius);
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
