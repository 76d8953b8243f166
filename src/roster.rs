//! Squad building.
//!
//! A `Roster` holds one squad per player and enforces the list-building
//! rules: squad size, faction, upgrade slots, and unique cards. Once both
//! squads are legal `build_game` deploys them onto a fresh `GameState`.

use thiserror::Error;
use tracing::{debug, info};

use crate::board::template::BASE_SIZE_MM;
use crate::board::{Faction, GameState, Player, PlayerKind, PlayerNo, Pose, ALL_PLAYERS};
use crate::catalog::{pilot_by_id, upgrade_by_id, Pilot, Upgrade};
use crate::config::GameConfig;

/// Distance from a table edge to the center of a deployed ship.
const DEPLOY_DEPTH_MM: f64 = 100.0 - BASE_SIZE_MM / 2.0;

/// Errors raised when a squad edit would break a list-building rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("You cannot have more than {0} ships")]
    TooManyShips(usize),

    #[error("unknown pilot '{0}'")]
    UnknownPilot(String),

    #[error("unknown upgrade '{0}'")]
    UnknownUpgrade(String),

    #[error("{pilot} cannot fly for the {}", .faction.name())]
    WrongFaction { pilot: &'static str, faction: Faction },

    #[error("{pilot} has no free slot for {upgrade}")]
    SlotUnavailable { pilot: &'static str, upgrade: &'static str },

    #[error("unique card {0} is already in the squad")]
    DuplicateUnique(&'static str),

    #[error("{} has no ship at index {index}", .player.name())]
    NoSuchShip { player: PlayerNo, index: usize },

    #[error("{} has no ships", .0.name())]
    EmptySquad(PlayerNo),
}

/// One ship in a squad list.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadEntry {
    pub pilot: &'static Pilot,
    pub upgrades: Vec<&'static Upgrade>,
}

impl SquadEntry {
    /// Identifiers of every unique card on this entry.
    fn unique_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        let pilot = self.pilot.unique.then_some(self.pilot.name);
        pilot
            .into_iter()
            .chain(self.upgrades.iter().filter(|u| u.unique).map(|u| u.name))
    }
}

/// One player's list.
#[derive(Debug, Clone, PartialEq)]
pub struct Squad {
    pub faction: Faction,
    pub kind: PlayerKind,
    pub ships: Vec<SquadEntry>,
}

impl Squad {
    fn new(faction: Faction) -> Self {
        Squad { faction, kind: PlayerKind::Human, ships: Vec::new() }
    }

    fn entry(&self, player: PlayerNo, index: usize) -> Result<&SquadEntry, RosterError> {
        self.ships.get(index).ok_or(RosterError::NoSuchShip { player, index })
    }

    /// Fails if `entry` repeats a unique card held by any ship other than
    /// the one at `skip`.
    fn check_unique(&self, entry: &SquadEntry, skip: Option<usize>) -> Result<(), RosterError> {
        let mut seen: Vec<&'static str> = self
            .ships
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .flat_map(|(_, e)| e.unique_names())
            .collect();
        for name in entry.unique_names() {
            if seen.contains(&name) {
                return Err(RosterError::DuplicateUnique(name));
            }
            seen.push(name);
        }
        Ok(())
    }
}

/// Checks that every upgrade fits a distinct slot on the pilot.
fn check_slots(pilot: &'static Pilot, upgrades: &[&'static Upgrade]) -> Result<(), RosterError> {
    let mut free = pilot.slots.to_vec();
    for upgrade in upgrades {
        match free.iter().position(|s| *s == upgrade.slot) {
            Some(idx) => {
                free.swap_remove(idx);
            }
            None => {
                return Err(RosterError::SlotUnavailable { pilot: pilot.name, upgrade: upgrade.name });
            }
        }
    }
    Ok(())
}

fn lookup_pilot(id: &str) -> Result<&'static Pilot, RosterError> {
    pilot_by_id(id).ok_or_else(|| RosterError::UnknownPilot(id.to_string()))
}

/// Both players' squads.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    squads: [Squad; 2],
    max_ships: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(GameConfig::default().max_ships_per_squad)
    }
}

impl Roster {
    /// Creates empty squads: Player1 flies Rebels, Player2 the Empire.
    pub fn new(max_ships: usize) -> Self {
        Roster {
            squads: [Squad::new(Faction::Rebels), Squad::new(Faction::Empire)],
            max_ships,
        }
    }

    pub fn squad(&self, player: PlayerNo) -> &Squad {
        &self.squads[player.index()]
    }

    fn squad_mut(&mut self, player: PlayerNo) -> &mut Squad {
        &mut self.squads[player.index()]
    }

    pub fn set_max_ships(&mut self, max_ships: usize) {
        self.max_ships = max_ships;
    }

    /// Adds a ship flown by `pilot_id` with the given upgrades. Returns its
    /// index in the squad.
    pub fn add_ship(
        &mut self,
        player: PlayerNo,
        pilot_id: &str,
        upgrade_ids: &[&str],
    ) -> Result<usize, RosterError> {
        let pilot = lookup_pilot(pilot_id)?;
        let upgrades = upgrade_ids
            .iter()
            .map(|id| upgrade_by_id(id).ok_or_else(|| RosterError::UnknownUpgrade(id.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        let entry = SquadEntry { pilot, upgrades };

        let max_ships = self.max_ships;
        let squad = self.squad_mut(player);
        if squad.ships.len() >= max_ships {
            return Err(RosterError::TooManyShips(max_ships));
        }
        if pilot.ship_type.faction() != squad.faction {
            return Err(RosterError::WrongFaction { pilot: pilot.name, faction: squad.faction });
        }
        check_slots(pilot, &entry.upgrades)?;
        squad.check_unique(&entry, None)?;

        squad.ships.push(entry);
        debug!(player = player.name(), pilot = pilot.id, "ship added");
        Ok(squad.ships.len() - 1)
    }

    /// Appends a duplicate of the ship at `index`. Returns the new index.
    pub fn copy_ship(&mut self, player: PlayerNo, index: usize) -> Result<usize, RosterError> {
        let max_ships = self.max_ships;
        let squad = self.squad_mut(player);
        let entry = squad.entry(player, index)?.clone();
        if squad.ships.len() >= max_ships {
            return Err(RosterError::TooManyShips(max_ships));
        }
        squad.check_unique(&entry, None)?;
        squad.ships.push(entry);
        Ok(squad.ships.len() - 1)
    }

    pub fn remove_ship(&mut self, player: PlayerNo, index: usize) -> Result<SquadEntry, RosterError> {
        let squad = self.squad_mut(player);
        squad.entry(player, index)?;
        Ok(squad.ships.remove(index))
    }

    /// Swaps the pilot of the ship at `index`. Upgrades the new pilot has
    /// no slot for are dropped; their ids are returned.
    pub fn change_pilot(
        &mut self,
        player: PlayerNo,
        index: usize,
        pilot_id: &str,
    ) -> Result<Vec<&'static str>, RosterError> {
        let pilot = lookup_pilot(pilot_id)?;
        let squad = self.squad_mut(player);
        let old = squad.entry(player, index)?;
        if pilot.ship_type.faction() != squad.faction {
            return Err(RosterError::WrongFaction { pilot: pilot.name, faction: squad.faction });
        }

        let mut free = pilot.slots.to_vec();
        let mut kept = Vec::new();
        let mut dropped = Vec::new();
        for upgrade in &old.upgrades {
            match free.iter().position(|s| *s == upgrade.slot) {
                Some(idx) => {
                    free.swap_remove(idx);
                    kept.push(*upgrade);
                }
                None => dropped.push(upgrade.id),
            }
        }

        let entry = SquadEntry { pilot, upgrades: kept };
        squad.check_unique(&entry, Some(index))?;
        squad.ships[index] = entry;
        Ok(dropped)
    }

    /// Changes a squad's faction, removing every ship the new faction
    /// cannot field. Returns how many were removed.
    pub fn set_faction(&mut self, player: PlayerNo, faction: Faction) -> usize {
        let squad = self.squad_mut(player);
        squad.faction = faction;
        let before = squad.ships.len();
        squad.ships.retain(|e| e.pilot.ship_type.faction() == faction);
        let removed = before - squad.ships.len();
        if removed > 0 {
            info!(player = player.name(), faction = faction.name(), removed, "ships removed on faction change");
        }
        removed
    }

    pub fn set_player_kind(&mut self, player: PlayerNo, kind: PlayerKind) {
        self.squad_mut(player).kind = kind;
    }

    /// Re-checks every list-building rule for one squad.
    pub fn validate(&self, player: PlayerNo) -> Result<(), RosterError> {
        let squad = self.squad(player);
        if squad.ships.is_empty() {
            return Err(RosterError::EmptySquad(player));
        }
        if squad.ships.len() > self.max_ships {
            return Err(RosterError::TooManyShips(self.max_ships));
        }
        let mut seen = Vec::new();
        for entry in &squad.ships {
            if entry.pilot.ship_type.faction() != squad.faction {
                return Err(RosterError::WrongFaction { pilot: entry.pilot.name, faction: squad.faction });
            }
            check_slots(entry.pilot, &entry.upgrades)?;
            for name in entry.unique_names() {
                if seen.contains(&name) {
                    return Err(RosterError::DuplicateUnique(name));
                }
                seen.push(name);
            }
        }
        Ok(())
    }

    /// Validates both squads and deploys them on a new game.
    ///
    /// Player1 sets up along the bottom edge facing up the table, Player2
    /// along the top edge facing down.
    pub fn build_game(&self, config: &GameConfig) -> Result<GameState, RosterError> {
        for player in ALL_PLAYERS {
            self.validate(player)?;
        }

        let players = ALL_PLAYERS.map(|no| {
            let squad = self.squad(no);
            Player { no, faction: squad.faction, kind: squad.kind }
        });
        let mut game = GameState::new(players, config.initiative);

        let area = config.play_area_mm;
        for player in ALL_PLAYERS {
            let squad = self.squad(player);
            let spacing = area / (squad.ships.len() + 1) as f64;
            let (y, heading) = match player {
                PlayerNo::Player1 => (DEPLOY_DEPTH_MM, 90.0),
                PlayerNo::Player2 => (area - DEPLOY_DEPTH_MM, 270.0),
            };
            for (i, entry) in squad.ships.iter().enumerate() {
                let pose = Pose::new(spacing * (i + 1) as f64, y, heading);
                let upgrades = entry.upgrades.iter().map(|u| u.id).collect();
                game.add_ship(entry.pilot, upgrades, player, pose);
            }
        }

        info!(ships = game.ships.len(), "game built from roster");
        Ok(game)
    }
}
