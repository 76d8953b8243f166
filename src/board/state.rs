//! Game state representation.
//!
//! Holds everything the rules engine owns for one game: seated players,
//! ships, obstacles, mines, the current selection, and the outboxes of events
//! and advisories produced while phases run.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use super::maneuver::Maneuver;
use super::obstacle::{Mine, MineId, Obstacle, ObstacleId, ObstacleKind};
use super::player::{Player, PlayerNo};
use super::ship::{Ship, ShipId};
use super::template::Pose;
use super::token::Token;
use crate::catalog::Pilot;
use crate::events::{Advisory, GameEvent};

/// Complete state of one game.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub round: u32,
    /// Player who activates first when pilot skills tie.
    pub initiative: PlayerNo,
    pub players: [Player; 2],
    pub ships: BTreeMap<ShipId, Ship>,
    pub obstacles: Vec<Obstacle>,
    pub mines: Vec<Mine>,
    /// The ship currently being activated, if any.
    pub selection: Option<ShipId>,
    #[serde(skip)]
    events: Vec<GameEvent>,
    #[serde(skip)]
    advisories: Vec<Advisory>,
    #[serde(skip)]
    next_ship_id: u32,
}

impl GameState {
    /// Creates a game in round 1 with no ships on the table.
    pub fn new(players: [Player; 2], initiative: PlayerNo) -> Self {
        GameState {
            round: 1,
            initiative,
            players,
            ships: BTreeMap::new(),
            obstacles: Vec::new(),
            mines: Vec::new(),
            selection: None,
            events: Vec::new(),
            advisories: Vec::new(),
            next_ship_id: 1,
        }
    }

    pub fn player(&self, no: PlayerNo) -> &Player {
        &self.players[no.index()]
    }

    /// Places a new ship for `pilot` and returns its id.
    pub fn add_ship(
        &mut self,
        pilot: &Pilot,
        upgrades: Vec<&'static str>,
        owner: PlayerNo,
        pose: Pose,
    ) -> ShipId {
        let id = ShipId(self.next_ship_id);
        self.next_ship_id += 1;
        self.ships.insert(
            id,
            Ship {
                id,
                pilot_id: pilot.id,
                pilot_name: pilot.name,
                ship_type: pilot.ship_type,
                owner,
                pilot_skill: pilot.skill,
                upgrades,
                pose,
                assigned_maneuver: None,
                is_maneuver_performed: false,
                obstacles_hit: Vec::new(),
                mines_hit: Vec::new(),
                tokens: Vec::new(),
                highlighted: false,
            },
        );
        id
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(&id)
    }

    /// The selected ship.
    pub fn this_ship(&self) -> Option<&Ship> {
        self.selection.and_then(|id| self.ships.get(&id))
    }

    /// Ships that have not flown a maneuver this round.
    pub fn unactivated_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.values().filter(|s| !s.is_maneuver_performed)
    }

    pub fn all_ships_highlight_off(&mut self) {
        for ship in self.ships.values_mut() {
            ship.highlighted = false;
        }
    }

    pub fn place_obstacle(&mut self, kind: ObstacleKind, x: f64, y: f64, radius: f64) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(Obstacle { id, kind, x, y, radius });
        id
    }

    pub fn place_mine(&mut self, x: f64, y: f64, radius: f64) -> MineId {
        let id = MineId(self.mines.len() as u32);
        self.mines.push(Mine { id, x, y, radius });
        id
    }

    /// Records an event for whoever drives the game.
    pub fn emit(&mut self, event: GameEvent) {
        debug!(?event, "game event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Warns a player about a rule correction. Only human players receive
    /// the advisory; the warning is logged either way.
    pub fn show_error_to_human(&mut self, player: PlayerNo, text: impl Into<String>) {
        let text = text.into();
        warn!(player = player.name(), "{}", text);
        if self.player(player).kind.is_human() {
            self.advisories.push(Advisory { player, text });
        }
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn drain_advisories(&mut self) -> Vec<Advisory> {
        std::mem::take(&mut self.advisories)
    }

    /// Flies the ship's assigned maneuver and records what it ran into.
    ///
    /// Returns the maneuver flown, or `None` if the ship is unknown or has no
    /// maneuver assigned.
    pub fn perform_assigned_maneuver(&mut self, id: ShipId) -> Option<Maneuver> {
        let ship = self.ships.get_mut(&id)?;
        let maneuver = ship.assigned_maneuver?;
        let change = maneuver.perform(ship);
        let pose = ship.pose;

        let mut hit_events = Vec::new();
        for obstacle in self.obstacles.iter().filter(|o| o.overlaps(&pose)) {
            ship.obstacles_hit.push(obstacle.id);
            if obstacle.kind == ObstacleKind::Debris {
                ship.assign_token(Token::Stress);
            }
            hit_events.push(GameEvent::ObstacleHit { ship: id, obstacle: obstacle.id });
        }
        for mine in self.mines.iter().filter(|m| m.overlaps(&pose)) {
            ship.mines_hit.push(mine.id);
            hit_events.push(GameEvent::MineHit { ship: id, mine: mine.id });
        }

        self.emit(GameEvent::ManeuverPerformed {
            ship: id,
            maneuver,
            x: pose.x,
            y: pose.y,
            heading: pose.heading,
            stress_gained: change.gained,
            stress_removed: change.removed,
        });
        for ev in hit_events {
            self.emit(ev);
        }
        Some(maneuver)
    }
}
