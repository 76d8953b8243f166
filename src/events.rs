//! Observable game events and player advisories.
//!
//! Rules code never talks to a display. Everything a front end might show is
//! recorded here instead and drained by the session owner.

use serde::Serialize;

use crate::board::maneuver::Maneuver;
use crate::board::obstacle::{MineId, ObstacleId};
use crate::board::player::PlayerNo;
use crate::board::ship::{ActionKind, ShipId};
use crate::phase::{PhaseId, PhaseKind};

/// Something that happened during play.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseStarted {
        id: PhaseId,
        kind: PhaseKind,
        name: &'static str,
        predecessor: Option<PhaseId>,
        required_player: PlayerNo,
        required_pilot_skill: u8,
    },
    ManeuverAssigned {
        ship: ShipId,
    },
    ShipSelected {
        ship: ShipId,
    },
    ManeuverReadyToBeRevealed {
        ship: ShipId,
    },
    ManeuverRevealed {
        ship: ShipId,
        maneuver: Maneuver,
    },
    ManeuverSubstituted {
        ship: ShipId,
        original: Maneuver,
        replacement: Maneuver,
    },
    ManeuverPerformed {
        ship: ShipId,
        maneuver: Maneuver,
        x: f64,
        y: f64,
        heading: f64,
        stress_gained: bool,
        stress_removed: bool,
    },
    ObstacleHit {
        ship: ShipId,
        obstacle: ObstacleId,
    },
    MineHit {
        ship: ShipId,
        mine: MineId,
    },
    ActionPerformed {
        ship: ShipId,
        action: ActionKind,
    },
    ActionSkipped {
        ship: ShipId,
    },
    RoundEnded {
        round: u32,
    },
}

/// A non-fatal message addressed to one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub player: PlayerNo,
    pub text: String,
}
