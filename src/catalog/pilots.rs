//! Pilot cards.

use super::ships::ShipType;
use super::upgrades::UpgradeSlot;

/// A pilot card: who flies which chassis, at what skill, with which slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pilot {
    pub id: &'static str,
    pub name: &'static str,
    pub ship_type: ShipType,
    pub skill: u8,
    /// Named pilots may appear only once per squad.
    pub unique: bool,
    pub slots: &'static [UpgradeSlot],
}

use super::upgrades::UpgradeSlot::{Astromech, Elite, Missile, Torpedo};

/// Every pilot in the catalog, keyed by `id`.
pub static PILOTS: [Pilot; 10] = [
    Pilot {
        id: "luke-skywalker",
        name: "Luke Skywalker",
        ship_type: ShipType::XWing,
        skill: 8,
        unique: true,
        slots: &[Elite, Torpedo, Astromech],
    },
    Pilot {
        id: "biggs-darklighter",
        name: "Biggs Darklighter",
        ship_type: ShipType::XWing,
        skill: 5,
        unique: true,
        slots: &[Torpedo, Astromech],
    },
    Pilot {
        id: "red-squadron-pilot",
        name: "Red Squadron Pilot",
        ship_type: ShipType::XWing,
        skill: 4,
        unique: false,
        slots: &[Torpedo, Astromech],
    },
    Pilot {
        id: "rookie-pilot",
        name: "Rookie Pilot",
        ship_type: ShipType::XWing,
        skill: 2,
        unique: false,
        slots: &[Torpedo, Astromech],
    },
    Pilot {
        id: "mauler-mithel",
        name: "\"Mauler Mithel\"",
        ship_type: ShipType::TieFighter,
        skill: 7,
        unique: true,
        slots: &[Elite],
    },
    Pilot {
        id: "night-beast",
        name: "\"Night Beast\"",
        ship_type: ShipType::TieFighter,
        skill: 5,
        unique: true,
        slots: &[],
    },
    Pilot {
        id: "black-squadron-pilot",
        name: "Black Squadron Pilot",
        ship_type: ShipType::TieFighter,
        skill: 4,
        unique: false,
        slots: &[Elite],
    },
    Pilot {
        id: "academy-pilot",
        name: "Academy Pilot",
        ship_type: ShipType::TieFighter,
        skill: 1,
        unique: false,
        slots: &[],
    },
    Pilot {
        id: "darth-vader",
        name: "Darth Vader",
        ship_type: ShipType::TieAdvanced,
        skill: 9,
        unique: true,
        slots: &[Elite, Missile],
    },
    Pilot {
        id: "tempest-squadron-pilot",
        name: "Tempest Squadron Pilot",
        ship_type: ShipType::TieAdvanced,
        skill: 2,
        unique: false,
        slots: &[Missile],
    },
];
