//! Card catalog.
//!
//! Closed, compile-time tables of ship types, pilots, and upgrades. Cards are
//! looked up by their string identifier; there is no runtime type lookup.

pub mod pilots;
pub mod ships;
pub mod upgrades;

pub use pilots::{Pilot, PILOTS};
pub use ships::{ShipType, ALL_SHIP_TYPES};
pub use upgrades::{Upgrade, UpgradeSlot, UPGRADES};

use crate::board::player::Faction;

/// Finds a pilot by identifier.
pub fn pilot_by_id(id: &str) -> Option<&'static Pilot> {
    PILOTS.iter().find(|p| p.id == id)
}

/// Finds an upgrade by identifier.
pub fn upgrade_by_id(id: &str) -> Option<&'static Upgrade> {
    UPGRADES.iter().find(|u| u.id == id)
}

/// All pilots a squad of `faction` may field.
pub fn pilots_for_faction(faction: Faction) -> impl Iterator<Item = &'static Pilot> {
    PILOTS.iter().filter(move |p| p.ship_type.faction() == faction)
}
