//! Upgrade cards and the slots they occupy.

use serde::{Deserialize, Serialize};

/// A pilot's upgrade slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeSlot {
    Elite,
    Astromech,
    Torpedo,
    Missile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upgrade {
    pub id: &'static str,
    pub name: &'static str,
    pub slot: UpgradeSlot,
    pub unique: bool,
}

pub static UPGRADES: [Upgrade; 8] = [
    Upgrade { id: "marksmanship", name: "Marksmanship", slot: UpgradeSlot::Elite, unique: false },
    Upgrade { id: "push-the-limit", name: "Push the Limit", slot: UpgradeSlot::Elite, unique: false },
    Upgrade { id: "r2-d2", name: "R2-D2", slot: UpgradeSlot::Astromech, unique: true },
    Upgrade { id: "r2-f2", name: "R2-F2", slot: UpgradeSlot::Astromech, unique: true },
    Upgrade { id: "r5-astromech", name: "R5 Astromech", slot: UpgradeSlot::Astromech, unique: false },
    Upgrade { id: "proton-torpedoes", name: "Proton Torpedoes", slot: UpgradeSlot::Torpedo, unique: false },
    Upgrade { id: "concussion-missiles", name: "Concussion Missiles", slot: UpgradeSlot::Missile, unique: false },
    Upgrade { id: "cluster-missiles", name: "Cluster Missiles", slot: UpgradeSlot::Missile, unique: false },
];
