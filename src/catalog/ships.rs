//! Ship types, their maneuver dials, and action bars.

use serde::{Deserialize, Serialize};

use crate::board::maneuver::{
    Maneuver, ManeuverBearing as B, ManeuverColor as C, ManeuverDirection as D,
};
use crate::board::player::Faction;
use crate::board::ship::ActionKind;

/// A ship chassis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShipType {
    XWing,
    TieFighter,
    TieAdvanced,
}

/// Every chassis in the catalog.
pub const ALL_SHIP_TYPES: [ShipType; 3] = [ShipType::XWing, ShipType::TieFighter, ShipType::TieAdvanced];

const fn mv(speed: u8, direction: D, bearing: B, color: C) -> Maneuver {
    Maneuver::new(speed, direction, bearing, color)
}

static X_WING_DIAL: [Maneuver; 14] = [
    mv(1, D::Left, B::Bank, C::White),
    mv(1, D::Forward, B::Straight, C::Green),
    mv(1, D::Right, B::Bank, C::White),
    mv(2, D::Left, B::Turn, C::White),
    mv(2, D::Left, B::Bank, C::White),
    mv(2, D::Forward, B::Straight, C::Green),
    mv(2, D::Right, B::Bank, C::White),
    mv(2, D::Right, B::Turn, C::White),
    mv(3, D::Left, B::Turn, C::White),
    mv(3, D::Left, B::Bank, C::White),
    mv(3, D::Forward, B::Straight, C::White),
    mv(3, D::Right, B::Bank, C::White),
    mv(3, D::Right, B::Turn, C::White),
    mv(4, D::Forward, B::KoiogranTurn, C::Red),
];

static TIE_FIGHTER_DIAL: [Maneuver; 16] = [
    mv(1, D::Left, B::Turn, C::White),
    mv(1, D::Right, B::Turn, C::White),
    mv(2, D::Left, B::Turn, C::White),
    mv(2, D::Left, B::Bank, C::Green),
    mv(2, D::Forward, B::Straight, C::Green),
    mv(2, D::Right, B::Bank, C::Green),
    mv(2, D::Right, B::Turn, C::White),
    mv(3, D::Left, B::Turn, C::White),
    mv(3, D::Left, B::Bank, C::White),
    mv(3, D::Forward, B::Straight, C::Green),
    mv(3, D::Right, B::Bank, C::White),
    mv(3, D::Right, B::Turn, C::White),
    mv(3, D::Forward, B::KoiogranTurn, C::Red),
    mv(4, D::Forward, B::Straight, C::White),
    mv(4, D::Forward, B::KoiogranTurn, C::Red),
    mv(5, D::Forward, B::Straight, C::White),
];

static TIE_ADVANCED_DIAL: [Maneuver; 14] = [
    mv(1, D::Left, B::Bank, C::White),
    mv(1, D::Right, B::Bank, C::White),
    mv(2, D::Left, B::Turn, C::White),
    mv(2, D::Left, B::Bank, C::Green),
    mv(2, D::Forward, B::Straight, C::Green),
    mv(2, D::Right, B::Bank, C::Green),
    mv(2, D::Right, B::Turn, C::White),
    mv(3, D::Left, B::Turn, C::White),
    mv(3, D::Left, B::Bank, C::White),
    mv(3, D::Forward, B::Straight, C::Green),
    mv(3, D::Right, B::Bank, C::White),
    mv(3, D::Right, B::Turn, C::White),
    mv(4, D::Forward, B::Straight, C::White),
    mv(4, D::Forward, B::KoiogranTurn, C::Red),
];

impl ShipType {
    pub const fn id(self) -> &'static str {
        match self {
            ShipType::XWing => "x-wing",
            ShipType::TieFighter => "tie-fighter",
            ShipType::TieAdvanced => "tie-advanced",
        }
    }

    pub const fn faction(self) -> Faction {
        match self {
            ShipType::XWing => Faction::Rebels,
            ShipType::TieFighter | ShipType::TieAdvanced => Faction::Empire,
        }
    }

    /// Every maneuver the chassis can be assigned.
    pub fn dial(self) -> &'static [Maneuver] {
        match self {
            ShipType::XWing => &X_WING_DIAL,
            ShipType::TieFighter => &TIE_FIGHTER_DIAL,
            ShipType::TieAdvanced => &TIE_ADVANCED_DIAL,
        }
    }

    /// Looks up a dial entry by template, returning it with the dial's color.
    pub fn dial_maneuver(self, template: &Maneuver) -> Option<Maneuver> {
        self.dial().iter().copied().find(|m| m.same_template(template))
    }

    pub const fn actions(self) -> &'static [ActionKind] {
        match self {
            ShipType::XWing => &[ActionKind::Focus],
            ShipType::TieFighter | ShipType::TieAdvanced => &[ActionKind::Focus, ActionKind::Evade],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dials_have_no_duplicate_templates() {
        for t in ALL_SHIP_TYPES {
            let dial = t.dial();
            for (i, a) in dial.iter().enumerate() {
                for b in &dial[i + 1..] {
                    assert!(!a.same_template(b), "{:?} repeats {}", t, a.code());
                }
            }
        }
    }

    #[test]
    fn every_dial_has_a_red_maneuver() {
        for t in ALL_SHIP_TYPES {
            assert!(t.dial().iter().any(|m| m.color == C::Red));
        }
    }

    #[test]
    fn dial_lookup_supplies_color() {
        let template = mv(4, D::Forward, B::KoiogranTurn, C::White);
        let found = ShipType::XWing.dial_maneuver(&template).unwrap();
        assert_eq!(found.color, C::Red);
        assert!(ShipType::XWing.dial_maneuver(&mv(5, D::Forward, B::Straight, C::White)).is_none());
    }
}
