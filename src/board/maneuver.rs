//! Maneuver values.
//!
//! A maneuver is a planned movement: speed, direction, bearing, and a color
//! giving its difficulty tier. Maneuvers are plain `Copy` values; rules that
//! change a ship's plan replace the assigned maneuver wholesale rather than
//! editing it.

use serde::{Deserialize, Serialize};

use super::ship::Ship;
use super::template;
use super::token::Token;

/// Which way a bank or turn curves. Straights and Koiogran turns are `Forward`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManeuverDirection {
    Left,
    Right,
    Forward,
}

impl ManeuverDirection {
    /// Returns the single-character notation abbreviation.
    pub const fn code_char(self) -> char {
        match self {
            ManeuverDirection::Left => 'L',
            ManeuverDirection::Right => 'R',
            ManeuverDirection::Forward => 'F',
        }
    }

    pub fn from_code_char(c: char) -> Option<ManeuverDirection> {
        match c {
            'L' => Some(ManeuverDirection::Left),
            'R' => Some(ManeuverDirection::Right),
            'F' => Some(ManeuverDirection::Forward),
            _ => None,
        }
    }
}

/// The movement template used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManeuverBearing {
    Straight,
    Bank,
    Turn,
    KoiogranTurn,
}

impl ManeuverBearing {
    pub const fn code_char(self) -> char {
        match self {
            ManeuverBearing::Straight => 'S',
            ManeuverBearing::Bank => 'B',
            ManeuverBearing::Turn => 'T',
            ManeuverBearing::KoiogranTurn => 'R',
        }
    }

    pub fn from_code_char(c: char) -> Option<ManeuverBearing> {
        match c {
            'S' => Some(ManeuverBearing::Straight),
            'B' => Some(ManeuverBearing::Bank),
            'T' => Some(ManeuverBearing::Turn),
            'R' => Some(ManeuverBearing::KoiogranTurn),
            _ => None,
        }
    }
}

/// Difficulty tier, ordered easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManeuverColor {
    Green,
    White,
    Red,
}

impl ManeuverColor {
    /// True for the hardest tier, the one a stressed ship may not fly.
    pub const fn is_highest_tier(self) -> bool {
        matches!(self, ManeuverColor::Red)
    }

    pub const fn name(self) -> &'static str {
        match self {
            ManeuverColor::Green => "green",
            ManeuverColor::White => "white",
            ManeuverColor::Red => "red",
        }
    }
}

/// A planned movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Maneuver {
    pub speed: u8,
    pub direction: ManeuverDirection,
    pub bearing: ManeuverBearing,
    pub color: ManeuverColor,
}

/// What flying a maneuver did to the ship's tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StressChange {
    pub gained: bool,
    pub removed: bool,
}

impl Maneuver {
    pub const fn new(
        speed: u8,
        direction: ManeuverDirection,
        bearing: ManeuverBearing,
        color: ManeuverColor,
    ) -> Self {
        Maneuver { speed, direction, bearing, color }
    }

    /// The maneuver a stressed ship flies instead of a red one: white straight 2.
    pub const fn stress_fallback() -> Self {
        Maneuver::new(
            2,
            ManeuverDirection::Forward,
            ManeuverBearing::Straight,
            ManeuverColor::White,
        )
    }

    /// Returns the notation code without color, e.g. `2.F.S`.
    pub fn code(&self) -> String {
        format!(
            "{}.{}.{}",
            self.speed,
            self.direction.code_char(),
            self.bearing.code_char()
        )
    }

    /// True when `other` names the same template (color ignored).
    pub fn same_template(&self, other: &Maneuver) -> bool {
        self.speed == other.speed
            && self.direction == other.direction
            && self.bearing == other.bearing
    }

    /// Flies the maneuver: moves the ship along the template and applies the
    /// color's stress effect. Red adds a stress token, green removes one.
    pub fn perform(&self, ship: &mut Ship) -> StressChange {
        ship.pose = template::apply(ship.pose, self);

        let mut change = StressChange::default();
        match self.color {
            ManeuverColor::Red => {
                ship.assign_token(Token::Stress);
                change.gained = true;
            }
            ManeuverColor::Green => {
                change.removed = ship.remove_token(Token::Stress);
            }
            ManeuverColor::White => {}
        }
        change
    }
}

impl std::fmt::Display for Maneuver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color.name(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_ordered_by_difficulty() {
        assert!(ManeuverColor::Green < ManeuverColor::White);
        assert!(ManeuverColor::White < ManeuverColor::Red);
        assert!(ManeuverColor::Red.is_highest_tier());
        assert!(!ManeuverColor::White.is_highest_tier());
    }

    #[test]
    fn fallback_is_white_straight_two() {
        let m = Maneuver::stress_fallback();
        assert_eq!(m.speed, 2);
        assert_eq!(m.direction, ManeuverDirection::Forward);
        assert_eq!(m.bearing, ManeuverBearing::Straight);
        assert_eq!(m.color, ManeuverColor::White);
        assert_eq!(m.code(), "2.F.S");
    }

    #[test]
    fn code_chars_roundtrip() {
        for d in [ManeuverDirection::Left, ManeuverDirection::Right, ManeuverDirection::Forward] {
            assert_eq!(ManeuverDirection::from_code_char(d.code_char()), Some(d));
        }
        for b in [
            ManeuverBearing::Straight,
            ManeuverBearing::Bank,
            ManeuverBearing::Turn,
            ManeuverBearing::KoiogranTurn,
        ] {
            assert_eq!(ManeuverBearing::from_code_char(b.code_char()), Some(b));
        }
        assert_eq!(ManeuverBearing::from_code_char('x'), None);
    }

    #[test]
    fn same_template_ignores_color() {
        let a = Maneuver::new(3, ManeuverDirection::Left, ManeuverBearing::Turn, ManeuverColor::White);
        let b = Maneuver { color: ManeuverColor::Red, ..a };
        assert!(a.same_template(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn display_includes_color() {
        let m = Maneuver::new(4, ManeuverDirection::Forward, ManeuverBearing::KoiogranTurn, ManeuverColor::Red);
        assert_eq!(m.to_string(), "red 4.F.R");
    }
}
