//! Maneuver notation.
//!
//! A maneuver is written `<speed>.<direction>.<bearing>`, e.g. `2.F.S` for
//! straight 2 or `3.L.B` for a left bank 3. Direction is one of `L`, `R`,
//! `F`; bearing one of `S` (straight), `B` (bank), `T` (turn) and `R`
//! (Koiogran turn). Color is not part of the code: it comes from the dial.

use thiserror::Error;

use crate::board::{Maneuver, ManeuverBearing, ManeuverColor, ManeuverDirection};

/// Highest speed printed on any template.
const MAX_SPEED: u8 = 5;

/// Errors that can occur when parsing a maneuver code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("expected <speed>.<direction>.<bearing>, got '{0}'")]
    WrongShape(String),

    #[error("invalid speed '{0}'")]
    InvalidSpeed(String),

    #[error("unknown direction '{0}'")]
    UnknownDirection(String),

    #[error("unknown bearing '{0}'")]
    UnknownBearing(String),

    #[error("{0} only flies forward")]
    DirectionMismatch(String),
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c.to_ascii_uppercase())
}

/// Parses a maneuver code. The result is white; use the ship's dial to
/// obtain the real color.
pub fn parse_maneuver(s: &str) -> Result<Maneuver, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }

    let parts: Vec<&str> = s.split('.').collect();
    let [speed, direction, bearing] = parts.as_slice() else {
        return Err(NotationError::WrongShape(s.to_string()));
    };

    let speed: u8 = speed
        .parse()
        .ok()
        .filter(|v| *v <= MAX_SPEED)
        .ok_or_else(|| NotationError::InvalidSpeed(speed.to_string()))?;
    let direction = single_char(direction)
        .and_then(ManeuverDirection::from_code_char)
        .ok_or_else(|| NotationError::UnknownDirection(direction.to_string()))?;
    let bearing = single_char(bearing)
        .and_then(ManeuverBearing::from_code_char)
        .ok_or_else(|| NotationError::UnknownBearing(bearing.to_string()))?;

    let forward_only = matches!(bearing, ManeuverBearing::Straight | ManeuverBearing::KoiogranTurn);
    if forward_only != (direction == ManeuverDirection::Forward) {
        return Err(NotationError::DirectionMismatch(s.to_string()));
    }

    Ok(Maneuver::new(speed, direction, bearing, ManeuverColor::White))
}

/// Formats a maneuver as its code, e.g. `4.F.R`.
pub fn format_maneuver(m: &Maneuver) -> String {
    m.code()
}
