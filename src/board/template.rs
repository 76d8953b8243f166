//! Movement templates.
//!
//! Ships sit on small 40mm bases. A maneuver lays its template against the
//! front edge of the base and the ship is placed with the rear edge of its base
//! at the far end of the template. Straights are 40mm per speed; banks and
//! turns follow circular arcs of 45 and 90 degrees whose radius grows with
//! speed. A Koiogran turn is a straight followed by a half rotation.

use serde::{Deserialize, Serialize};

use super::maneuver::{Maneuver, ManeuverBearing, ManeuverDirection};

/// Side length of a small ship base.
pub const BASE_SIZE_MM: f64 = 40.0;

/// Length of one speed unit of a straight template.
pub const STRAIGHT_SEGMENT_MM: f64 = 40.0;

/// Bank arc radii for speeds 1..=3.
const BANK_RADII_MM: [f64; 3] = [80.0, 130.0, 180.0];

/// Turn arc radii for speeds 1..=3.
const TURN_RADII_MM: [f64; 3] = [35.0, 62.5, 90.0];

/// Position of a base center in millimetres and its facing in degrees.
///
/// Heading 0 points along +x; positive angles rotate counter-clockwise, so a
/// left turn increases the heading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Pose { x, y, heading }
    }

    /// Moves `distance` along the current heading.
    fn advanced(self, distance: f64) -> Pose {
        let h = self.heading.to_radians();
        Pose {
            x: self.x + distance * h.cos(),
            y: self.y + distance * h.sin(),
            heading: self.heading,
        }
    }

    /// Distance between two base centers.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}

/// Normalizes an angle into `[0, 360)`.
pub fn normalize_heading(deg: f64) -> f64 {
    let h = deg % 360.0;
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

fn arc_radius(table: &[f64; 3], speed: u8) -> f64 {
    let idx = (speed.max(1) as usize - 1).min(table.len() - 1);
    table[idx]
}

/// Follows a circular arc of `radius` through `sweep` degrees. Positive
/// sweeps curve left.
fn follow_arc(start: Pose, radius: f64, sweep: f64) -> Pose {
    let h = start.heading.to_radians();
    let side = if sweep >= 0.0 { 1.0 } else { -1.0 };
    // Center of rotation sits `radius` to the left (or right) of the start.
    let cx = start.x - side * radius * h.sin();
    let cy = start.y + side * radius * h.cos();
    let end_h = h + sweep.to_radians();
    Pose {
        x: cx + side * radius * end_h.sin(),
        y: cy - side * radius * end_h.cos(),
        heading: normalize_heading(start.heading + sweep),
    }
}

/// Returns the pose reached by flying `maneuver` from `pose`.
pub fn apply(pose: Pose, maneuver: &Maneuver) -> Pose {
    let half_base = BASE_SIZE_MM / 2.0;
    let front = pose.advanced(half_base);

    let sign = match maneuver.direction {
        ManeuverDirection::Left => 1.0,
        ManeuverDirection::Right => -1.0,
        ManeuverDirection::Forward => 0.0,
    };

    let end_of_template = match maneuver.bearing {
        ManeuverBearing::Straight | ManeuverBearing::KoiogranTurn => {
            front.advanced(STRAIGHT_SEGMENT_MM * f64::from(maneuver.speed))
        }
        ManeuverBearing::Bank => {
            follow_arc(front, arc_radius(&BANK_RADII_MM, maneuver.speed), 45.0 * sign)
        }
        ManeuverBearing::Turn => {
            follow_arc(front, arc_radius(&TURN_RADII_MM, maneuver.speed), 90.0 * sign)
        }
    };

    let mut placed = end_of_template.advanced(half_base);
    if maneuver.bearing == ManeuverBearing::KoiogranTurn {
        placed.heading = normalize_heading(placed.heading + 180.0);
    }
    placed
}
