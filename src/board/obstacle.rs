//! Obstacles and mines on the play area.
//!
//! Both are modelled as circles. A ship hits one when its base, treated as a
//! circle inscribed in the 40mm square, overlaps the footprint at the end of
//! its maneuver.

use serde::{Deserialize, Serialize};

use super::template::{Pose, BASE_SIZE_MM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MineId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Asteroid,
    /// Flying through debris stresses the pilot.
    Debris,
}

impl ObstacleKind {
    pub fn from_name(s: &str) -> Option<ObstacleKind> {
        match s.to_ascii_lowercase().as_str() {
            "asteroid" => Some(ObstacleKind::Asteroid),
            "debris" => Some(ObstacleKind::Debris),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mine {
    pub id: MineId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

fn overlaps(pose: &Pose, x: f64, y: f64, radius: f64) -> bool {
    pose.distance_to(x, y) < radius + BASE_SIZE_MM / 2.0
}

impl Obstacle {
    pub fn overlaps(&self, pose: &Pose) -> bool {
        overlaps(pose, self.x, self.y, self.radius)
    }
}

impl Mine {
    pub fn overlaps(&self, pose: &Pose) -> bool {
        overlaps(pose, self.x, self.y, self.radius)
    }
}
