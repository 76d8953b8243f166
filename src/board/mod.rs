//! Board representation and game-state types.
//!
//! Contains the core data structures for players, ships, maneuvers, tokens,
//! obstacles, and the overall game state.

pub mod maneuver;
pub mod obstacle;
pub mod player;
pub mod ship;
pub mod state;
pub mod template;
pub mod token;

pub use maneuver::{Maneuver, ManeuverBearing, ManeuverColor, ManeuverDirection};
pub use obstacle::{Mine, MineId, Obstacle, ObstacleId, ObstacleKind};
pub use player::{Faction, Player, PlayerKind, PlayerNo, ALL_PLAYERS};
pub use ship::{ActionKind, Ship, ShipId};
pub use state::GameState;
pub use template::Pose;
pub use token::Token;
