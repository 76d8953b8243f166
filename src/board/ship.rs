//! Ships in play.
//!
//! A `Ship` is the per-game instance of a pilot card: its owner, pose,
//! assigned maneuver, tokens, and the transient state of the current
//! activation. Ships are owned by `GameState`; phases refer to them by
//! `ShipId`.

use serde::{Deserialize, Serialize};

use super::maneuver::Maneuver;
use super::obstacle::{MineId, ObstacleId};
use super::player::PlayerNo;
use super::template::Pose;
use super::token::Token;
use crate::catalog::ShipType;

/// Stable identifier of a ship within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub u32);

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An action a ship may take during its action step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Focus,
    Evade,
}

impl ActionKind {
    /// The token the action grants.
    pub const fn token(self) -> Token {
        match self {
            ActionKind::Focus => Token::Focus,
            ActionKind::Evade => Token::Evade,
        }
    }

    pub fn from_name(s: &str) -> Option<ActionKind> {
        match s.to_ascii_lowercase().as_str() {
            "focus" => Some(ActionKind::Focus),
            "evade" => Some(ActionKind::Evade),
            _ => None,
        }
    }
}

/// A ship on the play area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ship {
    pub id: ShipId,
    pub pilot_id: &'static str,
    pub pilot_name: &'static str,
    pub ship_type: ShipType,
    pub owner: PlayerNo,
    pub pilot_skill: u8,
    pub upgrades: Vec<&'static str>,
    pub pose: Pose,
    pub assigned_maneuver: Option<Maneuver>,
    pub is_maneuver_performed: bool,
    pub obstacles_hit: Vec<ObstacleId>,
    pub mines_hit: Vec<MineId>,
    pub tokens: Vec<Token>,
    pub highlighted: bool,
}

impl Ship {
    /// Returns true if the ship carries at least one token of `kind`.
    pub fn has_token(&self, kind: Token) -> bool {
        self.tokens.contains(&kind)
    }

    /// Returns how many tokens of `kind` the ship carries.
    pub fn token_count(&self, kind: Token) -> usize {
        self.tokens.iter().filter(|t| **t == kind).count()
    }

    pub fn assign_token(&mut self, kind: Token) {
        self.tokens.push(kind);
    }

    /// Removes one token of `kind`. Returns false if there was none.
    pub fn remove_token(&mut self, kind: Token) -> bool {
        match self.tokens.iter().position(|t| *t == kind) {
            Some(idx) => {
                self.tokens.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Replaces the planned maneuver.
    pub fn set_assigned_maneuver(&mut self, maneuver: Maneuver) {
        self.assigned_maneuver = Some(maneuver);
    }

    pub fn is_stressed(&self) -> bool {
        self.has_token(Token::Stress)
    }

    /// Clears the per-activation hit records.
    pub fn reset_hits(&mut self) {
        self.obstacles_hit = Vec::new();
        self.mines_hit = Vec::new();
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::ship;
    use super::*;

    #[test]
    fn tokens_add_and_remove_one_at_a_time() {
        let mut s = ship(1, PlayerNo::Player1, 2);
        s.assign_token(Token::Stress);
        s.assign_token(Token::Stress);
        assert_eq!(s.token_count(Token::Stress), 2);
        assert!(s.remove_token(Token::Stress));
        assert_eq!(s.token_count(Token::Stress), 1);
        assert!(s.is_stressed());
        assert!(s.remove_token(Token::Stress));
        assert!(!s.remove_token(Token::Stress));
        assert!(!s.is_stressed());
    }

    #[test]
    fn reset_hits_empties_both_lists() {
        let mut s = ship(1, PlayerNo::Player1, 2);
        s.obstacles_hit.push(ObstacleId(3));
        s.mines_hit.push(MineId(1));
        s.reset_hits();
        assert!(s.obstacles_hit.is_empty());
        assert!(s.mines_hit.is_empty());
    }

    #[test]
    fn action_grants_matching_token() {
        assert_eq!(ActionKind::Focus.token(), Token::Focus);
        assert_eq!(ActionKind::Evade.token(), Token::Evade);
        assert_eq!(ActionKind::from_name("EVADE"), Some(ActionKind::Evade));
        assert_eq!(ActionKind::from_name("roll"), None);
    }
}
