//! Status tokens carried by ships.

use serde::{Deserialize, Serialize};

/// A status marker assigned to a ship.
///
/// Stress restricts which maneuvers a ship may fly and stops it from taking
/// actions. Focus and Evade are produced by actions and discarded at the end
/// of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Stress,
    Focus,
    Evade,
}

impl Token {
    /// True for tokens removed during the end-of-round cleanup.
    pub const fn expires_at_end_of_round(self) -> bool {
        matches!(self, Token::Focus | Token::Evade)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Token::Stress => "stress",
            Token::Focus => "focus",
            Token::Evade => "evade",
        }
    }
}
