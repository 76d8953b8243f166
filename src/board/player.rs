//! Players, factions, and controller kinds.

use serde::{Deserialize, Serialize};

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerNo {
    Player1,
    Player2,
}

/// Both seats in turn order.
pub const ALL_PLAYERS: [PlayerNo; 2] = [PlayerNo::Player1, PlayerNo::Player2];

impl PlayerNo {
    /// Returns the opposing seat.
    pub const fn other(self) -> PlayerNo {
        match self {
            PlayerNo::Player1 => PlayerNo::Player2,
            PlayerNo::Player2 => PlayerNo::Player1,
        }
    }

    /// Returns the zero-based index used for per-player arrays.
    pub const fn index(self) -> usize {
        match self {
            PlayerNo::Player1 => 0,
            PlayerNo::Player2 => 1,
        }
    }

    /// Returns the short protocol name (`p1` / `p2`).
    pub const fn name(self) -> &'static str {
        match self {
            PlayerNo::Player1 => "p1",
            PlayerNo::Player2 => "p2",
        }
    }

    /// Parses a seat from `p1`, `p2`, `player1` or `player2` (case-insensitive).
    pub fn from_name(s: &str) -> Option<PlayerNo> {
        match s.to_ascii_lowercase().as_str() {
            "p1" | "player1" | "1" => Some(PlayerNo::Player1),
            "p2" | "player2" | "2" => Some(PlayerNo::Player2),
            _ => None,
        }
    }
}

/// The side a squad fights for. Pilots may only join squads of their faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Rebels,
    Empire,
}

impl Faction {
    pub fn from_name(s: &str) -> Option<Faction> {
        match s.to_ascii_lowercase().as_str() {
            "rebels" | "rebel" => Some(Faction::Rebels),
            "empire" | "imperial" => Some(Faction::Empire),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Faction::Rebels => "rebels",
            Faction::Empire => "empire",
        }
    }
}

/// Who controls a seat. Advisory messages are only surfaced to humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Human,
    HotacAi,
}

impl PlayerKind {
    pub fn from_name(s: &str) -> Option<PlayerKind> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Some(PlayerKind::Human),
            "ai" | "hotac" | "hotacai" => Some(PlayerKind::HotacAi),
            _ => None,
        }
    }

    pub const fn is_human(self) -> bool {
        matches!(self, PlayerKind::Human)
    }
}

/// A seated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub no: PlayerNo,
    pub faction: Faction,
    pub kind: PlayerKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_names_roundtrip() {
        for p in ALL_PLAYERS {
            assert_eq!(PlayerNo::from_name(p.name()), Some(p));
        }
        assert_eq!(PlayerNo::from_name("Player2"), Some(PlayerNo::Player2));
        assert_eq!(PlayerNo::from_name("p3"), None);
    }

    #[test]
    fn other_player_swaps() {
        assert_eq!(PlayerNo::Player1.other(), PlayerNo::Player2);
        assert_eq!(PlayerNo::Player2.other(), PlayerNo::Player1);
    }

    #[test]
    fn faction_and_kind_parse() {
        assert_eq!(Faction::from_name("Empire"), Some(Faction::Empire));
        assert_eq!(Faction::from_name("scum"), None);
        assert_eq!(PlayerKind::from_name("ai"), Some(PlayerKind::HotacAi));
        assert!(PlayerKind::Human.is_human());
        assert!(!PlayerKind::HotacAi.is_human());
    }
}
