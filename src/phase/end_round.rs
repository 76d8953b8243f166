//! End of round cleanup.

use tracing::info;

use super::{GenericSubPhase, PhaseError, PhaseHeader, PhaseKind, PlanningSubPhase, SubPhase};
use crate::board::GameState;
use crate::events::GameEvent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndOfRoundSubPhase;

impl EndOfRoundSubPhase {
    pub fn new() -> Self {
        EndOfRoundSubPhase
    }
}

impl GenericSubPhase for EndOfRoundSubPhase {
    const KIND: PhaseKind = PhaseKind::EndOfRound;

    /// Discards round-scoped tokens, clears activation state, and opens the
    /// next round.
    fn initialize(&mut self, _header: &PhaseHeader, game: &mut GameState) {
        for ship in game.ships.values_mut() {
            ship.tokens.retain(|t| !t.expires_at_end_of_round());
            ship.is_maneuver_performed = false;
            ship.assigned_maneuver = None;
            ship.highlighted = false;
        }
        game.selection = None;

        let round = game.round;
        game.emit(GameEvent::RoundEnded { round });
        info!(round, "round ended");
        game.round += 1;
    }

    fn next(&self, _game: &GameState) -> Result<SubPhase, PhaseError> {
        Ok(SubPhase::Planning(PlanningSubPhase::new()))
    }
}
