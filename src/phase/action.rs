//! Action step: the ship that just moved may take one action from its bar.
//! Stressed ships may not act.

use super::{
    ActivationSubPhase, EndOfRoundSubPhase, GenericSubPhase, PhaseError, PhaseEvent, PhaseHeader,
    PhaseKind, SubPhase,
};
use crate::board::{ActionKind, GameState, ShipId};
use crate::events::GameEvent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionSubPhase {
    ship: Option<ShipId>,
    available: Vec<ActionKind>,
    done: bool,
}

impl ActionSubPhase {
    pub fn new() -> Self {
        ActionSubPhase { ship: None, available: Vec::new(), done: false }
    }

    /// Actions the acting ship may still choose from.
    pub fn available(&self) -> &[ActionKind] {
        if self.done { &[] } else { self.available.as_slice() }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl GenericSubPhase for ActionSubPhase {
    const KIND: PhaseKind = PhaseKind::Action;

    fn initialize(&mut self, _header: &PhaseHeader, game: &mut GameState) {
        self.ship = game.selection;
        self.done = false;
        self.available = match game.this_ship() {
            Some(ship) if !ship.is_stressed() => ship.ship_type.actions().to_vec(),
            _ => Vec::new(),
        };
    }

    fn handle(
        &mut self,
        _header: &PhaseHeader,
        game: &mut GameState,
        event: PhaseEvent,
    ) -> Result<(), PhaseError> {
        let id = self.ship.ok_or(PhaseError::NoShipSelected)?;
        match event {
            PhaseEvent::PerformAction(action) => {
                if self.done {
                    return Err(PhaseError::ActionAlreadyTaken);
                }
                if !self.available.contains(&action) {
                    return Err(PhaseError::ActionUnavailable(action));
                }
                let ship = game.ship_mut(id).ok_or(PhaseError::UnknownShip(id))?;
                ship.assign_token(action.token());
                self.done = true;
                game.emit(GameEvent::ActionPerformed { ship: id, action });
                Ok(())
            }
            PhaseEvent::SkipAction => {
                if self.done {
                    return Err(PhaseError::ActionAlreadyTaken);
                }
                self.done = true;
                game.emit(GameEvent::ActionSkipped { ship: id });
                Ok(())
            }
            other => Err(PhaseError::UnexpectedEvent { phase: Self::KIND.name(), event: other.name() }),
        }
    }

    fn next(&self, game: &GameState) -> Result<SubPhase, PhaseError> {
        if game.unactivated_ships().next().is_some() {
            Ok(SubPhase::Activation(ActivationSubPhase::new()))
        } else {
            Ok(SubPhase::EndOfRound(EndOfRoundSubPhase::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::fixtures::empty_game;
    use crate::board::{PlayerNo, Pose, Token};
    use crate::catalog::pilot_by_id;
    use crate::phase::{PhaseId, RequiredActor};

    fn header() -> PhaseHeader {
        PhaseHeader {
            id: PhaseId(4),
            kind: PhaseKind::Action,
            name: "Action",
            required: RequiredActor { pilot_skill: 1, player: PlayerNo::Player2 },
            predecessor: Some(PhaseId(3)),
        }
    }

    fn moved_tie(stressed: bool) -> (GameState, ShipId) {
        let mut game = empty_game();
        let id = game.add_ship(pilot_by_id("academy-pilot").unwrap(), vec![], PlayerNo::Player2, Pose::default());
        let ship = game.ship_mut(id).unwrap();
        ship.is_maneuver_performed = true;
        if stressed {
            ship.assign_token(Token::Stress);
        }
        game.selection = Some(id);
        (game, id)
    }

    #[test]
    fn action_grants_token_once() {
        let (mut game, id) = moved_tie(false);
        let mut phase = ActionSubPhase::new();
        phase.initialize(&header(), &mut game);
        assert_eq!(phase.available(), &[ActionKind::Focus, ActionKind::Evade]);

        phase.handle(&header(), &mut game, PhaseEvent::PerformAction(ActionKind::Evade)).unwrap();
        assert!(game.ship(id).unwrap().has_token(Token::Evade));
        assert!(phase.available().is_empty());
        assert_eq!(
            phase.handle(&header(), &mut game, PhaseEvent::PerformAction(ActionKind::Focus)),
            Err(PhaseError::ActionAlreadyTaken)
        );
    }

    #[test]
    fn stressed_ship_cannot_act() {
        let (mut game, _) = moved_tie(true);
        let mut phase = ActionSubPhase::new();
        phase.initialize(&header(), &mut game);
        assert_eq!(
            phase.handle(&header(), &mut game, PhaseEvent::PerformAction(ActionKind::Focus)),
            Err(PhaseError::ActionUnavailable(ActionKind::Focus))
        );
        phase.handle(&header(), &mut game, PhaseEvent::SkipAction).unwrap();
        assert!(phase.is_done());
        assert_eq!(game.events().last(), Some(&GameEvent::ActionSkipped { ship: game.selection.unwrap() }));
    }

    #[test]
    fn next_depends_on_remaining_ships() {
        let (mut game, _) = moved_tie(false);
        let phase = ActionSubPhase::new();
        assert_eq!(phase.next(&game).unwrap().kind(), PhaseKind::EndOfRound);

        game.add_ship(pilot_by_id("rookie-pilot").unwrap(), vec![], PlayerNo::Player1, Pose::default());
        assert_eq!(phase.next(&game).unwrap().kind(), PhaseKind::Activation);
    }
}
