//! Activation: picks the next ship to move.
//!
//! Ships move in ascending pilot-skill order. On a tie the player with
//! initiative goes first.

use super::{
    GenericSubPhase, MovementExecutionSubPhase, PhaseError, PhaseEvent, PhaseHeader, PhaseKind,
    RequiredActor, SubPhase, announce,
};
use crate::board::{GameState, Ship, ShipId};
use crate::events::GameEvent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivationSubPhase {
    selected: Option<ShipId>,
}

/// Returns who must activate next, or `None` once every ship has moved.
pub fn next_required_actor(game: &GameState) -> Option<RequiredActor> {
    let pilot_skill = game.unactivated_ships().map(|s| s.pilot_skill).min()?;
    let initiative_has_one = game
        .unactivated_ships()
        .any(|s| s.pilot_skill == pilot_skill && s.owner == game.initiative);
    let player = if initiative_has_one { game.initiative } else { game.initiative.other() };
    Some(RequiredActor { pilot_skill, player })
}

impl ActivationSubPhase {
    pub fn new() -> Self {
        ActivationSubPhase { selected: None }
    }
}

impl GenericSubPhase for ActivationSubPhase {
    const KIND: PhaseKind = PhaseKind::Activation;

    fn start(&mut self, header: &mut PhaseHeader, previous: Option<&PhaseHeader>, game: &mut GameState) {
        header.required = next_required_actor(game)
            .or_else(|| previous.map(|p| p.required))
            .unwrap_or(RequiredActor { pilot_skill: 0, player: game.initiative });
        announce(header, game);
        self.initialize(header, game);
    }

    fn initialize(&mut self, header: &PhaseHeader, game: &mut GameState) {
        self.selected = None;
        game.selection = None;
        for ship in game.ships.values_mut() {
            ship.highlighted = self.this_ship_can_be_selected(header, ship);
        }
    }

    fn handle(
        &mut self,
        header: &PhaseHeader,
        game: &mut GameState,
        event: PhaseEvent,
    ) -> Result<(), PhaseError> {
        let PhaseEvent::SelectShip(id) = event else {
            return Err(PhaseError::UnexpectedEvent { phase: Self::KIND.name(), event: event.name() });
        };

        let ship = game.ship(id).ok_or(PhaseError::UnknownShip(id))?;
        if !self.this_ship_can_be_selected(header, ship) {
            return Err(PhaseError::ShipNotSelectable(id));
        }

        self.selected = Some(id);
        game.selection = Some(id);
        game.emit(GameEvent::ShipSelected { ship: id });
        Ok(())
    }

    fn next(&self, _game: &GameState) -> Result<SubPhase, PhaseError> {
        if self.selected.is_none() {
            return Err(PhaseError::NoShipSelected);
        }
        Ok(SubPhase::MovementExecution(MovementExecutionSubPhase::new()))
    }

    fn this_ship_can_be_selected(&self, header: &PhaseHeader, ship: &Ship) -> bool {
        !ship.is_maneuver_performed
            && ship.pilot_skill == header.required.pilot_skill
            && ship.owner == header.required.player
    }
}
