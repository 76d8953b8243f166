//! Movement execution.
//!
//! Resolves the selected ship's movement: the dial is revealed, the stress
//! rule may swap a red maneuver for white straight 2, and the ship flies the
//! result. Entering the phase only prepares the ship; the reveal arrives
//! later as a `ManeuverRevealed` event, which moves the phase from
//! `AwaitingReveal` to `Resolved`. No ship may be selected meanwhile.

use tracing::{debug, info};

use super::{
    ActionSubPhase, GenericSubPhase, PhaseError, PhaseEvent, PhaseHeader, PhaseKind, SubPhase,
};
use crate::board::{GameState, Maneuver, ShipId};
use crate::events::GameEvent;

/// Advisory shown when the stress rule changes a ship's maneuver.
pub const STRESS_SUBSTITUTION_MESSAGE: &str =
    "Red maneuver while stressed: maneuver is changed to white straight 2";

/// Progress of the reveal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    AwaitingReveal,
    Resolved { substituted: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementExecutionSubPhase {
    ship: Option<ShipId>,
    reveal: RevealState,
}

/// Returns the maneuver that must be flown instead of `maneuver`, if any.
///
/// A stressed ship may not fly a maneuver of the highest difficulty tier; it
/// flies white straight 2 instead.
pub fn stress_correction(maneuver: &Maneuver, stressed: bool) -> Option<Maneuver> {
    if maneuver.color.is_highest_tier() && stressed {
        Some(Maneuver::stress_fallback())
    } else {
        None
    }
}

impl MovementExecutionSubPhase {
    pub fn new() -> Self {
        MovementExecutionSubPhase {
            ship: None,
            reveal: RevealState::AwaitingReveal,
        }
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal
    }

    /// Applies the stress rule to the ship's revealed maneuver. Returns true
    /// if the maneuver was replaced.
    fn check_assigned_maneuver(game: &mut GameState, id: ShipId) -> Result<bool, PhaseError> {
        let ship = game.ship(id).ok_or(PhaseError::UnknownShip(id))?;
        let original = ship.assigned_maneuver.ok_or(PhaseError::NoManeuverAssigned(id))?;
        let owner = ship.owner;

        let Some(replacement) = stress_correction(&original, ship.is_stressed()) else {
            return Ok(false);
        };

        game.show_error_to_human(owner, STRESS_SUBSTITUTION_MESSAGE);
        if let Some(ship) = game.ship_mut(id) {
            ship.set_assigned_maneuver(replacement);
        }
        game.emit(GameEvent::ManeuverSubstituted { ship: id, original, replacement });
        Ok(true)
    }

    fn perform_assigned_maneuver(game: &mut GameState, id: ShipId) -> Result<Maneuver, PhaseError> {
        game.perform_assigned_maneuver(id)
            .ok_or(PhaseError::NoManeuverAssigned(id))
    }
}

impl Default for MovementExecutionSubPhase {
    fn default() -> Self {
        Self::new()
    }
}

impl GenericSubPhase for MovementExecutionSubPhase {
    const KIND: PhaseKind = PhaseKind::MovementExecution;

    fn initialize(&mut self, _header: &PhaseHeader, game: &mut GameState) {
        self.ship = game.selection;
        self.reveal = RevealState::AwaitingReveal;

        let Some(id) = self.ship else {
            debug!("movement started without a selected ship");
            return;
        };

        if let Some(ship) = game.ship_mut(id) {
            ship.is_maneuver_performed = true;
        }
        game.all_ships_highlight_off();
        if let Some(ship) = game.ship_mut(id) {
            ship.reset_hits();
        }

        game.emit(GameEvent::ManeuverReadyToBeRevealed { ship: id });
    }

    fn handle(
        &mut self,
        _header: &PhaseHeader,
        game: &mut GameState,
        event: PhaseEvent,
    ) -> Result<(), PhaseError> {
        if event != PhaseEvent::ManeuverRevealed {
            return Err(PhaseError::UnexpectedEvent {
                phase: Self::KIND.name(),
                event: event.name(),
            });
        }
        if let RevealState::Resolved { .. } = self.reveal {
            return Err(PhaseError::AlreadyRevealed);
        }

        let id = self.ship.ok_or(PhaseError::NoShipSelected)?;
        let revealed = game
            .ship(id)
            .ok_or(PhaseError::UnknownShip(id))?
            .assigned_maneuver
            .ok_or(PhaseError::NoManeuverAssigned(id))?;
        game.emit(GameEvent::ManeuverRevealed { ship: id, maneuver: revealed });

        let substituted = Self::check_assigned_maneuver(game, id)?;
        let flown = Self::perform_assigned_maneuver(game, id)?;
        info!(ship = %id, maneuver = %flown, substituted, "maneuver performed");

        self.reveal = RevealState::Resolved { substituted };
        Ok(())
    }

    /// The ship must have flown before its action step begins.
    fn next(&self, _game: &GameState) -> Result<SubPhase, PhaseError> {
        if self.reveal == RevealState::AwaitingReveal {
            return Err(PhaseError::ManeuverNotRevealed);
        }
        Ok(SubPhase::Action(ActionSubPhase::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::fixtures::empty_game;
    use crate::board::{
        ManeuverBearing, ManeuverColor, ManeuverDirection, ObstacleId, PlayerNo, Pose, Token,
    };
    use crate::catalog::pilot_by_id;
    use crate::phase::{PhaseId, RequiredActor};

    fn header() -> PhaseHeader {
        PhaseHeader {
            id: PhaseId(2),
            kind: PhaseKind::MovementExecution,
            name: "Movement",
            required: RequiredActor { pilot_skill: 2, player: PlayerNo::Player1 },
            predecessor: Some(PhaseId(1)),
        }
    }

    fn k_turn() -> Maneuver {
        Maneuver::new(4, ManeuverDirection::Forward, ManeuverBearing::KoiogranTurn, ManeuverColor::Red)
    }

    fn setup(maneuver: Maneuver, stressed: bool) -> (GameState, ShipId) {
        let mut game = empty_game();
        let pilot = pilot_by_id("rookie-pilot").unwrap();
        let id = game.add_ship(pilot, vec![], PlayerNo::Player1, Pose::new(200.0, 100.0, 90.0));
        let ship = game.ship_mut(id).unwrap();
        ship.set_assigned_maneuver(maneuver);
        if stressed {
            ship.assign_token(Token::Stress);
        }
        game.selection = Some(id);
        (game, id)
    }

    #[test]
    fn correction_only_for_red_and_stressed() {
        let red = k_turn();
        let white = Maneuver { color: ManeuverColor::White, ..red };
        assert_eq!(stress_correction(&red, true), Some(Maneuver::stress_fallback()));
        assert_eq!(stress_correction(&red, false), None);
        assert_eq!(stress_correction(&white, true), None);
    }

    #[test]
    fn initialize_prepares_ship() {
        let (mut game, id) = setup(k_turn(), false);
        {
            let ship = game.ship_mut(id).unwrap();
            ship.obstacles_hit.push(ObstacleId(7));
            ship.highlighted = true;
        }
        let mut phase = MovementExecutionSubPhase::new();
        phase.initialize(&header(), &mut game);

        let ship = game.ship(id).unwrap();
        assert!(ship.is_maneuver_performed);
        assert!(ship.obstacles_hit.is_empty());
        assert!(ship.mines_hit.is_empty());
        assert!(!ship.highlighted);
        assert_eq!(phase.reveal_state(), RevealState::AwaitingReveal);
        assert_eq!(
            game.events().last(),
            Some(&GameEvent::ManeuverReadyToBeRevealed { ship: id })
        );
    }

    #[test]
    fn reveal_substitutes_and_warns() {
        let (mut game, id) = setup(k_turn(), true);
        let mut phase = MovementExecutionSubPhase::new();
        phase.initialize(&header(), &mut game);
        phase.handle(&header(), &mut game, PhaseEvent::ManeuverRevealed).unwrap();

        let ship = game.ship(id).unwrap();
        assert_eq!(ship.assigned_maneuver, Some(Maneuver::stress_fallback()));
        // White maneuvers neither add nor remove stress.
        assert_eq!(ship.token_count(Token::Stress), 1);
        assert_eq!(phase.reveal_state(), RevealState::Resolved { substituted: true });
        let advisories = game.advisories();
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].text, STRESS_SUBSTITUTION_MESSAGE);
    }

    #[test]
    fn reveal_keeps_legal_maneuver() {
        let (mut game, id) = setup(k_turn(), false);
        let mut phase = MovementExecutionSubPhase::new();
        phase.initialize(&header(), &mut game);
        phase.handle(&header(), &mut game, PhaseEvent::ManeuverRevealed).unwrap();

        let ship = game.ship(id).unwrap();
        assert_eq!(ship.assigned_maneuver, Some(k_turn()));
        // Flying red stresses the pilot.
        assert!(ship.is_stressed());
        assert!(game.advisories().is_empty());
    }

    #[test]
    fn second_reveal_is_rejected() {
        let (mut game, _) = setup(k_turn(), false);
        let mut phase = MovementExecutionSubPhase::new();
        phase.initialize(&header(), &mut game);
        phase.handle(&header(), &mut game, PhaseEvent::ManeuverRevealed).unwrap();
        assert_eq!(
            phase.handle(&header(), &mut game, PhaseEvent::ManeuverRevealed),
            Err(PhaseError::AlreadyRevealed)
        );
    }

    #[test]
    fn reveal_without_maneuver_fails() {
        let (mut game, id) = setup(k_turn(), false);
        game.ship_mut(id).unwrap().assigned_maneuver = None;
        let mut phase = MovementExecutionSubPhase::new();
        phase.initialize(&header(), &mut game);
        assert_eq!(
            phase.handle(&header(), &mut game, PhaseEvent::ManeuverRevealed),
            Err(PhaseError::NoManeuverAssigned(id))
        );
    }

    #[test]
    fn other_events_are_rejected() {
        let (mut game, _) = setup(k_turn(), false);
        let mut phase = MovementExecutionSubPhase::new();
        phase.initialize(&header(), &mut game);
        let err = phase.handle(&header(), &mut game, PhaseEvent::SkipAction).unwrap_err();
        assert!(matches!(err, PhaseError::UnexpectedEvent { phase: "Movement", .. }));
    }

    #[test]
    fn next_is_action_after_reveal() {
        let (mut game, _) = setup(k_turn(), false);
        let mut phase = MovementExecutionSubPhase::new();
        phase.initialize(&header(), &mut game);
        phase.handle(&header(), &mut game, PhaseEvent::ManeuverRevealed).unwrap();
        assert_eq!(phase.next(&game).unwrap().kind(), PhaseKind::Action);
    }

    #[test]
    fn next_before_reveal_is_rejected() {
        let (mut game, id) = setup(k_turn(), true);
        let mut phase = MovementExecutionSubPhase::new();
        phase.initialize(&header(), &mut game);

        assert_eq!(phase.next(&game), Err(PhaseError::ManeuverNotRevealed));
        let ship = game.ship(id).unwrap();
        assert_eq!(ship.assigned_maneuver, Some(k_turn()));
        assert_eq!(ship.pose, Pose::new(200.0, 100.0, 90.0));
        assert!(game.advisories().is_empty());
    }

    #[test]
    fn no_ship_is_selectable() {
        let (game, _) = setup(k_turn(), false);
        let phase = MovementExecutionSubPhase::new();
        for ship in game.ships.values() {
            assert!(!phase.this_ship_can_be_selected(&header(), ship));
            assert!(!phase.another_ship_can_be_selected(&header(), ship));
        }
    }
}
