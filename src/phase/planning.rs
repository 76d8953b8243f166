//! Planning: every ship is secretly assigned a maneuver from its dial.

use super::{
    ActivationSubPhase, EndOfRoundSubPhase, GenericSubPhase, PhaseError, PhaseEvent, PhaseHeader,
    PhaseKind, RequiredActor, SubPhase, announce,
};
use crate::board::{GameState, Ship};
use crate::events::GameEvent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningSubPhase;

impl PlanningSubPhase {
    pub fn new() -> Self {
        PlanningSubPhase
    }
}

impl GenericSubPhase for PlanningSubPhase {
    const KIND: PhaseKind = PhaseKind::Planning;

    fn start(&mut self, header: &mut PhaseHeader, _previous: Option<&PhaseHeader>, game: &mut GameState) {
        header.required = RequiredActor { pilot_skill: 0, player: game.initiative };
        announce(header, game);
        self.initialize(header, game);
    }

    fn initialize(&mut self, header: &PhaseHeader, game: &mut GameState) {
        game.selection = None;
        for ship in game.ships.values_mut() {
            ship.highlighted = self.this_ship_can_be_selected(header, ship);
        }
    }

    fn handle(
        &mut self,
        _header: &PhaseHeader,
        game: &mut GameState,
        event: PhaseEvent,
    ) -> Result<(), PhaseError> {
        let PhaseEvent::AssignManeuver { ship: id, maneuver } = event else {
            return Err(PhaseError::UnexpectedEvent { phase: Self::KIND.name(), event: event.name() });
        };

        let ship = game.ship_mut(id).ok_or(PhaseError::UnknownShip(id))?;
        let on_dial = ship
            .ship_type
            .dial_maneuver(&maneuver)
            .ok_or_else(|| PhaseError::ManeuverNotOnDial { ship: id, code: maneuver.code() })?;
        ship.set_assigned_maneuver(on_dial);
        ship.highlighted = false;

        game.emit(GameEvent::ManeuverAssigned { ship: id });
        Ok(())
    }

    fn next(&self, game: &GameState) -> Result<SubPhase, PhaseError> {
        let missing = game.ships.values().filter(|s| s.assigned_maneuver.is_none()).count();
        if missing > 0 {
            return Err(PhaseError::ManeuversMissing(missing));
        }
        if game.unactivated_ships().next().is_none() {
            return Ok(SubPhase::EndOfRound(EndOfRoundSubPhase::new()));
        }
        Ok(SubPhase::Activation(ActivationSubPhase::new()))
    }

    fn this_ship_can_be_selected(&self, _header: &PhaseHeader, ship: &Ship) -> bool {
        ship.assigned_maneuver.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::fixtures::empty_game;
    use crate::board::{
        Maneuver, ManeuverBearing, ManeuverColor, ManeuverDirection, PlayerNo, Pose, ShipId,
    };
    use crate::catalog::pilot_by_id;
    use crate::phase::PhaseId;

    fn header() -> PhaseHeader {
        PhaseHeader {
            id: PhaseId(1),
            kind: PhaseKind::Planning,
            name: "Planning",
            required: RequiredActor { pilot_skill: 0, player: PlayerNo::Player1 },
            predecessor: None,
        }
    }

    fn two_ship_game() -> (GameState, ShipId, ShipId) {
        let mut game = empty_game();
        let xwing = game.add_ship(pilot_by_id("rookie-pilot").unwrap(), vec![], PlayerNo::Player1, Pose::default());
        let tie = game.add_ship(pilot_by_id("academy-pilot").unwrap(), vec![], PlayerNo::Player2, Pose::default());
        (game, xwing, tie)
    }

    fn assign(ship: ShipId, speed: u8, d: ManeuverDirection, b: ManeuverBearing) -> PhaseEvent {
        // Color is ignored on input and taken from the dial.
        PhaseEvent::AssignManeuver { ship, maneuver: Maneuver::new(speed, d, b, ManeuverColor::Green) }
    }

    #[test]
    fn start_requires_initiative_player() {
        let (mut game, _, _) = two_ship_game();
        game.initiative = PlayerNo::Player2;
        let mut h = header();
        PlanningSubPhase::new().start(&mut h, None, &mut game);
        assert_eq!(h.required.player, PlayerNo::Player2);
        assert!(game.ships.values().all(|s| s.highlighted));
    }

    #[test]
    fn assignment_takes_dial_color() {
        let (mut game, xwing, _) = two_ship_game();
        let mut phase = PlanningSubPhase::new();
        phase
            .handle(&header(), &mut game, assign(xwing, 4, ManeuverDirection::Forward, ManeuverBearing::KoiogranTurn))
            .unwrap();
        let m = game.ship(xwing).unwrap().assigned_maneuver.unwrap();
        assert_eq!(m.color, ManeuverColor::Red);
    }

    #[test]
    fn assignment_off_dial_is_rejected() {
        let (mut game, xwing, _) = two_ship_game();
        let mut phase = PlanningSubPhase::new();
        let err = phase
            .handle(&header(), &mut game, assign(xwing, 5, ManeuverDirection::Forward, ManeuverBearing::Straight))
            .unwrap_err();
        assert_eq!(err, PhaseError::ManeuverNotOnDial { ship: xwing, code: "5.F.S".into() });
    }

    #[test]
    fn next_waits_for_every_ship() {
        let (mut game, xwing, tie) = two_ship_game();
        let mut phase = PlanningSubPhase::new();
        assert_eq!(phase.next(&game).unwrap_err(), PhaseError::ManeuversMissing(2));

        phase
            .handle(&header(), &mut game, assign(xwing, 2, ManeuverDirection::Forward, ManeuverBearing::Straight))
            .unwrap();
        assert_eq!(phase.next(&game).unwrap_err(), PhaseError::ManeuversMissing(1));

        phase
            .handle(&header(), &mut game, assign(tie, 3, ManeuverDirection::Left, ManeuverBearing::Turn))
            .unwrap();
        assert_eq!(phase.next(&game).unwrap().kind(), PhaseKind::Activation);
    }

    #[test]
    fn empty_table_skips_to_end() {
        let game = empty_game();
        assert_eq!(PlanningSubPhase::new().next(&game).unwrap().kind(), PhaseKind::EndOfRound);
    }

    #[test]
    fn stressed_ship_may_plan_red() {
        let (mut game, xwing, _) = two_ship_game();
        game.ship_mut(xwing).unwrap().assign_token(crate::board::Token::Stress);
        let mut phase = PlanningSubPhase::new();
        assert!(phase
            .handle(&header(), &mut game, assign(xwing, 4, ManeuverDirection::Forward, ManeuverBearing::KoiogranTurn))
            .is_ok());
    }
}
