//! Random legal play.
//!
//! Every choice is drawn uniformly from the legal options for the current
//! phase. Used by `go` to move AI-controlled seats and by self-play.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::board::{ActionKind, Maneuver, PlayerNo, ShipId, ALL_PLAYERS};
use crate::catalog::ShipType;
use crate::phase::{ActivePhase, PhaseError, PhaseEvent, RevealState, SubPhase};
use crate::session::Session;

/// Picks a random maneuver from the chassis dial.
pub fn random_dial_maneuver(ship_type: ShipType, rng: &mut impl Rng) -> Maneuver {
    let dial = ship_type.dial();
    dial[rng.gen_range(0..dial.len())]
}

/// The lowest-id ship the active phase lets `player` select, if any.
pub fn first_selectable_ship(session: &Session, player: PlayerNo) -> Option<ShipId> {
    let game = session.game();
    game.ships
        .values()
        .filter(|s| s.owner == player)
        .map(|s| s.id)
        .find(|id| session.phases().this_ship_can_be_selected(game, *id))
}

/// Gives a random dial maneuver to every ship of `player` still lacking one.
/// Returns how many were assigned.
pub fn plan_ships(
    session: &mut Session,
    player: PlayerNo,
    rng: &mut impl Rng,
) -> Result<usize, PhaseError> {
    let pending: Vec<_> = session
        .game()
        .ships
        .values()
        .filter(|s| s.owner == player && s.assigned_maneuver.is_none())
        .map(|s| (s.id, s.ship_type))
        .collect();
    for (id, ship_type) in &pending {
        let maneuver = random_dial_maneuver(*ship_type, rng);
        trace!(ship = %id, maneuver = %maneuver, "planned");
        session.assign_maneuver(*id, maneuver)?;
    }
    Ok(pending.len())
}

/// Picks a random action from `available`, or skips if there is none.
pub fn choose_action(available: &[ActionKind], rng: &mut impl Rng) -> PhaseEvent {
    match available.choose(rng) {
        Some(action) => PhaseEvent::PerformAction(*action),
        None => PhaseEvent::SkipAction,
    }
}

/// Advances `session` by one step on behalf of the players `controls`
/// accepts.
///
/// Returns `Ok(false)` when the game is waiting on a player outside
/// `controls`, `Ok(true)` otherwise.
pub fn autoplay_step(
    session: &mut Session,
    rng: &mut impl Rng,
    controls: impl Fn(PlayerNo) -> bool,
) -> Result<bool, PhaseError> {
    let Some(ActivePhase { header, phase }) = session.current().cloned() else {
        return Err(PhaseError::NoActivePhase);
    };
    let required = header.required.player;

    match phase {
        SubPhase::Planning(_) => {
            for player in ALL_PLAYERS {
                if controls(player) {
                    plan_ships(session, player, rng)?;
                }
            }
            match session.next() {
                Ok(_) => Ok(true),
                Err(PhaseError::ManeuversMissing(_)) => Ok(false),
                Err(e) => Err(e),
            }
        }
        SubPhase::Activation(_) => {
            if !controls(required) {
                return Ok(false);
            }
            let ship = first_selectable_ship(session, required).ok_or(PhaseError::NoShipSelected)?;
            session.select_ship(ship)?;
            session.next()?;
            Ok(true)
        }
        SubPhase::MovementExecution(movement) => {
            if movement.reveal_state() == RevealState::AwaitingReveal {
                if !controls(required) {
                    return Ok(false);
                }
                session.reveal()?;
            }
            session.next()?;
            Ok(true)
        }
        SubPhase::Action(action) => {
            if !action.is_done() {
                if !controls(required) {
                    return Ok(false);
                }
                session.handle(choose_action(action.available(), rng))?;
            }
            session.next()?;
            Ok(true)
        }
        SubPhase::EndOfRound(_) => {
            session.next()?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use crate::config::GameConfig;
    use crate::phase::PhaseKind;
    use crate::roster::Roster;

    fn session() -> Session {
        let mut roster = Roster::default();
        roster.add_ship(PlayerNo::Player1, "luke-skywalker", &[]).unwrap();
        roster.add_ship(PlayerNo::Player1, "rookie-pilot", &[]).unwrap();
        roster.add_ship(PlayerNo::Player2, "darth-vader", &[]).unwrap();
        roster.add_ship(PlayerNo::Player2, "academy-pilot", &[]).unwrap();
        Session::new(roster.build_game(&GameConfig::default()).unwrap())
    }

    #[test]
    fn random_maneuver_is_on_dial() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let m = random_dial_maneuver(ShipType::TieFighter, &mut rng);
            assert_eq!(ShipType::TieFighter.dial_maneuver(&m), Some(m));
        }
    }

    #[test]
    fn choose_action_skips_when_empty() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(choose_action(&[], &mut rng), PhaseEvent::SkipAction);
        assert_eq!(
            choose_action(&[ActionKind::Focus], &mut rng),
            PhaseEvent::PerformAction(ActionKind::Focus)
        );
    }

    #[test]
    fn waits_for_uncontrolled_player() {
        let mut s = session();
        let mut rng = SmallRng::seed_from_u64(3);
        // Only Player1 is automated, so Planning cannot finish.
        assert_eq!(autoplay_step(&mut s, &mut rng, |p| p == PlayerNo::Player1), Ok(false));
        assert_eq!(s.current_kind(), Some(PhaseKind::Planning));
        assert!(s
            .game()
            .ships
            .values()
            .all(|ship| (ship.owner == PlayerNo::Player1) == ship.assigned_maneuver.is_some()));
    }

    #[test]
    fn plays_full_rounds() {
        let mut s = session();
        let mut rng = SmallRng::seed_from_u64(11);
        let mut steps = 0;
        while s.game().round <= 3 {
            assert_eq!(autoplay_step(&mut s, &mut rng, |_| true), Ok(true));
            steps += 1;
            assert!(steps < 100, "autoplay did not make progress");
        }
        assert_eq!(s.current_kind(), Some(PhaseKind::Planning));
    }
}
