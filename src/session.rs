//! A game in progress: the board plus the phase sequence driving it.

use serde::Serialize;

use crate::board::{ActionKind, GameState, Maneuver, ShipId};
use crate::events::{Advisory, GameEvent};
use crate::phase::{
    ActivePhase, PhaseError, PhaseEvent, PhaseHeader, PhaseId, PhaseKind, PhaseManager,
    PlanningSubPhase, SubPhase,
};

/// Serializable view of a session for `status` output.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: Option<&'a PhaseHeader>,
    pub game: &'a GameState,
}

#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    phases: PhaseManager,
}

impl Session {
    /// Takes ownership of a deployed game and begins the first Planning phase.
    pub fn new(mut game: GameState) -> Self {
        let mut phases = PhaseManager::new();
        phases.begin(&mut game, SubPhase::Planning(PlanningSubPhase::new()));
        Session { game, phases }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn phases(&self) -> &PhaseManager {
        &self.phases
    }

    pub fn current(&self) -> Option<&ActivePhase> {
        self.phases.current()
    }

    pub fn current_kind(&self) -> Option<PhaseKind> {
        self.phases.current_kind()
    }

    pub fn assign_maneuver(&mut self, ship: ShipId, maneuver: Maneuver) -> Result<(), PhaseError> {
        self.handle(PhaseEvent::AssignManeuver { ship, maneuver })
    }

    pub fn select_ship(&mut self, ship: ShipId) -> Result<(), PhaseError> {
        self.handle(PhaseEvent::SelectShip(ship))
    }

    /// Turns the selected ship's dial face up, resolving its movement.
    pub fn reveal(&mut self) -> Result<(), PhaseError> {
        self.handle(PhaseEvent::ManeuverRevealed)
    }

    pub fn perform_action(&mut self, action: ActionKind) -> Result<(), PhaseError> {
        self.handle(PhaseEvent::PerformAction(action))
    }

    pub fn skip_action(&mut self) -> Result<(), PhaseError> {
        self.handle(PhaseEvent::SkipAction)
    }

    pub fn handle(&mut self, event: PhaseEvent) -> Result<(), PhaseError> {
        self.phases.handle(&mut self.game, event)
    }

    /// Moves on to the successor of the current phase.
    pub fn next(&mut self) -> Result<PhaseId, PhaseError> {
        self.phases.next(&mut self.game)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }

    pub fn drain_advisories(&mut self) -> Vec<Advisory> {
        self.game.drain_advisories()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phases.current().map(|a| &a.header),
            game: &self.game,
        }
    }
}
