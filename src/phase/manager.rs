//! Ownership of the active sub-phase.
//!
//! Exactly one phase is active at a time. A transition builds the successor,
//! links it to the phase it came from, starts it, and retires the old
//! header into history. Retired phases keep only their header, so a
//! predecessor is always referred to by `PhaseId`.

use tracing::{debug, info};

use super::{PhaseError, PhaseEvent, PhaseHeader, PhaseId, PhaseKind, RequiredActor, SubPhase};
use crate::board::{GameState, ShipId};

/// The active phase: shared bookkeeping plus the sub-phase's own state.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePhase {
    pub header: PhaseHeader,
    pub phase: SubPhase,
}

#[derive(Debug, Clone)]
pub struct PhaseManager {
    current: Option<ActivePhase>,
    history: Vec<PhaseHeader>,
    next_id: u64,
}

impl PhaseManager {
    pub fn new() -> Self {
        PhaseManager { current: None, history: Vec::new(), next_id: 1 }
    }

    /// Starts `phase` with no predecessor, retiring whatever was active.
    pub fn begin(&mut self, game: &mut GameState, phase: SubPhase) -> PhaseId {
        self.enter(game, phase, false)
    }

    /// Replaces the active phase with the one built by `factory`. The new
    /// phase records the old one as its predecessor.
    pub fn advance<F>(&mut self, game: &mut GameState, factory: F) -> PhaseId
    where
        F: FnOnce(&GameState) -> SubPhase,
    {
        let phase = factory(game);
        self.enter(game, phase, true)
    }

    /// Moves to whichever phase the active one names as its successor.
    pub fn next(&mut self, game: &mut GameState) -> Result<PhaseId, PhaseError> {
        let active = self.current.as_ref().ok_or(PhaseError::NoActivePhase)?;
        let successor = active.phase.next(game)?;
        Ok(self.advance(game, |_| successor))
    }

    /// Delivers an event to the active phase.
    pub fn handle(&mut self, game: &mut GameState, event: PhaseEvent) -> Result<(), PhaseError> {
        let active = self.current.as_mut().ok_or(PhaseError::NoActivePhase)?;
        active.phase.handle(&active.header, game, event)
    }

    pub fn current(&self) -> Option<&ActivePhase> {
        self.current.as_ref()
    }

    pub fn current_kind(&self) -> Option<PhaseKind> {
        self.current.as_ref().map(|a| a.header.kind)
    }

    /// Headers of every retired phase, oldest first.
    pub fn history(&self) -> &[PhaseHeader] {
        &self.history
    }

    pub fn header_of(&self, id: PhaseId) -> Option<&PhaseHeader> {
        self.current
            .as_ref()
            .map(|a| &a.header)
            .filter(|h| h.id == id)
            .or_else(|| self.history.iter().rev().find(|h| h.id == id))
    }

    pub fn predecessor_of(&self, id: PhaseId) -> Option<PhaseId> {
        self.header_of(id).and_then(|h| h.predecessor)
    }

    /// Whether the active phase lets `ship` become the selected ship.
    pub fn this_ship_can_be_selected(&self, game: &GameState, ship: ShipId) -> bool {
        match (self.current.as_ref(), game.ship(ship)) {
            (Some(active), Some(ship)) => active.phase.this_ship_can_be_selected(&active.header, ship),
            _ => false,
        }
    }

    /// Whether the active phase lets `ship` be picked as a target while
    /// another ship is selected.
    pub fn another_ship_can_be_selected(&self, game: &GameState, ship: ShipId) -> bool {
        match (self.current.as_ref(), game.ship(ship)) {
            (Some(active), Some(ship)) => active.phase.another_ship_can_be_selected(&active.header, ship),
            _ => false,
        }
    }

    fn enter(&mut self, game: &mut GameState, mut phase: SubPhase, linked: bool) -> PhaseId {
        let previous = self.current.take().map(|a| a.header);
        let id = PhaseId(self.next_id);
        self.next_id += 1;

        let kind = phase.kind();
        let mut header = PhaseHeader {
            id,
            kind,
            name: kind.name(),
            required: previous
                .as_ref()
                .map(|p| p.required)
                .unwrap_or(RequiredActor { pilot_skill: 0, player: game.initiative }),
            predecessor: if linked { previous.as_ref().map(|p| p.id) } else { None },
        };
        let inherited = if linked { previous.as_ref() } else { None };
        phase.start(&mut header, inherited, game);

        info!(
            phase = header.name,
            id = %id,
            player = header.required.player.name(),
            pilot_skill = header.required.pilot_skill,
            "phase started"
        );
        if let Some(prev) = previous {
            debug!(phase = prev.name, id = %prev.id, "phase retired");
            self.history.push(prev);
        }

        self.current = Some(ActivePhase { header, phase });
        id
    }
}

impl Default for PhaseManager {
    fn default() -> Self {
        Self::new()
    }
}
