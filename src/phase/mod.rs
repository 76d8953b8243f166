//! Phase sequencing.
//!
//! A round is a chain of sub-phases: Planning, then alternating Activation /
//! Movement / Action steps for every ship in pilot-skill order, then End of
//! round, then a fresh Planning. Each sub-phase owns its own entry behavior,
//! selection rules, and choice of successor. The `PhaseManager` owns the one
//! active sub-phase and performs every transition.

pub mod action;
pub mod activation;
pub mod end_round;
pub mod manager;
pub mod movement;
pub mod planning;

use serde::Serialize;
use thiserror::Error;

use crate::board::{ActionKind, GameState, Maneuver, PlayerNo, Ship, ShipId};
use crate::events::GameEvent;

pub use action::ActionSubPhase;
pub use activation::ActivationSubPhase;
pub use end_round::EndOfRoundSubPhase;
pub use manager::{ActivePhase, PhaseManager};
pub use movement::{stress_correction, MovementExecutionSubPhase, RevealState};
pub use planning::PlanningSubPhase;

/// Identity of one phase instance. Ids are never reused within a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PhaseId(pub u64);

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of sub-phase types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Planning,
    Activation,
    MovementExecution,
    Action,
    EndOfRound,
}

type Constructor = fn() -> SubPhase;

/// Identifier → constructor table for every sub-phase type.
const PHASE_TABLE: [(&str, PhaseKind, Constructor); 5] = [
    ("planning", PhaseKind::Planning, || SubPhase::Planning(PlanningSubPhase::new())),
    ("activation", PhaseKind::Activation, || SubPhase::Activation(ActivationSubPhase::new())),
    ("movement", PhaseKind::MovementExecution, || {
        SubPhase::MovementExecution(MovementExecutionSubPhase::new())
    }),
    ("action", PhaseKind::Action, || SubPhase::Action(ActionSubPhase::new())),
    ("end", PhaseKind::EndOfRound, || SubPhase::EndOfRound(EndOfRoundSubPhase::new())),
];

impl PhaseKind {
    /// Returns the identifier used in the constructor table.
    pub fn id(self) -> &'static str {
        PHASE_TABLE
            .iter()
            .find(|(_, kind, _)| *kind == self)
            .map(|(id, _, _)| *id)
            .unwrap_or("unknown")
    }

    pub fn from_id(id: &str) -> Option<PhaseKind> {
        PHASE_TABLE
            .iter()
            .find(|(name, _, _)| *name == id)
            .map(|(_, kind, _)| *kind)
    }

    /// The display name shown to players.
    pub const fn name(self) -> &'static str {
        match self {
            PhaseKind::Planning => "Planning",
            PhaseKind::Activation => "Activation",
            PhaseKind::MovementExecution => "Movement",
            PhaseKind::Action => "Action",
            PhaseKind::EndOfRound => "End",
        }
    }
}

/// Who a phase is waiting on: ships of this pilot skill, owned by this player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredActor {
    pub pilot_skill: u8,
    pub player: PlayerNo,
}

/// Bookkeeping shared by every phase instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseHeader {
    pub id: PhaseId,
    pub kind: PhaseKind,
    pub name: &'static str,
    pub required: RequiredActor,
    /// The phase this one was entered from. Set once on creation.
    pub predecessor: Option<PhaseId>,
}

/// Input delivered to the active phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseEvent {
    AssignManeuver { ship: ShipId, maneuver: Maneuver },
    SelectShip(ShipId),
    /// The selected ship's dial has been turned face up.
    ManeuverRevealed,
    PerformAction(ActionKind),
    SkipAction,
}

impl PhaseEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            PhaseEvent::AssignManeuver { .. } => "assign",
            PhaseEvent::SelectShip(_) => "select",
            PhaseEvent::ManeuverRevealed => "reveal",
            PhaseEvent::PerformAction(_) => "action",
            PhaseEvent::SkipAction => "skip",
        }
    }
}

/// Errors raised when an event or transition is not legal in the current phase.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhaseError {
    #[error("no phase is active")]
    NoActivePhase,

    #[error("unknown phase '{0}'")]
    UnknownPhase(String),

    #[error("'{event}' is not accepted during the {phase} phase")]
    UnexpectedEvent { phase: &'static str, event: &'static str },

    #[error("unknown ship {0}")]
    UnknownShip(ShipId),

    #[error("ship {0} cannot be selected now")]
    ShipNotSelectable(ShipId),

    #[error("no ship is selected")]
    NoShipSelected,

    #[error("ship {0} has no assigned maneuver")]
    NoManeuverAssigned(ShipId),

    #[error("maneuver {code} is not on the dial of ship {ship}")]
    ManeuverNotOnDial { ship: ShipId, code: String },

    #[error("{0} ship(s) still need a maneuver")]
    ManeuversMissing(usize),

    #[error("the maneuver has already been revealed")]
    AlreadyRevealed,

    #[error("the maneuver has not been revealed yet")]
    ManeuverNotRevealed,

    #[error("action {0:?} is not available")]
    ActionUnavailable(ActionKind),

    #[error("the ship has already taken its action")]
    ActionAlreadyTaken,
}

/// Behavior common to every sub-phase.
pub trait GenericSubPhase {
    const KIND: PhaseKind;

    /// Enters the phase. By default the required actor is inherited from the
    /// predecessor before initializing.
    fn start(&mut self, header: &mut PhaseHeader, previous: Option<&PhaseHeader>, game: &mut GameState) {
        if let Some(prev) = previous {
            header.required = prev.required;
        }
        announce(header, game);
        self.initialize(header, game);
    }

    /// Resets per-phase state on the board.
    fn initialize(&mut self, header: &PhaseHeader, game: &mut GameState);

    /// Builds the phase that follows this one.
    fn next(&self, game: &GameState) -> Result<SubPhase, PhaseError>;

    fn handle(
        &mut self,
        _header: &PhaseHeader,
        _game: &mut GameState,
        event: PhaseEvent,
    ) -> Result<(), PhaseError> {
        Err(PhaseError::UnexpectedEvent { phase: Self::KIND.name(), event: event.name() })
    }

    fn this_ship_can_be_selected(&self, _header: &PhaseHeader, _ship: &Ship) -> bool {
        false
    }

    fn another_ship_can_be_selected(&self, _header: &PhaseHeader, _ship: &Ship) -> bool {
        false
    }
}

/// Publishes that a phase has begun.
pub(crate) fn announce(header: &PhaseHeader, game: &mut GameState) {
    game.emit(GameEvent::PhaseStarted {
        id: header.id,
        kind: header.kind,
        name: header.name,
        predecessor: header.predecessor,
        required_player: header.required.player,
        required_pilot_skill: header.required.pilot_skill,
    });
}

/// The active sub-phase and its private state.
#[derive(Debug, Clone, PartialEq)]
pub enum SubPhase {
    Planning(PlanningSubPhase),
    Activation(ActivationSubPhase),
    MovementExecution(MovementExecutionSubPhase),
    Action(ActionSubPhase),
    EndOfRound(EndOfRoundSubPhase),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            SubPhase::Planning($p) => $body,
            SubPhase::Activation($p) => $body,
            SubPhase::MovementExecution($p) => $body,
            SubPhase::Action($p) => $body,
            SubPhase::EndOfRound($p) => $body,
        }
    };
}

impl SubPhase {
    /// Constructs a fresh sub-phase of `kind` from the constructor table.
    pub fn construct(kind: PhaseKind) -> SubPhase {
        let (_, _, ctor) = PHASE_TABLE
            .iter()
            .find(|(_, k, _)| *k == kind)
            .copied()
            .unwrap_or(PHASE_TABLE[0]);
        ctor()
    }

    /// Constructs a sub-phase from its identifier.
    pub fn from_id(id: &str) -> Result<SubPhase, PhaseError> {
        PhaseKind::from_id(id)
            .map(SubPhase::construct)
            .ok_or_else(|| PhaseError::UnknownPhase(id.to_string()))
    }

    pub const fn kind(&self) -> PhaseKind {
        match self {
            SubPhase::Planning(_) => PhaseKind::Planning,
            SubPhase::Activation(_) => PhaseKind::Activation,
            SubPhase::MovementExecution(_) => PhaseKind::MovementExecution,
            SubPhase::Action(_) => PhaseKind::Action,
            SubPhase::EndOfRound(_) => PhaseKind::EndOfRound,
        }
    }

    pub fn start(&mut self, header: &mut PhaseHeader, previous: Option<&PhaseHeader>, game: &mut GameState) {
        dispatch!(self, p => p.start(header, previous, game))
    }

    pub fn next(&self, game: &GameState) -> Result<SubPhase, PhaseError> {
        dispatch!(self, p => p.next(game))
    }

    pub fn handle(
        &mut self,
        header: &PhaseHeader,
        game: &mut GameState,
        event: PhaseEvent,
    ) -> Result<(), PhaseError> {
        dispatch!(self, p => p.handle(header, game, event))
    }

    pub fn this_ship_can_be_selected(&self, header: &PhaseHeader, ship: &Ship) -> bool {
        dispatch!(self, p => p.this_ship_can_be_selected(header, ship))
    }

    pub fn another_ship_can_be_selected(&self, header: &PhaseHeader, ship: &Ship) -> bool {
        dispatch!(self, p => p.another_ship_can_be_selected(header, ship))
    }
}
