//! Squadron rules engine library.
//!
//! Exposes the board representation, card catalog, phase state machine,
//! session, and protocol modules for use by integration tests and the binary
//! entry points.

pub mod ai;
pub mod board;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod events;
pub mod logging;
pub mod phase;
pub mod protocol;
pub mod roster;
pub mod selfplay;
pub mod session;
