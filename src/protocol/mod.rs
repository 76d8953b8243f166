//! Text protocol handling.
//!
//! Parsing for the line-based control protocol and the compact maneuver
//! notation it uses.

pub mod notation;
pub mod parser;

pub use notation::{format_maneuver, parse_maneuver, NotationError};
pub use parser::{parse_command, Command, ParseError};
