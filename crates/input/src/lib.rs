//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. Two players
//! share one keyboard: W/A/S/D steer the left piece and the arrow keys steer
//! the right piece. Flow keys (Esc, Enter, R, Z, Q) depend on the current
//! [`crate::types::FlowState`].

pub mod map;

pub use twotris_types as types;

pub use map::{handle_key_event, should_quit, CommandBatch, MAX_COMMANDS_PER_FRAME};
