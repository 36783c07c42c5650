//! Twotris (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so the binary, the
//! integration tests and the benches share one import path:
//! `twotris::{core,input,term,types}`.

pub mod cli;
pub mod stats;

pub use twotris_core as core;
pub use twotris_input as input;
pub use twotris_term as term;
pub use twotris_types as types;
