//! Twotris simulation core - pure, deterministic, and testable
//!
//! Two pieces fall at once on one shared grid. Each is steered by its own key
//! set, both collide only with locked cells, and their line clears feed a
//! single score with a timed multiplier boost ("power mode").
//!
//! This crate has no I/O. Time comes in as `dt_ms`, randomness comes from a
//! seeded [`SimpleRng`], and results go out as snapshots and [`GameEvent`]s.
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven tetromino templates and clockwise rotation
//! - [`grid`]: shared playfield, placement test, lock and line clearing
//! - [`piece`]: an active shape with color and anchor
//! - [`scoring`]: points, multiplier and the power-mode window
//! - [`engine`]: one running game with a left and a right piece
//! - [`flow`]: Start/Playing/Paused/GameOver around the engine
//! - [`snapshot`]: read-only state for renderers
//! - [`config`]: every tunable, including the seed
//!
//! # Example
//!
//! ```
//! use twotris_core::{EngineConfig, Game};
//! use twotris_core::types::{Command, FlowState};
//!
//! let mut game = Game::new(EngineConfig::default().with_seed(12345));
//! game.frame(16, &[Command::Start]);
//! assert_eq!(game.state(), FlowState::Playing);
//!
//! game.frame(16, &[Command::MoveLeftPieceDown, Command::RotateRightPiece]);
//! let snap = game.snapshot();
//! assert_eq!(snap.engine.map(|e| e.score), Some(0));
//! ```
//!
//! # Timing
//!
//! Both pieces descend one row each time the fall accumulator exceeds
//! 400 ms, left piece first. Call [`Game::frame`] every frame with the
//! elapsed time.
//!
//! [`GameEvent`]: types::GameEvent

pub mod config;
pub mod engine;
pub mod flow;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use twotris_types as types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use flow::Game;
pub use grid::Grid;
pub use piece::Piece;
pub use rng::SimpleRng;
pub use scoring::{line_clear_points, LockScore, ScoreState};
pub use shapes::{random_shape_and_color, Shape, ShapeKind, COLORS, SHAPES};
pub use snapshot::{EngineSnapshot, GameSnapshot, PieceSnapshot};
