//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, so they can be shared between the
//! simulation core, the terminal renderer and the input mapping.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Left spawn column**: 1
//! - **Right spawn column**: `width - 4`
//!
//! # Timing and Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FALL_INTERVAL_MS` | 400 | Forced descent interval for both pieces |
//! | `BASE_POINTS` | 67 | Points per cleared line before the multiplier |
//! | `POWER_THRESHOLD` | 200 | Score needed to trigger the first power mode |
//! | `POWER_DURATION_MS` | 10000 | Length of a power-mode window |
//! | `POWER_BONUS` | 1 | Extra multiplier while power mode is active |
//!
//! # Examples
//!
//! ```
//! use twotris_types::{Command, Side, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let cmd = Command::from_str("rotateLeftPiece").unwrap();
//! assert_eq!(cmd, Command::RotateLeftPiece);
//! assert_eq!(cmd.side(), Some(Side::Left));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Forced descent interval; a step happens once the accumulator exceeds it.
pub const FALL_INTERVAL_MS: u32 = 400;

/// Points for one cleared line at multiplier 1.
pub const BASE_POINTS: u32 = 67;

/// Score that triggers the first power mode.
pub const POWER_THRESHOLD: u32 = 200;

/// Power-mode window length (10 seconds).
pub const POWER_DURATION_MS: u32 = 10_000;

/// Multiplier bonus applied while power mode is active.
pub const POWER_BONUS: u32 = 1;

/// Spawn column of the left piece.
pub const LEFT_SPAWN_X: i8 = 1;

/// Distance of the right piece's spawn column from the right edge.
pub const RIGHT_SPAWN_INSET: i8 = 4;

/// Which of the two concurrent pieces a command or event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Descent order within one fall step: left first, then right.
    pub const ORDER: [Side; 2] = [Side::Left, Side::Right];

    /// Canonical spawn column for this side on a board `cols` wide.
    ///
    /// ```
    /// use twotris_types::Side;
    ///
    /// assert_eq!(Side::Left.spawn_x(10), 1);
    /// assert_eq!(Side::Right.spawn_x(10), 6);
    /// ```
    pub fn spawn_x(&self, cols: u8) -> i8 {
        match self {
            Side::Left => LEFT_SPAWN_X,
            Side::Right => cols as i8 - RIGHT_SPAWN_INSET,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Display colors a locked cell can hold.
///
/// Colors are drawn independently of the shape, so any tetromino may appear in
/// any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ColorId {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
    Blue,
    Orange,
}

impl ColorId {
    pub const ALL: [ColorId; 7] = [
        ColorId::Cyan,
        ColorId::Yellow,
        ColorId::Magenta,
        ColorId::Green,
        ColorId::Red,
        ColorId::Blue,
        ColorId::Orange,
    ];

    /// RGB triple used by renderers.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ColorId::Cyan => (0, 255, 255),
            ColorId::Yellow => (255, 255, 0),
            ColorId::Magenta => (255, 0, 255),
            ColorId::Green => (0, 255, 0),
            ColorId::Red => (255, 0, 0),
            ColorId::Blue => (0, 0, 255),
            ColorId::Orange => (255, 165, 0),
        }
    }
}

/// A cell on the game grid
///
/// - `None`: Empty cell
/// - `Some(ColorId)`: Locked cell with the given color
pub type Cell = Option<ColorId>;

/// Top-level game flow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FlowState {
    /// Main menu; no engine exists.
    #[default]
    Start,
    Playing,
    /// Engine exists but is frozen.
    Paused,
    /// Engine reported game over; its final state stays readable.
    GameOver,
}

impl FlowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowState::Start => "start",
            FlowState::Playing => "playing",
            FlowState::Paused => "paused",
            FlowState::GameOver => "gameOver",
        }
    }

    /// Whether a simulation engine is alive in this state.
    pub fn has_engine(&self) -> bool {
        !matches!(self, FlowState::Start)
    }
}

/// Discrete input commands fed into the game once per frame.
///
/// These are produced by the key mapping (or by tests) and consumed by the
/// game flow state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Command {
    MoveLeftPieceLeft,
    MoveLeftPieceRight,
    MoveLeftPieceDown,
    RotateLeftPiece,
    MoveRightPieceLeft,
    MoveRightPieceRight,
    MoveRightPieceDown,
    RotateRightPiece,
    Pause,
    Resume,
    Start,
    Restart,
    ReturnToMenu,
    Quit,
}

/// What a piece command asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceOp {
    Move { dx: i8, dy: i8 },
    Rotate,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use twotris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveRightPieceDown"), Some(Command::MoveRightPieceDown));
    /// assert_eq!(Command::from_str("RETURNTOMENU"), Some(Command::ReturnToMenu));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleftpieceleft" => Some(Command::MoveLeftPieceLeft),
            "moveleftpieceright" => Some(Command::MoveLeftPieceRight),
            "moveleftpiecedown" => Some(Command::MoveLeftPieceDown),
            "rotateleftpiece" => Some(Command::RotateLeftPiece),
            "moverightpieceleft" => Some(Command::MoveRightPieceLeft),
            "moverightpieceright" => Some(Command::MoveRightPieceRight),
            "moverightpiecedown" => Some(Command::MoveRightPieceDown),
            "rotaterightpiece" => Some(Command::RotateRightPiece),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "start" => Some(Command::Start),
            "restart" => Some(Command::Restart),
            "returntomenu" => Some(Command::ReturnToMenu),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeftPieceLeft => "moveLeftPieceLeft",
            Command::MoveLeftPieceRight => "moveLeftPieceRight",
            Command::MoveLeftPieceDown => "moveLeftPieceDown",
            Command::RotateLeftPiece => "rotateLeftPiece",
            Command::MoveRightPieceLeft => "moveRightPieceLeft",
            Command::MoveRightPieceRight => "moveRightPieceRight",
            Command::MoveRightPieceDown => "moveRightPieceDown",
            Command::RotateRightPiece => "rotateRightPiece",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Start => "start",
            Command::Restart => "restart",
            Command::ReturnToMenu => "returnToMenu",
            Command::Quit => "quit",
        }
    }

    /// The piece this command controls, if it is a piece command.
    pub fn side(&self) -> Option<Side> {
        self.piece_op().map(|(side, _)| side)
    }

    /// Split a piece command into its side and operation.
    ///
    /// Flow commands (pause, start, quit, ...) return `None`.
    pub fn piece_op(&self) -> Option<(Side, PieceOp)> {
        let left = PieceOp::Move { dx: -1, dy: 0 };
        let right = PieceOp::Move { dx: 1, dy: 0 };
        let down = PieceOp::Move { dx: 0, dy: 1 };
        match self {
            Command::MoveLeftPieceLeft => Some((Side::Left, left)),
            Command::MoveLeftPieceRight => Some((Side::Left, right)),
            Command::MoveLeftPieceDown => Some((Side::Left, down)),
            Command::RotateLeftPiece => Some((Side::Left, PieceOp::Rotate)),
            Command::MoveRightPieceLeft => Some((Side::Right, left)),
            Command::MoveRightPieceRight => Some((Side::Right, right)),
            Command::MoveRightPieceDown => Some((Side::Right, down)),
            Command::RotateRightPiece => Some((Side::Right, PieceOp::Rotate)),
            _ => None,
        }
    }
}

/// Side-effect signals for the presentation layer (sounds, flashes).
///
/// Each occurrence is queued once and handed out once by `take_events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum GameEvent {
    PieceLocked(Side),
    LinesCleared { side: Side, count: u32 },
    PowerModeActivated,
    GameOver,
}
