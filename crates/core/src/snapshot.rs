//! Read-only copies of game state for the presentation layer
//!
//! Renderers and tests only ever look at these; they never borrow the engine.

use crate::piece::Piece;
use crate::shapes::{Shape, ShapeKind};
use crate::types::{Cell, ColorId, FlowState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub color: ColorId,
    pub x: i8,
    pub y: i8,
}

impl PieceSnapshot {
    /// Absolute grid coordinates of every occupied sub-cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(move |(ox, oy)| (self.x + ox, self.y + oy))
    }
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EngineSnapshot {
    pub rows: u8,
    pub cols: u8,
    /// Row-major, `rows * cols` long.
    pub cells: Vec<Cell>,
    pub left: PieceSnapshot,
    pub right: PieceSnapshot,
    pub score: u32,
    /// Multiplier in effect, power bonus included.
    pub multiplier: u32,
    pub power_active: bool,
    pub power_remaining_ms: u64,
    pub game_over: bool,
}

impl EngineSnapshot {
    /// Locked cell at (x, y); `None` when empty or off the board
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 || x >= self.cols as i8 || y >= self.rows as i8 {
            return None;
        }
        self.cells[y as usize * self.cols as usize + x as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GameSnapshot {
    pub flow: FlowState,
    /// Number of engines created so far in this session.
    pub episode_id: u32,
    /// Present in every state except `Start`.
    pub engine: Option<EngineSnapshot>,
}

impl GameSnapshot {
    /// Whether piece commands would currently reach the engine
    pub fn playable(&self) -> bool {
        self.flow == FlowState::Playing
            && self.engine.as_ref().is_some_and(|e| !e.game_over)
    }
}
