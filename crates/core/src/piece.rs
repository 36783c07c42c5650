//! Piece module - the active falling shape
//!
//! A piece is a shape in its current rotation, a color, and the anchor of the
//! shape's top-left corner on the grid. Pieces never check collisions
//! themselves; the engine asks the grid before committing any change.

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::shapes::{random_shape_and_color, Shape, ShapeKind};
use crate::types::ColorId;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub color: ColorId,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece of `kind` in its spawn orientation at (x, y)
    pub fn new(kind: ShapeKind, color: ColorId, x: i8, y: i8) -> Self {
        Self {
            kind,
            shape: kind.template(),
            color,
            x,
            y,
        }
    }

    /// Random piece centered horizontally on a `cols`-wide board, at row 0
    pub fn spawn(cols: u8, rng: &mut SimpleRng) -> Self {
        let (kind, color) = random_shape_and_color(rng);
        let x = (cols / 2) as i8 - (kind.template().width() / 2) as i8;
        Self::new(kind, color, x, 0)
    }

    /// Random piece at column `x`, row 0
    pub fn spawn_at(x: i8, rng: &mut SimpleRng) -> Self {
        let (kind, color) = random_shape_and_color(rng);
        Self::new(kind, color, x, 0)
    }

    /// The shape this piece would have after one clockwise rotation.
    ///
    /// Pure query; committing it is up to the caller.
    pub fn rotated_shape(&self) -> Shape {
        self.shape.rotated_cw()
    }

    /// Whether the piece, shifted by (dx, dy), fits on the grid
    pub fn fits(&self, grid: &Grid, dx: i8, dy: i8) -> bool {
        grid.is_valid_placement(&self.shape, self.x, self.y, dx, dy)
    }

    /// Absolute grid coordinates of every occupied sub-cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(move |(ox, oy)| (self.x + ox, self.y + oy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_new_uses_template() {
        let piece = Piece::new(ShapeKind::T, ColorId::Red, 3, 0);
        assert_eq!(piece.shape, ShapeKind::T.template());
        assert_eq!((piece.x, piece.y), (3, 0));
    }

    #[test]
    fn test_spawn_is_centered() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..50 {
            let piece = Piece::spawn(10, &mut rng);
            let expected = 5 - (piece.shape.width() / 2) as i8;
            assert_eq!(piece.x, expected, "{:?}", piece.kind);
            assert_eq!(piece.y, 0);
        }
    }

    #[test]
    fn test_rotated_shape_does_not_mutate() {
        let piece = Piece::new(ShapeKind::L, ColorId::Orange, 0, 0);
        let rotated = piece.rotated_shape();
        assert_ne!(rotated, piece.shape);
        assert_eq!(piece.shape, ShapeKind::L.template());
    }

    #[test]
    fn test_cells_are_absolute() {
        let piece = Piece::new(ShapeKind::O, ColorId::Yellow, 4, 7);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(4, 7), (5, 7), (4, 8), (5, 8)]);
    }
}
