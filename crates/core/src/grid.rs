//! Grid module - the shared playfield
//!
//! A `rows x cols` matrix where each cell is empty or holds a color.
//! Uses a flat row-major vector sized once at creation.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows above the board (y < 0) are not stored; pieces may hang into them.

use crate::shapes::Shape;
use crate::types::{Cell, ColorId};

/// The playfield shared by both pieces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u8,
    cols: u8,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(rows: u8, cols: u8) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.cols as i8 || y < 0 || y >= self.rows as i8 {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `shape` anchored at (x, y) and shifted by (dx, dy) fits.
    ///
    /// A sub-cell fails on the side walls, on or below the floor, or on an
    /// occupied cell. Sub-cells above the top edge only have to be inside the
    /// side walls.
    pub fn is_valid_placement(&self, shape: &Shape, x: i8, y: i8, dx: i8, dy: i8) -> bool {
        shape.cells().iter().all(|&(ox, oy)| {
            let tx = x + ox + dx;
            let ty = y + oy + dy;
            if tx < 0 || tx >= self.cols as i8 || ty >= self.rows as i8 {
                return false;
            }
            ty < 0 || !self.is_occupied(tx, ty)
        })
    }

    /// Lock a shape onto the grid at (x, y) with the given color
    ///
    /// Returns true if the placement was valid and every occupied sub-cell was
    /// written. Otherwise only the free in-bounds targets are written: filled
    /// cells keep their color and sub-cells off the board are dropped, so the
    /// grid never holds anything but catalog colors.
    pub fn lock(&mut self, shape: &Shape, x: i8, y: i8, color: ColorId) -> bool {
        let mut all_written = true;
        for &(ox, oy) in shape.cells().iter() {
            let (tx, ty) = (x + ox, y + oy);
            match self.get(tx, ty) {
                Some(None) => {
                    self.set(tx, ty, Some(color));
                }
                _ => all_written = false,
            }
        }
        all_written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no filled cell
    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= self.rows as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_none())
    }

    fn row(&self, y: usize) -> &[Cell] {
        let width = self.cols as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Clear all full rows and return how many were cleared
    ///
    /// Surviving rows keep their relative order and slide down; the freed rows
    /// at the top become empty, so the height never changes.
    /// Uses a two-pointer pass with no allocation.
    pub fn clear_full_rows(&mut self) -> u32 {
        let width = self.cols as usize;
        let mut cleared = 0;
        let mut write_y = self.rows as usize;

        // Scan from bottom to top
        for read_y in (0..self.rows as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * width].fill(None);

        cleared
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of rows with no filled cell
    pub fn empty_row_count(&self) -> usize {
        (0..self.rows as usize)
            .filter(|&y| self.is_row_empty(y))
            .count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill row `y` completely, except for the columns in `holes`
    ///
    /// Convenience for building boards in tests and benches.
    pub fn fill_row(&mut self, y: i8, color: ColorId, holes: &[i8]) {
        for x in 0..self.cols as i8 {
            if !holes.contains(&x) {
                self.set(x, y, Some(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(20, 10);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn test_grid_flat_array() {
        let mut grid = Grid::new(20, 10);

        grid.set(0, 0, Some(ColorId::Cyan));
        grid.set(5, 10, Some(ColorId::Red));

        assert_eq!(grid.get(0, 0), Some(Some(ColorId::Cyan)));
        assert_eq!(grid.get(5, 10), Some(Some(ColorId::Red)));

        assert_eq!(grid.cells[0], Some(ColorId::Cyan));
        assert_eq!(grid.cells[10 * 10 + 5], Some(ColorId::Red));
    }

    #[test]
    fn test_placement_above_top_ignores_occupancy() {
        let mut grid = Grid::new(4, 4);
        grid.fill_row(0, ColorId::Blue, &[]);
        let i = ShapeKind::I.template().rotated_cw();

        // Vertical I hanging three cells above the board, bottom cell at y=0.
        assert!(!grid.is_valid_placement(&i, 0, -3, 0, 0));
        // Fully above the board: never touches the grid.
        assert!(grid.is_valid_placement(&i, 0, -4, 0, 0));
    }

    #[test]
    fn test_lock_partial_keeps_existing_colors() {
        let mut grid = Grid::new(4, 4);
        grid.set(1, 1, Some(ColorId::Red));
        let o = ShapeKind::O.template();

        // One target taken, two above the top edge.
        assert!(!grid.lock(&o, 0, 0, ColorId::Green));
        assert_eq!(grid.get(0, 0), Some(Some(ColorId::Green)));
        assert_eq!(grid.get(1, 1), Some(Some(ColorId::Red)));
        assert_eq!(grid.occupied_count(), 4);

        assert!(!grid.lock(&o, 2, -1, ColorId::Blue));
        assert_eq!(grid.get(2, 0), Some(Some(ColorId::Blue)));
        assert_eq!(grid.get(3, 0), Some(Some(ColorId::Blue)));
        assert_eq!(grid.occupied_count(), 6);
    }

    #[test]
    fn test_clear_full_rows_compacts_in_place() {
        let mut grid = Grid::new(4, 3);
        grid.set(1, 0, Some(ColorId::Red));
        grid.fill_row(1, ColorId::Blue, &[]);
        grid.set(0, 2, Some(ColorId::Green));
        grid.fill_row(3, ColorId::Blue, &[]);

        assert_eq!(grid.clear_full_rows(), 2);
        assert!(grid.is_row_empty(0));
        assert!(grid.is_row_empty(1));
        assert_eq!(grid.get(1, 2), Some(Some(ColorId::Red)));
        assert_eq!(grid.get(0, 3), Some(Some(ColorId::Green)));
        assert_eq!(grid.occupied_count(), 2);
    }
}
