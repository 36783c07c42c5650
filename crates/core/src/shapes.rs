//! Shape catalog - the seven tetromino templates and the color list
//!
//! Shapes are small rectangular boolean matrices (at most 4x4) packed into a
//! `u16`, row-major. Rotations are derived on demand, never stored.

use std::fmt;

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::ColorId;

/// Offset of a single occupied sub-cell relative to the shape origin, `(x, y)`
pub type CellOffset = (i8, i8);

/// Occupied offsets of a shape (a 4x4 matrix has at most 16).
pub type ShapeCells = ArrayVec<CellOffset, 16>;

/// An immutable rectangular 0/1 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    width: u8,
    height: u8,
    /// Bit `y * width + x` is set when sub-cell (x, y) is occupied.
    bits: u16,
}

impl Shape {
    /// Largest supported side length.
    pub const MAX_SIDE: u8 = 4;

    /// Build a shape from literal rows, e.g. `[[0, 1, 0], [1, 1, 1]]`.
    pub const fn from_rows<const H: usize, const W: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(H >= 1 && H <= Self::MAX_SIDE as usize);
        assert!(W >= 1 && W <= Self::MAX_SIDE as usize);

        let mut bits = 0u16;
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                if rows[y][x] != 0 {
                    bits |= 1u16 << ((y * W + x) as u32);
                }
                x += 1;
            }
            y += 1;
        }

        Self {
            width: W as u8,
            height: H as u8,
            bits,
        }
    }

    /// Number of columns in the matrix
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of rows in the matrix
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether sub-cell (x, y) is occupied. Out-of-matrix coordinates are empty.
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits & (1 << (y * self.width + x)) != 0
    }

    /// Occupied sub-cells in row-major order.
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_filled(x, y) {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    pub fn cell_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Rotate 90° clockwise.
    ///
    /// This is the transpose of the row-reversed matrix: new row `i` is old
    /// column `i` read bottom to top, so `new[i][j] = old[h - 1 - j][i]`.
    /// Width and height swap.
    pub fn rotated_cw(&self) -> Shape {
        let new_w = self.height;
        let new_h = self.width;
        let mut bits = 0u16;
        for i in 0..new_h {
            for j in 0..new_w {
                if self.is_filled(i, self.height - 1 - j) {
                    bits |= 1 << (i * new_w + j);
                }
            }
        }
        Shape {
            width: new_w,
            height: new_h,
            bits,
        }
    }

    /// Smallest `n >= 1` with `n` clockwise rotations returning this shape.
    pub fn rotation_period(&self) -> u8 {
        let mut s = self.rotated_cw();
        let mut n = 1;
        while s != *self {
            s = s.rotated_cw();
            n += 1;
        }
        n
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", if self.is_filled(x, y) { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The seven catalog entries, named after the letters they resemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Spawn orientation of this kind.
    pub fn template(&self) -> Shape {
        SHAPES[*self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }
}

/// Spawn orientations, indexed by `ShapeKind as usize`.
pub const SHAPES: [Shape; 7] = [
    Shape::from_rows([[1, 1, 1, 1]]),
    Shape::from_rows([[1, 1], [1, 1]]),
    Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
    Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
    Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
    Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
    Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
];

/// Colors a new piece may take.
pub const COLORS: [ColorId; 7] = ColorId::ALL;

/// Draw a shape and, independently, a color.
pub fn random_shape_and_color(rng: &mut SimpleRng) -> (ShapeKind, ColorId) {
    let kind = *rng.choose(&ShapeKind::ALL);
    let color = *rng.choose(&COLORS);
    (kind, color)
}
