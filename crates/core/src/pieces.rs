//! Pieces module - the piece catalog, matrix rotation and wall kicks
//!
//! Every piece is a small square matrix of cells. The catalog holds the
//! uncolored occupancy matrices; [`instantiate`] hands out an independent copy
//! that the caller colors and rotates freely.
//!
//! Rotation is the classic transpose-then-flip: transpose, then reverse each
//! row for clockwise or reverse the row order for counter-clockwise. Because
//! the I piece lives in a 4x4 matrix and O in a 2x2 one, every catalog shape is
//! square and rotation never changes the matrix size.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Cell, PieceKind, RotateDir, EMPTY};

/// Largest matrix side in the catalog (the I piece)
pub const MAX_SIDE: usize = 4;

/// Occupied cells of a shape as (dx, dy) offsets from the matrix origin
pub type Minos = ArrayVec<(i32, i32), { MAX_SIDE * MAX_SIDE }>;

/// A square piece matrix, stored inline so every copy is independent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: [[Cell; MAX_SIDE]; MAX_SIDE],
    side: usize,
}

const T_SHAPE: Shape = Shape {
    cells: [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    side: 3,
};

const I_SHAPE: Shape = Shape {
    cells: [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
    side: 4,
};

const S_SHAPE: Shape = Shape {
    cells: [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    side: 3,
};

const Z_SHAPE: Shape = Shape {
    cells: [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    side: 3,
};

const L_SHAPE: Shape = Shape {
    cells: [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    side: 3,
};

const J_SHAPE: Shape = Shape {
    cells: [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    side: 3,
};

const O_SHAPE: Shape = Shape {
    cells: [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    side: 2,
};

/// Get a fresh, uncolored copy of the catalog matrix for a piece kind
pub fn instantiate(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

impl Shape {
    /// Build a shape from square rows.
    ///
    /// Returns `None` unless `rows` is square with a side between 1 and
    /// [`MAX_SIDE`].
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Option<Self> {
        let side = rows.len();
        if side == 0 || side > MAX_SIDE {
            return None;
        }
        let mut cells = [[EMPTY; MAX_SIDE]; MAX_SIDE];
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != side {
                return None;
            }
            cells[y][..side].copy_from_slice(row);
        }
        Some(Self { cells, side })
    }

    /// Side length of the square matrix
    pub fn side(&self) -> usize {
        self.side
    }

    /// Cell at matrix position (x, y), `None` outside the matrix
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.side || y >= self.side {
            return None;
        }
        Some(self.cells[y][x])
    }

    /// Iterate matrix rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.side].iter().map(move |row| &row[..self.side])
    }

    /// Color id of the piece (the first nonzero cell), or `EMPTY` for a blank matrix
    pub fn color(&self) -> Cell {
        self.rows()
            .flat_map(|row| row.iter().copied())
            .find(|&c| c != EMPTY)
            .unwrap_or(EMPTY)
    }

    /// Return a copy with every occupied cell set to `color`
    pub fn colored(mut self, color: Cell) -> Self {
        let side = self.side;
        for row in &mut self.cells[..side] {
            for cell in &mut row[..side] {
                if *cell != EMPTY {
                    *cell = color;
                }
            }
        }
        self
    }

    /// Offsets of all occupied cells
    pub fn minos(&self) -> Minos {
        self.colored_minos().map(|(dx, dy, _)| (dx, dy)).collect()
    }

    /// Offsets and color ids of all occupied cells
    pub fn colored_minos(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &c)| c != EMPTY)
                .map(move |(x, &c)| (x as i32, y as i32, c))
        })
    }

    /// Rotate the matrix 90° in place.
    pub fn rotate(&mut self, dir: RotateDir) {
        let n = self.side;
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[x][y];
                self.cells[x][y] = self.cells[y][x];
                self.cells[y][x] = tmp;
            }
        }
        match dir {
            RotateDir::Clockwise => {
                for row in &mut self.cells[..n] {
                    row[..n].reverse();
                }
            }
            RotateDir::CounterClockwise => self.cells[..n].reverse(),
        }
    }
}

/// An active or queued piece instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Cell,
    pub shape: Shape,
}

impl Piece {
    /// Instantiate `kind` from the catalog, colored with `color`
    pub fn new(kind: PieceKind, color: Cell) -> Self {
        Self {
            kind,
            color,
            shape: instantiate(kind).colored(color),
        }
    }
}

/// Check whether `shape` placed with its origin at (x, y) overlaps a filled
/// cell, a side wall or the floor.
pub fn collides(grid: &Grid, shape: &Shape, x: i32, y: i32) -> bool {
    shape
        .colored_minos()
        .any(|(dx, dy, _)| grid.is_blocked(x + dx, y + dy))
}

/// Horizontal displacements tried after a rotation, in order:
/// `0, +1, -1, +2, -2, ..., +side, -side`.
pub fn kick_offsets(side: usize) -> impl Iterator<Item = i32> {
    let n = side as i32;
    std::iter::once(0).chain((1..=n).flat_map(|d| [d, -d]))
}

/// Try to rotate a shape with wall kicks
/// Returns Some(rotated_shape, new_x) for the first non-colliding kick, None if all kicks fail
pub fn try_rotate(
    grid: &Grid,
    shape: &Shape,
    x: i32,
    y: i32,
    dir: RotateDir,
) -> Option<(Shape, i32)> {
    let mut rotated = *shape;
    rotated.rotate(dir);

    kick_offsets(rotated.side())
        .map(|dx| x + dx)
        .find(|&kx| !collides(grid, &rotated, kx, y))
        .map(|kx| (rotated, kx))
}
