//! Grid module - the persistent arena
//!
//! The grid is a 12x20 field where each cell is a color id (`0` = empty).
//! Uses a flat row-major vector so clearing and row shifts are plain slice copies.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//!
//! Collision semantics differ from plain bounds checks: the side walls and the
//! floor block, but the space above row 0 does not, so a freshly spawned piece
//! may hang partially above the board.

use crate::pieces::Shape;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, COLOR_COUNT, EMPTY};

/// The arena - fixed-size grid of color ids using flat storage
///
/// Width and height are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid with the default 12x20 dimensions
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create a new empty grid of the given size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be nonzero");
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Build a grid from explicit rows.
    ///
    /// Returns `None` if there are no rows, the rows are ragged, or any value
    /// is not a valid color id.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Option<Self> {
        let width = rows.first()?.as_ref().len();
        if width == 0 {
            return None;
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            if row.len() != width || row.iter().any(|&c| c > COLOR_COUNT) {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or `cell` is not a valid color id
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if cell > COLOR_COUNT {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.cell_at(x, y), Some(c) if c != EMPTY)
    }

    /// Check whether a mino placed at (x, y) would collide.
    ///
    /// Filled cells, the side walls and the floor block. Rows above the top of
    /// the board do not, as long as the column is inside the walls.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if x < 0 || x as usize >= self.width || y >= self.height as i32 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.is_occupied(x, y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Borrow a single row. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Copy the cells of a grid of the same size into this one, reusing the
    /// allocation.
    pub fn copy_from(&mut self, other: &Grid) {
        debug_assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "copy_from requires equal grid dimensions"
        );
        self.cells.copy_from_slice(&other.cells);
    }

    /// Write every nonzero cell of `shape` into the grid with the shape's
    /// origin at (x, y).
    ///
    /// Callers validate the placement first; cells outside the grid are skipped.
    pub fn merge(&mut self, shape: &Shape, x: i32, y: i32) {
        for (dx, dy, cell) in shape.colored_minos() {
            self.set(x + dx, y + dy, cell);
        }
    }

    /// Remove row `y`, shift every row above it down by one and insert an
    /// empty row at the top.
    pub fn remove_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }
        let width = self.width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(EMPTY);
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Scans from the bottom row upward, never touching row 0. After removing a
    /// row the same index is examined again, since the row above has just
    /// shifted into it.
    pub fn sweep(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.height - 1;
        while y > 0 {
            if self.is_row_full(y) {
                self.remove_row(y);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
