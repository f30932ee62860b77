use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the playfield, addressed by column and row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Fixed playfield dimensions
///
/// The field is measured in pixels and divided into square cells of
/// `cell_size` pixels. Game logic works in cells; pixel coordinates are only
/// used at the edges (initial layout, rendering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Playfield width in pixels
    pub width_px: i32,
    /// Playfield height in pixels
    pub height_px: i32,
    /// Side of one cell in pixels
    pub cell_size: i32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            width_px: 800,
            height_px: 600,
            cell_size: 20,
        }
    }
}

impl GridGeometry {
    pub fn new(width_px: i32, height_px: i32, cell_size: i32) -> Self {
        Self {
            width_px,
            height_px,
            cell_size,
        }
    }

    /// Number of columns
    pub fn columns(&self) -> i32 {
        self.width_px / self.cell_size
    }

    /// Number of rows
    pub fn rows(&self) -> i32 {
        self.height_px / self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        (self.columns().max(0) * self.rows().max(0)) as usize
    }

    /// Top-left pixel of a cell
    pub fn to_pixels(&self, cell: Cell) -> (i32, i32) {
        (cell.x * self.cell_size, cell.y * self.cell_size)
    }

    /// Cell containing a pixel
    pub fn from_pixels(&self, px: i32, py: i32) -> Cell {
        Cell::new(px.div_euclid(self.cell_size), py.div_euclid(self.cell_size))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.columns() && cell.y >= 0 && cell.y < self.rows()
    }

    /// Wrap an out-of-bounds cell to the opposite edge, axis by axis
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.rem_euclid(self.columns()), cell.y.rem_euclid(self.rows()))
    }

    pub fn is_border(&self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.x == 0
                || cell.y == 0
                || cell.x == self.columns() - 1
                || cell.y == self.rows() - 1)
    }

    /// Every cell of the grid, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |y| (0..self.columns()).map(move |x| Cell::new(x, y)))
    }

    /// The outermost ring of cells
    pub fn border_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |cell| self.is_border(*cell))
    }
}
