use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::PieceKind;
use crate::geometry::Vec3i;

pub const GRID_WIDTH: i32 = 10;
pub const GRID_HEIGHT: i32 = 22;
pub const GRID_DEPTH: i32 = 10;
/// Layers at or above this height are spawn buffer and never count as full.
pub const VISIBLE_HEIGHT: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
    pub visible_height: i32,
}

impl Dimensions {
    pub const STANDARD: Dimensions = Dimensions {
        width: GRID_WIDTH,
        height: GRID_HEIGHT,
        depth: GRID_DEPTH,
        visible_height: VISIBLE_HEIGHT,
    };

    pub fn cell_count(&self) -> usize {
        self.layer_len() * self.height as usize
    }

    pub fn layer_len(&self) -> usize {
        (self.width * self.depth) as usize
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    /// Mirror of the active piece; occupied, but not part of the stack.
    Falling,
    Locked(PieceKind),
}

impl CellState {
    pub fn is_occupied(self) -> bool {
        !matches!(self, CellState::Empty)
    }
}

/// The 3D occupancy volume. Layers are stored contiguously, bottom first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![CellState::Empty; dims.cell_count()],
        }
    }

    pub fn standard() -> Self {
        Self::new(Dimensions::STANDARD)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn in_bounds(&self, cell: Vec3i) -> bool {
        (0..self.dims.width).contains(&cell.x)
            && (0..self.dims.height).contains(&cell.y)
            && (0..self.dims.depth).contains(&cell.z)
    }

    fn index(&self, cell: Vec3i) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        let layer = cell.y as usize * self.dims.layer_len();
        Some(layer + (cell.z * self.dims.width + cell.x) as usize)
    }

    fn layer_range(&self, y: i32) -> std::ops::Range<usize> {
        let len = self.dims.layer_len();
        let start = y as usize * len;
        start..start + len
    }

    pub fn get(&self, cell: Vec3i) -> Option<CellState> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Callers must bounds-check first; out-of-bounds cells read as empty.
    pub fn is_occupied(&self, cell: Vec3i) -> bool {
        debug_assert!(self.in_bounds(cell), "occupancy query out of bounds: {cell}");
        self.get(cell).is_some_and(CellState::is_occupied)
    }

    /// Writes `state` into every in-bounds cell and returns how many were
    /// written. Out-of-bounds cells are skipped.
    pub fn set_cells(&mut self, cells: &[Vec3i], state: CellState) -> usize {
        let mut written = 0;
        for &cell in cells {
            match self.index(cell) {
                Some(i) => {
                    self.cells[i] = state;
                    written += 1;
                }
                None => warn!(%cell, "skipping out-of-bounds grid write"),
            }
        }
        written
    }

    pub fn is_layer_full(&self, y: i32) -> bool {
        if !(0..self.dims.height).contains(&y) {
            return false;
        }
        self.cells[self.layer_range(y)]
            .iter()
            .all(|c| matches!(c, CellState::Locked(_)))
    }

    /// Completely locked layers below the visible height, ascending.
    pub fn full_layers(&self) -> Vec<i32> {
        let top = self.dims.visible_height.min(self.dims.height);
        (0..top).filter(|&y| self.is_layer_full(y)).collect()
    }

    /// Empties layer `y` and returns the locked cells that were removed.
    pub fn clear_layer(&mut self, y: i32) -> Vec<Vec3i> {
        if !(0..self.dims.height).contains(&y) {
            warn!(y, "ignoring clear of out-of-bounds layer");
            return Vec::new();
        }

        let mut cleared = Vec::new();
        for z in 0..self.dims.depth {
            for x in 0..self.dims.width {
                let cell = Vec3i::new(x, y, z);
                if let Some(i) = self.index(cell) {
                    if matches!(self.cells[i], CellState::Locked(_)) {
                        cleared.push(cell);
                    }
                    self.cells[i] = CellState::Empty;
                }
            }
        }
        cleared
    }

    /// Moves every layer above `y` down by one, bottom to top, and empties the
    /// top layer. Layer `y` itself is overwritten.
    pub fn compact_above(&mut self, y: i32) {
        if !(0..self.dims.height).contains(&y) {
            warn!(y, "ignoring compaction above out-of-bounds layer");
            return;
        }

        for src in (y + 1)..self.dims.height {
            let from = self.layer_range(src);
            let to = self.layer_range(src - 1).start;
            self.cells.copy_within(from, to);
        }
        let top = self.layer_range(self.dims.height - 1);
        self.cells[top].fill(CellState::Empty);
    }

    pub fn layer_count(&self, y: i32) -> usize {
        if !(0..self.dims.height).contains(&y) {
            return 0;
        }
        self.cells[self.layer_range(y)]
            .iter()
            .filter(|c| c.is_occupied())
            .count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    pub fn locked_cells(&self) -> Vec<(Vec3i, PieceKind)> {
        let mut out = Vec::new();
        for y in 0..self.dims.height {
            for z in 0..self.dims.depth {
                for x in 0..self.dims.width {
                    let cell = Vec3i::new(x, y, z);
                    if let Some(CellState::Locked(kind)) = self.get(cell) {
                        out.push((cell, kind));
                    }
                }
            }
        }
        out
    }

    pub fn falling_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, CellState::Falling))
            .count()
    }
}
