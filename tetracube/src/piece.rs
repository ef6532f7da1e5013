use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::PieceKind;
use crate::error::{CoreError, Result};
use crate::geometry::{Axis, Cells, Orientation, Vec3i, translate};
use crate::grid::{CellState, Grid};
use crate::placement::{check_cells, check_rotate, check_translate};

/// The falling piece: its kind and four absolute cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePiece {
    kind: PieceKind,
    cells: Cells,
}

/// Old and new cells of a successful move or rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved {
    pub from: Cells,
    pub to: Cells,
}

impl ActivePiece {
    pub fn new(kind: PieceKind, cells: Cells) -> Self {
        Self { kind, cells }
    }

    /// The kind's canonical shape with its anchor at `origin`.
    pub fn at(kind: PieceKind, origin: Vec3i) -> Self {
        Self::new(kind, translate(&kind.shape(), origin))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Draws a kind, then a position and an orientation that fit the grid.
    ///
    /// The anchor is sampled over the whole `x`/`z` footprint at
    /// `spawn_height`, then an orientation is sampled from the 64 per-axis
    /// quarter-turn combinations. Each stage gives up after `max_attempts`
    /// draws.
    pub fn spawn<R: Rng + ?Sized>(
        grid: &Grid,
        rng: &mut R,
        spawn_height: i32,
        max_attempts: u32,
    ) -> Result<ActivePiece> {
        let kind = PieceKind::random(rng);
        let dims = grid.dimensions();
        let shape = kind.shape();

        let mut positioned = None;
        for _ in 0..max_attempts {
            let origin = Vec3i::new(
                rng.gen_range(0..dims.width),
                spawn_height,
                rng.gen_range(0..dims.depth),
            );
            let cells = translate(&shape, origin);
            if check_cells(grid, &[], &cells).is_ok() {
                positioned = Some(cells);
                break;
            }
        }
        let Some(positioned) = positioned else {
            return Err(CoreError::SpawnDeadlock {
                attempts: max_attempts,
            });
        };

        for _ in 0..max_attempts {
            let orientation = Orientation::new(
                rng.gen_range(0..4),
                rng.gen_range(0..4),
                rng.gen_range(0..4),
            );
            let cells = orientation.apply(&positioned);
            if check_cells(grid, &[], &cells).is_ok() {
                debug!(?kind, ?orientation, anchor = %cells[0], "spawned piece");
                return Ok(ActivePiece::new(kind, cells));
            }
        }
        Err(CoreError::SpawnDeadlock {
            attempts: max_attempts,
        })
    }

    /// Mirrors the piece into the grid as falling cells.
    pub fn place(&self, grid: &mut Grid) {
        grid.set_cells(&self.cells, CellState::Falling);
    }

    /// Removes the piece's mirror from the grid.
    pub fn lift(&self, grid: &mut Grid) {
        grid.set_cells(&self.cells, CellState::Empty);
    }

    pub fn lock(&self, grid: &mut Grid) {
        grid.set_cells(&self.cells, CellState::Locked(self.kind));
    }

    /// True when the lifted piece may be mirrored back at its current cells.
    pub fn fits(&self, grid: &Grid) -> bool {
        check_cells(grid, &[], &self.cells).is_ok()
    }

    /// Any cell resting on the floor layer.
    pub fn reached_bottom(&self) -> bool {
        self.cells.iter().any(|cell| cell.y <= 0)
    }

    /// Validates and applies a translation, updating the grid mirror in two
    /// phases. Returns `None` and leaves everything untouched when blocked.
    pub fn try_translate(&mut self, grid: &mut Grid, delta: Vec3i) -> Option<Moved> {
        let to = check_translate(grid, &self.cells, delta).ok()?;
        Some(self.relocate(grid, to))
    }

    pub fn try_rotate(&mut self, grid: &mut Grid, axis: Axis, quarter_turns: u8) -> Option<Moved> {
        let to = check_rotate(grid, &self.cells, axis, quarter_turns).ok()?;
        Some(self.relocate(grid, to))
    }

    fn relocate(&mut self, grid: &mut Grid, to: Cells) -> Moved {
        let from = self.cells;
        self.lift(grid);
        self.cells = to;
        self.place(grid);
        Moved { from, to }
    }
}
