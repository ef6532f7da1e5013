//! Read-only checks answering "may this piece occupy these cells".
//!
//! A piece's own current cells never block it, so identity moves are always
//! valid even though the grid mirrors the falling piece.

use thiserror::Error;

use crate::geometry::{Axis, Cells, Vec3i, rotate_cells, translate};
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell {0} lies outside the grid")]
    OutOfBounds(Vec3i),

    #[error("cell {0} is already occupied")]
    Collision(Vec3i),
}

/// Validates `candidate` as the next position of the piece currently at
/// `current`. Pass an empty `current` for a piece not yet on the grid.
pub fn check_cells(
    grid: &Grid,
    current: &[Vec3i],
    candidate: &Cells,
) -> Result<(), PlacementError> {
    for &cell in candidate {
        if !grid.in_bounds(cell) {
            return Err(PlacementError::OutOfBounds(cell));
        }
        if grid.is_occupied(cell) && !current.contains(&cell) {
            return Err(PlacementError::Collision(cell));
        }
    }
    Ok(())
}

pub fn check_translate(grid: &Grid, cells: &Cells, delta: Vec3i) -> Result<Cells, PlacementError> {
    let moved = translate(cells, delta);
    check_cells(grid, cells, &moved)?;
    Ok(moved)
}

pub fn check_rotate(
    grid: &Grid,
    cells: &Cells,
    axis: Axis,
    quarter_turns: u8,
) -> Result<Cells, PlacementError> {
    let rotated = rotate_cells(cells, axis, quarter_turns);
    check_cells(grid, cells, &rotated)?;
    Ok(rotated)
}

pub fn can_translate(grid: &Grid, cells: &Cells, delta: Vec3i) -> bool {
    check_translate(grid, cells, delta).is_ok()
}

pub fn can_rotate(grid: &Grid, cells: &Cells, axis: Axis, quarter_turns: u8) -> bool {
    check_rotate(grid, cells, axis, quarter_turns).is_ok()
}
