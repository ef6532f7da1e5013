use thiserror::Error;

use crate::geometry::Vec3i;

/// Failures surfaced by the core. Blocked moves are not errors; they come
/// back from [`crate::placement`] as a `PlacementError` and are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("expected {expected} cells, got {actual}")]
    InvalidArgument { expected: usize, actual: usize },

    #[error("cell {cell} is outside the supported coordinate range")]
    CoordinateOutOfRange { cell: Vec3i },

    #[error("no valid spawn placement after {attempts} attempts")]
    SpawnDeadlock { attempts: u32 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
