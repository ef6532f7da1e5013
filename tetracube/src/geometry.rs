//! Integer 3D math for pieces: coordinates, translations and the axis-aligned
//! quarter-turn rotations.
//!
//! Coordinates are expected within `±COORD_LIMIT` on every axis. Rotation
//! works in doubled coordinates, and this bound keeps that arithmetic well
//! inside `i32`. Grid coordinates are always far below it.

use std::{
    fmt,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub const PIECE_CELLS: usize = 4;

/// The four absolute (or local) cells of one piece.
pub type Cells = [Vec3i; PIECE_CELLS];

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Vec3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3i {
    pub const ZERO: Vec3i = Vec3i { x: 0, y: 0, z: 0 };
    pub const DOWN: Vec3i = Vec3i { x: 0, y: -1, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    fn component(self, i: usize) -> i32 {
        match i {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    fn from_components(c: [i32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl Add for Vec3i {
    type Output = Vec3i;

    fn add(self, rhs: Vec3i) -> Self::Output {
        Vec3i::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3i {
    type Output = Vec3i;

    fn sub(self, rhs: Vec3i) -> Self::Output {
        Vec3i::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Vec3i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The in-plane component that a positive quarter turn carries onto the
    /// other in-plane component.
    const fn leading_component(self) -> usize {
        match self {
            Axis::X => 1,
            Axis::Y => 2,
            Axis::Z => 0,
        }
    }
}

/// One of the axis-aligned rotation matrices (identity, or 90°/180°/270°
/// about X, Y or Z). Row-major; applied to column vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationMatrix {
    rows: [[i32; 3]; 3],
}

const IDENTITY_ROWS: [[i32; 3]; 3] = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

// [axis][quarter_turns - 1]
const ROTATION_TABLE: [[[[i32; 3]; 3]; 3]; 3] = [
    [
        [[1, 0, 0], [0, 0, -1], [0, 1, 0]],
        [[1, 0, 0], [0, -1, 0], [0, 0, -1]],
        [[1, 0, 0], [0, 0, 1], [0, -1, 0]],
    ],
    [
        [[0, 0, 1], [0, 1, 0], [-1, 0, 0]],
        [[-1, 0, 0], [0, 1, 0], [0, 0, -1]],
        [[0, 0, -1], [0, 1, 0], [1, 0, 0]],
    ],
    [
        [[0, -1, 0], [1, 0, 0], [0, 0, 1]],
        [[-1, 0, 0], [0, -1, 0], [0, 0, 1]],
        [[0, 1, 0], [-1, 0, 0], [0, 0, 1]],
    ],
];

impl RotationMatrix {
    pub const IDENTITY: RotationMatrix = RotationMatrix {
        rows: IDENTITY_ROWS,
    };

    /// Counter-clockwise (right-handed) rotation by `quarter_turns * 90°`.
    pub fn about(axis: Axis, quarter_turns: u8) -> Self {
        match quarter_turns % 4 {
            0 => Self::IDENTITY,
            turns => Self {
                rows: ROTATION_TABLE[axis.index()][turns as usize - 1],
            },
        }
    }

    pub fn apply(&self, v: Vec3i) -> Vec3i {
        let c = [v.x, v.y, v.z];
        let mut out = [0; 3];
        for (row, slot) in self.rows.iter().zip(out.iter_mut()) {
            *slot = row[0] * c[0] + row[1] * c[1] + row[2] * c[2];
        }
        Vec3i::from_components(out)
    }
}

/// Largest coordinate magnitude the rotation helpers accept.
pub const COORD_LIMIT: i32 = 1 << 24;

/// Shifts every cell by `delta`. Cells and delta must stay within
/// `±COORD_LIMIT`; the sum is not checked.
pub fn translate(cells: &Cells, delta: Vec3i) -> Cells {
    cells.map(|cell| cell + delta)
}

/// Arithmetic mean of the cells.
pub fn centroid(cells: &Cells) -> [f32; 3] {
    let sum = cells
        .iter()
        .fold(Vec3i::ZERO, |acc, &cell| acc + cell);
    let n = PIECE_CELLS as f32;
    [sum.x as f32 / n, sum.y as f32 / n, sum.z as f32 / n]
}

pub fn bounding_box(cells: &Cells) -> (Vec3i, Vec3i) {
    let mut lo = cells[0];
    let mut hi = cells[0];
    for cell in &cells[1..] {
        lo = Vec3i::new(lo.x.min(cell.x), lo.y.min(cell.y), lo.z.min(cell.z));
        hi = Vec3i::new(hi.x.max(cell.x), hi.y.max(cell.y), hi.z.max(cell.z));
    }
    (lo, hi)
}

/// Rotates an arbitrary cell list, rejecting anything that is not exactly one
/// piece or that lies outside `±COORD_LIMIT`.
pub fn rotate_about_center(cells: &[Vec3i], axis: Axis, quarter_turns: u8) -> Result<Cells> {
    let cells: Cells = cells.try_into().map_err(|_| CoreError::InvalidArgument {
        expected: PIECE_CELLS,
        actual: cells.len(),
    })?;
    if let Some(&cell) = cells.iter().find(|cell| !in_coord_range(**cell)) {
        return Err(CoreError::CoordinateOutOfRange { cell });
    }
    Ok(rotate_cells(&cells, axis, quarter_turns))
}

fn in_coord_range(cell: Vec3i) -> bool {
    [cell.x, cell.y, cell.z]
        .iter()
        .all(|v| (-COORD_LIMIT..=COORD_LIMIT).contains(v))
}

/// Rotates the piece about the midpoint of its bounding box and snaps the
/// result back onto the lattice.
///
/// Work happens in doubled coordinates so the midpoint stays integral. When
/// the two in-plane extents differ in parity, every rotated in-plane
/// coordinate lands exactly half a cell off the lattice; the snap goes toward
/// positive when the midpoint's leading in-plane coordinate is half-integral
/// and toward negative otherwise. A 90° turn flips that parity, so two snaps
/// always cancel and four quarter turns reproduce the starting cells.
///
/// Cells must lie within `±COORD_LIMIT`; [`rotate_about_center`] checks this.
pub fn rotate_cells(cells: &Cells, axis: Axis, quarter_turns: u8) -> Cells {
    let turns = quarter_turns % 4;
    if turns == 0 {
        return *cells;
    }

    let matrix = RotationMatrix::about(axis, turns);
    let (lo, hi) = bounding_box(cells);
    let doubled_center = lo + hi;
    let snap = if doubled_center.component(axis.leading_component()) % 2 != 0 {
        1
    } else {
        -1
    };

    cells.map(|cell| {
        let doubled = Vec3i::new(2 * cell.x, 2 * cell.y, 2 * cell.z);
        let rotated = matrix.apply(doubled - doubled_center) + doubled_center;
        let mut out = [0; 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let mut v = rotated.component(i);
            if v % 2 != 0 {
                v += snap;
            }
            *slot = v.div_euclid(2);
        }
        Vec3i::from_components(out)
    })
}

/// Per-axis quarter turns applied X first, then Y, then Z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Orientation {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation { x: 0, y: 0, z: 0 };

    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        Self {
            x: x % 4,
            y: y % 4,
            z: z % 4,
        }
    }

    pub fn apply(self, cells: &Cells) -> Cells {
        let cells = rotate_cells(cells, Axis::X, self.x);
        let cells = rotate_cells(&cells, Axis::Y, self.y);
        rotate_cells(&cells, Axis::Z, self.z)
    }
}
