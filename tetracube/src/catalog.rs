use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::{Cells, Vec3i};

/// Display color, each channel in `0.0..=1.0`. The core never draws with it;
/// it rides along on lock events for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    LJ,
    T,
    SZ,
    O,
    Tower1,
    Tower2,
    Tower3,
}

const fn v(x: i32, y: i32, z: i32) -> Vec3i {
    Vec3i::new(x, y, z)
}

impl PieceKind {
    pub const ALL: [PieceKind; 8] = [
        PieceKind::I,
        PieceKind::LJ,
        PieceKind::T,
        PieceKind::SZ,
        PieceKind::O,
        PieceKind::Tower1,
        PieceKind::Tower2,
        PieceKind::Tower3,
    ];

    /// Local-space offsets, anchored so each axis starts at zero.
    pub const fn shape(self) -> Cells {
        match self {
            PieceKind::I => [v(0, 0, 0), v(1, 0, 0), v(2, 0, 0), v(3, 0, 0)],
            PieceKind::LJ => [v(0, 0, 0), v(1, 0, 0), v(2, 0, 0), v(2, 1, 0)],
            PieceKind::T => [v(0, 0, 0), v(1, 0, 0), v(2, 0, 0), v(1, 1, 0)],
            PieceKind::SZ => [v(1, 0, 0), v(2, 0, 0), v(0, 1, 0), v(1, 1, 0)],
            PieceKind::O => [v(0, 0, 0), v(1, 0, 0), v(0, 1, 0), v(1, 1, 0)],
            // Chiral pair and the branch (tripod) tetracube.
            PieceKind::Tower1 => [v(0, 0, 0), v(1, 0, 0), v(1, 0, 1), v(1, 1, 0)],
            PieceKind::Tower2 => [v(0, 0, 0), v(1, 0, 0), v(0, 0, 1), v(1, 1, 0)],
            PieceKind::Tower3 => [v(0, 0, 0), v(1, 0, 0), v(1, 0, 1), v(0, 1, 0)],
        }
    }

    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => Color::rgb(0.0, 0.0, 0.5),
            PieceKind::LJ => Color::rgb(0.5, 0.0, 0.0),
            PieceKind::T => Color::rgb(0.7, 0.5, 0.5),
            PieceKind::SZ => Color::rgb(0.0, 0.5, 0.0),
            PieceKind::O => Color::rgb(0.6, 0.6, 0.0),
            PieceKind::Tower1 => Color::rgb(0.6, 0.3, 0.0),
            PieceKind::Tower2 => Color::rgb(0.5, 0.5, 0.5),
            PieceKind::Tower3 => Color::rgb(0.25, 0.25, 0.25),
        }
    }

    /// Stable non-zero id used in board snapshots (0 means empty).
    pub const fn cell_id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::LJ => 2,
            PieceKind::T => 3,
            PieceKind::SZ => 4,
            PieceKind::O => 5,
            PieceKind::Tower1 => 6,
            PieceKind::Tower2 => 7,
            PieceKind::Tower3 => 8,
        }
    }

    pub fn from_cell_id(id: u8) -> Option<PieceKind> {
        Self::ALL.into_iter().find(|kind| kind.cell_id() == id)
    }

    /// Uniform draw over all eight kinds.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> PieceKind {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}
