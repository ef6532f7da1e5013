use serde::{Deserialize, Serialize};

use crate::catalog::{Color, PieceKind};
use crate::geometry::{Cells, Vec3i};

/// Final numbers handed to the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub final_score: u64,
    pub max_score: u64,
    /// True only when `final_score` beat the previous best.
    pub new_max: bool,
}

/// One-way notifications for the renderer and score display, drained from
/// the session after each frame. Emitted in the order the changes happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PieceSpawned { kind: PieceKind, cells: Cells },
    PieceMoved { from: Cells, to: Cells },
    CellsLocked {
        kind: PieceKind,
        color: Color,
        cells: Cells,
    },
    /// The locked cells that were removed; their visuals can be dropped.
    LayerCleared { y: i32, cells: Vec<Vec3i> },
    /// Every layer above `above` moved down by one.
    LayersCompacted { above: i32 },
    ScoreChanged { score: u64 },
    LayersCleared { count: u32, points: u64 },
    GameOver(GameOverSummary),
}

impl GameEvent {
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameEvent::GameOver(_))
    }
}
