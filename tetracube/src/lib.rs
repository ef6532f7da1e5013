pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod logic;
pub mod piece;
pub mod placement;
pub mod scoreboard;
pub mod session;

pub use catalog::{Color, PieceKind};
pub use config::{ConfigStore, GameConfig};
pub use error::{CoreError, Result};
pub use events::{GameEvent, GameOverSummary};
pub use geometry::{Axis, Cells, Vec3i};
pub use grid::{CellState, Grid};
pub use input::{Command, Direction, Key, command_for_key};
pub use logic::TetracubeLogic;
pub use piece::ActivePiece;
pub use placement::{PlacementError, can_rotate, can_translate};
pub use scoreboard::Scoreboard;
pub use session::{Phase, Session, SessionSnapshot};
