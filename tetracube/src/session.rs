//! One game from first spawn to game over: the frame-driven tick, layer
//! clearing, scoring and the event outbox.

use engine::FrameCadence;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::PieceKind;
use crate::config::GameConfig;
use crate::events::{GameEvent, GameOverSummary};
use crate::geometry::{Axis, Vec3i, centroid};
use crate::grid::{CellState, Dimensions, Grid};
use crate::input::Command;
use crate::piece::{ActivePiece, Moved};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Falling,
    GameOver,
}

/// A locked cell as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedCell {
    pub cell: Vec3i,
    pub kind: PieceKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub dimensions: Dimensions,
    pub phase: Phase,
    pub frame: u64,
    pub score: u64,
    pub max_score: u64,
    pub layers_cleared: u32,
    pub pieces_spawned: u32,
    pub active_piece: Option<ActivePiece>,
    /// Rotation gizmo anchor for the renderer.
    pub active_centroid: Option<[f32; 3]>,
    pub locked: Vec<LockedCell>,
}

#[derive(Debug, Clone)]
pub struct Session<R: RngCore = ChaCha8Rng> {
    config: GameConfig,
    grid: Grid,
    active: Option<ActivePiece>,
    phase: Phase,
    cadence: FrameCadence,
    frame: u64,
    score: u64,
    max_score: u64,
    layers_cleared: u32,
    pieces_spawned: u32,
    events: Vec<GameEvent>,
    rng: R,
}

impl Session<ChaCha8Rng> {
    pub fn seeded(config: GameConfig, seed: u64, max_score: u64) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed), max_score)
    }
}

impl<R: RngCore> Session<R> {
    /// Starts a game and spawns its first piece. `max_score` is the best
    /// score of earlier sessions.
    pub fn new(config: GameConfig, rng: R, max_score: u64) -> Self {
        let config = config.sanitized();
        let mut session = Self {
            grid: Grid::new(config.dimensions()),
            cadence: FrameCadence::new(config.tick_interval_frames),
            config,
            active: None,
            phase: Phase::Falling,
            frame: 0,
            score: 0,
            max_score,
            layers_cleared: 0,
            pieces_spawned: 0,
            events: Vec::new(),
            rng,
        };
        session.spawn_next();
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn max_score(&self) -> u64 {
        self.max_score
    }

    pub fn layers_cleared(&self) -> u32 {
        self.layers_cleared
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Events queued since the last [`Session::take_events`]. The queue is
    /// unbounded.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            dimensions: self.grid.dimensions(),
            phase: self.phase,
            frame: self.frame,
            score: self.score,
            max_score: self.max_score,
            layers_cleared: self.layers_cleared,
            pieces_spawned: self.pieces_spawned,
            active_piece: self.active,
            active_centroid: self.active.map(|piece| centroid(piece.cells())),
            locked: self
                .grid
                .locked_cells()
                .into_iter()
                .map(|(cell, kind)| LockedCell { cell, kind })
                .collect(),
        }
    }

    /// Advances one frame. Returns true when a gravity tick ran.
    ///
    /// Events accumulate until [`Session::take_events`] is called; drivers
    /// are expected to drain them once per frame.
    pub fn update(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.frame += 1;
        if !self.cadence.on_frame() {
            return false;
        }
        self.tick();
        true
    }

    /// One gravity tick: clear pass, bottom check, then fall or lock.
    pub fn tick(&mut self) {
        if self.is_game_over() {
            return;
        }

        self.clear_pass();
        let Some(piece) = self.active else {
            return;
        };
        // The replacement piece still takes this tick's fall.
        if piece.reached_bottom() {
            self.lock_and_spawn();
            if self.is_game_over() {
                return;
            }
        }
        self.fall();
    }

    /// Applies a player command immediately. Returns false when it was
    /// rejected (blocked move, no piece, or the game is over).
    pub fn apply(&mut self, command: Command) -> bool {
        if self.is_game_over() {
            return false;
        }
        match command {
            Command::Move(direction) => self.try_move(direction.delta()),
            Command::Rotate { axis, clockwise } => {
                self.try_rotate(axis, if clockwise { 1 } else { 3 })
            }
            Command::SpawnNow => {
                if self.active.is_none() {
                    return false;
                }
                self.lock_and_spawn();
                true
            }
            Command::SpeedUp => {
                self.cadence.advance(self.config.speed_up_frames);
                true
            }
            Command::EndGame => {
                self.finish();
                true
            }
        }
    }

    pub fn try_move(&mut self, delta: Vec3i) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        let moved = piece.try_translate(&mut self.grid, delta);
        self.commit_move(piece, moved)
    }

    pub fn try_rotate(&mut self, axis: Axis, quarter_turns: u8) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        let moved = piece.try_rotate(&mut self.grid, axis, quarter_turns);
        self.commit_move(piece, moved)
    }

    fn commit_move(&mut self, piece: ActivePiece, moved: Option<Moved>) -> bool {
        let Some(Moved { from, to }) = moved else {
            return false;
        };
        self.active = Some(piece);
        self.events.push(GameEvent::PieceMoved { from, to });
        true
    }

    fn fall(&mut self) {
        if self.try_move(Vec3i::DOWN) {
            self.award(self.config.fall_points);
        } else {
            self.lock_and_spawn();
        }
    }

    fn lock_and_spawn(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        piece.lock(&mut self.grid);
        debug!(kind = ?piece.kind(), "locked piece");
        self.events.push(GameEvent::CellsLocked {
            kind: piece.kind(),
            color: piece.kind().color(),
            cells: *piece.cells(),
        });
        self.clear_pass();
        self.spawn_next();
    }

    /// Clears full layers lowest first until none remain. The falling piece
    /// is lifted out for the pass and put back afterwards.
    fn clear_pass(&mut self) -> u32 {
        let lifted = self.active;
        if let Some(piece) = lifted {
            piece.lift(&mut self.grid);
        }

        let mut count = 0;
        while let Some(&y) = self.grid.full_layers().first() {
            let cells = self.grid.clear_layer(y);
            self.events.push(GameEvent::LayerCleared { y, cells });
            self.grid.compact_above(y);
            self.events.push(GameEvent::LayersCompacted { above: y });
            count += 1;
        }

        if count > 0 {
            let points = self.config.layer_clear_points * u64::from(count);
            self.layers_cleared += count;
            debug!(count, points, "cleared layers");
            self.events.push(GameEvent::LayersCleared { count, points });
            self.award(points);
        }

        if let Some(piece) = lifted {
            if piece.fits(&self.grid) {
                piece.place(&mut self.grid);
            } else {
                warn!(kind = ?piece.kind(), "falling piece buried by compaction, respawning");
                self.active = None;
                self.spawn_next();
            }
        }
        count
    }

    fn spawn_next(&mut self) {
        let spawned = ActivePiece::spawn(
            &self.grid,
            &mut self.rng,
            self.config.spawn_height,
            self.config.max_spawn_attempts,
        );
        match spawned {
            Ok(piece) => {
                piece.place(&mut self.grid);
                self.active = Some(piece);
                self.pieces_spawned += 1;
                self.events.push(GameEvent::PieceSpawned {
                    kind: piece.kind(),
                    cells: *piece.cells(),
                });
            }
            Err(err) => {
                warn!(%err, "no room for the next piece");
                self.finish();
            }
        }
    }

    fn award(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged { score: self.score });
    }

    fn finish(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.phase = Phase::GameOver;
        let new_max = self.score > self.max_score;
        if new_max {
            self.max_score = self.score;
        }
        let summary = GameOverSummary {
            final_score: self.score,
            max_score: self.max_score,
            new_max,
        };
        info!(
            score = summary.final_score,
            max_score = summary.max_score,
            new_max,
            "game over"
        );
        self.events.push(GameEvent::GameOver(summary));
    }

    /// Replaces the falling piece, keeping the grid mirror consistent.
    pub fn set_active_piece_for_test(&mut self, piece: ActivePiece) {
        if let Some(old) = self.active.take() {
            old.lift(&mut self.grid);
        }
        piece.place(&mut self.grid);
        self.active = Some(piece);
    }

    /// Writes locked cells straight into the grid, bypassing placement.
    pub fn set_locked_cells_for_test(&mut self, cells: &[Vec3i], kind: PieceKind) {
        self.grid.set_cells(cells, CellState::Locked(kind));
    }
}
