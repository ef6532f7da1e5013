use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::grid::{Dimensions, GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH, VISIBLE_HEIGHT};

pub const SPAWN_HEIGHT: i32 = 19;
pub const TICK_INTERVAL_FRAMES: u32 = 60;
pub const SPEED_UP_FRAMES: u32 = 10;
pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;
pub const FALL_POINTS: u64 = 1;
pub const LAYER_CLEAR_POINTS: u64 = 3000;

// A straight piece must fit across the board in any orientation.
const MIN_EXTENT: i32 = 4;
const MAX_EXTENT: i32 = 64;

/// Tunables for one game session. Every field falls back to the classic
/// 10×22×10 rules when missing from the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
    pub visible_height: i32,
    pub spawn_height: i32,
    pub tick_interval_frames: u32,
    pub speed_up_frames: u32,
    pub max_spawn_attempts: u32,
    pub fall_points: u64,
    pub layer_clear_points: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            depth: GRID_DEPTH,
            visible_height: VISIBLE_HEIGHT,
            spawn_height: SPAWN_HEIGHT,
            tick_interval_frames: TICK_INTERVAL_FRAMES,
            speed_up_frames: SPEED_UP_FRAMES,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            fall_points: FALL_POINTS,
            layer_clear_points: LAYER_CLEAR_POINTS,
        }
    }
}

impl GameConfig {
    pub fn sanitized(mut self) -> Self {
        self.width = self.width.clamp(MIN_EXTENT, MAX_EXTENT);
        self.depth = self.depth.clamp(MIN_EXTENT, MAX_EXTENT);
        self.height = self.height.clamp(MIN_EXTENT, MAX_EXTENT * 2);
        self.visible_height = self.visible_height.clamp(1, self.height);
        self.spawn_height = self.spawn_height.clamp(0, self.height - 1);
        self.tick_interval_frames = self.tick_interval_frames.max(1);
        self.max_spawn_attempts = self.max_spawn_attempts.max(1);
        self
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
            depth: self.depth,
            visible_height: self.visible_height,
        }
    }
}

/// Locates and reads the optional `config.json`. Nothing is ever written back.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("TETRACUBE_CONFIG_PATH") {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("tetracube");
        path.push("config.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> GameConfig {
        let Ok(bytes) = fs::read(&self.path) else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return GameConfig::default();
        };
        match serde_json::from_slice::<GameConfig>(&bytes) {
            Ok(config) => config.sanitized(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "invalid config file, using defaults");
                GameConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("tetracube-config-{}-{name}.json", std::process::id()));
        p
    }

    #[test]
    fn defaults_match_the_classic_board() {
        let config = GameConfig::default();
        assert_eq!(config.dimensions(), Dimensions::STANDARD);
        assert_eq!(config.spawn_height, 19);
        assert_eq!(config.tick_interval_frames, 60);
        assert_eq!(config.speed_up_frames, 10);
        assert_eq!(config.layer_clear_points, 3000);
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let parsed: GameConfig = serde_json::from_str(r#"{"tick_interval_frames":30}"#)
            .expect("config JSON should parse");
        assert_eq!(parsed.tick_interval_frames, 30);
        assert_eq!(parsed.width, GRID_WIDTH);
        assert_eq!(parsed.max_spawn_attempts, MAX_SPAWN_ATTEMPTS);
    }

    #[test]
    fn sanitized_clamps_expected_fields() {
        let config = GameConfig {
            width: 1,
            depth: 500,
            height: 6,
            visible_height: 40,
            spawn_height: 12,
            tick_interval_frames: 0,
            max_spawn_attempts: 0,
            ..GameConfig::default()
        }
        .sanitized();

        assert_eq!(config.width, MIN_EXTENT);
        assert_eq!(config.depth, MAX_EXTENT);
        assert_eq!(config.visible_height, 6);
        assert_eq!(config.spawn_height, 5);
        assert_eq!(config.tick_interval_frames, 1);
        assert_eq!(config.max_spawn_attempts, 1);
    }

    #[test]
    fn load_falls_back_on_missing_or_invalid_files() {
        let missing = ConfigStore::new(scratch_path("missing"));
        assert_eq!(missing.load(), GameConfig::default());

        let path = scratch_path("invalid");
        fs::write(&path, b"{ not json").expect("write scratch config");
        assert_eq!(ConfigStore::new(&path).load(), GameConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_reads_and_sanitizes_a_valid_file() {
        let path = scratch_path("valid");
        fs::write(&path, br#"{"speed_up_frames":5,"tick_interval_frames":0}"#)
            .expect("write scratch config");
        let config = ConfigStore::new(&path).load();
        let _ = fs::remove_file(&path);

        assert_eq!(config.speed_up_frames, 5);
        assert_eq!(config.tick_interval_frames, 1);
    }
}
