use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Vec3i};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    pub const fn delta(self) -> Vec3i {
        match self {
            Direction::West => Vec3i::new(-1, 0, 0),
            Direction::East => Vec3i::new(1, 0, 0),
            Direction::North => Vec3i::new(0, 0, -1),
            Direction::South => Vec3i::new(0, 0, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    /// Quarter turn; clockwise when looking along the positive axis.
    Rotate { axis: Axis, clockwise: bool },
    /// Lock the falling piece where it is and bring in the next one.
    SpawnNow,
    SpeedUp,
    EndGame,
}

impl Command {
    pub fn rotate(axis: Axis) -> Self {
        Command::Rotate {
            axis,
            clockwise: true,
        }
    }
}

/// The keys the shell forwards to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    G,
    Shift,
    Escape,
}

impl Key {
    /// Parses a key name case-insensitively ("w", "Shift", "escape", "esc").
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name.to_ascii_lowercase().as_str() {
            "w" => Key::W,
            "a" => Key::A,
            "s" => Key::S,
            "d" => Key::D,
            "q" => Key::Q,
            "e" => Key::E,
            "r" => Key::R,
            "g" => Key::G,
            "shift" => Key::Shift,
            "escape" | "esc" => Key::Escape,
            _ => return None,
        };
        Some(key)
    }
}

pub fn command_for_key(key: Key) -> Command {
    match key {
        Key::W => Command::Move(Direction::North),
        Key::S => Command::Move(Direction::South),
        Key::A => Command::Move(Direction::East),
        Key::D => Command::Move(Direction::West),
        Key::Q => Command::rotate(Axis::X),
        Key::E => Command::rotate(Axis::Y),
        Key::R => Command::rotate(Axis::Z),
        Key::G => Command::SpawnNow,
        Key::Shift => Command::SpeedUp,
        Key::Escape => Command::EndGame,
    }
}

/// Maps a key name straight to its command; unknown keys do nothing.
pub fn command_for_key_name(name: &str) -> Option<Command> {
    Key::from_name(name).map(command_for_key)
}
