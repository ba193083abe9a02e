//! Dungeon data structures: rooms, the three room sequences and the cursor.

use crate::combat::Enemy;
use crate::core::constants::{DEFAULT_MYSTERY_ROOMS, DEFAULT_NORMAL_ROOMS, DEFAULT_SHORTCUT_ROOMS};
use crate::items::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A riddle guarding a room's reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub question: String,
    /// Canonical answer, always lowercase.
    pub answer: String,
}

impl Puzzle {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into().to_lowercase(),
        }
    }

    /// Compares a player's answer after trimming and lowercasing it.
    pub fn is_solved_by(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.answer
    }
}

/// A single room. Contents are generated once and depleted by play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub description: String,
    pub enemy: Option<Enemy>,
    pub item: Option<Item>,
    pub has_trap: bool,
    pub trap_damage: i32,
    pub puzzle: Option<Puzzle>,
}

impl Room {
    /// An empty room with nothing in it.
    pub fn empty(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            enemy: None,
            item: None,
            has_trap: false,
            trap_damage: 0,
            puzzle: None,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.enemy.is_none() && self.item.is_none() && !self.has_trap && self.puzzle.is_none()
    }
}

/// Generation parameters differ between normal and shortcut rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomClass {
    Normal,
    Shortcut,
}

/// Which of the three room sequences the cursor is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivePath {
    #[default]
    Normal,
    Shortcut,
    Mystery,
}

impl ActivePath {
    pub fn label(&self) -> &'static str {
        match self {
            ActivePath::Normal => "Room",
            ActivePath::Shortcut => "Shortcut Room",
            ActivePath::Mystery => "Mystery Room",
        }
    }
}

/// A path the player may be offered between rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    Normal,
    Shortcut,
    Mystery,
    HiddenTreasure,
}

impl PathKind {
    /// Menu key used for this path.
    pub fn key(&self) -> &'static str {
        match self {
            PathKind::Normal => "1",
            PathKind::Shortcut => "2",
            PathKind::Mystery => "3",
            PathKind::HiddenTreasure => "4",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "1" => Some(PathKind::Normal),
            "2" => Some(PathKind::Shortcut),
            "3" => Some(PathKind::Mystery),
            "4" => Some(PathKind::HiddenTreasure),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PathKind::Normal => "Normal path - A standard dungeon room.",
            PathKind::Shortcut => {
                "Shortcut - A HIGH-RISK, HIGH-REWARD path (more enemies, harder puzzles, better loot)."
            }
            PathKind::Mystery => "Mystery Path - Unknown danger or treasure!",
            PathKind::HiddenTreasure => {
                "Hidden Treasure Path - A rare path that might contain a fortune but has high chances of instant death!"
            }
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathKind::Normal => "Normal",
            PathKind::Shortcut => "Shortcut",
            PathKind::Mystery => "Mystery",
            PathKind::HiddenTreasure => "Hidden Treasure",
        };
        f.write_str(name)
    }
}

/// Room-count configuration for a new dungeon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DungeonConfig {
    pub normal_rooms: usize,
    pub shortcut_rooms: usize,
    pub mystery_rooms: usize,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            normal_rooms: DEFAULT_NORMAL_ROOMS,
            shortcut_rooms: DEFAULT_SHORTCUT_ROOMS,
            mystery_rooms: DEFAULT_MYSTERY_ROOMS,
        }
    }
}

/// Three parallel room sequences plus the player's position.
///
/// `current_index` always indexes a room of the `active` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub rooms: Vec<Room>,
    pub shortcut_rooms: Vec<Room>,
    pub mystery_rooms: Vec<Room>,
    pub current_index: usize,
    #[serde(default)]
    pub active: ActivePath,
}

impl Dungeon {
    pub fn new(rooms: Vec<Room>, shortcut_rooms: Vec<Room>, mystery_rooms: Vec<Room>) -> Self {
        Self {
            rooms,
            shortcut_rooms,
            mystery_rooms,
            current_index: 0,
            active: ActivePath::Normal,
        }
    }

    pub fn sequence(&self, path: ActivePath) -> &[Room] {
        match path {
            ActivePath::Normal => &self.rooms,
            ActivePath::Shortcut => &self.shortcut_rooms,
            ActivePath::Mystery => &self.mystery_rooms,
        }
    }

    pub fn active_sequence(&self) -> &[Room] {
        self.sequence(self.active)
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.active_sequence().get(self.current_index)
    }

    pub fn current_room_mut(&mut self) -> Option<&mut Room> {
        let index = self.current_index;
        let rooms = match self.active {
            ActivePath::Normal => &mut self.rooms,
            ActivePath::Shortcut => &mut self.shortcut_rooms,
            ActivePath::Mystery => &mut self.mystery_rooms,
        };
        rooms.get_mut(index)
    }

    /// The cursor is on the last room of the active sequence.
    pub fn is_exit_reached(&self) -> bool {
        self.current_index + 1 >= self.active_sequence().len()
    }

    /// Whether the cursor points at a real room. A loaded save may not.
    pub fn is_consistent(&self) -> bool {
        self.current_room().is_some()
    }
}
