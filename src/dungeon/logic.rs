//! Dungeon navigation and room events.

use super::types::{ActivePath, Dungeon, PathKind, Room};
use crate::character::{Entity, Player, StatusKind};
use crate::core::constants::*;
use crate::items::Item;
use rand::Rng;
use std::fmt;
use thiserror::Error;

/// Events that can occur while moving through the dungeon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DungeonEvent {
    /// Player moved to a room
    EnteredRoom {
        path: ActivePath,
        index: usize,
        description: String,
    },
    TreasurePassageMissed,
    TreasurePassageFound,
    /// The hidden treasure room collapsed on the player
    TreasureDeath,
    TreasureGold {
        amount: u32,
    },
    TreasureItem {
        item: String,
    },
    GoldFound {
        amount: u32,
    },
    TrapSpotted {
        damage: i32,
    },
    TrapDodged,
    TrapDisarmed,
    TrapSprung {
        damage: i32,
        remaining: i32,
    },
    PuzzleSolved {
        gold: u32,
    },
    PuzzleFailed,
    BuffGained {
        kind: StatusKind,
        turns: u32,
    },
    ItemFound {
        item: String,
    },
    EnemyAppears {
        name: String,
    },
    VendorAppears,
    ExitReached,
}

impl fmt::Display for DungeonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DungeonEvent::EnteredRoom {
                path,
                index,
                description,
            } => write!(f, "You enter {} {}: {}", path.label(), index + 1, description),
            DungeonEvent::TreasurePassageMissed => {
                write!(f, "You search for the hidden passage but find only cold stone.")
            }
            DungeonEvent::TreasurePassageFound => {
                write!(f, "You found a secret passage leading to a Hidden Treasure Room!")
            }
            DungeonEvent::TreasureDeath => write!(
                f,
                "You triggered a deadly trap! The ceiling collapses, crushing you instantly."
            ),
            DungeonEvent::TreasureGold { amount } => {
                write!(f, "You find a treasure chest filled with {} gold!", amount)
            }
            DungeonEvent::TreasureItem { item } => write!(f, "You also find a rare item: {}!", item),
            DungeonEvent::GoldFound { amount } => {
                write!(f, "You found {} gold coins in this room!", amount)
            }
            DungeonEvent::TrapSpotted { damage } => write!(
                f,
                "Oh no! This room has a trap! If triggered, it will deal {} damage.",
                damage
            ),
            DungeonEvent::TrapDodged => write!(f, "You successfully dodged the trap!"),
            DungeonEvent::TrapDisarmed => write!(f, "You carefully disarm the trap. Safe!"),
            DungeonEvent::TrapSprung { damage, remaining } => write!(
                f,
                "The trap hits you for {} damage! (Health: {})",
                damage, remaining
            ),
            DungeonEvent::PuzzleSolved { gold } => write!(
                f,
                "Correct! You received {} gold for solving the puzzle!",
                gold
            ),
            DungeonEvent::PuzzleFailed => write!(f, "Wrong answer! The puzzle remains unsolved."),
            DungeonEvent::BuffGained { kind, turns } => write!(
                f,
                "You feel empowered! {} boosted for {} more turns.",
                kind, turns
            ),
            DungeonEvent::ItemFound { item } => write!(f, "You found a {}!", item),
            DungeonEvent::EnemyAppears { name } => write!(f, "A {} appears!", name),
            DungeonEvent::VendorAppears => {
                write!(f, "You encounter a mysterious vendor in this room!")
            }
            DungeonEvent::ExitReached => write!(f, "You have reached the exit of the dungeon!"),
        }
    }
}

/// A path was chosen that was not offered this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the {0} path is not available")]
pub struct PathUnavailable(pub PathKind);

/// Rolls which paths are offered this step. Normal is always offered.
///
/// Every gate is rolled each time so the number of draws does not depend on
/// the shape of the dungeon.
pub fn roll_available_paths(dungeon: &Dungeon, rng: &mut impl Rng) -> Vec<PathKind> {
    let shortcut = rng.gen_bool(SHORTCUT_PATH_CHANCE);
    let mystery = rng.gen_bool(MYSTERY_PATH_CHANCE);
    let treasure = rng.gen_bool(TREASURE_PATH_CHANCE);

    let mut paths = vec![PathKind::Normal];
    if shortcut && !dungeon.shortcut_rooms.is_empty() {
        paths.push(PathKind::Shortcut);
    }
    if mystery && !dungeon.mystery_rooms.is_empty() {
        paths.push(PathKind::Mystery);
    }
    if treasure {
        paths.push(PathKind::HiddenTreasure);
    }
    paths
}

/// Applies the chosen path. Unavailable choices leave all state untouched.
pub fn choose_path(
    dungeon: &mut Dungeon,
    player: &mut Player,
    path: PathKind,
    available: &[PathKind],
    rng: &mut impl Rng,
) -> Result<Vec<DungeonEvent>, PathUnavailable> {
    if !available.contains(&path) {
        return Err(PathUnavailable(path));
    }

    let events = match path {
        PathKind::Normal => move_along(dungeon, ActivePath::Normal),
        PathKind::Shortcut => move_along(dungeon, ActivePath::Shortcut),
        PathKind::Mystery => move_along(dungeon, ActivePath::Mystery),
        PathKind::HiddenTreasure => hidden_treasure_event(player, rng),
    };
    log::debug!(
        "took {} path, now at {:?} {}",
        path,
        dungeon.active,
        dungeon.current_index
    );
    Ok(events)
}

/// Moves the cursor along `target`. Shortcut and mystery always restart at
/// their first room; normal advances, clamped to its end.
fn move_along(dungeon: &mut Dungeon, target: ActivePath) -> Vec<DungeonEvent> {
    let len = dungeon.sequence(target).len();
    if len == 0 {
        return Vec::new();
    }

    dungeon.current_index = if target != ActivePath::Normal {
        0
    } else {
        (dungeon.current_index + 1).min(len - 1)
    };
    dungeon.active = target;

    let description = dungeon
        .current_room()
        .map(|room| room.description.clone())
        .unwrap_or_default();
    vec![DungeonEvent::EnteredRoom {
        path: target,
        index: dungeon.current_index,
        description,
    }]
}

/// The hidden treasure branch. Never moves the cursor.
pub fn hidden_treasure_event(player: &mut Player, rng: &mut impl Rng) -> Vec<DungeonEvent> {
    if !rng.gen_bool(TREASURE_TRIGGER_CHANCE) {
        return vec![DungeonEvent::TreasurePassageMissed];
    }

    let mut events = vec![DungeonEvent::TreasurePassageFound];
    if rng.gen_bool(TREASURE_DEATH_CHANCE) {
        player.set_health(0);
        log::info!("{} died in the hidden treasure room", player.name);
        events.push(DungeonEvent::TreasureDeath);
        return events;
    }

    let amount = rng.gen_range(TREASURE_GOLD_MIN..=TREASURE_GOLD_MAX);
    player.earn_gold(amount);
    events.push(DungeonEvent::TreasureGold { amount });

    if rng.gen_bool(TREASURE_RARE_ITEM_CHANCE) {
        let item = Item::random_rare(rng);
        events.push(DungeonEvent::TreasureItem {
            item: item.name.clone(),
        });
        player.pick_item(item);
    }
    events
}

/// Loose coins lying around a freshly entered room.
pub fn roll_room_gold(player: &mut Player, rng: &mut impl Rng) -> Option<DungeonEvent> {
    if !rng.gen_bool(ROOM_GOLD_CHANCE) {
        return None;
    }
    let amount = rng.gen_range(ROOM_GOLD_MIN..=ROOM_GOLD_MAX);
    player.earn_gold(amount);
    Some(DungeonEvent::GoldFound { amount })
}

/// How the player deals with a trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapChoice {
    Dodge,
    Disarm,
    Accept,
}

impl TrapChoice {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "1" => Some(TrapChoice::Dodge),
            "2" => Some(TrapChoice::Disarm),
            "3" => Some(TrapChoice::Accept),
            _ => None,
        }
    }
}

/// Resolves the room's trap. Whatever happens, the trap is spent afterwards.
pub fn resolve_trap(
    room: &mut Room,
    choice: TrapChoice,
    player: &mut Player,
    rng: &mut impl Rng,
) -> Vec<DungeonEvent> {
    if !room.has_trap {
        return Vec::new();
    }
    room.has_trap = false;

    let escaped = match choice {
        TrapChoice::Dodge => rng.gen_bool(TRAP_DODGE_CHANCE),
        TrapChoice::Disarm => rng.gen_bool(TRAP_DISARM_CHANCE),
        TrapChoice::Accept => false,
    };
    if escaped {
        return vec![match choice {
            TrapChoice::Disarm => DungeonEvent::TrapDisarmed,
            _ => DungeonEvent::TrapDodged,
        }];
    }

    // Traps ignore defense boosts.
    player.take_damage(room.trap_damage);
    vec![DungeonEvent::TrapSprung {
        damage: room.trap_damage,
        remaining: player.displayed_health(),
    }]
}

/// Checks an answer against the room's puzzle and pays out on success.
///
/// A solved puzzle is removed from the room; a wrong answer leaves it.
pub fn attempt_puzzle(
    room: &mut Room,
    answer: &str,
    player: &mut Player,
    rng: &mut impl Rng,
) -> Vec<DungeonEvent> {
    let Some(puzzle) = room.puzzle.as_ref() else {
        return Vec::new();
    };
    if !puzzle.is_solved_by(answer) {
        return vec![DungeonEvent::PuzzleFailed];
    }
    room.puzzle = None;

    let gold = rng.gen_range(PUZZLE_GOLD_MIN..=PUZZLE_GOLD_MAX);
    player.earn_gold(gold);
    let mut events = vec![DungeonEvent::PuzzleSolved { gold }];

    let reward = match room.item.take() {
        Some(item) => Some(item),
        None if rng.gen_bool(PUZZLE_BONUS_ITEM_CHANCE) => Some(Item::random(rng)),
        None => None,
    };
    if let Some(item) = reward {
        events.push(DungeonEvent::ItemFound {
            item: item.name.clone(),
        });
        player.pick_item(item);
    }

    let kind = [
        StatusKind::AttackBoost,
        StatusKind::DefenseBoost,
        StatusKind::LuckBoost,
    ][rng.gen_range(0..3)];
    let turns = rng.gen_range(PUZZLE_BUFF_MIN..=PUZZLE_BUFF_MAX);
    player.status.extend(kind, turns);
    events.push(DungeonEvent::BuffGained { kind, turns });

    events
}

/// Picks up whatever item is still lying in the room.
pub fn take_room_item(room: &mut Room, player: &mut Player) -> Option<DungeonEvent> {
    let item = room.item.take()?;
    let event = DungeonEvent::ItemFound {
        item: item.name.clone(),
    };
    player.pick_item(item);
    Some(event)
}

/// Lines of the dungeon map, marking the player's room.
pub fn dungeon_map(dungeon: &Dungeon) -> Vec<String> {
    let mut lines = Vec::new();
    for path in [ActivePath::Normal, ActivePath::Shortcut, ActivePath::Mystery] {
        for (i, room) in dungeon.sequence(path).iter().enumerate() {
            let here = dungeon.active == path && dungeon.current_index == i;
            lines.push(format!(
                "{} {}: {}{}",
                path.label(),
                i + 1,
                room.description,
                if here { " (You are here)" } else { "" }
            ));
        }
    }
    lines
}
