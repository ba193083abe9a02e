//! Procedural room and dungeon generation.

use super::types::{Dungeon, DungeonConfig, Puzzle, Room, RoomClass};
use crate::combat::Enemy;
use crate::core::constants::{
    ROOM_ENEMY_CHANCE, ROOM_ITEM_CHANCE, ROOM_PUZZLE_CHANCE, ROOM_TRAP_CHANCE, TRAP_DAMAGE_MAX,
    TRAP_DAMAGE_MIN,
};
use crate::items::Item;
use rand::seq::SliceRandom;
use rand::Rng;

pub const ROOM_DESCRIPTIONS: [&str; 5] = [
    "A dark chamber with glowing runes on the walls.",
    "A damp corridor with strange whispers in the air.",
    "A hall filled with ancient statues staring at you.",
    "A treasure vault illuminated by golden light.",
    "A narrow tunnel with bones scattered on the floor.",
];

/// (question, answer)
pub const RIDDLES: [(&str, &str); 5] = [
    (
        "I speak without a mouth and hear without ears. What am I?",
        "echo",
    ),
    (
        "The more of me you take, the more you leave behind. What am I?",
        "footsteps",
    ),
    ("What has to be broken before you can use it?", "egg"),
    ("I have keys but open no locks. What am I?", "piano"),
    (
        "The more you remove from me, the bigger I get. What am I?",
        "hole",
    ),
];

/// Picks a probability from a `(normal, shortcut)` pair.
fn chance(pair: (f64, f64), class: RoomClass) -> f64 {
    match class {
        RoomClass::Normal => pair.0,
        RoomClass::Shortcut => pair.1,
    }
}

pub fn random_puzzle(rng: &mut impl Rng) -> Puzzle {
    let (question, answer) = RIDDLES[rng.gen_range(0..RIDDLES.len())];
    Puzzle::new(question, answer)
}

/// Generates one room. The four content rolls are independent.
pub fn generate_room(class: RoomClass, rng: &mut impl Rng) -> Room {
    let description = ROOM_DESCRIPTIONS
        .choose(rng)
        .copied()
        .unwrap_or(ROOM_DESCRIPTIONS[0]);

    let enemy = rng
        .gen_bool(chance(ROOM_ENEMY_CHANCE, class))
        .then(|| Enemy::random(rng));
    let item = rng
        .gen_bool(chance(ROOM_ITEM_CHANCE, class))
        .then(|| Item::random(rng));
    let has_trap = rng.gen_bool(chance(ROOM_TRAP_CHANCE, class));
    let trap_damage = if has_trap {
        rng.gen_range(TRAP_DAMAGE_MIN..=TRAP_DAMAGE_MAX)
    } else {
        0
    };
    let puzzle = rng
        .gen_bool(chance(ROOM_PUZZLE_CHANCE, class))
        .then(|| random_puzzle(rng));

    Room {
        description: description.to_string(),
        enemy,
        item,
        has_trap,
        trap_damage,
        puzzle,
    }
}

pub fn generate_rooms(count: usize, class: RoomClass, rng: &mut impl Rng) -> Vec<Room> {
    (0..count).map(|_| generate_room(class, rng)).collect()
}

/// Generates the three room sequences. Mystery rooms use normal parameters.
///
/// The normal sequence always has at least one room so the cursor is valid.
pub fn generate_dungeon(config: DungeonConfig, rng: &mut impl Rng) -> Dungeon {
    let rooms = generate_rooms(config.normal_rooms.max(1), RoomClass::Normal, rng);
    let shortcut_rooms = generate_rooms(config.shortcut_rooms, RoomClass::Shortcut, rng);
    let mystery_rooms = generate_rooms(config.mystery_rooms, RoomClass::Normal, rng);

    log::info!(
        "generated dungeon: {} normal, {} shortcut, {} mystery rooms",
        rooms.len(),
        shortcut_rooms.len(),
        mystery_rooms.len()
    );

    Dungeon::new(rooms, shortcut_rooms, mystery_rooms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn rate(rooms: &[Room], pred: impl Fn(&Room) -> bool) -> f64 {
        rooms.iter().filter(|r| pred(r)).count() as f64 / rooms.len() as f64
    }

    #[test]
    fn test_generate_dungeon_sizes() {
        let mut rng = create_test_rng();
        let dungeon = generate_dungeon(DungeonConfig::default(), &mut rng);
        assert_eq!(dungeon.rooms.len(), 5);
        assert_eq!(dungeon.shortcut_rooms.len(), 2);
        assert_eq!(dungeon.mystery_rooms.len(), 2);
        assert_eq!(dungeon.current_index, 0);
        assert!(dungeon.is_consistent());
    }

    #[test]
    fn test_empty_normal_sequence_is_padded() {
        let mut rng = create_test_rng();
        let config = DungeonConfig {
            normal_rooms: 0,
            shortcut_rooms: 0,
            mystery_rooms: 0,
        };
        let dungeon = generate_dungeon(config, &mut rng);
        assert_eq!(dungeon.rooms.len(), 1);
        assert!(dungeon.is_exit_reached());
    }

    #[test]
    fn test_trap_damage_in_range() {
        let mut rng = create_test_rng();
        for room in generate_rooms(500, RoomClass::Shortcut, &mut rng) {
            if room.has_trap {
                assert!((5..=15).contains(&room.trap_damage));
            } else {
                assert_eq!(room.trap_damage, 0);
            }
        }
    }

    #[test]
    fn test_descriptions_and_riddles_come_from_pools() {
        let mut rng = create_test_rng();
        for room in generate_rooms(200, RoomClass::Normal, &mut rng) {
            assert!(ROOM_DESCRIPTIONS.contains(&room.description.as_str()));
            if let Some(puzzle) = room.puzzle {
                assert!(RIDDLES
                    .iter()
                    .any(|(q, a)| *q == puzzle.question && *a == puzzle.answer));
            }
        }
    }

    #[test]
    fn test_shortcut_rooms_are_richer() {
        let mut rng = create_test_rng();
        let normal = generate_rooms(4000, RoomClass::Normal, &mut rng);
        let shortcut = generate_rooms(4000, RoomClass::Shortcut, &mut rng);

        let enemy = (rate(&normal, |r| r.enemy.is_some()), rate(&shortcut, |r| r.enemy.is_some()));
        assert!((0.46..0.54).contains(&enemy.0), "normal enemy rate {}", enemy.0);
        assert!((0.66..0.74).contains(&enemy.1), "shortcut enemy rate {}", enemy.1);

        let trap = (rate(&normal, |r| r.has_trap), rate(&shortcut, |r| r.has_trap));
        assert!((0.26..0.34).contains(&trap.0), "normal trap rate {}", trap.0);
        assert!((0.46..0.54).contains(&trap.1), "shortcut trap rate {}", trap.1);

        let item = (rate(&normal, |r| r.item.is_some()), rate(&shortcut, |r| r.item.is_some()));
        assert!((0.36..0.44).contains(&item.0), "normal item rate {}", item.0);
        assert!((0.46..0.54).contains(&item.1), "shortcut item rate {}", item.1);

        let puzzle = (
            rate(&normal, |r| r.puzzle.is_some()),
            rate(&shortcut, |r| r.puzzle.is_some()),
        );
        assert!((0.21..0.29).contains(&puzzle.0), "normal puzzle rate {}", puzzle.0);
        assert!((0.36..0.44).contains(&puzzle.1), "shortcut puzzle rate {}", puzzle.1);
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let a = generate_dungeon(DungeonConfig::default(), &mut ChaCha8Rng::seed_from_u64(7));
        let b = generate_dungeon(DungeonConfig::default(), &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
