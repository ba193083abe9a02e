// Character creation
pub const STARTING_HEALTH: i32 = 100;
pub const STARTING_ATTACK: i32 = 10;
pub const STARTING_GOLD: u32 = 50;
pub const DEFAULT_PLAYER_NAME: &str = "Hero";

// Dungeon layout
pub const DEFAULT_NORMAL_ROOMS: usize = 5;
pub const DEFAULT_SHORTCUT_ROOMS: usize = 2;
pub const DEFAULT_MYSTERY_ROOMS: usize = 2;

// Path gates (probability that a branch is offered this step)
pub const SHORTCUT_PATH_CHANCE: f64 = 0.7;
pub const MYSTERY_PATH_CHANCE: f64 = 0.5;
pub const TREASURE_PATH_CHANCE: f64 = 0.2;

// Hidden treasure event (sequential rolls)
pub const TREASURE_TRIGGER_CHANCE: f64 = 0.2;
pub const TREASURE_DEATH_CHANCE: f64 = 0.7;
pub const TREASURE_GOLD_MIN: u32 = 100;
pub const TREASURE_GOLD_MAX: u32 = 300;
pub const TREASURE_RARE_ITEM_CHANCE: f64 = 0.5;

// Room generation: (normal, shortcut)
pub const ROOM_ENEMY_CHANCE: (f64, f64) = (0.5, 0.7);
pub const ROOM_ITEM_CHANCE: (f64, f64) = (0.4, 0.5);
pub const ROOM_TRAP_CHANCE: (f64, f64) = (0.3, 0.5);
pub const ROOM_PUZZLE_CHANCE: (f64, f64) = (0.25, 0.4);
pub const TRAP_DAMAGE_MIN: i32 = 5;
pub const TRAP_DAMAGE_MAX: i32 = 15;

// Room entry events
pub const ROOM_GOLD_CHANCE: f64 = 0.3;
pub const ROOM_GOLD_MIN: u32 = 10;
pub const ROOM_GOLD_MAX: u32 = 50;
pub const VENDOR_CHANCE: f64 = 0.2;
pub const TRAP_DODGE_CHANCE: f64 = 0.5;
pub const TRAP_DISARM_CHANCE: f64 = 0.3;
pub const PUZZLE_GOLD_MIN: u32 = 20;
pub const PUZZLE_GOLD_MAX: u32 = 100;
pub const PUZZLE_BONUS_ITEM_CHANCE: f64 = 0.5;
pub const PUZZLE_BUFF_MIN: u32 = 2;
pub const PUZZLE_BUFF_MAX: u32 = 5;

// Combat
pub const ATTACK_BOOST_BONUS: i32 = 5;
pub const DEFENSE_BOOST_REDUCTION: i32 = 3;
pub const COUNTERATTACK_CHANCE: f64 = 0.5;
pub const COUNTERATTACK_MULTIPLIER: i32 = 2;
pub const FLEE_BASE_PERCENT: u32 = 40;
pub const FLEE_PENALTY_PER_ENEMY: u32 = 10;
pub const FLEE_MIN_PERCENT: u32 = 10;
pub const KILL_GOLD_MIN: u32 = 10;
pub const KILL_GOLD_MAX: u32 = 50;
pub const PET_TARGET_CHANCE: f64 = 0.5;

// Enemy abilities
pub const POISON_DURATION: u32 = 3;
pub const STUN_DURATION: u32 = 1;
pub const BURN_DURATION: u32 = 2;
pub const DRAIN_FRACTION: f64 = 0.5;

// Status ticks
pub const POISON_TICK_DAMAGE: i32 = 3;
pub const BURN_TICK_DAMAGE: i32 = 5;

// Shop
pub const PET_PRICE: u32 = 100;
pub const PET_FOR_SALE_CHANCE: f64 = 0.3;
pub const RARE_ITEM_FOR_SALE_CHANCE: f64 = 0.5;

// Save system
pub const SAVE_VERSION: u32 = 1;
pub const SAVE_FILE_NAME: &str = "savegame.json";
pub const LOG_FILE_NAME: &str = "delve.log";
