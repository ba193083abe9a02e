//! Dungeon graph: three room sequences, path selection and room events.

pub mod generation;
pub mod logic;
pub mod types;

pub use generation::{generate_dungeon, generate_room, generate_rooms};
pub use logic::*;
pub use types::*;
