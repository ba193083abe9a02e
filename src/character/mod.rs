//! Player, pet and the entity/status model they share with enemies.

pub mod entity;
pub mod pet;
pub mod player;
pub mod status;

pub use entity::Entity;
pub use pet::Pet;
pub use player::Player;
pub use status::{StatusEffects, StatusKind, TickReport};
