//! Delve - a text roguelike dungeon crawler.
//!
//! The library holds the whole game: entities, battles, the dungeon graph,
//! the shop and the save slot. The binary only wires a console to it.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod input;
pub mod items;
pub mod save_manager;
pub mod shop;
pub mod ui;
pub mod utils;
