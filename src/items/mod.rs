//! Item catalog and item effects.

pub mod effects;
pub mod types;

pub use effects::{apply_item, use_inventory_item, ItemOutcome};
pub use types::{Item, ItemEffect, ITEM_CATALOG, RARE_ITEMS, SHOP_STOCK};
