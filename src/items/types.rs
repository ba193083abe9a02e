use crate::core::constants::{ATTACK_BOOST_BONUS, DEFENSE_BOOST_REDUCTION};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an item does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemEffect {
    Heal,
    AttackBoost,
    DefenseBoost,
    MaxHealth,
    Luck,
    RemovePoison,
    RemoveBurn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub effect: ItemEffect,
    #[serde(default)]
    pub value: i32,
    /// Rounds the effect lasts. `None` for instantaneous effects.
    #[serde(default)]
    pub duration: Option<u32>,
    pub price: u32,
}

/// (name, effect, value, duration, price)
type CatalogEntry = (&'static str, ItemEffect, i32, Option<u32>, u32);

/// Every item that can appear in rooms.
pub const ITEM_CATALOG: [CatalogEntry; 13] = [
    ("Small Healing Potion", ItemEffect::Heal, 20, None, 10),
    ("Medium Healing Potion", ItemEffect::Heal, 50, None, 25),
    ("Large Healing Potion", ItemEffect::Heal, 100, None, 50),
    ("Elixir of Life", ItemEffect::Heal, 200, None, 100),
    ("Minor Strength Potion", ItemEffect::AttackBoost, 5, Some(3), 20),
    ("Major Strength Potion", ItemEffect::AttackBoost, 10, Some(5), 40),
    ("Warrior's Fury", ItemEffect::AttackBoost, 15, Some(5), 75),
    ("Iron Skin Potion", ItemEffect::DefenseBoost, 3, Some(4), 25),
    ("Titan's Elixir", ItemEffect::DefenseBoost, 5, Some(6), 50),
    ("Max Health Elixir", ItemEffect::MaxHealth, 50, None, 150),
    ("Luck Charm", ItemEffect::Luck, 2, Some(5), 60),
    ("Anti-Poison Potion", ItemEffect::RemovePoison, 0, None, 30),
    ("Fire Resistance Potion", ItemEffect::RemoveBurn, 0, None, 30),
];

/// The vendor's standing stock.
pub const SHOP_STOCK: [&str; 9] = [
    "Small Healing Potion",
    "Medium Healing Potion",
    "Large Healing Potion",
    "Minor Strength Potion",
    "Iron Skin Potion",
    "Max Health Elixir",
    "Luck Charm",
    "Anti-Poison Potion",
    "Fire Resistance Potion",
];

/// Items found in hidden treasure rooms or offered occasionally by vendors.
pub const RARE_ITEMS: [&str; 3] = ["Warrior's Fury", "Titan's Elixir", "Elixir of Life"];

impl Item {
    pub fn new(
        name: impl Into<String>,
        effect: ItemEffect,
        value: i32,
        duration: Option<u32>,
        price: u32,
    ) -> Self {
        Self {
            name: name.into(),
            effect,
            value,
            duration,
            price,
        }
    }

    fn from_entry(entry: &CatalogEntry) -> Self {
        let (name, effect, value, duration, price) = *entry;
        Self::new(name, effect, value, duration, price)
    }

    /// Looks up a catalog item by its exact name.
    pub fn named(name: &str) -> Option<Self> {
        ITEM_CATALOG
            .iter()
            .find(|entry| entry.0 == name)
            .map(Self::from_entry)
    }

    /// Any catalog item, uniformly.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::from_entry(&ITEM_CATALOG[rng.gen_range(0..ITEM_CATALOG.len())])
    }

    /// One of the rare items, uniformly.
    pub fn random_rare(rng: &mut impl Rng) -> Self {
        let name = RARE_ITEMS[rng.gen_range(0..RARE_ITEMS.len())];
        Self::named(name).unwrap_or_else(|| Self::random(rng))
    }

    /// Gold returned when selling this item back to a vendor.
    pub fn sell_price(&self) -> u32 {
        self.price / 2
    }

    pub fn description(&self) -> String {
        let turns = self.duration.unwrap_or(0);
        match self.effect {
            ItemEffect::Heal => format!("Restores {} HP", self.value),
            ItemEffect::AttackBoost => format!(
                "Boosts attack by {} for {} turns",
                ATTACK_BOOST_BONUS, turns
            ),
            ItemEffect::DefenseBoost => format!(
                "Reduces damage taken by {} for {} turns",
                DEFENSE_BOOST_REDUCTION, turns
            ),
            ItemEffect::MaxHealth => format!("Permanently increases max health by {}", self.value),
            ItemEffect::Luck => format!("Increases luck for {} turns", turns),
            ItemEffect::RemovePoison => "Removes poison effect".to_string(),
            ItemEffect::RemoveBurn => "Removes burning effect".to_string(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.description())
    }
}
