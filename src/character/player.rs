use super::entity::Entity;
use super::pet::Pet;
use super::status::{StatusEffects, StatusKind};
use crate::core::constants::{
    ATTACK_BOOST_BONUS, DEFAULT_PLAYER_NAME, STARTING_ATTACK, STARTING_GOLD, STARTING_HEALTH,
};
use crate::items::Item;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub gold: u32,
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub status: StatusEffects,
    #[serde(default)]
    pub pet: Option<Pet>,
}

impl Player {
    /// A fresh adventurer. Blank names fall back to the default hero name.
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        let name = if name.is_empty() {
            DEFAULT_PLAYER_NAME
        } else {
            name
        };
        Self::with_stats(name, STARTING_HEALTH, STARTING_ATTACK, STARTING_GOLD)
    }

    pub fn with_stats(name: &str, health: i32, attack: i32, gold: u32) -> Self {
        Self {
            name: name.to_string(),
            health,
            max_health: health,
            attack,
            gold,
            inventory: Vec::new(),
            status: StatusEffects::new(),
            pet: None,
        }
    }

    /// Damage of a plain attack, including the attack-boost bonus.
    pub fn attack_damage(&self) -> i32 {
        if self.status.is_active(StatusKind::AttackBoost) {
            self.attack + ATTACK_BOOST_BONUS
        } else {
            self.attack
        }
    }

    pub fn pick_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    pub fn earn_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Deducts gold if the player can afford it.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold >= amount {
            self.gold -= amount;
            true
        } else {
            false
        }
    }

    /// Raises max health and current health together.
    pub fn raise_max_health(&mut self, amount: i32) {
        self.max_health += amount.max(0);
        self.health += amount.max(0);
    }

    /// Assigns a pet. Returns the pet back if one is already owned.
    pub fn adopt_pet(&mut self, pet: Pet) -> Result<(), Pet> {
        if self.pet.is_some() {
            return Err(pet);
        }
        self.pet = Some(pet);
        Ok(())
    }

    pub fn living_pet(&self) -> Option<&Pet> {
        self.pet.as_ref().filter(|pet| pet.is_alive())
    }

    pub fn living_pet_mut(&mut self) -> Option<&mut Pet> {
        self.pet.as_mut().filter(|pet| pet.is_alive())
    }

    pub fn has_living_pet(&self) -> bool {
        self.living_pet().is_some()
    }

    /// Removes a fallen pet. Returns its name if one was removed.
    pub fn bury_fallen_pet(&mut self) -> Option<String> {
        if self.pet.as_ref().is_some_and(|pet| !pet.is_alive()) {
            return self.pet.take().map(|pet| pet.name);
        }
        None
    }
}

impl Entity for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn attack(&self) -> i32 {
        self.attack_damage()
    }

    fn status(&self) -> &StatusEffects {
        &self.status
    }

    fn status_mut(&mut self) -> &mut StatusEffects {
        &mut self.status
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
    }

    fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health).max(self.health);
    }
}
