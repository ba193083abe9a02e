use crate::character::{Entity, StatusEffects};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Special behaviour an enemy applies on every attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    #[default]
    None,
    Poison,
    Stun,
    Drain,
    Fire,
    DoubleAttack,
}

/// (name, health, attack, ability)
pub const ENEMY_TYPES: [(&str, i32, i32, Ability); 9] = [
    ("Goblin", 30, 5, Ability::None),
    ("Skeleton", 40, 7, Ability::None),
    ("Orc", 50, 10, Ability::None),
    ("Dark Mage", 35, 12, Ability::Drain),
    ("Demon", 60, 15, Ability::Fire),
    ("Venomous Spider", 25, 6, Ability::Poison),
    ("Stone Golem", 80, 12, Ability::Stun),
    ("Shadow Assassin", 45, 14, Ability::DoubleAttack),
    ("Ancient Dragon", 120, 25, Ability::Fire),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub health: i32,
    pub attack: i32,
    #[serde(default)]
    pub ability: Ability,
    #[serde(default)]
    pub status: StatusEffects,
}

impl Enemy {
    pub fn new(name: impl Into<String>, health: i32, attack: i32) -> Self {
        Self::with_ability(name, health, attack, Ability::None)
    }

    pub fn with_ability(
        name: impl Into<String>,
        health: i32,
        attack: i32,
        ability: Ability,
    ) -> Self {
        Self {
            name: name.into(),
            health,
            attack,
            ability,
            status: StatusEffects::new(),
        }
    }

    /// Looks up a known enemy type by name.
    pub fn named(name: &str) -> Option<Self> {
        ENEMY_TYPES
            .iter()
            .find(|(n, ..)| *n == name)
            .map(|(n, hp, atk, ability)| Self::with_ability(*n, *hp, *atk, *ability))
    }

    /// Picks one of the known enemy types uniformly.
    pub fn random(rng: &mut impl Rng) -> Self {
        let (name, health, attack, ability) = ENEMY_TYPES[rng.gen_range(0..ENEMY_TYPES.len())];
        Self::with_ability(name, health, attack, ability)
    }
}

impl Entity for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn attack(&self) -> i32 {
        self.attack
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
}
