use super::entity::Entity;
use super::status::StatusEffects;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// (name, health, attack)
pub const PET_TYPES: [(&str, i32, i32); 5] = [
    ("Shadow Wolf", 40, 8),
    ("Flame Tiger", 50, 10),
    ("Stone Turtle", 60, 5),
    ("Lightning Hawk", 35, 12),
    ("Guardian Spirit", 70, 6),
];

/// A companion that fights alongside the player and can be targeted by enemies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    pub health: i32,
    pub attack: i32,
    #[serde(default)]
    pub status: StatusEffects,
}

impl Pet {
    pub fn new(name: impl Into<String>, health: i32, attack: i32) -> Self {
        Self {
            name: name.into(),
            health,
            attack,
            status: StatusEffects::new(),
        }
    }

    /// Picks one of the known pet types uniformly.
    pub fn random(rng: &mut impl Rng) -> Self {
        let (name, health, attack) = PET_TYPES[rng.gen_range(0..PET_TYPES.len())];
        Self::new(name, health, attack)
    }
}

impl Entity for Pet {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_pet_comes_from_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let pet = Pet::random(&mut rng);
            assert!(PET_TYPES
                .iter()
                .any(|(name, hp, atk)| *name == pet.name && *hp == pet.health && *atk == pet.attack));
        }
    }

    #[test]
    fn test_pet_death_and_display() {
        let mut pet = Pet::new("Stone Turtle", 10, 5);
        pet.take_damage(14);
        assert!(!pet.is_alive());
        assert_eq!(pet.health, -4);
        assert_eq!(pet.displayed_health(), 0);
    }
}
