use crate::character::{Entity, Player};
use crate::dungeon::{generate_dungeon, Dungeon, DungeonConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Everything that survives between rooms: the adventurer and the dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub dungeon: Dungeon,
}

impl GameState {
    pub fn new(player: Player, dungeon: Dungeon) -> Self {
        Self { player, dungeon }
    }

    /// A fresh character at the entrance of a freshly generated dungeon.
    pub fn new_game(name: &str, config: DungeonConfig, rng: &mut impl Rng) -> Self {
        let player = Player::new(name);
        log::info!("starting a new run for {}", player.name);
        Self::new(player, generate_dungeon(config, rng))
    }

    pub fn is_over(&self) -> bool {
        !self.player.is_alive() || self.dungeon.is_exit_reached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let state = GameState::new_game("  ", DungeonConfig::default(), &mut rng);
        assert_eq!(state.player.name, "Hero");
        assert_eq!(state.dungeon.current_index, 0);
        assert!(!state.is_over());
    }

    #[test]
    fn test_is_over_when_dead() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut state = GameState::new_game("Test", DungeonConfig::default(), &mut rng);
        state.player.health = 0;
        assert!(state.is_over());
    }
}
