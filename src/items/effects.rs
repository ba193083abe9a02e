//! Applying item effects to the player.

use super::types::{Item, ItemEffect};
use crate::character::{Entity, Player, StatusKind};
use std::fmt;

/// Result of using an item, for narration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Healed { health: i32, max_health: i32 },
    Buffed { kind: StatusKind, turns: u32 },
    MaxHealthRaised { amount: i32, max_health: i32 },
    Cured { kind: StatusKind },
    NothingToCure { kind: StatusKind },
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemOutcome::Healed { health, max_health } => {
                write!(f, "Your health is now {}/{}.", health, max_health)
            }
            ItemOutcome::Buffed { kind, turns } => {
                write!(f, "{} boosted for {} turns!", kind, turns)
            }
            ItemOutcome::MaxHealthRaised { amount, max_health } => {
                write!(f, "Max health increased by {} (now {}).", amount, max_health)
            }
            ItemOutcome::Cured { kind } => write!(f, "{} effect has been removed.", kind),
            ItemOutcome::NothingToCure { kind } => {
                write!(f, "It had no effect, you were not suffering from {}.", kind)
            }
        }
    }
}

/// Applies `item` to `player`. The caller is responsible for consuming it.
pub fn apply_item(item: &Item, player: &mut Player) -> ItemOutcome {
    let turns = item.duration.unwrap_or(0);
    match item.effect {
        ItemEffect::Heal => {
            player.heal(item.value);
            ItemOutcome::Healed {
                health: player.displayed_health(),
                max_health: player.max_health,
            }
        }
        ItemEffect::AttackBoost => buff(player, StatusKind::AttackBoost, turns),
        ItemEffect::DefenseBoost => buff(player, StatusKind::DefenseBoost, turns),
        ItemEffect::Luck => buff(player, StatusKind::LuckBoost, turns),
        ItemEffect::MaxHealth => {
            player.raise_max_health(item.value);
            ItemOutcome::MaxHealthRaised {
                amount: item.value,
                max_health: player.max_health,
            }
        }
        ItemEffect::RemovePoison => cure(player, StatusKind::Poison),
        ItemEffect::RemoveBurn => cure(player, StatusKind::Burn),
    }
}

/// Uses the inventory item at `slot`, removing it. `None` if the slot is empty.
pub fn use_inventory_item(player: &mut Player, slot: usize) -> Option<(Item, ItemOutcome)> {
    if slot >= player.inventory.len() {
        return None;
    }
    let item = player.inventory.remove(slot);
    let outcome = apply_item(&item, player);
    Some((item, outcome))
}

fn buff(player: &mut Player, kind: StatusKind, turns: u32) -> ItemOutcome {
    player.status.set(kind, turns);
    ItemOutcome::Buffed { kind, turns }
}

fn cure(player: &mut Player, kind: StatusKind) -> ItemOutcome {
    if player.status.clear(kind) {
        ItemOutcome::Cured { kind }
    } else {
        ItemOutcome::NothingToCure { kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> Item {
        Item::named(name).expect("catalog item")
    }

    #[test]
    fn test_heal_is_capped() {
        let mut player = Player::new("Test");
        player.health = 90;
        let outcome = apply_item(&item("Medium Healing Potion"), &mut player);
        assert_eq!(player.health, 100);
        assert_eq!(
            outcome,
            ItemOutcome::Healed {
                health: 100,
                max_health: 100
            }
        );
    }

    #[test]
    fn test_strength_potion_sets_attack_boost_duration() {
        let mut player = Player::new("Test");
        apply_item(&item("Major Strength Potion"), &mut player);
        assert_eq!(player.status.attack_boost, 5);
        assert_eq!(player.attack, 10);
        assert_eq!(player.attack_damage(), 15);
    }

    #[test]
    fn test_defense_potion_uses_duration() {
        let mut player = Player::new("Test");
        apply_item(&item("Iron Skin Potion"), &mut player);
        assert_eq!(player.status.defense_boost, 4);
    }

    #[test]
    fn test_luck_charm() {
        let mut player = Player::new("Test");
        apply_item(&item("Luck Charm"), &mut player);
        assert_eq!(player.status.luck_boost, 5);
    }

    #[test]
    fn test_max_health_elixir() {
        let mut player = Player::new("Test");
        apply_item(&item("Max Health Elixir"), &mut player);
        assert_eq!(player.max_health, 150);
        assert_eq!(player.health, 150);
    }

    #[test]
    fn test_cures() {
        let mut player = Player::new("Test");
        assert_eq!(
            apply_item(&item("Anti-Poison Potion"), &mut player),
            ItemOutcome::NothingToCure {
                kind: StatusKind::Poison
            }
        );
        player.status.set(StatusKind::Burn, 2);
        assert_eq!(
            apply_item(&item("Fire Resistance Potion"), &mut player),
            ItemOutcome::Cured {
                kind: StatusKind::Burn
            }
        );
        assert_eq!(player.status.burn, 0);
    }

    #[test]
    fn test_use_inventory_item_consumes() {
        let mut player = Player::new("Test");
        player.pick_item(item("Luck Charm"));
        player.pick_item(item("Small Healing Potion"));
        let (used, _) = use_inventory_item(&mut player, 0).unwrap();
        assert_eq!(used.name, "Luck Charm");
        assert_eq!(player.inventory.len(), 1);
        assert!(use_inventory_item(&mut player, 5).is_none());
        assert_eq!(player.inventory.len(), 1);
    }
}
