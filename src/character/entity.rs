//! Behaviour shared by the player, pets and enemies.

use super::status::{StatusEffects, StatusKind, TickReport};

/// Anything with health that can take part in a battle.
///
/// Health only changes through [`Entity::take_damage`] and [`Entity::heal`].
pub trait Entity {
    fn name(&self) -> &str;
    fn health(&self) -> i32;
    fn attack(&self) -> i32;
    fn status(&self) -> &StatusEffects;
    fn status_mut(&mut self) -> &mut StatusEffects;

    /// Raw write used by the provided methods below.
    fn set_health(&mut self, health: i32);

    fn is_alive(&self) -> bool {
        self.health() > 0
    }

    /// Health as shown to the player, never below zero.
    fn displayed_health(&self) -> i32 {
        self.health().max(0)
    }

    fn take_damage(&mut self, amount: i32) {
        self.set_health(self.health() - amount);
    }

    /// Uncapped heal. The player overrides this to respect max health.
    fn heal(&mut self, amount: i32) {
        self.set_health(self.health() + amount);
    }

    /// Runs the round's status tick and applies its damage.
    fn tick_status(&mut self) -> TickReport {
        let report = self.status_mut().tick();
        let damage = report.total_damage();
        if damage > 0 {
            self.take_damage(damage);
        }
        report
    }

    /// Incoming hit after defense-boost mitigation.
    fn mitigate(&self, damage: i32) -> i32 {
        if self.status().is_active(StatusKind::DefenseBoost) {
            (damage - crate::core::constants::DEFENSE_BOOST_REDUCTION).max(1)
        } else {
            damage
        }
    }
}
