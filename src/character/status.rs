//! Timed status effects shared by every combatant.
//!
//! Durations count battle rounds. A counter at zero is inert. Only
//! [`StatusEffects::tick`] decrements counters, and the battle engine calls it
//! exactly once per round for each living combatant.

use crate::core::constants::{BURN_TICK_DAMAGE, POISON_TICK_DAMAGE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six kinds of timed effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    AttackBoost,
    DefenseBoost,
    LuckBoost,
    Poison,
    Burn,
    Stunned,
}

impl StatusKind {
    pub const ALL: [StatusKind; 6] = [
        StatusKind::AttackBoost,
        StatusKind::DefenseBoost,
        StatusKind::LuckBoost,
        StatusKind::Poison,
        StatusKind::Burn,
        StatusKind::Stunned,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::AttackBoost => "Attack",
            StatusKind::DefenseBoost => "Defense",
            StatusKind::LuckBoost => "Luck",
            StatusKind::Poison => "Poison",
            StatusKind::Burn => "Burn",
            StatusKind::Stunned => "Stun",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Remaining rounds for each effect kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    #[serde(default)]
    pub attack_boost: u32,
    #[serde(default)]
    pub defense_boost: u32,
    #[serde(default)]
    pub luck_boost: u32,
    #[serde(default)]
    pub poison: u32,
    #[serde(default)]
    pub burn: u32,
    #[serde(default)]
    pub stunned: u32,
}

/// What a single tick did to its owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub poison_damage: i32,
    pub burn_damage: i32,
    /// Effects whose counter went from 1 to 0 on this tick.
    pub worn_off: Vec<StatusKind>,
    /// Whether the owner was stunned going into the tick.
    pub was_stunned: bool,
}

impl TickReport {
    pub fn total_damage(&self) -> i32 {
        self.poison_damage + self.burn_damage
    }
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: StatusKind) -> &u32 {
        match kind {
            StatusKind::AttackBoost => &self.attack_boost,
            StatusKind::DefenseBoost => &self.defense_boost,
            StatusKind::LuckBoost => &self.luck_boost,
            StatusKind::Poison => &self.poison,
            StatusKind::Burn => &self.burn,
            StatusKind::Stunned => &self.stunned,
        }
    }

    fn slot_mut(&mut self, kind: StatusKind) -> &mut u32 {
        match kind {
            StatusKind::AttackBoost => &mut self.attack_boost,
            StatusKind::DefenseBoost => &mut self.defense_boost,
            StatusKind::LuckBoost => &mut self.luck_boost,
            StatusKind::Poison => &mut self.poison,
            StatusKind::Burn => &mut self.burn,
            StatusKind::Stunned => &mut self.stunned,
        }
    }

    pub fn get(&self, kind: StatusKind) -> u32 {
        *self.slot(kind)
    }

    pub fn is_active(&self, kind: StatusKind) -> bool {
        self.get(kind) > 0
    }

    /// Overwrites the remaining duration.
    pub fn set(&mut self, kind: StatusKind, rounds: u32) {
        *self.slot_mut(kind) = rounds;
    }

    /// Extends the remaining duration.
    pub fn extend(&mut self, kind: StatusKind, rounds: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(rounds);
    }

    /// Clears an effect. Returns true if it was active.
    pub fn clear(&mut self, kind: StatusKind) -> bool {
        let slot = self.slot_mut(kind);
        let was_active = *slot > 0;
        *slot = 0;
        was_active
    }

    /// Active effects with their remaining rounds, in display order.
    pub fn active(&self) -> Vec<(StatusKind, u32)> {
        StatusKind::ALL
            .iter()
            .filter(|kind| self.is_active(**kind))
            .map(|kind| (*kind, self.get(*kind)))
            .collect()
    }

    /// Advances every counter by one round.
    ///
    /// Damage is reported, not applied; the caller routes it through the
    /// owner's health so that death handling stays in one place.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport {
            was_stunned: self.stunned > 0,
            ..TickReport::default()
        };

        if self.poison > 0 {
            report.poison_damage = POISON_TICK_DAMAGE;
        }
        if self.burn > 0 {
            report.burn_damage = BURN_TICK_DAMAGE;
        }

        for kind in StatusKind::ALL {
            let slot = self.slot_mut(kind);
            if *slot > 0 {
                *slot -= 1;
                if *slot == 0 {
                    report.worn_off.push(kind);
                }
            }
        }

        report
    }
}
