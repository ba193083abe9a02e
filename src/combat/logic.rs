//! Turn-based battle engine.
//!
//! A round runs `PlayerTurn → PetTurn → EnemyTurn → EndOfRound` and loops
//! until the player wins, dies or flees. Every random roll comes from the
//! `rng` passed in, so a fixed seed and fixed actions replay exactly.

use super::types::{Ability, Enemy};
use crate::character::{Entity, Player, StatusKind, TickReport};
use crate::core::constants::*;
use crate::input::{parse_index, InputProvider, Menu};
use crate::items::{use_inventory_item, ItemOutcome};
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    PlayerTurn,
    PetTurn,
    EnemyTurn,
    EndOfRound,
    Finished(BattleOutcome),
}

/// What the player does on their turn. Targets and slots are indices into
/// the live enemy list and the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack { target: usize },
    UseItem { slot: usize },
    Counterattack { target: usize },
    Flee,
    /// Invalid menu input. The turn is lost.
    Forfeit,
}

/// Who an enemy swung at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Player,
    Pet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    Started {
        enemies: Vec<String>,
    },
    PlayerAttacked {
        target: String,
        damage: i32,
        remaining: i32,
    },
    CounterattackLanded {
        target: String,
        damage: i32,
        remaining: i32,
    },
    CounterattackMissed {
        target: String,
    },
    ItemUsed {
        item: String,
        outcome: ItemOutcome,
    },
    NoSuchItem,
    FleeAttempt {
        chance: u32,
        success: bool,
    },
    TurnForfeited,
    Stunned {
        name: String,
    },
    PetAttacked {
        pet: String,
        target: String,
        damage: i32,
        remaining: i32,
    },
    EnemyAttacked {
        enemy: String,
        target: String,
        damage: i32,
        remaining: i32,
    },
    AbilityTriggered {
        enemy: String,
        target: String,
        ability: Ability,
        amount: i32,
    },
    EnemyDefeated {
        name: String,
        /// Gold is only awarded for kills by the player.
        gold: Option<u32>,
    },
    PetFell {
        name: String,
    },
    StatusDamage {
        name: String,
        kind: StatusKind,
        damage: i32,
        remaining: i32,
    },
    EffectWornOff {
        name: String,
        kind: StatusKind,
    },
    Ended(BattleOutcome),
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Started { enemies } => write!(
                f,
                "A battle begins! You are facing {}: {}",
                enemies.len(),
                enemies.join(", ")
            ),
            BattleEvent::PlayerAttacked {
                target,
                damage,
                remaining,
            } => write!(
                f,
                "You attack {} for {} damage! (Enemy health: {})",
                target, damage, remaining
            ),
            BattleEvent::CounterattackLanded {
                target,
                damage,
                remaining,
            } => write!(
                f,
                "Counterattack on {} succeeds for {} damage! (Enemy health: {})",
                target, damage, remaining
            ),
            BattleEvent::CounterattackMissed { target } => {
                write!(f, "Your counterattack on {} fails. You missed your chance.", target)
            }
            BattleEvent::ItemUsed { item, outcome } => write!(f, "You used {}. {}", item, outcome),
            BattleEvent::NoSuchItem => write!(f, "You don't have that item."),
            BattleEvent::FleeAttempt { chance, success } => {
                if *success {
                    write!(f, "Escape chance {}%: you escaped the battle!", chance)
                } else {
                    write!(f, "Escape chance {}%: failed to escape!", chance)
                }
            }
            BattleEvent::TurnForfeited => write!(f, "Invalid choice! You lose your turn."),
            BattleEvent::Stunned { name } => write!(f, "{} is stunned and cannot act!", name),
            BattleEvent::PetAttacked {
                pet,
                target,
                damage,
                remaining,
            } => write!(
                f,
                "{} attacks {} for {} damage! (Enemy health: {})",
                pet, target, damage, remaining
            ),
            BattleEvent::EnemyAttacked {
                enemy,
                target,
                damage,
                remaining,
            } => write!(
                f,
                "{} attacks {} for {} damage! ({} health: {})",
                enemy, target, damage, target, remaining
            ),
            BattleEvent::AbilityTriggered {
                enemy,
                target,
                ability,
                amount,
            } => match ability {
                Ability::None => Ok(()),
                Ability::Poison => write!(f, "{} poisons {}!", enemy, target),
                Ability::Stun => write!(f, "{} stuns {}!", enemy, target),
                Ability::Drain => write!(f, "{} drains {} HP from {}!", enemy, amount, target),
                Ability::Fire => write!(f, "{} engulfs {} in flames!", enemy, target),
                Ability::DoubleAttack => {
                    write!(f, "{} strikes {} again for {} damage!", enemy, target, amount)
                }
            },
            BattleEvent::EnemyDefeated { name, gold } => match gold {
                Some(gold) => write!(f, "{} has been defeated! You collect {} gold.", name, gold),
                None => write!(f, "{} has been defeated!", name),
            },
            BattleEvent::PetFell { name } => write!(f, "{} has fallen in battle!", name),
            BattleEvent::StatusDamage {
                name,
                kind,
                damage,
                remaining,
            } => write!(
                f,
                "{} takes {} {} damage. (Health: {})",
                name,
                damage,
                kind.name().to_lowercase(),
                remaining
            ),
            BattleEvent::EffectWornOff { name, kind } => {
                write!(f, "{}'s {} effect has worn off.", name, kind)
            }
            BattleEvent::Ended(BattleOutcome::Victory) => write!(f, "You won the battle!"),
            BattleEvent::Ended(BattleOutcome::Defeat) => write!(f, "You were defeated..."),
            BattleEvent::Ended(BattleOutcome::Escaped) => write!(f, "You got away."),
        }
    }
}

/// Escape chance in percent for the given number of live enemies.
pub fn flee_chance(live_enemies: usize) -> u32 {
    let penalty = (live_enemies as u32).saturating_mul(FLEE_PENALTY_PER_ENEMY);
    FLEE_BASE_PERCENT
        .saturating_sub(penalty)
        .max(FLEE_MIN_PERCENT)
}

/// One encounter between the player (and pet) and a group of enemies.
#[derive(Debug, Clone)]
pub struct Battle {
    enemies: Vec<Enemy>,
    phase: BattlePhase,
    round: u32,
    player_stunned: bool,
    pet_stunned: bool,
}

impl Battle {
    /// Starts a battle. Already-dead enemies never enter the fight.
    pub fn new(enemies: Vec<Enemy>) -> Self {
        let enemies: Vec<Enemy> = enemies.into_iter().filter(|e| e.is_alive()).collect();
        let phase = if enemies.is_empty() {
            BattlePhase::Finished(BattleOutcome::Victory)
        } else {
            BattlePhase::PlayerTurn
        };
        Self {
            enemies,
            phase,
            round: 1,
            player_stunned: false,
            pet_stunned: false,
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Remaining enemies, for returning an unfinished fight to its room.
    pub fn into_enemies(self) -> Vec<Enemy> {
        self.enemies
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Whether the coming player turn will be skipped.
    pub fn player_stunned(&self) -> bool {
        self.player_stunned
    }

    /// Runs the current phase and moves to the next one.
    ///
    /// `action` is only consulted during `PlayerTurn`; a missing action there
    /// forfeits the turn.
    pub fn advance(
        &mut self,
        player: &mut Player,
        action: Option<PlayerAction>,
        rng: &mut impl Rng,
    ) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        let previous = self.phase;
        match self.phase {
            BattlePhase::PlayerTurn => {
                let action = action.unwrap_or(PlayerAction::Forfeit);
                self.player_turn(player, action, rng, &mut events);
            }
            BattlePhase::PetTurn => self.pet_turn(player, rng, &mut events),
            BattlePhase::EnemyTurn => self.enemy_turn(player, rng, &mut events),
            BattlePhase::EndOfRound => self.end_of_round(player, &mut events),
            BattlePhase::Finished(_) => return events,
        }
        log::debug!("battle round {}: {:?} -> {:?}", self.round, previous, self.phase);
        if let BattlePhase::Finished(outcome) = self.phase {
            log::info!("battle finished after {} rounds: {:?}", self.round, outcome);
            events.push(BattleEvent::Ended(outcome));
        }
        events
    }

    /// Plays the player's action and every automatic phase after it, stopping
    /// at the next player turn or the end of the battle.
    pub fn play_round(
        &mut self,
        player: &mut Player,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Vec<BattleEvent> {
        let mut events = self.advance(player, Some(action), rng);
        while !matches!(
            self.phase,
            BattlePhase::PlayerTurn | BattlePhase::Finished(_)
        ) {
            events.extend(self.advance(player, None, rng));
        }
        events
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        self.phase = BattlePhase::Finished(outcome);
    }

    fn after_player_side(&mut self, next: BattlePhase) {
        if self.enemies.is_empty() {
            self.finish(BattleOutcome::Victory);
        } else {
            self.phase = next;
        }
    }

    fn player_turn(
        &mut self,
        player: &mut Player,
        action: PlayerAction,
        rng: &mut impl Rng,
        events: &mut Vec<BattleEvent>,
    ) {
        if self.player_stunned {
            self.player_stunned = false;
            events.push(BattleEvent::Stunned {
                name: player.name.clone(),
            });
            self.phase = BattlePhase::PetTurn;
            return;
        }

        match action {
            PlayerAction::Attack { target } if target < self.enemies.len() => {
                let damage = player.attack_damage();
                let enemy = &mut self.enemies[target];
                enemy.take_damage(damage);
                events.push(BattleEvent::PlayerAttacked {
                    target: enemy.name.clone(),
                    damage,
                    remaining: enemy.displayed_health(),
                });
                self.resolve_player_kill(target, player, rng, events);
            }
            PlayerAction::Counterattack { target } if target < self.enemies.len() => {
                let enemy = &mut self.enemies[target];
                if rng.gen_bool(COUNTERATTACK_CHANCE) {
                    let damage = player.attack_damage() * COUNTERATTACK_MULTIPLIER;
                    enemy.take_damage(damage);
                    events.push(BattleEvent::CounterattackLanded {
                        target: enemy.name.clone(),
                        damage,
                        remaining: enemy.displayed_health(),
                    });
                    self.resolve_player_kill(target, player, rng, events);
                } else {
                    events.push(BattleEvent::CounterattackMissed {
                        target: enemy.name.clone(),
                    });
                }
            }
            PlayerAction::UseItem { slot } => match use_inventory_item(player, slot) {
                Some((item, outcome)) => events.push(BattleEvent::ItemUsed {
                    item: item.name,
                    outcome,
                }),
                None => events.push(BattleEvent::NoSuchItem),
            },
            PlayerAction::Flee => {
                let chance = flee_chance(self.enemies.len());
                let success = rng.gen_range(1..=100) <= chance;
                events.push(BattleEvent::FleeAttempt { chance, success });
                if success {
                    self.finish(BattleOutcome::Escaped);
                    return;
                }
            }
            PlayerAction::Attack { .. }
            | PlayerAction::Counterattack { .. }
            | PlayerAction::Forfeit => events.push(BattleEvent::TurnForfeited),
        }

        self.after_player_side(BattlePhase::PetTurn);
    }

    /// Removes a dead enemy hit by the player and pays out gold.
    fn resolve_player_kill(
        &mut self,
        index: usize,
        player: &mut Player,
        rng: &mut impl Rng,
        events: &mut Vec<BattleEvent>,
    ) {
        if self.enemies[index].is_alive() {
            return;
        }
        let enemy = self.enemies.remove(index);
        let mut gold = rng.gen_range(KILL_GOLD_MIN..=KILL_GOLD_MAX);
        if player.status.is_active(StatusKind::LuckBoost) {
            gold = gold.max(rng.gen_range(KILL_GOLD_MIN..=KILL_GOLD_MAX));
        }
        player.earn_gold(gold);
        events.push(BattleEvent::EnemyDefeated {
            name: enemy.name,
            gold: Some(gold),
        });
    }

    fn pet_turn(&mut self, player: &mut Player, rng: &mut impl Rng, events: &mut Vec<BattleEvent>) {
        if self.pet_stunned {
            self.pet_stunned = false;
            if let Some(pet) = player.living_pet() {
                events.push(BattleEvent::Stunned {
                    name: pet.name.clone(),
                });
            }
        } else if let Some(pet) = player.living_pet() {
            if !self.enemies.is_empty() {
                let index = rng.gen_range(0..self.enemies.len());
                let enemy = &mut self.enemies[index];
                enemy.take_damage(pet.attack);
                events.push(BattleEvent::PetAttacked {
                    pet: pet.name.clone(),
                    target: enemy.name.clone(),
                    damage: pet.attack,
                    remaining: enemy.displayed_health(),
                });
                if !enemy.is_alive() {
                    let enemy = self.enemies.remove(index);
                    events.push(BattleEvent::EnemyDefeated {
                        name: enemy.name,
                        gold: None,
                    });
                }
            }
        }

        self.after_player_side(BattlePhase::EnemyTurn);
    }

    fn enemy_turn(&mut self, player: &mut Player, rng: &mut impl Rng, events: &mut Vec<BattleEvent>) {
        for index in 0..self.enemies.len() {
            let enemy = &mut self.enemies[index];
            if !enemy.is_alive() {
                continue;
            }

            let target = if player.has_living_pet() && rng.gen_bool(PET_TARGET_CHANCE) {
                Target::Pet
            } else {
                Target::Player
            };

            match target {
                Target::Player => {
                    strike(enemy, player, events);
                    if !player.is_alive() {
                        self.finish(BattleOutcome::Defeat);
                        return;
                    }
                }
                Target::Pet => {
                    if let Some(pet) = player.pet.as_mut() {
                        strike(enemy, pet, events);
                        if !pet.is_alive() {
                            events.push(BattleEvent::PetFell {
                                name: pet.name.clone(),
                            });
                        }
                    }
                }
            }
        }

        self.phase = BattlePhase::EndOfRound;
    }

    fn end_of_round(&mut self, player: &mut Player, events: &mut Vec<BattleEvent>) {
        let report = player.tick_status();
        self.player_stunned = report.was_stunned;
        push_tick_events(player, &report, events);

        if let Some(pet) = player.living_pet_mut() {
            let report = pet.tick_status();
            self.pet_stunned = report.was_stunned;
            push_tick_events(pet, &report, events);
            if !pet.is_alive() {
                events.push(BattleEvent::PetFell {
                    name: pet.name.clone(),
                });
            }
        } else {
            self.pet_stunned = false;
        }

        for enemy in self.enemies.iter_mut() {
            let report = enemy.tick_status();
            push_tick_events(enemy, &report, events);
        }

        // Deferred removal: collect the fallen only after every tick has run.
        let (alive, fallen): (Vec<Enemy>, Vec<Enemy>) =
            self.enemies.drain(..).partition(|e| e.is_alive());
        self.enemies = alive;
        for enemy in fallen {
            events.push(BattleEvent::EnemyDefeated {
                name: enemy.name,
                gold: None,
            });
        }

        if !player.is_alive() {
            self.finish(BattleOutcome::Defeat);
        } else if self.enemies.is_empty() {
            self.finish(BattleOutcome::Victory);
        } else {
            self.round += 1;
            self.phase = BattlePhase::PlayerTurn;
        }
    }
}

/// One enemy attack against `target`, followed by the enemy's ability.
fn strike(enemy: &mut Enemy, target: &mut dyn Entity, events: &mut Vec<BattleEvent>) {
    let damage = target.mitigate(enemy.attack);
    target.take_damage(damage);
    events.push(BattleEvent::EnemyAttacked {
        enemy: enemy.name.clone(),
        target: target.name().to_string(),
        damage,
        remaining: target.displayed_health(),
    });

    let amount = match enemy.ability {
        Ability::None => return,
        Ability::Poison => {
            target.status_mut().set(StatusKind::Poison, POISON_DURATION);
            POISON_DURATION as i32
        }
        Ability::Stun => {
            target.status_mut().set(StatusKind::Stunned, STUN_DURATION);
            STUN_DURATION as i32
        }
        Ability::Drain => {
            let drained = (damage as f64 * DRAIN_FRACTION) as i32;
            enemy.heal(drained);
            drained
        }
        Ability::Fire => {
            target.status_mut().set(StatusKind::Burn, BURN_DURATION);
            BURN_DURATION as i32
        }
        Ability::DoubleAttack => {
            target.take_damage(damage);
            damage
        }
    };

    events.push(BattleEvent::AbilityTriggered {
        enemy: enemy.name.clone(),
        target: target.name().to_string(),
        ability: enemy.ability,
        amount,
    });
}

fn push_tick_events(owner: &dyn Entity, report: &TickReport, events: &mut Vec<BattleEvent>) {
    for (kind, damage) in [
        (StatusKind::Poison, report.poison_damage),
        (StatusKind::Burn, report.burn_damage),
    ] {
        if damage > 0 {
            events.push(BattleEvent::StatusDamage {
                name: owner.name().to_string(),
                kind,
                damage,
                remaining: owner.displayed_health(),
            });
        }
    }
    for kind in &report.worn_off {
        events.push(BattleEvent::EffectWornOff {
            name: owner.name().to_string(),
            kind: *kind,
        });
    }
}

/// Builds the combat menu shown at the start of each player turn.
pub fn combat_menu() -> Menu {
    Menu::new("Your turn!")
        .option("1", "Attack")
        .option("2", "Use Item")
        .option("3", "Counterattack (High risk, high reward)")
        .option("4", "Try to Flee")
        .with_default("1")
}

/// Asks the player for their action. Any invalid answer forfeits the turn.
pub fn prompt_player_action(
    battle: &Battle,
    player: &Player,
    input: &mut impl InputProvider,
) -> PlayerAction {
    match input.choose(&combat_menu()).trim() {
        "1" => prompt_target(battle, input)
            .map_or(PlayerAction::Forfeit, |target| PlayerAction::Attack { target }),
        "2" => prompt_item(player, input)
            .map_or(PlayerAction::Forfeit, |slot| PlayerAction::UseItem { slot }),
        "3" => prompt_target(battle, input).map_or(PlayerAction::Forfeit, |target| {
            PlayerAction::Counterattack { target }
        }),
        "4" => PlayerAction::Flee,
        _ => PlayerAction::Forfeit,
    }
}

fn prompt_target(battle: &Battle, input: &mut impl InputProvider) -> Option<usize> {
    let enemies = battle.enemies();
    if enemies.len() == 1 {
        return Some(0);
    }
    let mut menu = Menu::new("Choose an enemy to target:").with_default("1");
    for (i, enemy) in enemies.iter().enumerate() {
        menu = menu.option(
            (i + 1).to_string(),
            format!("{} (Health: {})", enemy.name, enemy.displayed_health()),
        );
    }
    parse_index(&input.choose(&menu), enemies.len())
}

fn prompt_item(player: &Player, input: &mut impl InputProvider) -> Option<usize> {
    let mut menu = Menu::new("Choose an item to use:").with_default("0");
    for (i, item) in player.inventory.iter().enumerate() {
        menu = menu.option((i + 1).to_string(), item.to_string());
    }
    parse_index(&input.choose(&menu), player.inventory.len())
}

/// Result of an interactive battle.
#[derive(Debug, Clone)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub rounds: u32,
    /// Enemies still standing when the battle ended (non-empty only on escape
    /// or defeat).
    pub survivors: Vec<Enemy>,
}

/// Drives a whole battle, asking `input` for each player decision.
pub fn run_battle(
    player: &mut Player,
    enemies: Vec<Enemy>,
    input: &mut impl InputProvider,
    rng: &mut impl Rng,
) -> BattleReport {
    let mut battle = Battle::new(enemies);
    input.notify(
        &BattleEvent::Started {
            enemies: battle.enemies().iter().map(|e| e.name.clone()).collect(),
        }
        .into(),
    );

    while !battle.is_over() {
        let action = if battle.phase() == BattlePhase::PlayerTurn && !battle.player_stunned() {
            Some(prompt_player_action(&battle, player, input))
        } else {
            None
        };
        for event in battle.advance(player, action, rng) {
            input.notify(&event.into());
        }
    }

    let outcome = battle.outcome().unwrap_or(BattleOutcome::Defeat);
    let rounds = battle.round();
    BattleReport {
        outcome,
        rounds,
        survivors: battle.into_enemies(),
    }
}
