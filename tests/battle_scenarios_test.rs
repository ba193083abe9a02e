//! Integration test: battle engine scenarios
//!
//! Drives whole battles through the public API: scripted input, seeded RNG.

use delve::character::{Entity, Pet, Player, StatusKind};
use delve::combat::{
    flee_chance, run_battle, Ability, Battle, BattleEvent, BattleOutcome, BattlePhase, Enemy,
    PlayerAction,
};
use delve::core::GameEvent;
use delve::input::ScriptedInput;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

/// A target that can absorb any number of hits and never strikes back.
fn training_dummy() -> Enemy {
    Enemy::new("Training Dummy", 10_000, 0)
}

#[test]
fn test_goblin_falls_to_three_attacks() {
    let mut rng = create_test_rng();
    let mut player = Player::with_stats("Test", 100, 10, 0);
    let mut battle = Battle::new(vec![Enemy::named("Goblin").unwrap()]);

    for _ in 0..2 {
        battle.play_round(&mut player, PlayerAction::Attack { target: 0 }, &mut rng);
        assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
    }
    let events = battle.play_round(&mut player, PlayerAction::Attack { target: 0 }, &mut rng);

    assert_eq!(battle.outcome(), Some(BattleOutcome::Victory));
    assert!(battle.enemies().is_empty());
    // Two goblin counter-hits of 5 before it fell.
    assert_eq!(player.health, 90);
    assert!((10..=50).contains(&player.gold));
    assert!(events
        .iter()
        .any(|e| matches!(e, BattleEvent::EnemyDefeated { name, gold: Some(_) } if name == "Goblin")));
    assert_eq!(events.last(), Some(&BattleEvent::Ended(BattleOutcome::Victory)));
}

#[test]
fn test_drain_heals_half_of_damage() {
    let mut rng = create_test_rng();
    let mut player = Player::with_stats("Test", 100, 10, 0);
    let mage = Enemy::named("Dark Mage").unwrap();
    assert_eq!(mage.ability, Ability::Drain);
    let starting = mage.health;
    let mut battle = Battle::new(vec![mage]);

    battle.play_round(&mut player, PlayerAction::Forfeit, &mut rng);

    assert_eq!(player.health, 88);
    assert_eq!(battle.enemies()[0].health, starting + 6);
}

#[test]
fn test_flee_chance_table() {
    assert_eq!(flee_chance(1), 30);
    assert_eq!(flee_chance(2), 20);
    assert_eq!(flee_chance(3), 10);
    assert_eq!(flee_chance(4), 10);
    assert_eq!(flee_chance(9), 10);
}

#[test]
fn test_fleeing_eventually_escapes_with_survivors() {
    let mut rng = create_test_rng();
    let mut player = Player::with_stats("Test", 100, 10, 0);
    let mut battle = Battle::new(vec![training_dummy()]);

    let mut attempts = 0;
    while !battle.is_over() {
        battle.play_round(&mut player, PlayerAction::Flee, &mut rng);
        attempts += 1;
        assert!(attempts < 500, "flee never succeeded");
    }

    assert_eq!(battle.outcome(), Some(BattleOutcome::Escaped));
    assert_eq!(battle.into_enemies().len(), 1);
}

#[test]
fn test_counterattack_lands_about_half_the_time() {
    let mut rng = create_test_rng();
    let trials = 2000;
    let mut landed = 0;

    for _ in 0..trials {
        let mut player = Player::with_stats("Test", 100, 10, 0);
        let mut battle = Battle::new(vec![training_dummy()]);
        let events = battle.play_round(&mut player, PlayerAction::Counterattack { target: 0 }, &mut rng);
        if events
            .iter()
            .any(|e| matches!(e, BattleEvent::CounterattackLanded { damage: 20, .. }))
        {
            landed += 1;
        }
    }

    let rate = landed as f64 / trials as f64;
    assert!((0.45..=0.55).contains(&rate), "counterattack rate {}", rate);
}

#[test]
fn test_poison_ticks_three_times_then_stops() {
    let mut rng = create_test_rng();
    let mut player = Player::with_stats("Test", 100, 10, 0);
    player.status.set(StatusKind::Poison, 3);
    let mut battle = Battle::new(vec![training_dummy()]);

    for expected in [97, 94, 91, 91] {
        battle.play_round(&mut player, PlayerAction::Forfeit, &mut rng);
        assert_eq!(player.health, expected);
    }
    assert!(!player.status.is_active(StatusKind::Poison));
}

#[test]
fn test_stunned_player_loses_next_turn() {
    let mut rng = create_test_rng();
    let mut player = Player::with_stats("Test", 100, 10, 0);
    let golem = Enemy::named("Stone Golem").unwrap();
    let golem_health = golem.health;
    let mut battle = Battle::new(vec![golem]);

    battle.play_round(&mut player, PlayerAction::Forfeit, &mut rng);
    assert!(battle.player_stunned());

    let events = battle.play_round(&mut player, PlayerAction::Attack { target: 0 }, &mut rng);
    assert!(matches!(events.first(), Some(BattleEvent::Stunned { .. })));
    assert_eq!(battle.enemies()[0].health, golem_health);
}

#[test]
fn test_scripted_battle_with_pet() {
    let mut rng = create_test_rng();
    let mut player = Player::new("Test");
    player.pet = Some(Pet::new("Shadow Wolf", 40, 8));
    let mut input = ScriptedInput::default();

    let report = run_battle(
        &mut player,
        vec![Enemy::named("Skeleton").unwrap(), Enemy::named("Goblin").unwrap()],
        &mut input,
        &mut rng,
    );

    assert_eq!(report.outcome, BattleOutcome::Victory);
    assert!(report.survivors.is_empty());
    assert!(player.is_alive());
    assert!(input
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::Battle(BattleEvent::PetAttacked { .. }))));
    assert_eq!(
        input.events.last(),
        Some(&GameEvent::Battle(BattleEvent::Ended(BattleOutcome::Victory)))
    );
}

#[test]
fn test_dragon_defeats_weak_player() {
    let mut rng = create_test_rng();
    let mut player = Player::with_stats("Test", 30, 1, 0);
    let mut input = ScriptedInput::default();

    let report = run_battle(
        &mut player,
        vec![Enemy::named("Ancient Dragon").unwrap()],
        &mut input,
        &mut rng,
    );

    assert_eq!(report.outcome, BattleOutcome::Defeat);
    assert!(!player.is_alive());
    assert_eq!(player.displayed_health(), 0);
    assert_eq!(report.survivors.len(), 1);
}
