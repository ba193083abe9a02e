//! Session orchestration: path choice, room entry, battles, checkpoints.

use super::constants::VENDOR_CHANCE;
use super::events::{GameEvent, GameOutcome};
use super::game_state::GameState;
use crate::character::{Entity, Player};
use crate::combat::{run_battle, BattleOutcome};
use crate::dungeon::{
    attempt_puzzle, choose_path, dungeon_map, resolve_trap, roll_available_paths, roll_room_gold,
    take_room_item, DungeonEvent, PathKind, TrapChoice,
};
use crate::input::{choose_valid, InputProvider, Menu};
use crate::save_manager::SaveManager;
use crate::shop::{visit_shop, Vendor};
use rand::Rng;

pub const MAP_KEY: &str = "m";
pub const STATS_KEY: &str = "i";

fn notify_all<E: Into<GameEvent>>(input: &mut impl InputProvider, events: impl IntoIterator<Item = E>) {
    for event in events {
        input.notify(&event.into());
    }
}

/// The stats panel lines for `player`.
pub fn player_stats(player: &Player) -> Vec<String> {
    let mut lines = vec![
        format!("Name: {}", player.name),
        format!("Health: {}/{}", player.displayed_health(), player.max_health),
        format!("Attack Power: {}", player.attack),
        format!("Gold: {} coins", player.gold),
    ];
    if let Some(pet) = &player.pet {
        lines.push(format!(
            "Pet: {} (Health: {}, Attack: {})",
            pet.name,
            pet.displayed_health(),
            pet.attack
        ));
    }
    let effects = player.status.active();
    if !effects.is_empty() {
        let effects: Vec<String> = effects
            .iter()
            .map(|(kind, turns)| format!("{} ({})", kind, turns))
            .collect();
        lines.push(format!("Effects: {}", effects.join(", ")));
    }
    if player.inventory.is_empty() {
        lines.push("Inventory: empty".to_string());
    } else {
        lines.push("Inventory:".to_string());
        lines.extend(player.inventory.iter().map(|item| format!("  {}", item)));
    }
    lines
}

fn path_menu(available: &[PathKind]) -> Menu {
    let mut menu = Menu::new("Which path do you choose?");
    for path in available {
        menu = menu.option(path.key(), path.description());
    }
    menu.option(MAP_KEY, "View the dungeon map")
        .option(STATS_KEY, "View your stats")
        .with_default(PathKind::Normal.key())
}

fn trap_menu() -> Menu {
    Menu::new("How do you deal with the trap?")
        .option("1", "Try to dodge the trap (50% success)")
        .option("2", "Try to disarm the trap (30% success)")
        .option("3", "Accept your fate and take the damage")
        .with_default("3")
}

/// Asks for a path among `available`, serving map and stats requests
/// without consuming the step.
fn prompt_path(state: &GameState, available: &[PathKind], input: &mut impl InputProvider) -> PathKind {
    let menu = path_menu(available);
    loop {
        let key = choose_valid(input, &menu);
        match key.as_str() {
            MAP_KEY => input.notify(&GameEvent::Panel {
                title: "Dungeon Map".to_string(),
                lines: dungeon_map(&state.dungeon),
            }),
            STATS_KEY => input.notify(&GameEvent::Panel {
                title: "Player Stats".to_string(),
                lines: player_stats(&state.player),
            }),
            other => {
                if let Some(path) = PathKind::from_key(other) {
                    return path;
                }
            }
        }
    }
}

/// Plays the current room: loose gold, trap, puzzle, battle, item, vendor.
///
/// Stops early if the player dies.
pub fn enter_room(state: &mut GameState, input: &mut impl InputProvider, rng: &mut impl Rng) {
    let GameState { player, dungeon } = state;
    let Some(room) = dungeon.current_room_mut() else {
        log::warn!("cursor does not point at a room");
        return;
    };

    if let Some(event) = roll_room_gold(player, rng) {
        input.notify(&event.into());
    }

    if room.has_trap {
        input.notify(
            &DungeonEvent::TrapSpotted {
                damage: room.trap_damage,
            }
            .into(),
        );
        let key = choose_valid(input, &trap_menu());
        let choice = TrapChoice::from_key(&key).unwrap_or(TrapChoice::Accept);
        notify_all(input, resolve_trap(room, choice, player, rng));
        if !player.is_alive() {
            return;
        }
    }

    if let Some(question) = room.puzzle.as_ref().map(|p| p.question.clone()) {
        let answer = input.answer(&question);
        notify_all(input, attempt_puzzle(room, &answer, player, rng));
    }

    if let Some(enemy) = room.enemy.take() {
        input.notify(
            &DungeonEvent::EnemyAppears {
                name: enemy.name.clone(),
            }
            .into(),
        );
        let report = run_battle(player, vec![enemy], input, rng);
        if let Some(name) = player.bury_fallen_pet() {
            input.notify(&GameEvent::PetBuried { name });
        }
        match report.outcome {
            BattleOutcome::Defeat => return,
            // The enemy keeps its wounds and stays in the room.
            BattleOutcome::Escaped => room.enemy = report.survivors.into_iter().next(),
            BattleOutcome::Victory => {}
        }
    }

    if let Some(event) = take_room_item(room, player) {
        input.notify(&event.into());
    }

    if rng.gen_bool(VENDOR_CHANCE) {
        input.notify(&DungeonEvent::VendorAppears.into());
        let mut vendor = Vendor::new(rng);
        visit_shop(&mut vendor, player, input);
    }
}

/// One step: offer paths, apply the choice, play the room entered.
pub fn take_step(state: &mut GameState, input: &mut impl InputProvider, rng: &mut impl Rng) {
    let available = roll_available_paths(&state.dungeon, rng);
    let path = prompt_path(state, &available, input);

    match choose_path(&mut state.dungeon, &mut state.player, path, &available, rng) {
        Ok(events) => {
            let moved = events
                .iter()
                .any(|e| matches!(e, DungeonEvent::EnteredRoom { .. }));
            notify_all(input, events);
            if moved && state.player.is_alive() {
                enter_room(state, input, rng);
            }
        }
        Err(e) => log::warn!("{}", e),
    }
}

/// Saves a checkpoint, reporting the outcome as an event.
fn checkpoint(state: &GameState, saves: Option<&SaveManager>, input: &mut impl InputProvider) {
    let Some(saves) = saves else {
        return;
    };
    match saves.save(state) {
        Ok(()) => input.notify(&GameEvent::Saved),
        Err(e) => {
            log::warn!("Failed to save game: {}", e);
            input.notify(&GameEvent::SaveFailed {
                reason: e.to_string(),
            });
        }
    }
}

/// Plays until the player dies or reaches the exit, saving after every step.
///
/// The save slot is cleared once the run is over.
pub fn run_game(
    state: &mut GameState,
    input: &mut impl InputProvider,
    saves: Option<&SaveManager>,
    rng: &mut impl Rng,
) -> GameOutcome {
    while !state.is_over() {
        take_step(state, input, rng);
        if state.player.is_alive() {
            checkpoint(state, saves, input);
        }
    }

    let outcome = if state.player.is_alive() {
        input.notify(&DungeonEvent::ExitReached.into());
        GameOutcome::Escaped
    } else {
        GameOutcome::Died
    };
    log::info!("run ended: {:?} with {} gold", outcome, state.player.gold);

    if let Some(saves) = saves {
        if let Err(e) = saves.clear() {
            log::warn!("Failed to clear save: {}", e);
        }
    }
    input.notify(&GameEvent::RunEnded(outcome));
    outcome
}
