//! Game state, tuning constants and the session loop.

pub mod constants;
pub mod events;
pub mod game_loop;
pub mod game_state;

pub use events::{GameEvent, GameOutcome};
pub use game_loop::{enter_room, player_stats, run_game, take_step};
pub use game_state::GameState;
