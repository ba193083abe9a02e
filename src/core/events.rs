//! Narration emitted by the game for the front-end to present.

use crate::combat::BattleEvent;
use crate::dungeon::DungeonEvent;
use crate::shop::ShopEvent;
use std::fmt;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Escaped,
    Died,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Battle(BattleEvent),
    Dungeon(DungeonEvent),
    Shop(ShopEvent),
    InvalidChoice { input: String },
    PetBuried { name: String },
    /// Informational text block such as the map or the stats panel.
    Panel { title: String, lines: Vec<String> },
    Saved,
    SaveFailed { reason: String },
    RunEnded(GameOutcome),
}

impl From<BattleEvent> for GameEvent {
    fn from(event: BattleEvent) -> Self {
        GameEvent::Battle(event)
    }
}

impl From<DungeonEvent> for GameEvent {
    fn from(event: DungeonEvent) -> Self {
        GameEvent::Dungeon(event)
    }
}

impl From<ShopEvent> for GameEvent {
    fn from(event: ShopEvent) -> Self {
        GameEvent::Shop(event)
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Battle(event) => fmt::Display::fmt(event, f),
            GameEvent::Dungeon(event) => fmt::Display::fmt(event, f),
            GameEvent::Shop(event) => fmt::Display::fmt(event, f),
            GameEvent::InvalidChoice { input } => {
                write!(f, "Invalid choice '{}'! Choose a valid option.", input)
            }
            GameEvent::PetBuried { name } => {
                write!(f, "You lay {} to rest. It will not follow you further.", name)
            }
            GameEvent::Panel { title, lines } => {
                write!(f, "=== {} ===", title)?;
                for line in lines {
                    write!(f, "\n{}", line)?;
                }
                Ok(())
            }
            GameEvent::Saved => write!(f, "Game saved."),
            GameEvent::SaveFailed { reason } => write!(f, "Error saving game: {}", reason),
            GameEvent::RunEnded(GameOutcome::Escaped) => {
                write!(f, "Congratulations! You successfully escaped the dungeon!")
            }
            GameEvent::RunEnded(GameOutcome::Died) => write!(f, "You have died... Game Over."),
        }
    }
}
