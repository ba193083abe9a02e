//! Single-slot JSON save file.

use crate::character::Player;
use crate::core::constants::{SAVE_FILE_NAME, SAVE_VERSION};
use crate::core::game_state::GameState;
use crate::dungeon::Dungeon;
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is corrupt: {0}")]
    Corrupt(String),
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// A missing home directory surfaces from `persistence` as `NotFound`.
fn data_dir_error(e: io::Error) -> SaveError {
    match e.kind() {
        io::ErrorKind::NotFound => SaveError::NoHomeDir,
        _ => SaveError::Io(e),
    }
}

/// On-disk layout of the save slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveData {
    version: u32,
    /// Unix timestamp of the save
    saved_at: i64,
    player: Player,
    dungeon: Dungeon,
}

/// Manages the save slot at a fixed path.
#[derive(Debug, Clone)]
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses ~/.delve/savegame.json
    pub fn new() -> Result<Self, SaveError> {
        let save_path = persistence::data_path(SAVE_FILE_NAME).map_err(data_dir_error)?;
        Ok(Self { save_path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Writes the state. A pet that has fallen is left out of the save.
    pub fn save(&self, state: &GameState) -> Result<(), SaveError> {
        let mut player = state.player.clone();
        player.bury_fallen_pet();

        let data = SaveData {
            version: SAVE_VERSION,
            saved_at: chrono::Utc::now().timestamp(),
            player,
            dungeon: state.dungeon.clone(),
        };
        persistence::write_json(&self.save_path, &data)?;
        log::info!("saved game to {}", self.save_path.display());
        Ok(())
    }

    /// Loads the slot. A missing file is reported as `Io` with `NotFound`.
    pub fn load(&self) -> Result<GameState, SaveError> {
        let data: SaveData = persistence::read_json(&self.save_path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => SaveError::Corrupt(e.to_string()),
                _ => SaveError::Io(e),
            })?
            .ok_or_else(|| {
                SaveError::Io(io::Error::new(io::ErrorKind::NotFound, "no save file"))
            })?;

        if data.version > SAVE_VERSION {
            return Err(SaveError::Corrupt(format!(
                "unsupported save version {}",
                data.version
            )));
        }
        if !data.dungeon.is_consistent() {
            return Err(SaveError::Corrupt(format!(
                "room index {} is outside the {:?} sequence",
                data.dungeon.current_index, data.dungeon.active
            )));
        }

        Ok(GameState::new(data.player, data.dungeon))
    }

    /// Loads the slot, treating any failure as "no save".
    pub fn load_or_none(&self) -> Option<GameState> {
        match self.load() {
            Ok(state) => Some(state),
            Err(SaveError::Io(e)) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Ignoring save at {}: {}", self.save_path.display(), e);
                None
            }
        }
    }

    /// Empties the slot.
    pub fn clear(&self) -> Result<(), SaveError> {
        persistence::remove_if_exists(&self.save_path)?;
        Ok(())
    }
}
