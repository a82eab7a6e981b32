//! Directory-backed store: one compressed save for the live game, JSON for
//! history and leaderboard.

use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::error::StoreError;
use super::format::{decompress_and_deserialize, serialize_and_compress, SavedGame};
use super::records::{push_history, HistoryEntry, Leaderboard};
use super::GameStore;
use crate::engine::GameState;
use crate::models::player::Player;

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn current_path(&self) -> PathBuf {
        self.dir.join("current.thg")
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join("history.json")
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.dir.join("leaderboard.json")
    }

    pub fn load_history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let path = self.history_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }

    pub fn load_leaderboard(&self) -> Result<Leaderboard, StoreError> {
        let path = self.leaderboard_path();
        if !path.exists() {
            return Ok(Leaderboard::default());
        }
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }

    fn try_save_current(&self, state: &GameState) -> Result<(), StoreError> {
        let data = serialize_and_compress(&SavedGame::new(state.clone()))?;
        write_atomic(&self.current_path(), &data)?;
        log::debug!("Saved {} bytes to {:?}", data.len(), self.current_path());
        Ok(())
    }

    fn try_add_to_history(&self, entry: &HistoryEntry) -> Result<(), StoreError> {
        let mut history = self.load_history().unwrap_or_else(|e| {
            log::warn!("History unreadable ({}), starting a new list", e);
            Vec::new()
        });
        push_history(&mut history, entry.clone());
        write_atomic(&self.history_path(), serde_json::to_string_pretty(&history)?.as_bytes())
    }

    fn try_update_leaderboard(&self, players: &[Player]) -> Result<(), StoreError> {
        let mut board = self.load_leaderboard().unwrap_or_else(|e| {
            log::warn!("Leaderboard unreadable ({}), starting a new one", e);
            Leaderboard::default()
        });
        board.apply(players);
        write_atomic(&self.leaderboard_path(), serde_json::to_string_pretty(&board)?.as_bytes())
    }
}

impl GameStore for FileStore {
    fn save_current(&mut self, state: &GameState) {
        if let Err(e) = self.try_save_current(state) {
            log::warn!("Failed to save current game: {}", e);
        }
    }

    fn load_current(&self) -> Result<Option<GameState>, StoreError> {
        let path = self.current_path();
        if !path.exists() {
            return Ok(None);
        }
        let mut file = File::open(&path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        let save = decompress_and_deserialize(&data)?;
        Ok(Some(save.state))
    }

    fn clear_current(&mut self) {
        let path = self.current_path();
        if path.exists() {
            if let Err(e) = remove_file(&path) {
                log::warn!("Failed to clear current game: {}", e);
            } else {
                log::info!("Cleared current game save");
            }
        }
    }

    fn add_to_history(&mut self, entry: &HistoryEntry) {
        if let Err(e) = self.try_add_to_history(entry) {
            log::warn!("Failed to record game history: {}", e);
        }
    }

    fn update_leaderboard(&mut self, players: &[Player]) {
        if let Err(e) = self.try_update_leaderboard(players) {
            log::warn!("Failed to update leaderboard: {}", e);
        }
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Atomic write: temp file first, then rename over the target.
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.flush()?;

        // sync_all ensures data is written to disk (portable fsync)
        file.sync_all()?;
    }
    rename(&temp_path, path)?;
    Ok(())
}
