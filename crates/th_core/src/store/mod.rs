// Persistence for game state, match history and the leaderboard.
// MessagePack + LZ4 with versioning and integrity checks for the live game,
// plain JSON for the human-readable records.

pub mod error;
pub mod file;
pub mod format;
pub mod records;

pub use error::StoreError;
pub use file::FileStore;
pub use format::{decompress_and_deserialize, serialize_and_compress, SavedGame};
pub use records::{HistoryEntry, HistoryPlayer, Leaderboard, LeaderboardEntry, HISTORY_LIMIT};

use crate::engine::GameState;
use crate::models::player::Player;

pub const SAVE_VERSION: u32 = 1;

/// Persistence hooks the engine drives at well-defined points: the current
/// game after every in-play mutation, history and leaderboard once at game
/// end. Implementations log their own failures; play never stops for them.
pub trait GameStore {
    fn save_current(&mut self, state: &GameState);
    fn load_current(&self) -> Result<Option<GameState>, StoreError>;
    fn clear_current(&mut self);
    fn add_to_history(&mut self, entry: &HistoryEntry);
    fn update_leaderboard(&mut self, players: &[Player]);
}
