use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use super::error::StoreError;
use super::SAVE_VERSION;
use crate::engine::GameState;

/// On-disk wrapper around a live game.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SavedGame {
    /// Save format version for forward-compatibility checks.
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub timestamp: u64,

    pub state: GameState,
}

impl SavedGame {
    pub fn new(state: GameState) -> Self {
        SavedGame { version: SAVE_VERSION, timestamp: current_timestamp(), state }
    }
}

/// Serialize and compress a saved game.
pub fn serialize_and_compress(save: &SavedGame) -> Result<Vec<u8>, StoreError> {
    // 1. Serialize to MessagePack with field names
    let msgpack = to_vec_named(save).map_err(StoreError::Serialization)?;

    // 2. Compress with LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. Add SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a saved game.
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<SavedGame, StoreError> {
    // Check minimum size (header + checksum)
    if bytes.len() < 4 + 32 {
        return Err(StoreError::Corrupted);
    }

    // Split payload and checksum
    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    // Verify checksum
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(StoreError::ChecksumMismatch);
    }

    // Decompress
    let msgpack = decompress_size_prepended(payload).map_err(|_| StoreError::Decompression)?;

    // Deserialize
    let save: SavedGame = from_slice(&msgpack).map_err(StoreError::Deserialization)?;

    // Validate version
    if save.version > SAVE_VERSION {
        return Err(StoreError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::setup::{GameSetup, ModeKind};

    fn sample_state() -> GameState {
        let setup = GameSetup::with_defaults(
            ModeKind::Classic,
            vec!["Ana".to_string(), "Lou".to_string()],
        );
        GameState::from_setup(&setup)
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let save = SavedGame::new(sample_state());

        let serialized = serialize_and_compress(&save).unwrap();
        let deserialized = decompress_and_deserialize(&serialized).unwrap();

        assert_eq!(save.version, deserialized.version);
        assert_eq!(save.state, deserialized.state);
    }

    #[test]
    fn test_checksum_validation() {
        let save = SavedGame::new(sample_state());
        let mut serialized = serialize_and_compress(&save).unwrap();

        // Corrupt the checksum
        if let Some(last) = serialized.last_mut() {
            *last = last.wrapping_add(1);
        }

        let result = decompress_and_deserialize(&serialized);
        assert!(matches!(result, Err(StoreError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_data_is_corrupted() {
        let result = decompress_and_deserialize(&[0u8; 10]);
        assert!(matches!(result, Err(StoreError::Corrupted)));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut save = SavedGame::new(sample_state());
        save.version = SAVE_VERSION + 1;

        let serialized = serialize_and_compress(&save).unwrap();
        let result = decompress_and_deserialize(&serialized);
        assert!(matches!(
            result,
            Err(StoreError::VersionMismatch { found, expected: SAVE_VERSION }) if found == SAVE_VERSION + 1
        ));
    }
}
