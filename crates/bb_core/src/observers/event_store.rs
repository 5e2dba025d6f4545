//! Persists the ordered event stream of one game.
//!
//! File layout: MessagePack (named fields) → LZ4 with prepended size →
//! SHA-256 of the compressed bytes appended as a 32-byte trailer.

use std::fs;
use std::path::{Path, PathBuf};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::engine::observer::GameObserver;
use crate::error::StoreError;
use crate::models::GameEvent;

/// Bumped whenever the stored layout changes.
pub const STORE_VERSION: u32 = 1;

const CHECKSUM_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct StoredGame {
    version: u32,
    events: Vec<GameEvent>,
}

/// Acknowledgment returned by [`EventStore::close`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreReceipt {
    pub events: usize,
    /// `None` when nothing was written.
    pub path: Option<PathBuf>,
    pub bytes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    path: Option<PathBuf>,
    events: Vec<GameEvent>,
}

impl EventStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path, events: Vec::new() }
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Writes the stream to the configured path, if any.
    pub fn close(&mut self) -> Result<StoreReceipt, StoreError> {
        let Some(path) = &self.path else {
            return Ok(StoreReceipt { events: self.events.len(), path: None, bytes: 0 });
        };

        let bytes = encode(&self.events)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &bytes)?;

        info!(path = %path.display(), events = self.events.len(), bytes = bytes.len(), "Event store written");
        Ok(StoreReceipt { events: self.events.len(), path: Some(path.clone()), bytes: bytes.len() })
    }

    /// Reads back a stream written by [`close`](Self::close).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<GameEvent>, StoreError> {
        let bytes = fs::read(path.as_ref())?;
        decode(&bytes).map_err(|e| {
            if matches!(e, StoreError::ChecksumMismatch) {
                warn!(path = %path.as_ref().display(), "Event store checksum mismatch");
            }
            e
        })
    }
}

pub fn encode(events: &[GameEvent]) -> Result<Vec<u8>, StoreError> {
    let stored = StoredGame { version: STORE_VERSION, events: events.to_vec() };
    let msgpack = to_vec_named(&stored)?;
    let mut out = compress_prepend_size(&msgpack);
    let checksum = Sha256::digest(&out);
    out.extend_from_slice(&checksum);
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<Vec<GameEvent>, StoreError> {
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(StoreError::Corrupted);
    }

    let (payload, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if Sha256::digest(payload).as_slice() != checksum {
        return Err(StoreError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| StoreError::Decompression)?;
    let stored: StoredGame = from_slice(&msgpack)?;
    if stored.version != STORE_VERSION {
        return Err(StoreError::VersionMismatch { found: stored.version, expected: STORE_VERSION });
    }
    Ok(stored.events)
}

impl GameObserver for EventStore {
    fn notify_game_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "EventStore"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Count, Matchup, PlayerId, TeamId};
    use tempfile::tempdir;

    fn sample_events() -> Vec<GameEvent> {
        let matchup = Matchup { hitter: PlayerId(1), pitcher: PlayerId(2), offense: TeamId(1), defense: TeamId(2) };
        vec![
            GameEvent::Ball { matchup, count: Count { balls: 1, strikes: 0 } },
            GameEvent::Single { matchup },
            GameEvent::Out { matchup, outs: 1 },
        ]
    }

    #[test]
    fn test_in_memory_close_writes_nothing() {
        let mut store = EventStore::new(None);
        for event in sample_events() {
            store.notify_game_event(&event);
        }
        let receipt = store.close().unwrap();
        assert_eq!(receipt, StoreReceipt { events: 3, path: None, bytes: 0 });
    }

    #[test]
    fn test_written_file_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("games").join("game-1.bbev");
        let mut store = EventStore::new(Some(path.clone()));
        for event in sample_events() {
            store.notify_game_event(&event);
        }
        let receipt = store.close().unwrap();
        assert_eq!(receipt.path.as_deref(), Some(path.as_path()));
        assert!(receipt.bytes > CHECKSUM_LEN);
        assert_eq!(EventStore::load(&path).unwrap(), sample_events());
    }

    #[test]
    fn test_corrupted_trailer_is_detected() {
        let mut bytes = encode(&sample_events()).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }
        assert!(matches!(decode(&bytes), Err(StoreError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_file_is_corrupted() {
        assert!(matches!(decode(&[0u8; 8]), Err(StoreError::Corrupted)));
    }
}
