//! Snapshot types for persisting and restoring a registry.
//!
//! Snapshots are the bridge between the in-memory [`crate::Registry`] and
//! whatever durable store sits behind it.

use crate::{error::Result, Error, PlayerName, PlayerRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the snapshot format for future compatibility.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A point-in-time copy of every player record.
///
/// Uses BTreeMap instead of HashMap for deterministic serialization order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    /// Snapshot format version
    pub format_version: u32,
    /// Records keyed by player name
    pub players: BTreeMap<PlayerName, PlayerRecord>,
}

impl Default for RegistrySnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrySnapshot {
    /// Create a new empty snapshot.
    pub fn new() -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            players: BTreeMap::new(),
        }
    }

    /// Add a record to the snapshot.
    pub fn add_player(&mut self, record: PlayerRecord) {
        self.players.insert(record.name.clone(), record);
    }

    /// Get a record from the snapshot.
    pub fn get_player(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.get(name)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Check that every record is filed under its own name and passes
    /// [`PlayerRecord::validate`].
    pub fn validate(&self) -> Result<()> {
        if self.format_version > SNAPSHOT_FORMAT_VERSION {
            return Err(Error::InvalidSnapshot(format!(
                "unsupported snapshot format version: {} (max supported: {})",
                self.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        for (key, record) in &self.players {
            if *key != record.name {
                return Err(Error::InvalidSnapshot(format!(
                    "record for '{}' stored under key '{}'",
                    record.name, key
                )));
            }
            record
                .validate()
                .map_err(|e| Error::InvalidSnapshot(e.to_string()))?;
        }

        Ok(())
    }

    /// Serialize to JSON with deterministic ordering.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Serialize to pretty JSON with deterministic ordering.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}
