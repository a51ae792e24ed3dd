//! Roster seeding.

use crate::{error::Result, Error, PlayerName, PlayerRecord, PlayerStore};
use std::collections::HashSet;

const CLASSICAL_BATTERS: &str = include_str!("../data/classical_batters.json");

/// Parse a JSON array of player records.
///
/// Counters missing from the JSON default to 0; `null` keeps them absent.
/// Every record must pass [`PlayerRecord::validate`].
pub fn load_roster(json: &str) -> Result<Vec<PlayerRecord>> {
    let records: Vec<PlayerRecord> =
        serde_json::from_str(json).map_err(|e| Error::InvalidSeed(e.to_string()))?;

    let mut seen = HashSet::new();
    for record in &records {
        record
            .validate()
            .map_err(|e| Error::InvalidSeed(e.to_string()))?;
        if !seen.insert(record.name.as_str()) {
            return Err(Error::InvalidSeed(format!("duplicate player '{}'", record.name)));
        }
    }
    Ok(records)
}

/// Add every record to `store`, or none if any name is already taken.
pub fn import<S>(store: &mut S, records: Vec<PlayerRecord>) -> Result<Vec<PlayerName>>
where
    S: PlayerStore + ?Sized,
{
    if let Some(taken) = records.iter().find(|r| store.find_by_name(&r.name).is_some()) {
        return Err(Error::PlayerAlreadyExists(taken.name.clone()));
    }

    let mut names = Vec::with_capacity(records.len());
    for record in records {
        names.push(store.create(record)?.name.clone());
    }

    tracing::info!(players = names.len(), "roster imported");
    Ok(names)
}

/// Create records for Lara, Sangakkara, Dravid, Ponting and Tendulkar with
/// their career Test figures.
pub fn import_classical_batters<S>(store: &mut S) -> Result<Vec<PlayerName>>
where
    S: PlayerStore + ?Sized,
{
    import(store, load_roster(CLASSICAL_BATTERS)?)
}
