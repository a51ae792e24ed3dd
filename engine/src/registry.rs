//! Registry - the player record store.
//!
//! [`PlayerStore`] is the lookup/mutation interface the rest of the engine
//! consumes. [`Registry`] is the in-memory implementation.

use crate::{
    error::Result,
    query::{self, Filter, SortOrder},
    snapshot::RegistrySnapshot,
    Error, PlayerName, PlayerRecord, Role,
};
use std::collections::HashMap;

/// Record lookup and mutation, keyed by unique player name.
///
/// Implementations are responsible for serializing writes: [`commit`] must
/// either store every record it is given or none of them.
///
/// [`commit`]: PlayerStore::commit
pub trait PlayerStore {
    /// Insert a new record. Records with inconsistent counters are rejected.
    fn create(&mut self, record: PlayerRecord) -> Result<&PlayerRecord>;

    /// Look up a record by exact name.
    fn find_by_name(&self, name: &str) -> Option<&PlayerRecord>;

    /// Remove a record, returning it.
    fn delete_by_name(&mut self, name: &str) -> Result<PlayerRecord>;

    /// Every record, ordered by name.
    fn all(&self) -> Vec<&PlayerRecord>;

    /// Replace existing records in one batch.
    fn commit(&mut self, records: Vec<PlayerRecord>) -> Result<()>;

    /// Remove a player from the roster.
    fn ban(&mut self, name: &str) -> Result<PlayerRecord> {
        match self.delete_by_name(name) {
            Ok(record) => {
                tracing::info!(player = %name, "player banned");
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(player = %name, error = %err, "ban failed");
                Err(err)
            }
        }
    }

    /// Start a filtered, ordered view over every record.
    fn query(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self.all())
    }
}

/// In-memory player store.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    players: HashMap<PlayerName, PlayerRecord>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
        }
    }

    /// Create a registry holding `records`. Fails on a repeated name.
    pub fn with_players(records: impl IntoIterator<Item = PlayerRecord>) -> Result<Self> {
        let mut registry = Self::new();
        for record in records {
            registry.create(record)?;
        }
        Ok(registry)
    }

    /// Check if a player is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    /// Count of registered players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Export every record as a snapshot.
    pub fn export_state(&self) -> RegistrySnapshot {
        let mut snapshot = RegistrySnapshot::new();
        for record in self.players.values() {
            snapshot.add_player(record.clone());
        }
        snapshot
    }

    /// Replace the current roster with a snapshot's.
    pub fn import_state(&mut self, snapshot: RegistrySnapshot) -> Result<()> {
        snapshot.validate()?;

        self.players = snapshot.players.into_iter().collect();

        tracing::info!(players = self.players.len(), "registry restored from snapshot");
        Ok(())
    }
}

impl PlayerStore for Registry {
    fn create(&mut self, record: PlayerRecord) -> Result<&PlayerRecord> {
        use std::collections::hash_map::Entry;

        record.validate()?;

        match self.players.entry(record.name.clone()) {
            Entry::Occupied(_) => Err(Error::PlayerAlreadyExists(record.name)),
            Entry::Vacant(slot) => {
                tracing::debug!(player = %record.name, "player created");
                Ok(slot.insert(record))
            }
        }
    }

    fn find_by_name(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.get(name)
    }

    fn delete_by_name(&mut self, name: &str) -> Result<PlayerRecord> {
        self.players
            .remove(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    fn all(&self) -> Vec<&PlayerRecord> {
        let mut records: Vec<_> = self.players.values().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    fn commit(&mut self, records: Vec<PlayerRecord>) -> Result<()> {
        // Every target must exist before anything is written
        if let Some(missing) = records.iter().find(|r| !self.players.contains_key(&r.name)) {
            return Err(Error::NotFound(missing.name.clone()));
        }

        for record in records {
            self.players.insert(record.name.clone(), record);
        }
        Ok(())
    }
}

/// Builder for querying player records.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    records: Vec<&'a PlayerRecord>,
    filters: Vec<Filter>,
    sort: SortOrder,
}

impl<'a> QueryBuilder<'a> {
    /// Query over an explicit record set.
    pub fn new(records: Vec<&'a PlayerRecord>) -> Self {
        Self {
            records,
            filters: Vec::new(),
            sort: SortOrder::Unsorted,
        }
    }

    /// Only players from `country`.
    pub fn country(self, country: impl Into<String>) -> Self {
        self.filter(Filter::Country(country.into()))
    }

    /// Only players with exactly `role`.
    pub fn role(self, role: impl Into<Role>) -> Self {
        self.filter(Filter::Role(role.into()))
    }

    /// Add an arbitrary filter. Filters combine with AND.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Order the results.
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Shorthand for `sort(SortOrder::MatchesDescending)`.
    pub fn descending_by_matches(self) -> Self {
        self.sort(SortOrder::MatchesDescending)
    }

    /// Get all matching records.
    pub fn all(self) -> Vec<&'a PlayerRecord> {
        query::query(self.records, &self.filters, self.sort)
    }

    /// Names of all matching records.
    pub fn names(self) -> Vec<&'a str> {
        self.all().into_iter().map(|r| r.name.as_str()).collect()
    }

    /// Get the first matching record.
    pub fn first(self) -> Option<&'a PlayerRecord> {
        self.all().into_iter().next()
    }

    /// Count matching records.
    pub fn count(self) -> usize {
        let filters = self.filters;
        self.records
            .into_iter()
            .filter(|r| filters.iter().all(|f| f.matches(r)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_registry() -> Registry {
        Registry::with_players(vec![
            PlayerRecord::new("Mohammed Amir", "Pakistan", Role::Bowler).with_matches(36),
            PlayerRecord::new("Nathan Lyon", "Australia", Role::Bowler).with_matches(100),
            PlayerRecord::new("Steve Smith", "Australia", Role::Batter).with_matches(77),
            PlayerRecord::new("Ravindra Jadeja", "India", Role::AllRounder).with_matches(51),
        ])
        .unwrap()
    }

    #[test]
    fn create_and_find() {
        let mut registry = Registry::new();
        let created = registry
            .create(PlayerRecord::new("Ajinkya Rahane", "India", Role::Batter))
            .unwrap();
        assert_eq!(created.name, "Ajinkya Rahane");

        let found = registry.find_by_name("Ajinkya Rahane").unwrap();
        assert_eq!(found.country, "India");
        assert!(registry.find_by_name("ajinkya rahane").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn create_duplicate() {
        let mut registry = test_registry();
        let result = registry.create(PlayerRecord::new("Nathan Lyon", "Australia", Role::Bowler));
        assert_eq!(
            result.unwrap_err(),
            Error::PlayerAlreadyExists("Nathan Lyon".into())
        );
        assert_eq!(registry.find_by_name("Nathan Lyon").unwrap().matches, Some(100));
    }

    #[test]
    fn create_rejects_inconsistent_record() {
        let mut registry = test_registry();
        let mut record = PlayerRecord::new("Hanuma Vihari", "India", Role::Batter);
        record.innings_batted = Some(1);
        record.not_out = Some(5);

        let err = registry.create(record).unwrap_err();
        assert!(matches!(err, Error::InconsistentRecord { not_out: 5, innings: 1, .. }));
        assert_eq!(err.name(), Some("Hanuma Vihari"));
        assert!(!registry.contains("Hanuma Vihari"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn import_state_checks_keys() {
        let mut snapshot = test_registry().export_state();
        snapshot.players.insert(
            "Shane Warne".into(),
            PlayerRecord::new("Nathan Lyon", "Australia", Role::Bowler),
        );

        let mut registry = Registry::new();
        assert!(matches!(
            registry.import_state(snapshot),
            Err(Error::InvalidSnapshot(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn delete_by_name() {
        let mut registry = test_registry();
        let removed = registry.delete_by_name("Steve Smith").unwrap();
        assert_eq!(removed.name, "Steve Smith");
        assert!(registry.find_by_name("Steve Smith").is_none());

        let result = registry.delete_by_name("Steve Smith");
        assert_eq!(result.unwrap_err(), Error::NotFound("Steve Smith".into()));
    }

    #[test]
    fn ban_removes_player() {
        let mut registry = test_registry();
        registry.ban("Mohammed Amir").unwrap();
        assert!(registry.find_by_name("Mohammed Amir").is_none());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn ban_unknown_leaves_registry_unchanged() {
        let mut registry = test_registry();
        let before = registry.export_state();

        let err = registry.ban("Shane Warne").unwrap_err();
        assert_eq!(err, Error::NotFound("Shane Warne".into()));
        assert_eq!(registry.export_state(), before);
    }

    #[test]
    fn all_is_ordered_by_name() {
        let registry = test_registry();
        let names: Vec<_> = registry.all().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Mohammed Amir", "Nathan Lyon", "Ravindra Jadeja", "Steve Smith"]
        );
    }

    #[test]
    fn commit_is_all_or_nothing() {
        let mut registry = test_registry();

        let mut lyon = registry.find_by_name("Nathan Lyon").unwrap().clone();
        lyon.matches = Some(101);
        let ghost = PlayerRecord::new("Shane Warne", "Australia", Role::Bowler);

        let result = registry.commit(vec![lyon.clone(), ghost]);
        assert_eq!(result.unwrap_err(), Error::NotFound("Shane Warne".into()));
        assert_eq!(registry.find_by_name("Nathan Lyon").unwrap().matches, Some(100));

        registry.commit(vec![lyon]).unwrap();
        assert_eq!(registry.find_by_name("Nathan Lyon").unwrap().matches, Some(101));
    }

    #[test]
    fn query_builder() {
        let registry = test_registry();

        assert_eq!(
            registry.query().country("Australia").names(),
            vec!["Nathan Lyon", "Steve Smith"]
        );
        assert_eq!(
            registry.query().role(Role::Bowler).descending_by_matches().names(),
            vec!["Nathan Lyon", "Mohammed Amir"]
        );
        assert_eq!(registry.query().role("All-rounder").count(), 1);
        assert_eq!(
            registry
                .query()
                .descending_by_matches()
                .first()
                .map(|r| r.name.as_str()),
            Some("Nathan Lyon")
        );
        assert_eq!(registry.query().country("England").count(), 0);
    }
}
