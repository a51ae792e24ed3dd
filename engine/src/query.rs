//! Filters and orderings over player records.
//!
//! Everything here is a plain function of its input: no lazy state, no store
//! access. [`crate::QueryBuilder`] composes these over a store's records.

use crate::{PlayerRecord, Role};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// An equality filter on a record attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
    Country(String),
    Role(Role),
}

impl Filter {
    pub fn matches(&self, record: &PlayerRecord) -> bool {
        match self {
            Filter::Country(country) => record.country == *country,
            Filter::Role(role) => record.role == *role,
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Keep input order
    #[default]
    Unsorted,
    NameAscending,
    /// Most matches first, ties by name ascending
    MatchesDescending,
}

/// Players from `country`.
pub fn by_country<'a>(
    records: impl IntoIterator<Item = &'a PlayerRecord>,
    country: &str,
) -> Vec<&'a PlayerRecord> {
    records.into_iter().filter(|r| r.country == country).collect()
}

/// Players whose role is exactly `role`. All-rounders are neither batters nor bowlers.
pub fn by_role<'a>(
    records: impl IntoIterator<Item = &'a PlayerRecord>,
    role: &Role,
) -> Vec<&'a PlayerRecord> {
    records.into_iter().filter(|r| r.role == *role).collect()
}

/// Sort by matches played, most first.
///
/// An unrecorded match count sorts as 0. Equal counts are ordered by name
/// ascending so the result does not depend on input order.
pub fn descending_by_matches<'a>(
    records: impl IntoIterator<Item = &'a PlayerRecord>,
) -> Vec<&'a PlayerRecord> {
    let mut sorted: Vec<_> = records.into_iter().collect();
    sorted.sort_by(|a, b| {
        Reverse(a.matches_played())
            .cmp(&Reverse(b.matches_played()))
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
}

/// Keep records matching every filter, then order them.
pub fn query<'a>(
    records: impl IntoIterator<Item = &'a PlayerRecord>,
    filters: &[Filter],
    sort: SortOrder,
) -> Vec<&'a PlayerRecord> {
    let matching = records
        .into_iter()
        .filter(|r| filters.iter().all(|f| f.matches(r)));

    match sort {
        SortOrder::Unsorted => matching.collect(),
        SortOrder::NameAscending => {
            let mut sorted: Vec<_> = matching.collect();
            sorted.sort_by(|a, b| a.name.cmp(&b.name));
            sorted
        }
        SortOrder::MatchesDescending => descending_by_matches(matching),
    }
}
