//! Innings merging - folding scorecards into career counters.
//!
//! A merge runs in three phases:
//!
//! 1. **Shape**: every scorecard is checked against [`MergeConfig`]. No
//!    player is looked up yet.
//! 2. **Resolve**: every distinct player name is looked up in first-encounter
//!    order, batting before bowling. The first unknown name aborts the merge.
//! 3. **Apply**: resolved records are copied, updated, and handed to
//!    [`PlayerStore::commit`] as a single batch.
//!
//! Nothing reaches the store unless all three phases succeed, so a failed
//! merge leaves every record untouched.
//!
//! One merge call counts as one match for every player it names. Merges are
//! not idempotent: applying the same scorecards twice counts them twice.

use crate::{
    error::Result, BattingEntry, BattingScorecard, BowlingEntry, BowlingFigures,
    BowlingScorecard, Error, Innings, MergeConfig, PlayerName, PlayerRecord, PlayerStore,
};
use serde::Serialize;
use std::collections::HashMap;

/// What a successful merge touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    /// Updated players, in first-encounter order
    pub players: Vec<PlayerName>,
    /// Innings folded in
    pub innings: usize,
    pub batting_entries: usize,
    pub bowling_entries: usize,
}

/// Applies scorecards to a [`PlayerStore`].
#[derive(Debug, Clone, Default)]
pub struct InningsMerger {
    config: MergeConfig,
}

impl InningsMerger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge one innings: a batting scorecard and the bowling scorecard
    /// against it.
    ///
    /// Fails with [`Error::Validation`] on a malformed scorecard and with
    /// [`Error::NotFound`] carrying the first unknown player name. Either
    /// way no record is modified.
    pub fn update_innings<S>(
        &self,
        store: &mut S,
        batting: &BattingScorecard,
        bowling: &BowlingScorecard,
    ) -> Result<MergeReport>
    where
        S: PlayerStore + ?Sized,
    {
        self.update_match(store, &[Innings::new(batting.clone(), bowling.clone())])
    }

    /// Merge every innings of one match in a single atomic step.
    ///
    /// Each named player's match count rises by one however many innings they
    /// appear in. Best match figures are compared using a bowler's wickets and
    /// runs summed over all innings given here.
    pub fn update_match<S>(&self, store: &mut S, innings: &[Innings]) -> Result<MergeReport>
    where
        S: PlayerStore + ?Sized,
    {
        // Phase 1: shape
        for each in innings {
            if let Err(err) = each.validate(&self.config) {
                tracing::warn!(error = %err, "rejected malformed scorecard");
                return Err(err.into());
            }
        }

        // Phase 2: resolve
        let mut staged: Vec<PlayerRecord> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();

        for name in innings.iter().flat_map(|each| each.names()) {
            if slots.contains_key(name) {
                continue;
            }
            let Some(record) = store.find_by_name(name) else {
                tracing::warn!(player = %name, "scorecard names an unknown player");
                return Err(Error::NotFound(name.to_string()));
            };
            tracing::debug!(player = %name, "resolved");
            slots.insert(name, staged.len());
            staged.push(record.clone());
        }

        // Phase 3: apply
        let mut match_figures: HashMap<&str, BowlingFigures> = HashMap::new();
        let mut batting_entries = 0;
        let mut bowling_entries = 0;

        for each in innings {
            for entry in each.batting.entries() {
                apply_batting(&mut staged[slots[entry.name.as_str()]], entry);
                batting_entries += 1;
            }
            for entry in each.bowling.entries() {
                apply_bowling(&mut staged[slots[entry.name.as_str()]], entry);
                let total = match_figures.entry(entry.name.as_str()).or_default();
                total.wickets += entry.wickets;
                total.runs += entry.runs;
                bowling_entries += 1;
            }
        }

        for record in &mut staged {
            bump(&mut record.matches, 1);
            if let Some(figures) = match_figures.get(record.name.as_str()) {
                if figures.improves_on(record.best_bowling_match.as_ref()) {
                    record.best_bowling_match = Some(*figures);
                }
            }
        }

        let players: Vec<PlayerName> = staged.iter().map(|r| r.name.clone()).collect();
        store.commit(staged)?;

        tracing::info!(
            players = players.len(),
            innings = innings.len(),
            batting_entries,
            bowling_entries,
            "scorecards merged"
        );

        Ok(MergeReport {
            players,
            innings: innings.len(),
            batting_entries,
            bowling_entries,
        })
    }
}

/// Merge one innings using the default [`MergeConfig`].
pub fn update_innings<S>(
    store: &mut S,
    batting: &BattingScorecard,
    bowling: &BowlingScorecard,
) -> Result<MergeReport>
where
    S: PlayerStore + ?Sized,
{
    InningsMerger::default().update_innings(store, batting, bowling)
}

fn apply_batting(record: &mut PlayerRecord, entry: &BattingEntry) {
    bump(&mut record.innings_batted, 1);
    bump(&mut record.runs_scored, entry.runs);
    bump(&mut record.balls_faced, entry.balls);
    bump(&mut record.fours_scored, entry.fours);
    bump(&mut record.sixes_scored, entry.sixes);

    if !entry.dismissed {
        bump(&mut record.not_out, 1);
    }

    record.high_score = Some(record.high_score.unwrap_or(0).max(entry.runs));

    match entry.runs {
        100.. => bump(&mut record.centuries, 1),
        50..=99 => bump(&mut record.half_centuries, 1),
        _ => {}
    }

    tracing::debug!(player = %entry.name, runs = entry.runs, "batting applied");
}

fn apply_bowling(record: &mut PlayerRecord, entry: &BowlingEntry) {
    bump(&mut record.innings_bowled, 1);
    bump(&mut record.balls_bowled, entry.balls);
    bump(&mut record.maidens_bowled, entry.maidens);
    bump(&mut record.runs_given, entry.runs);
    bump(&mut record.wickets_taken, entry.wickets);

    let figures = BowlingFigures::new(entry.wickets, entry.runs);
    if figures.improves_on(record.best_bowling_innings.as_ref()) {
        record.best_bowling_innings = Some(figures);
    }

    tracing::debug!(player = %entry.name, figures = %figures, "bowling applied");
}

/// Add to a counter, treating an absent value as 0.
fn bump(counter: &mut Option<u32>, by: u32) {
    *counter = Some(counter.unwrap_or(0).saturating_add(by));
}
