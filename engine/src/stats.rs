//! Derived metrics.
//!
//! Every metric reads counters from a [`PlayerRecord`] and never mutates it.
//! A metric is `None` whenever an input counter is absent or its divisor is
//! zero; values are unrounded.

use crate::PlayerRecord;
use serde::Serialize;

/// Runs per dismissal.
///
/// A batter who has never been dismissed averages their raw run total.
pub fn batting_average(record: &PlayerRecord) -> Option<f64> {
    let runs = record.runs_scored?;
    let innings = record.innings_batted?;
    let not_out = record.not_out?;

    if innings == 0 {
        return None;
    }

    match innings.saturating_sub(not_out) {
        0 => Some(f64::from(runs)),
        dismissals => Some(f64::from(runs) / f64::from(dismissals)),
    }
}

/// Runs per 100 balls faced.
pub fn batting_strike_rate(record: &PlayerRecord) -> Option<f64> {
    let runs = record.runs_scored?;
    let balls = nonzero(record.balls_faced?)?;
    Some(f64::from(runs) * 100.0 / f64::from(balls))
}

/// Runs conceded per wicket.
pub fn bowling_average(record: &PlayerRecord) -> Option<f64> {
    let runs = record.runs_given?;
    let wickets = nonzero(record.wickets_taken?)?;
    Some(f64::from(runs) / f64::from(wickets))
}

/// Runs conceded per six-ball over.
pub fn economy_rate(record: &PlayerRecord) -> Option<f64> {
    let runs = record.runs_given?;
    let balls = nonzero(record.balls_bowled?)?;
    Some(f64::from(runs) * 6.0 / f64::from(balls))
}

/// Balls bowled per wicket.
pub fn bowling_strike_rate(record: &PlayerRecord) -> Option<f64> {
    let balls = record.balls_bowled?;
    let wickets = nonzero(record.wickets_taken?)?;
    Some(f64::from(balls) / f64::from(wickets))
}

fn nonzero(value: u32) -> Option<u32> {
    (value != 0).then_some(value)
}

/// Derived metrics for one player, ready for a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatSummary {
    pub name: String,
    pub batting_average: Option<f64>,
    pub batting_strike_rate: Option<f64>,
    pub bowling_average: Option<f64>,
    pub economy_rate: Option<f64>,
    pub bowling_strike_rate: Option<f64>,
    pub best_bowling_innings: String,
    pub best_bowling_match: String,
}

/// Compute every derived metric for `record`.
pub fn summary(record: &PlayerRecord) -> StatSummary {
    StatSummary {
        name: record.name.clone(),
        batting_average: batting_average(record),
        batting_strike_rate: batting_strike_rate(record),
        bowling_average: bowling_average(record),
        economy_rate: economy_rate(record),
        bowling_strike_rate: bowling_strike_rate(record),
        best_bowling_innings: record.best_innings_label(),
        best_bowling_match: record.best_match_label(),
    }
}
