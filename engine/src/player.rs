//! Player records and their value types.

use crate::{error::Result, Error, PlayerName};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Playing role of a cricketer.
///
/// The set is open: unrecognised roles are kept verbatim in [`Role::Other`]
/// and only ever match themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Batter,
    Bowler,
    AllRounder,
    Wicketkeeper,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Batter => "Batter",
            Role::Bowler => "Bowler",
            Role::AllRounder => "All-rounder",
            Role::Wicketkeeper => "Wicketkeeper",
            Role::Other(role) => role.as_str(),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Batter" => Role::Batter,
            "Bowler" => Role::Bowler,
            "All-rounder" => Role::AllRounder,
            "Wicketkeeper" => Role::Wicketkeeper,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wickets/runs pair, written `"wickets/runs"`.
///
/// Figures are ranked by most wickets, then fewest runs conceded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BowlingFigures {
    pub wickets: u32,
    pub runs: u32,
}

impl BowlingFigures {
    pub fn new(wickets: u32, runs: u32) -> Self {
        Self { wickets, runs }
    }

    /// Strictly better than `other`.
    pub fn beats(&self, other: &BowlingFigures) -> bool {
        self.rank(other) == Ordering::Greater
    }

    /// Compare by quality: `Greater` means `self` is the better performance.
    pub fn rank(&self, other: &BowlingFigures) -> Ordering {
        self.wickets
            .cmp(&other.wickets)
            .then_with(|| other.runs.cmp(&self.runs))
    }

    /// Whether these figures should replace a stored best.
    pub fn improves_on(&self, best: Option<&BowlingFigures>) -> bool {
        best.map_or(true, |best| self.beats(best))
    }
}

impl fmt::Display for BowlingFigures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.wickets, self.runs)
    }
}

impl FromStr for BowlingFigures {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (wickets, runs) = s
            .split_once('/')
            .ok_or_else(|| format!("expected 'wickets/runs', got '{s}'"))?;
        let wickets = wickets
            .trim()
            .parse()
            .map_err(|_| format!("invalid wickets in '{s}'"))?;
        let runs = runs
            .trim()
            .parse()
            .map_err(|_| format!("invalid runs in '{s}'"))?;
        Ok(Self { wickets, runs })
    }
}

/// Marker written for a player with no bowling figures yet.
pub const NO_FIGURES: &str = "-";

/// Serde adapter storing `Option<BowlingFigures>` as `"w/r"` or `"-"`.
mod figures_format {
    use super::{BowlingFigures, NO_FIGURES};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<BowlingFigures>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(figures) => serializer.collect_str(figures),
            None => serializer.serialize_str(NO_FIGURES),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BowlingFigures>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") | Some(NO_FIGURES) => Ok(None),
            Some(text) => text.parse().map(Some).map_err(D::Error::custom),
        }
    }
}

fn zero() -> Option<u32> {
    Some(0)
}

/// A player's identity and cumulative career counters.
///
/// Counters are explicit optionals so incomplete data stays distinguishable
/// from zero. When deserializing, a missing counter takes the default of 0
/// while an explicit `null` stays absent; `matches` has no default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Unique player name, the registry key
    pub name: PlayerName,
    pub country: String,
    pub role: Role,
    #[serde(default)]
    pub matches: Option<u32>,

    // Batting
    #[serde(default = "zero")]
    pub innings_batted: Option<u32>,
    #[serde(default = "zero")]
    pub runs_scored: Option<u32>,
    #[serde(default = "zero")]
    pub not_out: Option<u32>,
    #[serde(default = "zero")]
    pub high_score: Option<u32>,
    #[serde(default = "zero")]
    pub balls_faced: Option<u32>,
    #[serde(default = "zero")]
    pub centuries: Option<u32>,
    #[serde(default = "zero")]
    pub half_centuries: Option<u32>,
    #[serde(default = "zero")]
    pub sixes_scored: Option<u32>,
    #[serde(default = "zero")]
    pub fours_scored: Option<u32>,

    // Bowling
    #[serde(default = "zero")]
    pub innings_bowled: Option<u32>,
    #[serde(default = "zero")]
    pub balls_bowled: Option<u32>,
    #[serde(default = "zero")]
    pub maidens_bowled: Option<u32>,
    #[serde(default = "zero")]
    pub runs_given: Option<u32>,
    #[serde(default = "zero")]
    pub wickets_taken: Option<u32>,
    #[serde(default, with = "figures_format")]
    pub best_bowling_innings: Option<BowlingFigures>,
    #[serde(default, with = "figures_format")]
    pub best_bowling_match: Option<BowlingFigures>,

    // Fielding
    #[serde(default = "zero")]
    pub catches: Option<u32>,
    #[serde(default = "zero")]
    pub stumpings: Option<u32>,
}

impl PlayerRecord {
    /// Create a record with every counter at 0, no bowling figures and no
    /// recorded match count.
    pub fn new(
        name: impl Into<PlayerName>,
        country: impl Into<String>,
        role: impl Into<Role>,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            role: role.into(),
            matches: None,
            innings_batted: zero(),
            runs_scored: zero(),
            not_out: zero(),
            high_score: zero(),
            balls_faced: zero(),
            centuries: zero(),
            half_centuries: zero(),
            sixes_scored: zero(),
            fours_scored: zero(),
            innings_bowled: zero(),
            balls_bowled: zero(),
            maidens_bowled: zero(),
            runs_given: zero(),
            wickets_taken: zero(),
            best_bowling_innings: None,
            best_bowling_match: None,
            catches: zero(),
            stumpings: zero(),
        }
    }

    /// A record with no counters at all, for describing incomplete data.
    pub fn blank(name: impl Into<PlayerName>) -> Self {
        Self {
            name: name.into(),
            country: String::new(),
            role: Role::Other(String::new()),
            matches: None,
            innings_batted: None,
            runs_scored: None,
            not_out: None,
            high_score: None,
            balls_faced: None,
            centuries: None,
            half_centuries: None,
            sixes_scored: None,
            fours_scored: None,
            innings_bowled: None,
            balls_bowled: None,
            maidens_bowled: None,
            runs_given: None,
            wickets_taken: None,
            best_bowling_innings: None,
            best_bowling_match: None,
            catches: None,
            stumpings: None,
        }
    }

    pub fn with_matches(mut self, matches: u32) -> Self {
        self.matches = Some(matches);
        self
    }

    /// Check that the counters are consistent: never more not outs than
    /// innings batted.
    pub fn validate(&self) -> Result<()> {
        if let (Some(innings), Some(not_out)) = (self.innings_batted, self.not_out) {
            if not_out > innings {
                return Err(Error::InconsistentRecord {
                    name: self.name.clone(),
                    not_out,
                    innings,
                });
            }
        }
        Ok(())
    }

    /// Matches played, with an unrecorded count read as 0.
    pub fn matches_played(&self) -> u32 {
        self.matches.unwrap_or(0)
    }

    /// `best_bowling_innings` as stored, `"-"` when absent.
    pub fn best_innings_label(&self) -> String {
        figures_label(self.best_bowling_innings.as_ref())
    }

    /// `best_bowling_match` as stored, `"-"` when absent.
    pub fn best_match_label(&self) -> String {
        figures_label(self.best_bowling_match.as_ref())
    }
}

fn figures_label(figures: Option<&BowlingFigures>) -> String {
    figures.map_or_else(|| NO_FIGURES.to_string(), ToString::to_string)
}
