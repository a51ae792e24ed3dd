//! Scorecards: the per-innings input to a merge.
//!
//! Entries arrive as fixed-arity JSON arrays:
//!
//! - batting: `[name, is_out, runs, balls, fours, sixes]`
//! - bowling: `[name, balls, maidens, runs, wickets]`
//!
//! Shape checks here never consult the registry, so a malformed scorecard is
//! rejected before any player lookup happens.

use crate::{error::ValidationError, MergeConfig, PlayerName};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;

const BATTING: &str = "batting";
const BOWLING: &str = "bowling";

/// One batter's innings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattingEntry {
    pub name: PlayerName,
    pub dismissed: bool,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
}

impl BattingEntry {
    pub fn new(
        name: impl Into<PlayerName>,
        dismissed: bool,
        runs: u32,
        balls: u32,
        fours: u32,
        sixes: u32,
    ) -> Self {
        Self {
            name: name.into(),
            dismissed,
            runs,
            balls,
            fours,
            sixes,
        }
    }

    /// Parse `[name, is_out, runs, balls, fours, sixes]`.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, ValidationError> {
        let fields = tuple_fields(BATTING, index, value, 6)?;
        Ok(Self {
            name: string_field(BATTING, index, &fields[0])?,
            dismissed: fields[1].as_bool().ok_or_else(|| ValidationError::Malformed {
                kind: BATTING,
                index,
                reason: format!("is-out flag must be Bool, got {}", json_type_name(&fields[1])),
            })?,
            runs: count_field(BATTING, index, "runs", &fields[2])?,
            balls: count_field(BATTING, index, "balls", &fields[3])?,
            fours: count_field(BATTING, index, "fours", &fields[4])?,
            sixes: count_field(BATTING, index, "sixes", &fields[5])?,
        })
    }
}

impl Serialize for BattingEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            &self.name,
            self.dismissed,
            self.runs,
            self.balls,
            self.fours,
            self.sixes,
        )
            .serialize(serializer)
    }
}

/// One bowler's spell in an innings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BowlingEntry {
    pub name: PlayerName,
    pub balls: u32,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
}

impl BowlingEntry {
    pub fn new(
        name: impl Into<PlayerName>,
        balls: u32,
        maidens: u32,
        runs: u32,
        wickets: u32,
    ) -> Self {
        Self {
            name: name.into(),
            balls,
            maidens,
            runs,
            wickets,
        }
    }

    /// Parse `[name, balls, maidens, runs, wickets]`.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, ValidationError> {
        let fields = tuple_fields(BOWLING, index, value, 5)?;
        Ok(Self {
            name: string_field(BOWLING, index, &fields[0])?,
            balls: count_field(BOWLING, index, "balls", &fields[1])?,
            maidens: count_field(BOWLING, index, "maidens", &fields[2])?,
            runs: count_field(BOWLING, index, "runs", &fields[3])?,
            wickets: count_field(BOWLING, index, "wickets", &fields[4])?,
        })
    }
}

impl Serialize for BowlingEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.name, self.balls, self.maidens, self.runs, self.wickets).serialize(serializer)
    }
}

/// Ordered batting entries for one innings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BattingScorecard {
    entries: Vec<BattingEntry>,
}

impl BattingScorecard {
    pub fn new(entries: Vec<BattingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BattingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a JSON array of batting tuples.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let entries = array_items(BATTING, value)?
            .iter()
            .enumerate()
            .map(|(index, item)| BattingEntry::from_value(index, item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        Self::from_value(&parse_json(BATTING, json)?)
    }

    /// Check the card size and that no batter appears twice.
    pub fn validate(&self, config: &MergeConfig) -> Result<(), ValidationError> {
        let got = self.entries.len();
        let (min, max) = config.batter_range();
        if got < min || got > max {
            return Err(ValidationError::BattingCardSize { got, min, max });
        }
        reject_duplicates(BATTING, self.entries.iter().map(|e| e.name.as_str()))
    }
}

impl From<Vec<BattingEntry>> for BattingScorecard {
    fn from(entries: Vec<BattingEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<BattingEntry> for BattingScorecard {
    fn from_iter<I: IntoIterator<Item = BattingEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Ordered bowling entries for one innings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BowlingScorecard {
    entries: Vec<BowlingEntry>,
}

impl BowlingScorecard {
    pub fn new(entries: Vec<BowlingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BowlingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a JSON array of bowling tuples.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let entries = array_items(BOWLING, value)?
            .iter()
            .enumerate()
            .map(|(index, item)| BowlingEntry::from_value(index, item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        Self::from_value(&parse_json(BOWLING, json)?)
    }

    /// Check wicket counts and that no bowler appears twice.
    pub fn validate(&self, config: &MergeConfig) -> Result<(), ValidationError> {
        let max = config.wicket_limit();
        if let Some(entry) = self.entries.iter().find(|e| e.wickets > max) {
            return Err(ValidationError::TooManyWickets {
                name: entry.name.clone(),
                wickets: entry.wickets,
                max,
            });
        }
        reject_duplicates(BOWLING, self.entries.iter().map(|e| e.name.as_str()))
    }
}

impl From<Vec<BowlingEntry>> for BowlingScorecard {
    fn from(entries: Vec<BowlingEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<BowlingEntry> for BowlingScorecard {
    fn from_iter<I: IntoIterator<Item = BowlingEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One innings of a match: who batted and who bowled at them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Innings {
    pub batting: BattingScorecard,
    pub bowling: BowlingScorecard,
}

impl Innings {
    pub fn new(batting: impl Into<BattingScorecard>, bowling: impl Into<BowlingScorecard>) -> Self {
        Self {
            batting: batting.into(),
            bowling: bowling.into(),
        }
    }

    pub fn validate(&self, config: &MergeConfig) -> Result<(), ValidationError> {
        self.batting.validate(config)?;
        self.bowling.validate(config)
    }

    /// Player names in first-encounter order, batting first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.batting
            .entries
            .iter()
            .map(|e| e.name.as_str())
            .chain(self.bowling.entries.iter().map(|e| e.name.as_str()))
    }
}

fn reject_duplicates<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateEntry {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn parse_json(kind: &'static str, json: &str) -> Result<Value, ValidationError> {
    serde_json::from_str(json).map_err(|e| ValidationError::Malformed {
        kind,
        index: 0,
        reason: e.to_string(),
    })
}

fn array_items<'a>(
    kind: &'static str,
    value: &'a Value,
) -> Result<&'a Vec<Value>, ValidationError> {
    value.as_array().ok_or_else(|| ValidationError::Malformed {
        kind,
        index: 0,
        reason: format!("scorecard must be an Array, got {}", json_type_name(value)),
    })
}

fn tuple_fields<'a>(
    kind: &'static str,
    index: usize,
    value: &'a Value,
    expected: usize,
) -> Result<&'a [Value], ValidationError> {
    let fields = value.as_array().ok_or_else(|| ValidationError::Malformed {
        kind,
        index,
        reason: format!("entry must be an Array, got {}", json_type_name(value)),
    })?;

    if fields.len() != expected {
        return Err(ValidationError::Arity {
            kind,
            index,
            expected,
            got: fields.len(),
        });
    }
    Ok(fields.as_slice())
}

fn string_field(
    kind: &'static str,
    index: usize,
    value: &Value,
) -> Result<PlayerName, ValidationError> {
    match value.as_str() {
        Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
        Some(_) => Err(ValidationError::Malformed {
            kind,
            index,
            reason: "player name is empty".into(),
        }),
        None => Err(ValidationError::Malformed {
            kind,
            index,
            reason: format!("player name must be String, got {}", json_type_name(value)),
        }),
    }
}

fn count_field(
    kind: &'static str,
    index: usize,
    field: &str,
    value: &Value,
) -> Result<u32, ValidationError> {
    let malformed = |reason: String| ValidationError::Malformed {
        kind,
        index,
        reason,
    };

    match value.as_u64() {
        Some(n) => u32::try_from(n).map_err(|_| malformed(format!("{field} out of range: {n}"))),
        None if value.as_i64().is_some() => {
            Err(malformed(format!("{field} must not be negative: {value}")))
        }
        None => Err(malformed(format!(
            "{field} must be Int, got {}",
            json_type_name(value)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "Int",
        Value::Number(_) => "Float",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_batting_card() {
        let card = BattingScorecard::from_value(&json!([
            ["David Warner", true, 5, 8, 0, 0],
            ["Cameron Green", false, 84, 132, 8, 4]
        ]))
        .unwrap();

        assert_eq!(card.len(), 2);
        assert_eq!(
            card.entries()[1],
            BattingEntry::new("Cameron Green", false, 84, 132, 8, 4)
        );
    }

    #[test]
    fn parse_bowling_card() {
        let card = BowlingScorecard::from_json(r#"[["Jasprit Bumrah", 150, 7, 66, 2]]"#).unwrap();
        assert_eq!(card.entries()[0], BowlingEntry::new("Jasprit Bumrah", 150, 7, 66, 2));
    }

    #[test]
    fn short_tuple_is_arity_error() {
        let err = BowlingScorecard::from_value(&json!([
            ["T Natarajan", 150, 7, 66, 2],
            ["Ravichandran Ashwin", 144, 1, 74]
        ]))
        .unwrap_err();

        assert_eq!(
            err,
            ValidationError::Arity {
                kind: "bowling",
                index: 1,
                expected: 5,
                got: 4,
            }
        );
    }

    #[test]
    fn negative_runs_rejected() {
        let err =
            BattingEntry::from_value(0, &json!(["Steve Smith", true, -1, 10, 0, 0])).unwrap_err();
        assert!(matches!(err, ValidationError::Malformed { index: 0, .. }));
        assert!(err.to_string().contains("runs must not be negative"));
    }

    #[test]
    fn wrong_types_rejected() {
        let err =
            BattingEntry::from_value(2, &json!(["Steve Smith", "out", 1, 10, 0, 0])).unwrap_err();
        assert!(err.to_string().contains("is-out flag must be Bool, got String"));

        let err = BowlingEntry::from_value(0, &json!([7, 10, 0, 5, 1])).unwrap_err();
        assert!(err.to_string().contains("player name must be String, got Int"));

        let err = BowlingEntry::from_value(0, &json!(["Nathan Lyon", 10.5, 0, 5, 1])).unwrap_err();
        assert!(err.to_string().contains("balls must be Int, got Float"));
    }

    #[test]
    fn batting_card_size_bounds() {
        let config = MergeConfig::default();

        let one: BattingScorecard =
            vec![BattingEntry::new("Rohit Sharma", true, 26, 77, 3, 1)].into();
        assert_eq!(
            one.validate(&config),
            Err(ValidationError::BattingCardSize { got: 1, min: 2, max: 11 })
        );

        let twelve: BattingScorecard = (0..12)
            .map(|i| BattingEntry::new(format!("Batter {i}"), true, 0, 1, 0, 0))
            .collect();
        assert!(matches!(
            twelve.validate(&config),
            Err(ValidationError::BattingCardSize { got: 12, .. })
        ));

        let eleven: BattingScorecard = (0..11)
            .map(|i| BattingEntry::new(format!("Batter {i}"), true, 0, 1, 0, 0))
            .collect();
        assert!(eleven.validate(&config).is_ok());
    }

    #[test]
    fn too_many_wickets() {
        let card: BowlingScorecard = vec![BowlingEntry::new("Anil Kumble", 160, 9, 74, 11)].into();
        assert_eq!(
            card.validate(&MergeConfig::default()),
            Err(ValidationError::TooManyWickets {
                name: "Anil Kumble".into(),
                wickets: 11,
                max: 10,
            })
        );

        let card: BowlingScorecard = vec![BowlingEntry::new("Anil Kumble", 160, 9, 74, 10)].into();
        assert!(card.validate(&MergeConfig::default()).is_ok());
    }

    #[test]
    fn hand_built_config_cannot_loosen_the_laws() {
        let loose = MergeConfig {
            min_batters: 1,
            max_batters: 12,
            max_wickets: 11,
        };

        let card: BowlingScorecard = vec![BowlingEntry::new("Jim Laker", 310, 23, 20, 11)].into();
        assert_eq!(
            card.validate(&loose),
            Err(ValidationError::TooManyWickets {
                name: "Jim Laker".into(),
                wickets: 11,
                max: 10,
            })
        );

        let one: BattingScorecard =
            vec![BattingEntry::new("Rohit Sharma", true, 26, 77, 3, 1)].into();
        assert_eq!(
            one.validate(&loose),
            Err(ValidationError::BattingCardSize { got: 1, min: 2, max: 11 })
        );
    }

    #[test]
    fn duplicate_batter_rejected() {
        let card: BattingScorecard = vec![
            BattingEntry::new("Steve Smith", true, 1, 2, 0, 0),
            BattingEntry::new("Steve Smith", true, 3, 4, 0, 0),
        ]
        .into();

        assert_eq!(
            card.validate(&MergeConfig::default()),
            Err(ValidationError::DuplicateEntry {
                kind: "batting",
                name: "Steve Smith".into(),
            })
        );
    }

    #[test]
    fn innings_names_batting_first() {
        let innings = Innings::new(
            vec![
                BattingEntry::new("David Warner", true, 5, 8, 0, 0),
                BattingEntry::new("Pat Cummins", false, 0, 2, 0, 0),
            ],
            vec![BowlingEntry::new("Jasprit Bumrah", 150, 7, 66, 2)],
        );

        let names: Vec<_> = innings.names().collect();
        assert_eq!(names, vec!["David Warner", "Pat Cummins", "Jasprit Bumrah"]);
    }

    #[test]
    fn innings_validates_both_cards() {
        let config = MergeConfig::default();
        let batting = vec![
            BattingEntry::new("David Warner", true, 5, 8, 0, 0),
            BattingEntry::new("Steve Smith", true, 131, 226, 16, 0),
        ];

        let innings = Innings::new(
            batting.clone(),
            vec![BowlingEntry::new("Jasprit Bumrah", 150, 7, 66, 2)],
        );
        assert!(innings.validate(&config).is_ok());

        let innings = Innings::new(
            batting,
            vec![
                BowlingEntry::new("Jasprit Bumrah", 150, 7, 66, 2),
                BowlingEntry::new("Jasprit Bumrah", 30, 0, 12, 1),
            ],
        );
        assert!(matches!(
            innings.validate(&config),
            Err(ValidationError::DuplicateEntry { kind: "bowling", .. })
        ));
    }

    #[test]
    fn entries_serialize_as_tuples() {
        let entry = BowlingEntry::new("Ravindra Jadeja", 108, 3, 62, 4);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!(["Ravindra Jadeja", 108, 3, 62, 4])
        );
    }
}
