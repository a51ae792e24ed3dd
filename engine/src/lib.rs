//! # Cricviz Engine
//!
//! Career statistics for a roster of cricketers.
//!
//! Player records hold cumulative batting, bowling and fielding counters.
//! Per-match scorecards are folded into those counters, and derived metrics
//! such as batting average and strike rate are computed on demand.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine never touches files, network or a database
//! - **Atomic merges**: a scorecard is applied to every player it names or
//!   to none of them
//! - **Explicit absence**: counters are `Option<u32>`, so incomplete data
//!   yields an absent metric instead of a wrong one
//!
//! ## Core Concepts
//!
//! ### Players
//!
//! A [`PlayerRecord`] is keyed by unique name and stored in something that
//! implements [`PlayerStore`]. [`Registry`] is the in-memory store.
//!
//! ### Scorecards
//!
//! A [`BattingScorecard`] lists `[name, is_out, runs, balls, fours, sixes]`
//! entries; a [`BowlingScorecard`] lists `[name, balls, maidens, runs,
//! wickets]` entries.
//!
//! ### Merging
//!
//! [`InningsMerger`] validates scorecard shape, resolves every named player,
//! and only then commits the updated records:
//! - [`InningsMerger::update_innings`] - one innings, one match
//! - [`InningsMerger::update_match`] - several innings of the same match
//!
//! ### Queries and metrics
//!
//! The [`query`] module filters and orders records; the [`stats`] module
//! derives averages and rates.
//!
//! ## Quick Start
//!
//! ```rust
//! use cricviz_engine::{
//!     stats, BattingEntry, BattingScorecard, BowlingEntry, BowlingScorecard,
//!     InningsMerger, PlayerRecord, PlayerStore, Registry, Role,
//! };
//!
//! // 1. Build a roster
//! let mut registry = Registry::with_players(vec![
//!     PlayerRecord::new("Steve Smith", "Australia", Role::Batter).with_matches(76),
//!     PlayerRecord::new("David Warner", "Australia", Role::Batter).with_matches(86),
//!     PlayerRecord::new("Jasprit Bumrah", "India", Role::Bowler).with_matches(17),
//! ])
//! .unwrap();
//!
//! // 2. Merge an innings
//! let batting: BattingScorecard = vec![
//!     BattingEntry::new("David Warner", true, 5, 8, 0, 0),
//!     BattingEntry::new("Steve Smith", true, 131, 226, 16, 0),
//! ]
//! .into();
//! let bowling: BowlingScorecard = vec![BowlingEntry::new("Jasprit Bumrah", 150, 7, 66, 2)].into();
//!
//! let report = InningsMerger::default()
//!     .update_innings(&mut registry, &batting, &bowling)
//!     .unwrap();
//! assert_eq!(report.players.len(), 3);
//!
//! // 3. Read derived metrics
//! let smith = registry.find_by_name("Steve Smith").unwrap();
//! assert_eq!(smith.centuries, Some(1));
//! assert_eq!(stats::batting_average(smith), Some(131.0));
//!
//! // 4. Query the roster
//! let names = registry.query().country("Australia").descending_by_matches().names();
//! assert_eq!(names, vec!["David Warner", "Steve Smith"]);
//! ```
//!
//! ## Persistence
//!
//! Use [`Registry::export_state`] and [`Registry::import_state`] with
//! [`RegistrySnapshot`] to move a roster in and out of durable storage.

pub mod config;
pub mod error;
pub mod merge;
pub mod player;
pub mod query;
pub mod registry;
pub mod scorecard;
pub mod seed;
pub mod snapshot;
pub mod stats;

// Re-export main types at crate root
pub use config::{ConfigError, MergeConfig};
pub use error::{Error, ValidationError};
pub use merge::{update_innings, InningsMerger, MergeReport};
pub use player::{BowlingFigures, PlayerRecord, Role};
pub use query::{Filter, SortOrder};
pub use registry::{PlayerStore, QueryBuilder, Registry};
pub use scorecard::{BattingEntry, BattingScorecard, BowlingEntry, BowlingScorecard, Innings};
pub use seed::import_classical_batters;
pub use snapshot::{RegistrySnapshot, SNAPSHOT_FORMAT_VERSION};
pub use stats::{batting_average, batting_strike_rate};

/// Unique key of a player record.
pub type PlayerName = String;
