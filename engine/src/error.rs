//! Error types for the cricviz engine.

use crate::PlayerName;
use thiserror::Error;

/// All possible errors from the cricviz engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Lookup errors
    #[error("player not found: {0}")]
    NotFound(PlayerName),

    #[error("player already exists: {0}")]
    PlayerAlreadyExists(PlayerName),

    // Record errors
    #[error("'{name}' has {not_out} not outs in {innings} innings")]
    InconsistentRecord {
        name: PlayerName,
        not_out: u32,
        innings: u32,
    },

    // Input errors
    #[error("invalid scorecard: {0}")]
    Validation(#[from] ValidationError),

    // State errors
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
}

impl Error {
    /// The player name carried by a lookup error.
    pub fn name(&self) -> Option<&str> {
        match self {
            Error::NotFound(name)
            | Error::PlayerAlreadyExists(name)
            | Error::InconsistentRecord { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether this error is a missing-player failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// A structurally malformed scorecard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{kind} entry {index} has {got} fields, expected {expected}")]
    Arity {
        kind: &'static str,
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error("batting scorecard has {got} entries, expected {min} to {max}")]
    BattingCardSize { got: usize, min: usize, max: usize },

    #[error("'{name}' took {wickets} wickets, at most {max} allowed")]
    TooManyWickets { name: PlayerName, wickets: u32, max: u32 },

    #[error("'{name}' appears twice in the same {kind} scorecard")]
    DuplicateEntry {
        kind: &'static str,
        name: PlayerName,
    },

    #[error("{kind} entry {index} is malformed: {reason}")]
    Malformed {
        kind: &'static str,
        index: usize,
        reason: String,
    },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
