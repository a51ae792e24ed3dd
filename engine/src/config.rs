//! Merge configuration.
//!
//! Scorecard shape limits default to the laws of the game. Environment
//! variables may tighten them but never loosen them.

use serde::{Deserialize, Serialize};
use std::env;

/// Fewest batters a completed innings can list.
pub const MIN_BATTERS: usize = 2;
/// A side fields eleven players.
pub const MAX_BATTERS: usize = 11;
/// Most wickets one bowler can take in an innings.
pub const MAX_WICKETS: u32 = 10;

/// Limits applied to scorecards before any player is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeConfig {
    /// Fewest batters a batting scorecard may list
    pub min_batters: usize,
    /// Most batters a batting scorecard may list
    pub max_batters: usize,
    /// Most wickets a single bowler may take in one innings
    pub max_wickets: u32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            min_batters: MIN_BATTERS,
            max_batters: MAX_BATTERS,
            max_wickets: MAX_WICKETS,
        }
    }
}

impl MergeConfig {
    /// Batter bounds actually enforced, never looser than the laws.
    pub fn batter_range(&self) -> (usize, usize) {
        (
            self.min_batters.max(MIN_BATTERS),
            self.max_batters.min(MAX_BATTERS),
        )
    }

    /// Wicket limit actually enforced, never looser than the laws.
    pub fn wicket_limit(&self) -> u32 {
        self.max_wickets.min(MAX_WICKETS)
    }

    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Reads `CRICVIZ_MIN_BATTERS`, `CRICVIZ_MAX_BATTERS` and `CRICVIZ_MAX_WICKETS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let min_batters = read_var("CRICVIZ_MIN_BATTERS", defaults.min_batters)?;
        let max_batters = read_var("CRICVIZ_MAX_BATTERS", defaults.max_batters)?;
        let max_wickets = read_var("CRICVIZ_MAX_WICKETS", defaults.max_wickets)?;

        let config = Self {
            min_batters,
            max_batters,
            max_wickets,
        };
        config.check()?;
        Ok(config)
    }

    /// Reject limits looser than the laws of the game, or that no scorecard
    /// could satisfy.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.min_batters < MIN_BATTERS
            || self.max_batters > MAX_BATTERS
            || self.min_batters > self.max_batters
        {
            return Err(ConfigError::InvalidBatterRange {
                min: self.min_batters,
                max: self.max_batters,
            });
        }
        if self.max_wickets > MAX_WICKETS {
            return Err(ConfigError::InvalidWicketLimit {
                max: self.max_wickets,
            });
        }
        Ok(())
    }
}

fn read_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid batter range: min {min}, max {max}")]
    InvalidBatterRange { min: usize, max: usize },

    #[error("invalid wicket limit: {max}")]
    InvalidWicketLimit { max: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_laws() {
        let config = MergeConfig::default();
        assert_eq!(config.min_batters, 2);
        assert_eq!(config.max_batters, 11);
        assert_eq!(config.max_wickets, 10);
        assert!(config.check().is_ok());
    }

    #[test]
    fn check_rejects_inverted_range() {
        let config = MergeConfig {
            min_batters: 5,
            max_batters: 3,
            ..MergeConfig::default()
        };
        assert_eq!(
            config.check(),
            Err(ConfigError::InvalidBatterRange { min: 5, max: 3 })
        );
    }

    #[test]
    fn check_rejects_looser_limits() {
        let loose = [
            MergeConfig {
                min_batters: 1,
                ..MergeConfig::default()
            },
            MergeConfig {
                max_batters: 12,
                ..MergeConfig::default()
            },
        ];
        for config in loose {
            assert!(matches!(
                config.check(),
                Err(ConfigError::InvalidBatterRange { .. })
            ));
        }

        let config = MergeConfig {
            max_wickets: 11,
            ..MergeConfig::default()
        };
        assert_eq!(config.check(), Err(ConfigError::InvalidWicketLimit { max: 11 }));
    }

    #[test]
    fn check_accepts_tighter_limits() {
        let config = MergeConfig {
            min_batters: 3,
            max_batters: 6,
            max_wickets: 5,
        };
        assert!(config.check().is_ok());
    }

    #[test]
    fn deserialize_partial_config() {
        let config: MergeConfig = serde_json::from_str(r#"{"maxBatters": 9}"#).unwrap();
        assert_eq!(config.max_batters, 9);
        assert_eq!(config.min_batters, 2);
        assert_eq!(config.max_wickets, 10);
    }

    // Every case lives in one test: the variables are process-wide.
    #[test]
    fn from_env_reads_and_checks_variables() {
        const KEYS: [&str; 3] = [
            "CRICVIZ_MIN_BATTERS",
            "CRICVIZ_MAX_BATTERS",
            "CRICVIZ_MAX_WICKETS",
        ];
        let clear = || KEYS.iter().for_each(|key| env::remove_var(key));

        clear();
        assert_eq!(MergeConfig::from_env(), Ok(MergeConfig::default()));

        env::set_var("CRICVIZ_MAX_BATTERS", " 8 ");
        env::set_var("CRICVIZ_MAX_WICKETS", "6");
        assert_eq!(
            MergeConfig::from_env(),
            Ok(MergeConfig {
                min_batters: 2,
                max_batters: 8,
                max_wickets: 6,
            })
        );

        env::set_var("CRICVIZ_MAX_WICKETS", "eleven");
        assert_eq!(
            MergeConfig::from_env(),
            Err(ConfigError::InvalidValue {
                key: "CRICVIZ_MAX_WICKETS",
                value: "eleven".into(),
            })
        );

        env::set_var("CRICVIZ_MAX_WICKETS", "11");
        assert_eq!(
            MergeConfig::from_env(),
            Err(ConfigError::InvalidWicketLimit { max: 11 })
        );

        clear();
        env::set_var("CRICVIZ_MIN_BATTERS", "1");
        assert!(matches!(
            MergeConfig::from_env(),
            Err(ConfigError::InvalidBatterRange { min: 1, max: 11 })
        ));

        clear();
    }
}
