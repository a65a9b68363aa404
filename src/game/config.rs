//! Game settings supplied by the configuration layer.
//!
//! Settings deserialize from JSON so a game or tournament can be described
//! in a file instead of on the command line.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::error::GameError;
use crate::game::state::Player;

/// Parameters of a single game.
///
/// # Example
/// ```
/// use szemeredi_game::game::GameSettings;
///
/// let settings = GameSettings::default().with_k(4).with_pool_size(30);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Progression length needed to win.
    pub k: usize,

    /// Pool size.
    pub x: usize,

    /// Smallest value that may appear in the pool (inclusive).
    pub lower: i64,

    /// Largest value that may appear in the pool (inclusive).
    pub bound: i64,

    /// Side that moves first.
    pub first: Player,

    /// Strategy name looked up in the registry for the computer side.
    pub algorithm: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            k: 3,
            x: 20,
            lower: 1,
            bound: 100,
            first: Player::A,
            algorithm: "random".to_string(),
        }
    }
}

impl GameSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the progression length.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Builder method: set the pool size.
    pub fn with_pool_size(mut self, x: usize) -> Self {
        self.x = x;
        self
    }

    /// Builder method: set the inclusive value range.
    pub fn with_range(mut self, lower: i64, bound: i64) -> Self {
        self.lower = lower;
        self.bound = bound;
        self
    }

    /// Builder method: set the side that moves first.
    pub fn with_first(mut self, first: Player) -> Self {
        self.first = first;
        self
    }

    /// Builder method: set the strategy name.
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Reject combinations for which no pool with a planted progression exists.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.k == 0 {
            return Err(GameError::invalid("progression length must be at least 1"));
        }
        if self.lower > self.bound {
            return Err(GameError::invalid(format!(
                "lower bound {} exceeds upper bound {}",
                self.lower, self.bound
            )));
        }
        // The span only overflows u64 for the full i64 range, which fits any pool.
        let width = self.bound.abs_diff(self.lower);
        if self.x < self.k || width.checked_add(1).map_or(false, |span| self.x as u64 > span) {
            return Err(GameError::invalid(format!(
                "pool size {} must lie in [{}, {}]",
                self.x,
                self.k,
                width as u128 + 1
            )));
        }
        if self.k > 1 && width / (self.k as u64 - 1) < 1 {
            return Err(GameError::invalid(format!(
                "range [{}, {}] is too small for a progression of length {}",
                self.lower, self.bound, self.k
            )));
        }
        Ok(())
    }

    /// Load settings from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse settings from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Errors raised while loading settings files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Invalid(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = GameSettings::new();
        assert_eq!(settings.k, 3);
        assert_eq!(settings.x, 20);
        assert_eq!(settings.first, Player::A);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_json() {
        let json = r#"{ "k": 4, "x": 30, "first": "computer", "algorithm": "MCTS" }"#;
        let settings = GameSettings::from_json_str(json).unwrap();

        assert_eq!(settings.k, 4);
        assert_eq!(settings.x, 30);
        assert_eq!(settings.lower, 1);
        assert_eq!(settings.bound, 100);
        assert_eq!(settings.first, Player::B);
        assert_eq!(settings.algorithm, "MCTS");
    }

    #[test]
    fn test_validation_rejects_impossible_settings() {
        let cases = [
            GameSettings::default().with_k(0),
            GameSettings::default().with_pool_size(2),
            GameSettings::default().with_range(1, 10).with_pool_size(11),
            GameSettings::default().with_range(10, 1),
        ];
        for settings in &cases {
            assert!(
                matches!(settings.validate(), Err(GameError::InvalidConfiguration(_))),
                "{:?} should be rejected",
                settings
            );
        }
    }

    #[test]
    fn test_validation_accepts_full_i64_range() {
        let settings = GameSettings::new().with_range(i64::MIN, i64::MAX);
        assert!(settings.validate().is_ok());

        let settings = GameSettings::new()
            .with_range(i64::MIN, i64::MAX)
            .with_k(50)
            .with_pool_size(500);
        assert!(settings.validate().is_ok());

        let settings = GameSettings::new().with_range(i64::MAX - 2, i64::MAX).with_pool_size(3);
        assert!(settings.validate().is_ok());
        let settings = GameSettings::new().with_range(i64::MIN, i64::MIN + 2).with_pool_size(4);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_json_reports_parse_error() {
        let result = GameSettings::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = GameSettings::from_json_str(r#"{ "k": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = GameSettings::from_json_file("/nonexistent/settings.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
