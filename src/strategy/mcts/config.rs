//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use crate::game::GameError;

/// Configuration for Monte-Carlo Tree Search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Playouts per decision.
    pub simulations: u32,

    /// UCT exploration constant `c` in
    /// `wins/visits + c * sqrt(ln(parent_visits) / visits)`.
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: 1000,
            exploration: 1.4,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            simulations: 200,
            ..Self::default()
        }
    }

    /// Builder method: set the number of playouts.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulations = n;
        self
    }

    /// Builder method: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.simulations == 0 {
            return Err(GameError::invalid("MCTS needs at least one simulation"));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(GameError::invalid(format!(
                "exploration constant {} must be finite and non-negative",
                self.exploration
            )));
        }
        Ok(())
    }
}
