//! Name-to-strategy mapping.
//!
//! The registry is an ordinary value: build it once at startup, register
//! everything, then share it by reference (or `Arc`). Names are
//! case-insensitive and unknown names resolve to `random`.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::strategy::heuristic::{
    FastHeuristicStrategy, MedianHeuristicStrategy, MinStrategy, RandomStrategy,
};
use crate::strategy::mcts::{MctsConfig, MctsStrategy};
use crate::strategy::Strategy;

/// Name of the strategy every lookup falls back to.
pub const FALLBACK: &str = "random";

/// Registry of strategies keyed by lowercase name.
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    strategies: FxHashMap<String, Arc<dyn Strategy>>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl StrategyRegistry {
    /// Registry holding only the `random` fallback.
    pub fn new() -> Self {
        let mut registry = Self {
            strategies: FxHashMap::default(),
        };
        registry.register(FALLBACK, Arc::new(RandomStrategy));
        registry
    }

    /// Registry with every built-in strategy, MCTS at its default budget.
    pub fn with_defaults() -> Self {
        Self::with_mcts_config(MctsConfig::default())
    }

    /// Registry with every built-in strategy and a custom MCTS configuration.
    pub fn with_mcts_config(config: MctsConfig) -> Self {
        let mut registry = Self::new();
        registry.register("min", Arc::new(MinStrategy));
        registry.register("heuristic", Arc::new(MedianHeuristicStrategy));
        registry.register("heuristic_fast", Arc::new(FastHeuristicStrategy));
        registry.register("mcts", Arc::new(MctsStrategy::new(config)));
        registry
    }

    /// Add a strategy under `name`. Later registrations replace earlier ones.
    pub fn register(&mut self, name: &str, strategy: Arc<dyn Strategy>) {
        let key = name.to_lowercase();
        if self.strategies.contains_key(&key) {
            warn!(name = %key, "Overriding existing strategy registration");
        }
        self.strategies.insert(key, strategy);
    }

    /// Look up a strategy, falling back to `random` for unknown names.
    pub fn get(&self, name: &str) -> Arc<dyn Strategy> {
        let key = name.to_lowercase();
        match self.strategies.get(&key) {
            Some(strategy) => Arc::clone(strategy),
            None => {
                warn!(name = %key, "Unknown strategy, falling back to {}", FALLBACK);
                match self.strategies.get(FALLBACK) {
                    Some(strategy) => Arc::clone(strategy),
                    None => Arc::new(RandomStrategy),
                }
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(&name.to_lowercase())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.strategies.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_registered() {
        let registry = StrategyRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec!["heuristic", "heuristic_fast", "mcts", "min", "random"]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = StrategyRegistry::with_defaults();
        assert_eq!(registry.get("MCTS").name(), "mcts");
        assert_eq!(registry.get("Heuristic_Fast").name(), "heuristic_fast");
        assert!(registry.contains("MiN"));
    }

    #[test]
    fn test_unknown_name_falls_back_to_random() {
        let registry = StrategyRegistry::with_defaults();
        assert_eq!(registry.get("alphazero").name(), "random");
        assert!(!registry.contains("alphazero"));
    }

    #[test]
    fn test_register_is_additive() {
        let mut registry = StrategyRegistry::new();
        assert_eq!(registry.len(), 1);

        registry.register("Lowest", Arc::new(MinStrategy));
        assert_eq!(registry.names(), vec!["lowest", "random"]);
        assert_eq!(registry.get("LOWEST").name(), "min");

        registry.register("lowest", Arc::new(RandomStrategy));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("lowest").name(), "random");
    }
}
