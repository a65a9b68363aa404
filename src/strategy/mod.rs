//! Decision-making layer.
//!
//! Every player is a [`Strategy`]: given the numbers still available, its own
//! holdings, the opponent's holdings and `k`, it returns one available number.
//! Strategies are looked up by name in a [`StrategyRegistry`] built once at
//! startup and passed by reference to whatever needs to resolve a name.
//!
//! ## Available strategies
//!
//! - `random`: uniform choice
//! - `min`: smallest available number
//! - `heuristic`: stay near the median and near own holdings
//! - `heuristic_fast`: win now, else block, else maximize progression potential
//! - `mcts`: Monte-Carlo Tree Search with random rollouts

use std::fmt::Debug;

use rand::rngs::StdRng;

use crate::game::{Game, GameError};

pub mod heuristic;
pub mod mcts;
pub mod registry;

pub use heuristic::{FastHeuristicStrategy, MedianHeuristicStrategy, MinStrategy, RandomStrategy};
pub use mcts::{MctsConfig, MctsStrategy};
pub use registry::StrategyRegistry;

/// What a strategy sees when asked to move.
#[derive(Debug, Clone, Copy)]
pub struct PositionView<'a> {
    /// Numbers still in the pool.
    pub available: &'a [i64],
    /// Numbers held by the side to move.
    pub own: &'a [i64],
    /// Numbers held by the other side.
    pub opponent: &'a [i64],
    /// Progression length needed to win.
    pub k: usize,
}

impl<'a> PositionView<'a> {
    pub fn new(available: &'a [i64], own: &'a [i64], opponent: &'a [i64], k: usize) -> Self {
        Self {
            available,
            own,
            opponent,
            k,
        }
    }

    /// View of `game` from the side to move.
    pub fn from_game(game: &'a Game) -> Self {
        let mover = game.turn();
        Self {
            available: game.pool(),
            own: game.holdings(mover),
            opponent: game.holdings(mover.opponent()),
            k: game.k(),
        }
    }
}

/// A move-selection policy.
///
/// Implementations must return a value from `view.available`, or
/// [`GameError::NoMoveAvailable`] when it is empty. They must not keep
/// state between calls so one instance can serve many concurrent games.
pub trait Strategy: Debug + Send + Sync {
    /// Registry name of the strategy.
    fn name(&self) -> &str;

    /// Pick a number to claim.
    fn choose_move(&self, view: &PositionView<'_>, rng: &mut StdRng) -> Result<i64, GameError>;
}
