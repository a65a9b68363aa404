//! MCTS search implementation.
//!
//! One decision runs a fixed number of simulations, each of which:
//! 1. Selection: descend by UCT through fully expanded nodes
//! 2. Expansion: materialize one untried move
//! 3. Simulation: uniformly random playout to the end of the game
//! 4. Backpropagation: add the playout result up to the root
//!
//! Results are always scored for the side to move at the root, and the same
//! value is added at every level of the path.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::game::{has_progression, GameError};
use crate::strategy::mcts::config::MctsConfig;
use crate::strategy::mcts::node::{NodeId, SearchNode};
use crate::strategy::mcts::tree::{SearchTree, TreeStats};
use crate::strategy::{PositionView, Strategy};

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move to play.
    pub best_move: i64,

    /// `(move, visits)` per root child in creation order.
    pub visits: Vec<(i64, u32)>,

    /// Number of simulations performed.
    pub simulations: u32,

    pub stats: TreeStats,
}

/// Monte-Carlo Tree Search with random rollouts.
#[derive(Debug, Clone, Default)]
pub struct MctsStrategy {
    config: MctsConfig,
}

impl MctsStrategy {
    pub fn new(config: MctsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run a full search from `view` and report the chosen move with the
    /// root statistics.
    pub fn search(&self, view: &PositionView<'_>, rng: &mut StdRng) -> Result<SearchResult, GameError> {
        if view.available.is_empty() {
            return Err(GameError::NoMoveAvailable);
        }

        let mut tree = SearchTree::new(
            view.available.to_vec(),
            view.own.to_vec(),
            view.opponent.to_vec(),
            view.k,
        );
        let root = tree.root();

        for sim in 0..self.config.simulations {
            let leaf = self.select(&tree, root);
            let node = if tree.get(leaf).terminal {
                leaf
            } else {
                tree.expand(leaf).unwrap_or(leaf)
            };

            let result = rollout(tree.get(node), view.k, rng);
            tree.backpropagate(node, result);
            trace!(
                sim,
                depth = tree.get(node).depth,
                result,
                "mcts simulation"
            );
        }

        let visits = tree.root_visits();
        let stats = tree.stats();
        let best_move = match tree.best_move() {
            Some((mv, _)) => mv,
            // Root was already terminal, so nothing was ever expanded.
            None => view
                .available
                .choose(rng)
                .copied()
                .ok_or(GameError::NoMoveAvailable)?,
        };

        debug!(
            best_move,
            simulations = stats.root_visits,
            nodes = stats.total_nodes,
            root_value = stats.root_value,
            "mcts decision"
        );

        Ok(SearchResult {
            best_move,
            visits,
            simulations: stats.root_visits,
            stats,
        })
    }

    /// Descend from `from` until a terminal or not fully expanded node.
    fn select(&self, tree: &SearchTree, from: NodeId) -> NodeId {
        let mut current = from;
        loop {
            let node = tree.get(current);
            if node.terminal || !node.is_fully_expanded() {
                return current;
            }
            match tree.select_child(current, self.config.exploration) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }
}

impl Strategy for MctsStrategy {
    fn name(&self) -> &str {
        "mcts"
    }

    fn choose_move(&self, view: &PositionView<'_>, rng: &mut StdRng) -> Result<i64, GameError> {
        self.search(view, rng).map(|result| result.best_move)
    }
}

/// Play uniformly random moves from `node` until someone completes a
/// progression or the pool runs out.
///
/// Returns 1 if the root mover wins, 0 if the other side wins, 0.5 on a draw.
fn rollout(node: &SearchNode, k: usize, rng: &mut StdRng) -> f64 {
    if has_progression(k, &node.current) {
        return 1.0;
    }
    if has_progression(k, &node.opponent) {
        return 0.0;
    }

    let mut available = node.available.clone();
    let mut current = node.current.clone();
    let mut opponent = node.opponent.clone();
    let mut root_to_move = node.root_to_move;

    while !available.is_empty() {
        let idx = rng.gen_range(0..available.len());
        let value = available.swap_remove(idx);
        let holder = if root_to_move {
            &mut current
        } else {
            &mut opponent
        };
        holder.push(value);
        if has_progression(k, holder) {
            return if root_to_move { 1.0 } else { 0.0 };
        }
        root_to_move = !root_to_move;
    }
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn strategy(simulations: u32) -> MctsStrategy {
        MctsStrategy::new(MctsConfig::default().with_simulations(simulations))
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let view = PositionView::new(&[], &[1, 2], &[5], 3);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            strategy(10).choose_move(&view, &mut rng),
            Err(GameError::NoMoveAvailable)
        );
    }

    #[test]
    fn test_root_visits_match_budget() {
        let available = [3, 4, 6, 7, 8];
        let view = PositionView::new(&available, &[1, 2], &[5, 9], 3);
        let mut rng = StdRng::seed_from_u64(3);
        let result = strategy(300).search(&view, &mut rng).unwrap();

        assert_eq!(result.simulations, 300);
        assert_eq!(result.stats.root_visits, 300);
        let child_visits: u32 = result.visits.iter().map(|&(_, v)| v).sum();
        assert_eq!(child_visits, 300);
        assert_eq!(result.visits.len(), available.len());
        assert!(available.contains(&result.best_move));
    }

    #[test]
    fn test_finds_immediate_win() {
        // 3 completes 1,2,3 for the mover; the opponent threatens 7.
        let available = [3, 4, 6, 7, 8];
        let view = PositionView::new(&available, &[1, 2], &[5, 9], 3);
        let mcts = MctsStrategy::default();

        let wins = (0..20u64)
            .filter(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                mcts.choose_move(&view, &mut rng) == Ok(3)
            })
            .count();
        assert!(wins >= 19, "winning move chosen in {wins}/20 trials");
    }

    #[test]
    fn test_winning_child_gets_plurality() {
        let available: Vec<i64> = (1..=9).filter(|v| ![1, 5, 2, 9].contains(v)).collect();
        let view = PositionView::new(&available, &[1, 5], &[2, 9], 3);
        let mut rng = StdRng::seed_from_u64(42);
        let result = MctsStrategy::default().search(&view, &mut rng).unwrap();

        let (_, winning_visits) = result.visits.iter().copied().find(|&(mv, _)| mv == 3).unwrap();
        for &(mv, visits) in &result.visits {
            if mv != 3 {
                assert!(winning_visits > visits, "{mv} got {visits} >= {winning_visits}");
            }
        }
        assert_eq!(result.best_move, 3);
    }

    #[test]
    fn test_extreme_values_win() {
        // i64::MIN + 1, 0, i64::MAX has common difference i64::MAX.
        let available = [5, i64::MAX, 7];
        let view = PositionView::new(&available, &[i64::MIN + 1, 0], &[], 3);
        let mut rng = StdRng::seed_from_u64(13);
        let result = MctsStrategy::new(MctsConfig::for_testing())
            .search(&view, &mut rng)
            .unwrap();

        assert_eq!(result.simulations, MctsConfig::for_testing().simulations);
        assert_eq!(result.best_move, i64::MAX);
    }

    #[test]
    fn test_single_move_left() {
        let view = PositionView::new(&[42], &[1], &[2], 3);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(strategy(50).choose_move(&view, &mut rng), Ok(42));
    }

    #[test]
    fn test_terminal_root_falls_back_to_random() {
        // Mover already holds 1,2,3 so the root is terminal.
        let available = [10, 20, 30];
        let view = PositionView::new(&available, &[1, 2, 3], &[], 3);
        let mut rng = StdRng::seed_from_u64(8);
        let result = strategy(20).search(&view, &mut rng).unwrap();

        assert!(result.visits.is_empty());
        assert_eq!(result.stats.total_nodes, 1);
        assert!((result.stats.root_value - 1.0).abs() < 1e-12);
        assert!(available.contains(&result.best_move));
    }

    #[test]
    fn test_rollout_scoring() {
        let mut rng = StdRng::seed_from_u64(1);

        let won = SearchNode::new_root(vec![7], vec![1, 2, 3], vec![], 3);
        assert_eq!(rollout(&won, 3, &mut rng), 1.0);

        let lost = SearchNode::new_root(vec![7], vec![], vec![2, 4, 6], 3);
        assert_eq!(rollout(&lost, 3, &mut rng), 0.0);

        // Root side takes the last number and completes 1,2,3.
        let forced = SearchNode::new_root(vec![3], vec![1, 2], vec![], 3);
        assert_eq!(rollout(&forced, 3, &mut rng), 1.0);

        // Opponent to move takes the last number and completes 4,5,6.
        let mut reply = SearchNode::new_root(vec![6], vec![1, 2], vec![4, 5], 3);
        reply.root_to_move = false;
        assert_eq!(rollout(&reply, 3, &mut rng), 0.0);

        // Nothing can complete: draw.
        let draw = SearchNode::new_root(vec![100], vec![1], vec![50], 3);
        assert_eq!(rollout(&draw, 3, &mut rng), 0.5);
    }
}
