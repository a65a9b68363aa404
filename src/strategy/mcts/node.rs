//! Search tree node.
//!
//! A node is one hypothetical position reached from the root. Holdings are
//! kept from the root mover's point of view: `current` belongs to the side
//! that was to move at the root, `opponent` to the other side.

use crate::game::has_progression;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Parent index (`NONE` for the root). Only used to walk back up.
    pub parent: NodeId,

    /// Move that produced this node; `None` at the root.
    pub mv: Option<i64>,

    pub available: Vec<i64>,
    pub current: Vec<i64>,
    pub opponent: Vec<i64>,

    /// Whether the root mover is to move at this node.
    pub root_to_move: bool,

    pub visits: u32,

    /// Sum of playout results, scored for the root mover.
    pub wins: f64,

    /// Moves not yet expanded into children.
    pub untried: Vec<i64>,

    /// Children in creation order.
    pub children: Vec<NodeId>,

    pub depth: u32,

    /// Pool empty or either side already holds a progression.
    pub terminal: bool,
}

impl SearchNode {
    pub fn new_root(available: Vec<i64>, current: Vec<i64>, opponent: Vec<i64>, k: usize) -> Self {
        Self::build(NodeId::NONE, None, available, current, opponent, true, 0, k)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_child(
        parent: NodeId,
        mv: i64,
        available: Vec<i64>,
        current: Vec<i64>,
        opponent: Vec<i64>,
        root_to_move: bool,
        depth: u32,
        k: usize,
    ) -> Self {
        Self::build(parent, Some(mv), available, current, opponent, root_to_move, depth, k)
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        parent: NodeId,
        mv: Option<i64>,
        available: Vec<i64>,
        current: Vec<i64>,
        opponent: Vec<i64>,
        root_to_move: bool,
        depth: u32,
        k: usize,
    ) -> Self {
        let terminal =
            available.is_empty() || has_progression(k, &current) || has_progression(k, &opponent);
        Self {
            parent,
            mv,
            untried: available.clone(),
            available,
            current,
            opponent,
            root_to_move,
            visits: 0,
            wins: 0.0,
            children: Vec::new(),
            depth,
            terminal,
        }
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Mean result `wins / visits`, 0 when unvisited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCT score `wins/visits + c * sqrt(ln(N) / visits)`.
    ///
    /// Takes `ln(N)` of the parent's visits pre-computed. Unvisited nodes
    /// score infinity so they are always tried first.
    #[inline]
    pub fn uct_score(&self, ln_parent_visits: f64, c: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = self.visits as f64;
        self.wins / n + c * (ln_parent_visits / n).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = SearchNode::new_root(vec![3, 4, 6], vec![1, 2], vec![7, 9], 3);
        assert!(node.parent.is_none());
        assert_eq!(node.mv, None);
        assert_eq!(node.untried, vec![3, 4, 6]);
        assert!(node.root_to_move);
        assert!(!node.terminal);
        assert!(!node.is_fully_expanded());
    }

    #[test]
    fn test_terminal_detection() {
        assert!(SearchNode::new_root(vec![], vec![1], vec![2], 3).terminal);
        assert!(SearchNode::new_root(vec![8], vec![1, 2, 3], vec![], 3).terminal);
        assert!(SearchNode::new_root(vec![8], vec![], vec![2, 4, 6], 3).terminal);
        assert!(!SearchNode::new_root(vec![8], vec![1, 2], vec![4, 6], 3).terminal);
    }

    #[test]
    fn test_uct_score() {
        let mut node = SearchNode::new_root(vec![1], vec![], vec![], 3);
        assert_eq!(node.uct_score(1.0, 1.4), f64::INFINITY);

        node.visits = 4;
        node.wins = 3.0;
        let ln_parent = (16.0f64).ln();
        let expected = 0.75 + 1.4 * (ln_parent / 4.0).sqrt();
        assert!((node.uct_score(ln_parent, 1.4) - expected).abs() < 1e-12);
        assert!((node.mean_value() - 0.75).abs() < 1e-12);
    }
}
