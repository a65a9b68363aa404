//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous `Vec` and refer to each other by [`NodeId`].
//! Children are owned through the arena; the parent index is a plain back
//! reference used only by backpropagation. The whole tree is dropped after
//! a single decision.

use crate::strategy::mcts::node::{NodeId, SearchNode};

/// Arena-backed search tree.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root: NodeId,
    k: usize,
}

impl SearchTree {
    /// Tree whose root is the position the root mover faces.
    pub fn new(available: Vec<i64>, current: Vec<i64>, opponent: Vec<i64>, k: usize) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(available, current, opponent, k)],
            root: NodeId(0),
            k,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn allocate(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Materialize one untried move of `parent` as a new child.
    /// Returns `None` if every move has already been expanded.
    pub fn expand(&mut self, parent_id: NodeId) -> Option<NodeId> {
        let k = self.k;
        let parent = self.get_mut(parent_id);
        let mv = parent.untried.pop()?;

        let mut available = parent.available.clone();
        available.retain(|&v| v != mv);
        let mut current = parent.current.clone();
        let mut opponent = parent.opponent.clone();
        if parent.root_to_move {
            current.push(mv);
        } else {
            opponent.push(mv);
        }

        let child = SearchNode::new_child(
            parent_id,
            mv,
            available,
            current,
            opponent,
            !parent.root_to_move,
            parent.depth + 1,
            k,
        );
        let child_id = self.allocate(child);
        self.get_mut(parent_id).children.push(child_id);
        Some(child_id)
    }

    /// Child of `node_id` with the highest UCT score; the first one wins ties.
    pub fn select_child(&self, node_id: NodeId, c: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let ln_parent = (node.visits.max(1) as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = self.get(child_id).uct_score(ln_parent, c);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Add `result` to every node from `leaf_id` up to the root.
    ///
    /// The same result is added at every level; it is always scored for the
    /// root mover, whichever side moves at the node being updated.
    pub fn backpropagate(&mut self, leaf_id: NodeId, result: f64) {
        let mut current_id = leaf_id;
        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visits += 1;
            node.wins += result;
            current_id = node.parent;
        }
    }

    /// Root child with the most visits; the earliest created wins ties.
    /// Returns `(move, visits)`.
    pub fn best_move(&self) -> Option<(i64, u32)> {
        let mut best: Option<(i64, u32)> = None;
        for &child_id in &self.get(self.root).children {
            let child = self.get(child_id);
            let mv = match child.mv {
                Some(mv) => mv,
                None => continue,
            };
            match best {
                Some((_, visits)) if child.visits <= visits => {}
                _ => best = Some((mv, child.visits)),
            }
        }
        best
    }

    /// `(move, visits)` for every root child in creation order.
    pub fn root_visits(&self) -> Vec<(i64, u32)> {
        self.get(self.root)
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child.mv.map(|mv| (mv, child.visits))
            })
            .collect()
    }

    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_value: root.mean_value(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
        }
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
