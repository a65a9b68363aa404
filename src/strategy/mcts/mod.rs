//! Monte-Carlo Tree Search.
//!
//! The tree is arena-allocated: nodes sit in one `Vec` and point to their
//! parent by index, so there are no ownership cycles and the whole tree is
//! freed in one go once a move has been picked. Nothing is reused between
//! decisions.
//!
//! Backpropagation adds the same result at every level, scored for the side
//! to move at the root. Opponent levels therefore also rank their children by
//! the root mover's win rate.

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

pub use config::MctsConfig;
pub use node::{NodeId, SearchNode};
pub use search::{MctsStrategy, SearchResult};
pub use tree::{SearchTree, TreeStats};
