//! Error taxonomy for the game core.
//!
//! Every variant is a fail-fast contract violation: nothing in the core
//! retries or substitutes a default after one of these is raised.

use thiserror::Error;

/// Errors raised by the detector, the state machine and the strategies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Impossible `(k, x, lower, bound)` combination or malformed pool.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The value is not currently in the pool.
    #[error("illegal move: {0} is not in the pool")]
    IllegalMove(i64),

    /// A move was attempted after the game reached a terminal state.
    #[error("game is already over")]
    GameAlreadyOver,

    /// A strategy was asked to move with nothing left to choose from.
    #[error("no move available")]
    NoMoveAvailable,
}

impl GameError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GameError::InvalidConfiguration(msg.into())
    }
}
