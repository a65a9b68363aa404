//! Authoritative game state and the single `apply_move` transition.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::config::GameSettings;
use crate::game::error::GameError;
use crate::game::progression::{
    find_all_progressions, find_one_progression, generate_pool_with_planted_progression,
};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The side named "player" by the settings layer.
    #[serde(alias = "a", alias = "player", alias = "Player")]
    A,
    /// The side named "computer" by the settings layer.
    #[serde(alias = "b", alias = "computer", alias = "Computer")]
    B,
}

impl Player {
    /// The other side.
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    /// Display label used by the single-game driver.
    pub fn label(self) -> &'static str {
        match self {
            Player::A => "Player",
            Player::B => "Computer",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Game status. `Won` and `Drawn` are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won {
        winner: Player,
        progression: Vec<i64>,
    },
    Drawn,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// A recorded move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub player: Player,
    pub value: i64,
}

/// Read-only view of a game handed to presentation and reporting layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub k: usize,
    pub pool: Vec<i64>,
    pub holdings_a: Vec<i64>,
    pub holdings_b: Vec<i64>,
    pub turn: Player,
    pub terminal: bool,
    pub winner: Option<Player>,
    pub winning_progression: Option<Vec<i64>>,
    pub turn_count: usize,
}

/// The pick-a-number game.
///
/// The pool and both holdings always partition the initial pool. State only
/// changes through [`Game::apply_move`] and is frozen once terminal.
#[derive(Debug, Clone)]
pub struct Game {
    k: usize,
    initial_pool: Vec<i64>,
    pool: Vec<i64>,
    holdings: [Vec<i64>; 2],
    first: Player,
    turn: Player,
    status: GameStatus,
    planted: Option<Vec<i64>>,
    history: Vec<Move>,
}

impl Game {
    /// Start a game from validated settings, generating a pool with a
    /// planted progression.
    pub fn new<R: Rng + ?Sized>(settings: &GameSettings, rng: &mut R) -> Result<Self, GameError> {
        settings.validate()?;
        let (pool, planted) = generate_pool_with_planted_progression(
            settings.k,
            settings.x,
            settings.lower,
            settings.bound,
            rng,
        )?;
        debug!(k = settings.k, pool = ?pool, planted = ?planted, "Generated pool");

        let mut game = Self::from_pool(settings.k, pool, settings.first)?;
        game.planted = Some(planted);
        Ok(game)
    }

    /// Start a game on an explicit pool.
    pub fn from_pool(k: usize, pool: Vec<i64>, first: Player) -> Result<Self, GameError> {
        if k == 0 {
            return Err(GameError::invalid("progression length must be at least 1"));
        }
        let mut seen = rustc_hash::FxHashSet::default();
        if let Some(dup) = pool.iter().find(|v| !seen.insert(**v)) {
            return Err(GameError::invalid(format!("pool contains {} twice", dup)));
        }

        let status = if pool.is_empty() {
            GameStatus::Drawn
        } else {
            GameStatus::InProgress
        };

        Ok(Self {
            k,
            initial_pool: pool.clone(),
            pool,
            holdings: [Vec::new(), Vec::new()],
            first,
            turn: first,
            status,
            planted: None,
            history: Vec::new(),
        })
    }

    /// Rebuild a game by applying `moves` in order on a fresh pool.
    pub fn replay(k: usize, pool: Vec<i64>, first: Player, moves: &[i64]) -> Result<Self, GameError> {
        let mut game = Self::from_pool(k, pool, first)?;
        for &value in moves {
            game.apply_move(value)?;
        }
        Ok(game)
    }

    /// Claim `value` for the side to move.
    ///
    /// The mover wins if their holdings now contain a length-`k` progression
    /// (the lexicographically first one is recorded). Otherwise an empty pool
    /// is a draw, and the turn passes.
    pub fn apply_move(&mut self, value: i64) -> Result<&GameStatus, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameAlreadyOver);
        }
        let pos = self
            .pool
            .iter()
            .position(|&v| v == value)
            .ok_or(GameError::IllegalMove(value))?;

        let mover = self.turn;
        self.pool.remove(pos);
        self.holdings[mover.index()].push(value);
        self.history.push(Move { player: mover, value });

        if let Some(progression) = find_one_progression(self.k, &self.holdings[mover.index()]) {
            debug!(winner = %mover, progression = ?progression, "Game won");
            self.status = GameStatus::Won {
                winner: mover,
                progression,
            };
        } else if self.pool.is_empty() {
            debug!(turns = self.history.len(), "Game drawn");
            self.status = GameStatus::Drawn;
        } else {
            self.turn = mover.opponent();
        }

        Ok(&self.status)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Numbers not yet claimed, in pool order.
    pub fn pool(&self) -> &[i64] {
        &self.pool
    }

    pub fn initial_pool(&self) -> &[i64] {
        &self.initial_pool
    }

    pub fn holdings(&self, player: Player) -> &[i64] {
        &self.holdings[player.index()]
    }

    /// Side to move (the last mover once the game is over).
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn first(&self) -> Player {
        self.first
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn winner(&self) -> Option<Player> {
        match &self.status {
            GameStatus::Won { winner, .. } => Some(*winner),
            _ => None,
        }
    }

    pub fn winning_progression(&self) -> Option<&[i64]> {
        match &self.status {
            GameStatus::Won { progression, .. } => Some(progression),
            _ => None,
        }
    }

    /// Progression planted at generation time, if the pool was generated.
    pub fn planted_progression(&self) -> Option<&[i64]> {
        self.planted.as_deref()
    }

    /// Every length-`k` progression in the initial pool.
    pub fn all_progressions(&self) -> Vec<Vec<i64>> {
        find_all_progressions(self.k, &self.initial_pool)
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of moves applied so far.
    pub fn turn_count(&self) -> usize {
        self.history.len()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            k: self.k,
            pool: self.pool.clone(),
            holdings_a: self.holdings[0].clone(),
            holdings_b: self.holdings[1].clone(),
            turn: self.turn,
            terminal: self.is_over(),
            winner: self.winner(),
            winning_progression: self.winning_progression().map(|p| p.to_vec()),
            turn_count: self.turn_count(),
        }
    }
}
