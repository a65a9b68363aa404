//! # Szemerédi's Game
//!
//! Two players alternately claim integers from a finite pool. The first to
//! hold a length-`k` arithmetic progression among their numbers wins; if the
//! pool runs out first, the game is drawn.
//!
//! ## Features
//!
//! - **Progression detector**: existence, first and exhaustive search for
//!   length-`k` progressions, plus pool generation with a planted one
//! - **Game state machine**: legality checks, win/draw detection, move
//!   history, replay and serializable snapshots
//! - **Strategies**: random, min, two heuristics and Monte-Carlo Tree Search,
//!   resolved by name through a registry
//! - **Tournaments**: parallel round-robin play with JSON results
//!
//! ## Quick Start
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use szemeredi_game::game::{Game, GameSettings};
//! use szemeredi_game::strategy::{PositionView, StrategyRegistry};
//!
//! let registry = StrategyRegistry::new();
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(&GameSettings::default(), &mut rng).unwrap();
//!
//! while !game.is_over() {
//!     let strategy = registry.get("random");
//!     let value = strategy.choose_move(&PositionView::from_game(&game), &mut rng).unwrap();
//!     game.apply_move(value).unwrap();
//! }
//! println!("{:?} after {} turns", game.status(), game.turn_count());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Tournament / single-game drivers                │
//! │  - Round-robin scheduling   - Timing and aggregation            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ resolves names via StrategyRegistry
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌───────────┐         ┌───────────┐
//!    │ random  │         │ heuristic │         │   MCTS    │
//!    │  min    │         │  _fast    │         │  (arena)  │
//!    └─────────┘         └───────────┘         └───────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            Game state machine + progression detector            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

/// Rules: progression detection, settings and the game state machine.
pub mod game;

/// Move-selection strategies and the name registry.
pub mod strategy;

/// Round-robin play between registered strategies.
pub mod tournament;

pub use game::{Game, GameError, GameSettings, GameSnapshot, GameStatus, Player};
pub use strategy::{MctsConfig, PositionView, Strategy, StrategyRegistry};
pub use tournament::{play_game, run_tournament, MatchOutcome, MatchRecord, TournamentConfig};
