//! Rule engine for the arithmetic-progression game.
//!
//! Two players alternately claim integers from a finite pool. The first to
//! hold a length-`k` arithmetic progression wins; an emptied pool with no
//! progression is a draw.
//!
//! # Usage
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use szemeredi_game::game::{Game, GameSettings};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut game = Game::new(&GameSettings::default(), &mut rng).unwrap();
//!
//! let value = game.pool()[0];
//! game.apply_move(value).unwrap();
//! assert_eq!(game.turn_count(), 1);
//! ```

pub mod config;
pub mod error;
pub mod progression;
pub mod state;

pub use config::{ConfigError, GameSettings};
pub use error::GameError;
pub use progression::{
    find_all_progressions, find_one_progression, generate_pool_with_planted_progression,
    has_progression, is_progression,
};
pub use state::{Game, GameSnapshot, GameStatus, Move, Player};
