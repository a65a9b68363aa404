//! Match play and round-robin tournaments between registered strategies.
//!
//! Every game owns its state, its RNG and any search tree its strategies
//! build, so games run in parallel with no shared mutable state beyond the
//! progress bar.

use std::fs;
use std::path::Path;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::{ConfigError, Game, GameError, GameSettings, GameStatus, Player};
use crate::strategy::{PositionView, StrategyRegistry};

pub mod output;

pub use output::{AlgorithmStats, HeadToHead, TournamentMetadata, TournamentResults};

/// Tournament configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Settings every game is created from.
    pub settings: GameSettings,

    /// Games played per pair of strategies.
    pub games_per_matchup: usize,

    /// Strategies taking part; every registered one when `None`.
    pub algorithms: Option<Vec<String>>,

    /// Base seed. Game `i` uses `seed + i`; a random base is drawn when `None`.
    pub seed: Option<u64>,

    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            settings: GameSettings::default()
                .with_k(4)
                .with_pool_size(30)
                .with_range(1, 100),
            games_per_matchup: 10,
            algorithms: None,
            seed: None,
            show_progress: true,
        }
    }
}

impl TournamentConfig {
    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_games_per_matchup(mut self, games: usize) -> Self {
        self.games_per_matchup = games;
        self
    }

    pub fn with_algorithms<S: Into<String>>(mut self, algorithms: impl IntoIterator<Item = S>) -> Self {
        self.algorithms = Some(algorithms.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.settings.validate()?;
        if self.games_per_matchup == 0 {
            return Err(GameError::invalid("games_per_matchup must be at least 1"));
        }
        Ok(())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Participating strategy names: lowercased, sorted, deduplicated.
    pub fn participants(&self, registry: &StrategyRegistry) -> Vec<String> {
        let mut names: Vec<String> = match &self.algorithms {
            Some(list) => list.iter().map(|n| n.to_lowercase()).collect(),
            None => registry.names(),
        };
        names.sort();
        names.dedup();
        names
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Won(Player),
    Drawn,
}

/// Result of one game between two strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub outcome: MatchOutcome,
    pub turns: usize,
    /// Seconds spent inside player A's strategy.
    pub time_a: f64,
    /// Seconds spent inside player B's strategy.
    pub time_b: f64,
}

/// Play one game from `settings`, `algo_a` as player A and `algo_b` as B.
///
/// Each strategy call is timed; a returned number that is not in the pool
/// surfaces as [`GameError::IllegalMove`].
pub fn play_game(
    settings: &GameSettings,
    registry: &StrategyRegistry,
    algo_a: &str,
    algo_b: &str,
    rng: &mut StdRng,
) -> Result<MatchRecord, GameError> {
    let mut game = Game::new(settings, rng)?;
    let strategy_a = registry.get(algo_a);
    let strategy_b = registry.get(algo_b);
    let mut time_a = 0.0;
    let mut time_b = 0.0;

    while !game.is_over() {
        let mover = game.turn();
        let strategy = match mover {
            Player::A => &strategy_a,
            Player::B => &strategy_b,
        };

        let start = Instant::now();
        let value = strategy.choose_move(&PositionView::from_game(&game), rng)?;
        let elapsed = start.elapsed().as_secs_f64();
        match mover {
            Player::A => time_a += elapsed,
            Player::B => time_b += elapsed,
        }

        game.apply_move(value)?;
    }

    let outcome = match game.status() {
        GameStatus::Won { winner, .. } => MatchOutcome::Won(*winner),
        _ => MatchOutcome::Drawn,
    };
    debug!(algo_a, algo_b, ?outcome, turns = game.turn_count(), "game finished");

    Ok(MatchRecord {
        outcome,
        turns: game.turn_count(),
        time_a,
        time_b,
    })
}

/// Play every pair `a < b` of participants `games_per_matchup` times, with
/// `a` as player A, and aggregate the outcomes.
pub fn run_tournament(
    config: &TournamentConfig,
    registry: &StrategyRegistry,
) -> Result<TournamentResults, GameError> {
    config.validate()?;
    let start = Instant::now();

    let algorithms = config.participants(registry);
    let matchups: Vec<(String, String)> = algorithms
        .iter()
        .flat_map(|a| {
            algorithms
                .iter()
                .filter(move |b| a < *b)
                .map(move |b| (a.clone(), b.clone()))
        })
        .collect();

    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let jobs: Vec<(usize, u64)> = (0..matchups.len())
        .flat_map(|m| std::iter::repeat(m).take(config.games_per_matchup))
        .enumerate()
        .map(|(i, m)| (m, base_seed.wrapping_add(i as u64)))
        .collect();

    info!(
        algorithms = %algorithms.join(", "),
        matchups = matchups.len(),
        games = jobs.len(),
        k = config.settings.k,
        x = config.settings.x,
        "Starting tournament"
    );

    let progress = progress_bar(jobs.len() as u64, config.show_progress);

    let records: Vec<(usize, MatchRecord)> = jobs
        .par_iter()
        .map(|&(m, seed)| -> Result<(usize, MatchRecord), GameError> {
            let (algo_a, algo_b) = &matchups[m];
            let mut rng = StdRng::seed_from_u64(seed);
            let record = play_game(&config.settings, registry, algo_a, algo_b, &mut rng)?;
            progress.inc(1);
            Ok((m, record))
        })
        .collect::<Result<_, _>>()?;
    progress.finish_and_clear();

    let mut results = TournamentResults::new(config, &algorithms, base_seed);
    for (m, record) in &records {
        let (algo_a, algo_b) = &matchups[*m];
        results.record(algo_a, algo_b, record);
    }
    results.metadata.elapsed_secs = start.elapsed().as_secs_f64();

    info!(
        games = results.total_games,
        elapsed_secs = results.metadata.elapsed_secs,
        "Tournament finished"
    );
    Ok(results)
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({eta})")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
