//! Aggregated tournament results: console summary and JSON export.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;

use serde::{Deserialize, Serialize};

use super::{MatchOutcome, MatchRecord, TournamentConfig};
use crate::game::Player;

/// Per-strategy totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmStats {
    pub name: String,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    /// 1 per win, 0.5 per draw.
    pub points: f64,
    pub games: usize,
    /// Seconds spent deciding moves, over all games.
    pub total_time: f64,
}

impl AlgorithmStats {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Average decision time per game played.
    pub fn avg_time(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_time / self.games as f64
        }
    }
}

/// Row-versus-column record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentMetadata {
    pub k: usize,
    pub x: usize,
    pub lower: i64,
    pub bound: i64,
    pub games_per_matchup: usize,
    pub seed: u64,
    pub elapsed_secs: f64,
    pub timestamp: String,
}

/// Complete tournament output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    pub metadata: TournamentMetadata,
    /// Participants, sorted.
    pub algorithms: Vec<String>,
    pub stats: BTreeMap<String, AlgorithmStats>,
    /// `head_to_head[row][col]` is row's record against col.
    pub head_to_head: BTreeMap<String, BTreeMap<String, HeadToHead>>,
    pub total_games: usize,
}

impl TournamentResults {
    pub fn new(config: &TournamentConfig, algorithms: &[String], seed: u64) -> Self {
        let settings = &config.settings;
        Self {
            metadata: TournamentMetadata {
                k: settings.k,
                x: settings.x,
                lower: settings.lower,
                bound: settings.bound,
                games_per_matchup: config.games_per_matchup,
                seed,
                elapsed_secs: 0.0,
                timestamp: format!(
                    "{}",
                    std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_secs())
                        .unwrap_or(0)
                ),
            },
            algorithms: algorithms.to_vec(),
            stats: algorithms
                .iter()
                .map(|name| (name.clone(), AlgorithmStats::new(name)))
                .collect(),
            head_to_head: BTreeMap::new(),
            total_games: 0,
        }
    }

    /// Fold one game of `algo_a` (player A) against `algo_b` into the totals.
    pub fn record(&mut self, algo_a: &str, algo_b: &str, record: &MatchRecord) {
        let (result_a, result_b) = match record.outcome {
            MatchOutcome::Won(Player::A) => (Outcome::Win, Outcome::Loss),
            MatchOutcome::Won(Player::B) => (Outcome::Loss, Outcome::Win),
            MatchOutcome::Drawn => (Outcome::Draw, Outcome::Draw),
        };
        self.apply(algo_a, algo_b, result_a, record.time_a);
        self.apply(algo_b, algo_a, result_b, record.time_b);
        self.total_games += 1;
    }

    fn apply(&mut self, name: &str, against: &str, result: Outcome, time: f64) {
        let stats = self
            .stats
            .entry(name.to_string())
            .or_insert_with(|| AlgorithmStats::new(name));
        let h2h = self
            .head_to_head
            .entry(name.to_string())
            .or_default()
            .entry(against.to_string())
            .or_default();

        match result {
            Outcome::Win => {
                stats.wins += 1;
                stats.points += 1.0;
                h2h.wins += 1;
            }
            Outcome::Draw => {
                stats.draws += 1;
                stats.points += 0.5;
                h2h.draws += 1;
            }
            Outcome::Loss => {
                stats.losses += 1;
                h2h.losses += 1;
            }
        }
        stats.games += 1;
        stats.total_time += time;
    }

    /// Stats sorted by points, highest first. Equal points keep name order.
    pub fn standings(&self) -> Vec<&AlgorithmStats> {
        let mut rows: Vec<&AlgorithmStats> = self.stats.values().collect();
        rows.sort_by(|a, b| b.points.total_cmp(&a.points));
        rows
    }

    pub fn head_to_head(&self, row: &str, col: &str) -> HeadToHead {
        self.head_to_head
            .get(row)
            .and_then(|cols| cols.get(col))
            .copied()
            .unwrap_or_default()
    }

    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn print_summary(&self) {
        println!("\n====== TOURNAMENT RESULTS ======");
        println!(
            "k={}, x={}, range={}-{} | {} games ({} per matchup) | {:.2}s",
            self.metadata.k,
            self.metadata.x,
            self.metadata.lower,
            self.metadata.bound,
            self.total_games,
            self.metadata.games_per_matchup,
            self.metadata.elapsed_secs
        );

        println!("\nAlgorithm Performance:");
        for stats in self.standings() {
            let win_pct = if self.total_games > 0 {
                stats.wins as f64 / self.total_games as f64 * 100.0
            } else {
                0.0
            };
            println!(
                "{}: {} points - {}W/{}D/{}L ({:.1}%) - Avg time: {:.3}s",
                stats.name,
                stats.points,
                stats.wins,
                stats.draws,
                stats.losses,
                win_pct,
                stats.avg_time()
            );
        }

        println!("\nHead-to-Head Results:");
        println!("Format: [row] vs [column]: W-D-L");
        let mut header = format!("{:<15}", "Algorithm");
        for algo in &self.algorithms {
            header.push_str(&format!("{:<10}", truncate(algo, 8)));
        }
        println!("{}", header);

        for row_algo in &self.algorithms {
            let mut row = format!("{:<15}", truncate(row_algo, 14));
            for col_algo in &self.algorithms {
                if row_algo == col_algo {
                    row.push_str(&format!("{:<10}", "---"));
                } else {
                    let h = self.head_to_head(row_algo, col_algo);
                    row.push_str(&format!("{:<10}", format!("{}-{}-{}", h.wins, h.draws, h.losses)));
                }
            }
            println!("{}", row);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Win,
    Draw,
    Loss,
}

fn truncate(name: &str, max: usize) -> &str {
    match name.char_indices().nth(max) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> TournamentResults {
        let names = vec!["mcts".to_string(), "random".to_string()];
        TournamentResults::new(&TournamentConfig::default(), &names, 0)
    }

    fn game(outcome: MatchOutcome) -> MatchRecord {
        MatchRecord {
            outcome,
            turns: 10,
            time_a: 1.0,
            time_b: 0.5,
        }
    }

    #[test]
    fn test_record_updates_both_sides() {
        let mut r = results();
        r.record("mcts", "random", &game(MatchOutcome::Won(Player::A)));
        r.record("mcts", "random", &game(MatchOutcome::Won(Player::B)));
        r.record("mcts", "random", &game(MatchOutcome::Drawn));

        let mcts = &r.stats["mcts"];
        assert_eq!((mcts.wins, mcts.draws, mcts.losses), (1, 1, 1));
        assert!((mcts.points - 1.5).abs() < 1e-12);
        assert!((mcts.avg_time() - 1.0).abs() < 1e-12);

        let random = &r.stats["random"];
        assert_eq!((random.wins, random.draws, random.losses), (1, 1, 1));
        assert!((random.avg_time() - 0.5).abs() < 1e-12);

        assert_eq!(
            r.head_to_head("mcts", "random"),
            HeadToHead { wins: 1, draws: 1, losses: 1 }
        );
        assert_eq!(r.total_games, 3);
    }

    #[test]
    fn test_standings_order() {
        let mut r = results();
        r.record("mcts", "random", &game(MatchOutcome::Won(Player::B)));
        let order: Vec<&str> = r.standings().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, vec!["random", "mcts"]);

        r.record("mcts", "random", &game(MatchOutcome::Won(Player::A)));
        let order: Vec<&str> = r.standings().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, vec!["mcts", "random"]);
    }

    #[test]
    fn test_missing_pair_is_empty() {
        let r = results();
        assert_eq!(r.head_to_head("mcts", "random"), HeadToHead::default());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("heuristic_fast", 8), "heuristi");
        assert_eq!(truncate("min", 8), "min");
    }

    #[test]
    fn test_json_roundtrip() {
        let mut r = results();
        r.record("mcts", "random", &game(MatchOutcome::Drawn));
        let json = serde_json::to_string(&r).unwrap();
        let back: TournamentResults = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stats, r.stats);
        assert_eq!(back.head_to_head, r.head_to_head);
    }
}
