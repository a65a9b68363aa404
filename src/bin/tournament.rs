//! Round-robin tournament between registered strategies.
//!
//! ```text
//! tournament [config.json] [--games N] [--algorithms a,b,c] [--seed N]
//!            [--simulations N] [--output results.json]
//! ```
//!
//! Without a config file every registered strategy plays every other one on
//! `k=4, x=30, range 1-100`, ten games per pair.

use std::time::Instant;

use tracing_subscriber::EnvFilter;

use szemeredi_game::strategy::{MctsConfig, StrategyRegistry};
use szemeredi_game::tournament::{run_tournament, TournamentConfig};

struct Args {
    config_path: Option<String>,
    games: Option<usize>,
    algorithms: Option<Vec<String>>,
    seed: Option<u64>,
    simulations: Option<u32>,
    output: String,
}

fn parse_args() -> Args {
    let mut args = Args {
        config_path: None,
        games: None,
        algorithms: None,
        seed: None,
        simulations: None,
        output: "tournament_results.json".to_string(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--games" => args.games = iter.next().and_then(|s| s.parse().ok()),
            "--algorithms" => {
                args.algorithms = iter
                    .next()
                    .map(|s| s.split(',').map(|n| n.trim().to_string()).collect())
            }
            "--seed" => args.seed = iter.next().and_then(|s| s.parse().ok()),
            "--simulations" => args.simulations = iter.next().and_then(|s| s.parse().ok()),
            "--output" => {
                if let Some(path) = iter.next() {
                    args.output = path;
                }
            }
            other => args.config_path = Some(other.to_string()),
        }
    }
    args
}

fn load_config(path: Option<&str>) -> TournamentConfig {
    let Some(path) = path else {
        return TournamentConfig::default();
    };
    match TournamentConfig::from_json_file(path) {
        Ok(config) => {
            println!("Loaded config from: {}", path);
            config
        }
        Err(e) => {
            println!("Could not load {}: {}", path, e);
            println!("Using default tournament settings");
            TournamentConfig::default()
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Strategy Tournament ===\n");
    let total_start = Instant::now();

    let args = parse_args();
    let mut config = load_config(args.config_path.as_deref());
    if let Some(games) = args.games {
        config.games_per_matchup = games;
    }
    if let Some(algorithms) = args.algorithms {
        config.algorithms = Some(algorithms);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let mut mcts = MctsConfig::default();
    if let Some(simulations) = args.simulations {
        mcts = mcts.with_simulations(simulations);
    }
    if let Err(e) = mcts.validate() {
        eprintln!("Invalid MCTS configuration: {}", e);
        std::process::exit(1);
    }
    let registry = StrategyRegistry::with_mcts_config(mcts);

    let algorithms = config.participants(&registry);
    println!(
        "Starting tournament with {} algorithms: {}",
        algorithms.len(),
        algorithms.join(", ")
    );
    println!("Each matchup will play {} games", config.games_per_matchup);
    println!(
        "Game settings: k={}, x={}, range={}-{}\n",
        config.settings.k, config.settings.x, config.settings.lower, config.settings.bound
    );

    let results = match run_tournament(&config, &registry) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Tournament failed: {}", e);
            std::process::exit(1);
        }
    };

    results.print_summary();

    match results.save_json(&args.output) {
        Ok(()) => println!("\nResults saved to: {}", args.output),
        Err(e) => eprintln!("\nFailed to save {}: {}", args.output, e),
    }
    println!("Total time: {:.2}s", total_start.elapsed().as_secs_f64());
}
