//! Headless single game.
//!
//! Plays one game between two registered strategies and prints the board
//! after every move, then the end-of-game report.
//!
//! ```text
//! play [settings.json] [--player NAME] [--computer NAME] [--seed N]
//! ```
//!
//! The settings file supplies `k`, `x`, `lower`, `bound`, `first` and
//! `algorithm` (the computer's strategy). `--computer` overrides `algorithm`;
//! `--player` picks the strategy driving the "Player" side (default `random`).

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use szemeredi_game::game::{Game, GameSettings, Player};
use szemeredi_game::strategy::{PositionView, StrategyRegistry};

struct Args {
    config_path: Option<String>,
    player: String,
    computer: Option<String>,
    seed: Option<u64>,
}

fn parse_args() -> Args {
    let mut args = Args {
        config_path: None,
        player: "random".to_string(),
        computer: None,
        seed: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--player" => {
                if let Some(name) = iter.next() {
                    args.player = name;
                }
            }
            "--computer" => args.computer = iter.next(),
            "--seed" => args.seed = iter.next().and_then(|s| s.parse().ok()),
            other => args.config_path = Some(other.to_string()),
        }
    }
    args
}

fn load_settings(path: Option<&str>) -> GameSettings {
    let Some(path) = path else {
        return GameSettings::default();
    };
    match GameSettings::from_json_file(path) {
        Ok(settings) => {
            println!("Loaded settings from: {}", path);
            settings
        }
        Err(e) => {
            println!("Could not load {}: {}", path, e);
            println!("Using default settings");
            GameSettings::default()
        }
    }
}

fn format_progression(prog: &[i64]) -> String {
    let terms: Vec<String> = prog.iter().map(|v| v.to_string()).collect();
    let d = if prog.len() >= 2 {
        (prog[1] - prog[0]).to_string()
    } else {
        "N/A".to_string()
    };
    format!("{} ; d = {}", terms.join(" "), d)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args();
    let mut settings = load_settings(args.config_path.as_deref());
    if let Some(computer) = args.computer {
        settings.algorithm = computer;
    }

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    println!("=== Szemerédi's Game ===");
    println!(
        "k={}, x={}, range={}-{}, first={}, seed={}",
        settings.k, settings.x, settings.lower, settings.bound, settings.first, seed
    );

    let mut game = match Game::new(&settings, &mut rng) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error generating set: {}", e);
            std::process::exit(1);
        }
    };

    let registry = StrategyRegistry::with_defaults();
    let player = registry.get(&args.player);
    let computer = registry.get(&settings.algorithm);
    println!("Player: {} | Computer: {}\n", player.name(), computer.name());
    println!("Pool: {:?}\n", game.pool());

    let start = Instant::now();
    while !game.is_over() {
        let mover = game.turn();
        let strategy = match mover {
            Player::A => &player,
            Player::B => &computer,
        };

        let value = match strategy.choose_move(&PositionView::from_game(&game), &mut rng) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("{} ({}) failed to move: {}", mover, strategy.name(), e);
                std::process::exit(1);
            }
        };
        if let Err(e) = game.apply_move(value) {
            eprintln!("{} played {}: {}", mover, value, e);
            std::process::exit(1);
        }

        let snap = game.snapshot();
        println!(
            "Turn {:>3}: {:<8} takes {:>4} | Player: {:?} | Computer: {:?}",
            snap.turn_count, mover.label(), value, snap.holdings_a, snap.holdings_b
        );
    }

    println!("\n=== Game Over ({} turns, {:.2}s) ===", game.turn_count(), start.elapsed().as_secs_f64());
    match (game.winner(), game.winning_progression()) {
        (Some(winner), Some(prog)) => {
            println!("{} wins!", winner);
            println!("Winning AP: {}", format_progression(prog));
        }
        _ => {
            println!("Draw!");
            if let Some(planted) = game.planted_progression() {
                println!("Forced AP: {}", format_progression(planted));
            }
        }
    }

    let planted = game.planted_progression().map(|p| p.to_vec());
    let others: Vec<Vec<i64>> = game
        .all_progressions()
        .into_iter()
        .filter(|p| Some(p) != planted.as_ref())
        .collect();
    println!("\nAll Winning APs ({}):", others.len());
    for prog in &others {
        println!("  {}", format_progression(prog));
    }
}
