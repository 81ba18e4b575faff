//! Game balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                  # 1000 fights per matchup
//!   cargo run --bin simulate -- --quick       # Fast sanity check
//!   cargo run --bin simulate -- --seed 42     # Reproducible run
//!   cargo run --bin simulate -- --json        # Machine-readable report

use dungeon_master::build_info;
use dungeon_master::simulator::{run_simulation, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, json) = parse_args(&args);

    if !json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              DUNGEON MASTER BALANCE SIMULATOR                 ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--fights" => {
                if i + 1 < args.len() {
                    config.fights_per_matchup = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-r" | "--rolls" => {
                if i + 1 < args.len() {
                    config.rolls_per_table = args[i + 1].parse().unwrap_or(20_000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--quick" => {
                config = SimConfig {
                    seed: config.seed,
                    ..SimConfig::quick()
                };
            }
            "--json" => {
                json = true;
            }
            "-V" | "--version" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, json)
}

fn print_help() {
    println!("Dungeon Master Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --fights <N>    Fights per class and dungeon (default: 1000)");
    println!("    -r, --rolls <N>     Draws per reward table (default: 20000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --quick             Small sample (100 fights, 2000 rolls)");
    println!("    --json              Print the report as JSON");
    println!("    -V, --version       Show version information");
    println!("    -h, --help          Show this help");
    println!();
    println!("Set RUST_LOG=debug to trace every matchup.");
}
