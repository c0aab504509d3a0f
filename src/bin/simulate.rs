//! Duel balance simulator CLI.
//!
//! Run Monte Carlo duels between two class/level presets.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 1000 duels, Warrior L5 vs Rogue L5
//!   cargo run --bin simulate -- -a mage:3 -b rogue:6  # Custom matchup
//!   cargo run --bin simulate -- --seed 42             # Reproducible run

use devquest_arena::combat::FighterClass;
use devquest_arena::simulator::{run_simulation, FighterPreset, SimConfig};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              DEVQUEST DUEL SIMULATOR                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Duels:          {}", config.num_duels);
    println!(
        "  Fighter A:      {} L{}",
        config.fighter_a.class.name(),
        config.fighter_a.level
    );
    println!(
        "  Fighter B:      {} L{}",
        config.fighter_b.class.name(),
        config.fighter_b.level
    );
    println!("  Max Turns:      {}", config.max_turns);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "duel_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(e) = std::fs::write(&filename, report.to_json()) {
            eprintln!("Failed to write JSON report: {}", e);
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", filename);
    }

    ExitCode::SUCCESS
}

/// Parse a `class:level` preset such as `mage:7`.
fn parse_preset(value: &str) -> Option<FighterPreset> {
    let (class, level): (&str, u32) = match value.split_once(':') {
        Some((class, level)) => (class, level.parse().ok()?),
        None => (value, 1),
    };
    Some(FighterPreset::new(class.parse::<FighterClass>().ok()?, level.max(1)))
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--duels" => {
                if i + 1 < args.len() {
                    config.num_duels = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-a" | "--fighter-a" => {
                if i + 1 < args.len() {
                    if let Some(preset) = parse_preset(&args[i + 1]) {
                        config.fighter_a = preset;
                    }
                    i += 1;
                }
            }
            "-b" | "--fighter-b" => {
                if i + 1 < args.len() {
                    if let Some(preset) = parse_preset(&args[i + 1]) {
                        config.fighter_b = preset;
                    }
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--turns" => {
                if i + 1 < args.len() {
                    config.max_turns = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "--no-alternate" => {
                config.alternate_sides = false;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--mirror" => {
                config = SimConfig::mirror_test(config.fighter_a.class, config.fighter_a.level);
            }
            "--underdog" => {
                config = SimConfig::level_gap_test(5, 3);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("DevQuest Duel Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --duels <N>         Number of duels (default: 1000)");
    println!("    -a, --fighter-a <C:L>   Fighter A class and level (default: warrior:5)");
    println!("    -b, --fighter-b <C:L>   Fighter B class and level (default: rogue:5)");
    println!("    -s, --seed <S>          Random seed for reproducibility");
    println!("    -t, --turns <T>         Turn cap per duel (default: 100)");
    println!("    --no-alternate          Always list fighter A first");
    println!("    -v, --verbose           Print every duel");
    println!("    --json                  Save JSON report");
    println!("    --mirror                Mirror match of fighter A's preset (200 duels)");
    println!("    --underdog              Warrior L5 vs Warrior L8 (500 duels)");
    println!("    -h, --help              Show this help");
    println!();
    println!("CLASSES: warrior, mage, rogue, paladin");
}
