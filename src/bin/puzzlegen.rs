//! Puzzle generator CLI.
//!
//! Composes a batch of puzzles and prints a summary, or the puzzles as JSON.
//!
//! Usage:
//!   cargo run --bin puzzlegen -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin puzzlegen                        # 10 capture puzzles at level 1
//!   cargo run --bin puzzlegen -- -l 6 -m checkmate   # catalog mates
//!   cargo run --bin puzzlegen -- --seed 42 --json    # reproducible JSON dump

use chess_drills::build_info;
use chess_drills::generator::{run_batch, GeneratorConfig, GeneratorMode};
use chess_drills::puzzle::Catalog;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, json) = parse_args(&args);

    init_logging(config.verbosity);

    let catalog = match &config.catalog_path {
        Some(path) => match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Failed to load catalog {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Catalog::builtin(),
    };

    let report = run_batch(&config, &catalog);

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> (GeneratorConfig, bool) {
    let mut config = GeneratorConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--count" => {
                if i + 1 < args.len() {
                    config.count = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "-l" | "--level" => {
                if i + 1 < args.len() {
                    config.level = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-m" | "--mode" => {
                if i + 1 < args.len() {
                    match GeneratorMode::parse(&args[i + 1]) {
                        Some(mode) => config.mode = mode,
                        None => {
                            eprintln!("Unknown mode: {}", args[i + 1]);
                            eprintln!("Run 'puzzlegen --help' for usage.");
                            std::process::exit(1);
                        }
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
            "-c" | "--catalog" => {
                if i + 1 < args.len() {
                    config.catalog_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--capture-sweep" => {
                config = GeneratorConfig::capture_sweep(config.level);
            }
            "--checkmate-sweep" => {
                config = GeneratorConfig::checkmate_sweep(config.level);
            }
            "--json" => {
                json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = config.verbosity.saturating_add(1);
            }
            "--version" => {
                println!(
                    "puzzlegen {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'puzzlegen --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    (config, json)
}

fn print_help() {
    println!("Chess puzzle generator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin puzzlegen -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --count <N>       Number of puzzles (default: 10)");
    println!("    -l, --level <L>       Difficulty level (default: 1)");
    println!("    -m, --mode <MODE>     capture | checkmate | mixed (default: capture)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -c, --catalog <FILE>  JSON catalog of mate-in-one positions");
    println!("    --capture-sweep       1000 capture puzzles at the current level");
    println!("    --checkmate-sweep     200 checkmate puzzles at the current level");
    println!("    --json                Print the full report as JSON");
    println!("    -v, --verbose         More logging (repeat for debug)");
    println!("    --version             Show version information");
    println!("    -h, --help            Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin puzzlegen -- -l 4 -n 20");
    println!("    cargo run --bin puzzlegen -- -l 7 -m mixed --seed 42");
    println!("    cargo run --bin puzzlegen -- -l 6 -m checkmate -c mates.json --json");
}
