//! chess-perft - lists generated moves and counts perft nodes.
//!
//! Positions are given as FEN (the starting position by default), optionally
//! followed by UCI moves to play before the command runs.

mod config;
mod report;

use anyhow::{bail, Context};
use chess_engine::{find_move, generate_legal_moves, generate_moves, perft, perft_divide, Position};
use clap::{Args, Parser, Subcommand};
use config::SuiteConfig;
use report::{DivideEntry, MovesReport, PerftReport, SuiteReport, SuiteResult};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "chess-perft")]
#[command(about = "Chess move generation inspector and perft runner")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where a command starts from.
#[derive(Args)]
struct PositionArgs {
    /// Position in FEN (defaults to the starting position)
    #[arg(long)]
    fen: Option<String>,

    /// UCI moves to play first, e.g. "e2e4 e7e5"
    #[arg(long, value_delimiter = ' ', num_args = 0..)]
    moves: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the moves available in a position
    Moves {
        #[command(flatten)]
        position: PositionArgs,
        /// Drop moves that leave the king attacked
        #[arg(long)]
        legal: bool,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
    /// Count leaf nodes to a given depth
    Perft {
        #[command(flatten)]
        position: PositionArgs,
        /// Depth in plies
        #[arg(short, long, default_value = "3")]
        depth: u32,
        /// Show the node count below each root move
        #[arg(long)]
        divide: bool,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
    /// Run every check in a TOML suite file
    Suite {
        /// Path to the suite file
        file: PathBuf,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Builds the starting position and plays the given moves on it.
fn setup(args: &PositionArgs) -> anyhow::Result<Position> {
    let mut position = match &args.fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("invalid FEN: {}", fen))?,
        None => Position::startpos(),
    };
    for uci in args.moves.iter().filter(|m| !m.is_empty()) {
        let m = find_move(&position, uci)?;
        tracing::debug!(mv = %m, "playing");
        position = position.apply(m);
    }
    Ok(position)
}

fn run_moves(args: &PositionArgs, legal: bool, json: bool) -> anyhow::Result<()> {
    let position = setup(args)?;
    let moves = if legal {
        generate_legal_moves(&position)
    } else {
        generate_moves(&position)
    };
    tracing::info!(fen = %position.to_fen(), count = moves.len(), legal, "generated moves");

    let report = MovesReport::new(&position, legal, moves.as_slice());
    if json {
        println!("{}", report::to_json(&report)?);
    } else {
        println!("{}", report.fen);
        for entry in &report.moves {
            println!("{:<6} {:<16} {}", entry.uci, entry.kind, entry.fen);
        }
        println!("{} {} moves", report.moves.len(), report.mode);
    }
    Ok(())
}

fn run_perft(args: &PositionArgs, depth: u32, divide: bool, json: bool) -> anyhow::Result<()> {
    let position = setup(args)?;
    tracing::info!(fen = %position.to_fen(), depth, "starting perft");

    let start = Instant::now();
    let (nodes, divide) = if divide {
        let entries: Vec<DivideEntry> = perft_divide(&position, depth)
            .into_iter()
            .map(|(uci, nodes)| DivideEntry { uci, nodes })
            .collect();
        (entries.iter().map(|e| e.nodes).sum(), Some(entries))
    } else {
        (perft(&position, depth), None)
    };
    let elapsed_ms = start.elapsed().as_millis();

    let report = PerftReport {
        fen: position.to_fen(),
        depth,
        nodes,
        elapsed_ms,
        divide,
    };
    if json {
        println!("{}", report::to_json(&report)?);
    } else {
        for entry in report.divide.iter().flatten() {
            println!("{}: {}", entry.uci, entry.nodes);
        }
        println!("Nodes searched: {}", report.nodes);
        println!("Time: {}ms", report.elapsed_ms);
    }
    Ok(())
}

fn run_suite(file: &Path, json: bool) -> anyhow::Result<()> {
    let suite = SuiteConfig::load(file)
        .with_context(|| format!("loading suite {}", file.display()))?;
    tracing::info!(file = %file.display(), positions = suite.positions.len(), "running suite");

    let mut results = Vec::with_capacity(suite.positions.len());
    for entry in suite.positions {
        let position = Position::from_fen(&entry.fen)
            .with_context(|| format!("invalid FEN in {}: {}", entry.name, entry.fen))?;
        let nodes = perft(&position, entry.depth);
        let passed = nodes == entry.nodes;
        if passed {
            tracing::info!(name = %entry.name, nodes, "passed");
        } else {
            tracing::warn!(name = %entry.name, expected = entry.nodes, nodes, "mismatch");
        }
        results.push(SuiteResult {
            name: entry.name,
            fen: entry.fen,
            depth: entry.depth,
            expected: entry.nodes,
            nodes,
            passed,
        });
    }

    let report = SuiteReport::new(results);
    if json {
        println!("{}", report::to_json(&report)?);
    } else {
        for r in &report.results {
            let status = if r.passed { "ok" } else { "FAIL" };
            println!(
                "{:<4} {} depth {}: {} (expected {})",
                status, r.name, r.depth, r.nodes, r.expected
            );
        }
        println!("{} passed, {} failed", report.passed, report.failed);
    }

    if report.failed > 0 {
        bail!("{} suite position(s) failed", report.failed);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Moves {
            position,
            legal,
            json,
        } => run_moves(position, *legal, *json),
        Commands::Perft {
            position,
            depth,
            divide,
            json,
        } => run_perft(position, *depth, *divide, *json),
        Commands::Suite { file, json } => run_suite(file, *json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level(0), LevelFilter::WARN);
        assert_eq!(level(1), LevelFilter::INFO);
        assert_eq!(level(2), LevelFilter::DEBUG);
        assert_eq!(level(7), LevelFilter::TRACE);
    }

    #[test]
    fn parse_perft_arguments() {
        let cli = Cli::try_parse_from([
            "chess-perft",
            "-vv",
            "perft",
            "--depth",
            "2",
            "--moves",
            "e2e4 e7e5",
            "--divide",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Perft {
                position,
                depth,
                divide,
                json,
            } => {
                assert_eq!(depth, 2);
                assert!(divide);
                assert!(!json);
                assert_eq!(position.moves, vec!["e2e4", "e7e5"]);
                assert!(position.fen.is_none());
            }
            _ => panic!("expected perft"),
        }
    }

    #[test]
    fn setup_plays_moves() {
        let args = PositionArgs {
            fen: None,
            moves: vec!["e2e4".to_string(), "c7c5".to_string()],
        };
        let position = setup(&args).unwrap();
        assert_eq!(
            position.to_fen(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
        );
    }

    #[test]
    fn setup_rejects_bad_input() {
        let bad_fen = PositionArgs {
            fen: Some("not a fen".to_string()),
            moves: Vec::new(),
        };
        assert!(setup(&bad_fen).is_err());

        let bad_move = PositionArgs {
            fen: None,
            moves: vec!["e2e5".to_string()],
        };
        assert!(setup(&bad_move).is_err());
    }
}
