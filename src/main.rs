//! Gobang: a five-in-a-row engine.
//!
//! ## Usage
//!
//! - `gobang` - Show a self-play demo
//! - `gobang gtp` - Read protocol commands from stdin
//! - `gobang demo --seed 7` - Self-play from a reproducible opening
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v`/`-vv` for more detail.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gobang::board::{Cell, Side};
use gobang::config::Config;
use gobang::constants::{COLUMN, DEPTH, RATIO, ROW};
use gobang::engine::Engine;
use gobang::error::EngineError;
use gobang::protocol::Session;

/// Gobang: five-in-a-row with alpha-beta search
#[derive(Parser)]
#[command(name = "gobang")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Largest x coordinate, at most 255 (the board has COLUMN + 1 points per row)
    #[arg(long, global = true, default_value_t = COLUMN)]
    column: usize,

    /// Largest y coordinate
    #[arg(long, global = true, default_value_t = ROW)]
    row: usize,

    /// Search depth in plies
    #[arg(long, global = true, default_value_t = DEPTH)]
    depth: u32,

    /// Attack/defense ratio: weight of the opponent's shapes in evaluation
    #[arg(long, global = true, default_value_t = RATIO)]
    ratio: f64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the text protocol on stdin/stdout
    Gtp,
    /// Let the engine play both sides
    Demo {
        /// Seed for the opening stone
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many moves
        #[arg(long, default_value_t = 60)]
        max_moves: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config {
        column: cli.column,
        row: cli.row,
        depth: cli.depth,
        ratio: cli.ratio,
    };

    match cli.command {
        Some(Commands::Gtp) => {
            let mut session = Session::new(config).context("invalid engine configuration")?;
            let stdin = std::io::stdin();
            session
                .run(stdin.lock(), std::io::stdout())
                .context("protocol loop failed")?;
        }
        Some(Commands::Demo { seed, max_moves }) => run_demo(config, seed, max_moves)?,
        None => run_demo(config, None, 60)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_demo(config: Config, seed: Option<u64>, max_moves: usize) -> Result<()> {
    let mut engine = Engine::new(config).context("invalid engine configuration")?;
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

    println!("Gobang self-play, depth {} ratio {}\n", config.depth, config.ratio);

    // Random opening stone near the centre so games differ between seeds
    let (cx, cy) = (config.column / 2, config.row / 2);
    let opening = Cell::new(
        rng.usize(cx.saturating_sub(2)..=(cx + 2).min(config.column)),
        rng.usize(cy.saturating_sub(2)..=(cy + 2).min(config.row)),
    );
    engine.apply_human_move(opening)?;
    println!("human plays {opening}");

    let mut side = Side::Engine;
    for _ in 1..max_moves {
        match engine.play(side) {
            Ok(cell) => println!("{side} plays {cell}"),
            Err(EngineError::NoLegalMove) => {
                println!("\nboard full, draw");
                break;
            }
            Err(err) => return Err(err.into()),
        }
        if let Some(winner) = engine.winner() {
            println!("\n{winner} wins");
            break;
        }
        side = side.opponent();
    }

    println!("\n{}", engine.board());
    info!(stones = engine.board().stone_count(), "demo finished");
    Ok(())
}
