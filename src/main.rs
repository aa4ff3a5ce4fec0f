//! Tictactoe-Rust: tic-tac-toe with a perfect-play opponent.
//!
//! ## Usage
//!
//! - `tictactoe-rust` - Start the text protocol against the automated player
//! - `tictactoe-rust play --no-ai` - Two externally driven players
//! - `tictactoe-rust demo` - Search against a seeded random mover
//!
//! Diagnostics go to stderr and are controlled with `RUST_LOG`.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tictactoe_rust::board::Mark;
use tictactoe_rust::constants::AI_DELAY_MS;
use tictactoe_rust::protocol::Engine;

/// Tictactoe-Rust: tic-tac-toe with a perfect-play opponent
#[derive(Parser)]
#[command(name = "tictactoe-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play through the line-oriented text protocol on stdin/stdout
    Play {
        /// Disable the automated opponent (both marks are played externally)
        #[arg(long)]
        no_ai: bool,
        /// Pause before the automated player replies, in milliseconds
        #[arg(long, default_value_t = AI_DELAY_MS)]
        delay_ms: u64,
    },
    /// Play the search against a random mover and print the tally
    Demo {
        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: usize,
        /// Seed for the random mover
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Let the search play X (moving first) instead of O
        #[arg(long)]
        ai_first: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { no_ai, delay_ms }) => {
            let mut engine = Engine::new(!no_ai).with_delay(Duration::from_millis(delay_ms));
            engine.run()
        }
        None => Engine::new(true).run(),
        Some(Commands::Demo {
            games,
            seed,
            ai_first,
        }) => {
            run_demo(games, seed, ai_first);
            Ok(())
        }
    }
}

fn run_demo(games: usize, seed: u64, ai_first: bool) {
    let searcher = if ai_first { Mark::X } else { Mark::O };
    println!("Tictactoe-Rust: search ({searcher}) vs random mover\n");

    let tally = tictactoe_rust::demo::run(games, seed, searcher);
    println!("Games:  {}", tally.games());
    println!("Wins:   {}", tally.wins);
    println!("Draws:  {}", tally.draws);
    println!("Losses: {}", tally.losses);
}
