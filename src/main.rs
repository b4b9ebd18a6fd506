//! Tak-MCTS command line driver.
//!
//! ## Usage
//!
//! - `tak-mcts play` - One game between two engines, printing every position
//! - `tak-mcts tournament` - Round-robin between all four variants, one CSV row per game

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fastrand::Rng;

use tak_mcts::board::Color;
use tak_mcts::constants::{
    DEFAULT_ITERATIONS, DEFAULT_LEAF_SIMULATIONS, DEFAULT_STONES, DEFAULT_UCT_WEIGHT,
};
use tak_mcts::mcts::{SearchConfig, Variant};
use tak_mcts::state::default_initial_state;
use tak_mcts::tournament::{Player, play_game, round_robin};

/// Tak-MCTS: 4x4 Tak with Monte Carlo Tree Search players
#[derive(Parser)]
#[command(name = "tak-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between two engines and print each position
    Play {
        /// Engine playing Black
        #[arg(long, value_enum, default_value_t = Engine::Default)]
        black: Engine,
        /// Engine playing White
        #[arg(long, value_enum, default_value_t = Engine::Default)]
        white: Engine,
        /// Color that moves first
        #[arg(long, value_enum, default_value_t = Side::Black)]
        first: Side,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Run a round-robin tournament between all variants
    Tournament {
        /// Number of full round-robins to play
        #[arg(long, default_value_t = 10)]
        rounds: usize,
        /// Append CSV rows to this file instead of printing them
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Search iterations per move
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    /// UCT exploration weight
    #[arg(long, default_value_t = DEFAULT_UCT_WEIGHT)]
    weight: f64,
    /// Playouts per expansion for the multi-simulation engine
    #[arg(long, default_value_t = DEFAULT_LEAF_SIMULATIONS)]
    leaf_simulations: usize,
    /// Stones per player
    #[arg(long, default_value_t = DEFAULT_STONES)]
    stones: u32,
    /// Random seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            iterations: self.iterations,
            weight: self.weight,
            leaf_simulations: self.leaf_simulations,
        }
    }

    fn rng(&self) -> Rng {
        self.seed.map_or_else(Rng::new, Rng::with_seed)
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum Engine {
    Default,
    Decisive,
    Weighted,
    Multi,
}

impl From<Engine> for Variant {
    fn from(e: Engine) -> Self {
        match e {
            Engine::Default => Variant::Default,
            Engine::Decisive => Variant::DecisiveMove,
            Engine::Weighted => Variant::WeightedBackpropagation,
            Engine::Multi => Variant::MultiSimulation,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    Black,
    White,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            black,
            white,
            first,
            search,
        } => run_play(black, white, first, &search),
        Commands::Tournament {
            rounds,
            output,
            search,
        } => run_tournament(rounds, output, &search),
    }
}

fn run_play(black: Engine, white: Engine, first: Side, args: &SearchArgs) -> Result<()> {
    let first = match first {
        Side::Black => Color::Black,
        Side::White => Color::White,
    };
    let start = default_initial_state(first, args.stones);
    let black = Player::new(black.into(), args.config());
    let white = Player::new(white.into(), args.config());
    let mut rng = args.rng();

    println!("{start}");
    let (outcome, plies) = play_game(&black, &white, &start, &mut rng, |action, state| {
        println!("{action}\n{state}");
    })?;
    println!(
        "Game over after {plies} plies: Black {} / White {}",
        outcome.black, outcome.white
    );
    Ok(())
}

fn run_tournament(rounds: usize, output: Option<PathBuf>, args: &SearchArgs) -> Result<()> {
    let mut sink: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut rng = args.rng();

    let records = round_robin(
        &Variant::ALL,
        &args.config(),
        args.stones,
        rounds,
        &mut rng,
        |record| {
            writeln!(sink, "{}", record.csv_row()).context("failed to write result row")?;
            sink.flush().context("failed to flush result row")
        },
    )?;

    log::info!("tournament of {rounds} rounds complete: {} games", records.len());
    Ok(())
}
