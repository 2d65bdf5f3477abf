use std::path::PathBuf;

use anyhow::{Context, Result};
use backgammon::{
    backgammon::{Game, IdSequence},
    config::SimulationConfig,
    simulation,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Backgammon rules engine
#[derive(Parser, Debug)]
#[command(name = "backgammon", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set up a new game and roll once for the first player
    Roll {
        /// Seed for the dice
        #[arg(long, env = "BACKGAMMON_SEED")]
        seed: Option<u64>,

        /// Print the game snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the standard opening position
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Play seeded random games and check the engine's invariants
    Simulate {
        /// TOML file with simulation settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long, env = "BACKGAMMON_GAMES")]
        games: Option<u32>,

        /// Seed of the first game
        #[arg(long, env = "BACKGAMMON_SEED")]
        seed: Option<u64>,

        #[arg(long)]
        max_turns: Option<u32>,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Roll { seed, json } => roll(seed, json),
        Command::Show { json } => show(json),
        Command::Simulate { config, games, seed, max_turns, json } => {
            simulate(config, games, seed, max_turns, json)
        }
    }
}

fn new_game(seed: Option<u64>) -> Result<Game> {
    let mut ids = IdSequence::new();
    let (white, black) = (ids.player("White"), ids.player("Black"));
    let mut game = match seed {
        Some(seed) => Game::with_seed(white, black, 0, seed)?,
        None => Game::new(white, black, 0)?,
    };
    game.reset_standard_layout();
    Ok(game)
}

fn roll(seed: Option<u64>, json: bool) -> Result<()> {
    let mut game = new_game(seed)?;
    let roll = game.roll()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&game.state_snapshot())?);
        return Ok(());
    }
    println!("Dice: {} and {} -> moves: {:?}", roll.d1, roll.d2, &*roll.distances);
    println!("Starting turn: {}", game.current_player().name());
    for half_move in game.legal_moves() {
        println!("  {half_move}");
    }
    Ok(())
}

fn show(json: bool) -> Result<()> {
    let game = new_game(None)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&game.state_snapshot())?);
    } else {
        println!("{}", game.board());
        println!("{}", game.summary());
    }
    Ok(())
}

fn simulate(
    path: Option<PathBuf>,
    games: Option<u32>,
    seed: Option<u64>,
    max_turns: Option<u32>,
    json: bool,
) -> Result<()> {
    let mut config = match &path {
        Some(path) => SimulationConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    config.games = games.unwrap_or(config.games);
    config.seed = seed.unwrap_or(config.seed);
    config.max_turns = max_turns.unwrap_or(config.max_turns);
    config.validate()?;

    info!(games = config.games, seed = config.seed, "starting simulation");
    let start = std::time::Instant::now();
    let summary = simulation::run(&config)?;
    info!(elapsed = ?start.elapsed(), "done");

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} games: White {} / Black {} / unfinished {}, {:.1} turns on average, {} hits",
            summary.games, summary.white_wins, summary.black_wins, summary.unfinished, summary.average_turns, summary.hits
        );
    }
    Ok(())
}
