//! Seeded self-play used to soak-test the rules engine.
//!
//! Each game starts from the standard layout and picks uniformly among the
//! currently legal single-checker moves until the game ends or the turn limit
//! is hit. After every move the checker-conservation and no-mixed-point
//! invariants are checked. Games run on rayon's pool; they share nothing.

use rand::{SeedableRng, seq::IteratorRandom};
use rand_chacha::ChaCha8Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    backgammon::{CHECKERS_PER_PLAYER, Game, IdSequence, RuleError, SetupError, Side},
    config::SimulationConfig,
};

/// Keeps the move-choice stream apart from the dice stream of the same seed.
const CHOICE_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("game {seed}: {source}")]
    Setup { seed: u64, source: SetupError },
    #[error("game {seed}: engine refused one of its own legal moves: {source}")]
    Rule { seed: u64, source: RuleError },
    #[error("game {seed}: invariant broken: {detail}")]
    Invariant { seed: u64, detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub seed: u64,
    pub winner: Option<Side>,
    pub turns: u32,
    pub checkers_moved: u32,
    pub hits: u32,
    /// Turns where the roll allowed no move at all.
    pub blocked_turns: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub games: u32,
    pub white_wins: u32,
    pub black_wins: u32,
    pub unfinished: u32,
    pub hits: u64,
    pub average_turns: f64,
}

impl Summary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = Summary { games: records.len() as u32, ..Default::default() };
        let mut turns = 0u64;
        for record in records {
            match record.winner {
                Some(Side::White) => summary.white_wins += 1,
                Some(Side::Black) => summary.black_wins += 1,
                None => summary.unfinished += 1,
            }
            summary.hits += record.hits as u64;
            turns += record.turns as u64;
        }
        if !records.is_empty() {
            summary.average_turns = turns as f64 / records.len() as f64;
        }
        summary
    }
}

/// Checks that nobody gained or lost checkers and that no point is shared.
pub fn check_invariants(game: &Game) -> Result<(), String> {
    let board = game.board();
    for player in game.players() {
        let total = board.checker_total(player.id());
        if total != CHECKERS_PER_PLAYER {
            return Err(format!("player {} has {total} checkers", player.id()));
        }
    }
    for (point, stack) in board.points().enumerate() {
        if let Some(&first) = stack.first() {
            if stack.iter().any(|&owner| owner != first) {
                return Err(format!("point {point} holds checkers of both players: {stack:?}"));
            }
        }
    }
    Ok(())
}

#[instrument(skip(config))]
pub fn play_game(config: &SimulationConfig, seed: u64) -> Result<GameRecord, SimulationError> {
    let mut ids = IdSequence::new();
    let white = ids.player(config.white_name.as_str());
    let black = ids.player(config.black_name.as_str());
    let mut game = Game::with_seed(white, black, 0, seed).map_err(|source| SimulationError::Setup { seed, source })?;
    game.reset_standard_layout();
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ CHOICE_STREAM);

    let mut record = GameRecord { seed, winner: None, turns: 0, checkers_moved: 0, hits: 0, blocked_turns: 0 };
    let rule = |source| SimulationError::Rule { seed, source };

    while record.turns < config.max_turns && !game.is_over() {
        record.turns += 1;
        game.roll().map_err(rule)?;
        loop {
            let Some(half_move) = game.legal_moves().into_iter().choose(&mut rng) else {
                if game.available_moves().len() == game.last_roll().map_or(0, |roll| roll.distances.len()) {
                    record.blocked_turns += 1;
                }
                game.end_turn();
                break;
            };
            let applied = game.move_checker(half_move.from, half_move.to).map_err(rule)?;
            record.checkers_moved += 1;
            if applied.hit.is_some() {
                record.hits += 1;
            }
            check_invariants(&game).map_err(|detail| SimulationError::Invariant { seed, detail })?;
            if applied.turn_ended || game.is_over() {
                break;
            }
        }
    }

    record.winner = game.winner().and_then(|winner| game.board().side_of(winner.id()));
    debug!(winner = ?record.winner, turns = record.turns, hits = record.hits, "game done");
    Ok(record)
}

/// Plays `config.games` games in parallel, seeded `config.seed`, `config.seed + 1`, ...
pub fn run(config: &SimulationConfig) -> Result<Summary, SimulationError> {
    let records = (0..config.games)
        .into_par_iter()
        .map(|i| play_game(config, config.seed.wrapping_add(i as u64)))
        .collect::<Result<Vec<_>, _>>()?;
    let summary = Summary::from_records(&records);
    info!(
        games = summary.games,
        white_wins = summary.white_wins,
        black_wins = summary.black_wins,
        unfinished = summary.unfinished,
        "simulation finished"
    );
    Ok(summary)
}
