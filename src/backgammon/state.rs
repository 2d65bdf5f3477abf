use std::fmt::Display;

use hashbrown::HashMap;
use serde::Serialize;

use crate::backgammon::{Player, PlayerId, Roll};

/// Lifecycle of a game. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Nothing has been rolled or placed yet.
    Initial,
    InProgress,
    /// Someone has borne off all fifteen checkers.
    Finished,
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::Initial => write!(f, "initial"),
            GameState::InProgress => write!(f, "in_progress"),
            GameState::Finished => write!(f, "finished"),
        }
    }
}

/// Owned, serializable copy of everything a front-end needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub current_player: Player,
    pub remaining: Vec<u8>,
    pub points: Vec<Vec<PlayerId>>,
    pub bar: HashMap<PlayerId, u8>,
    pub borne_off: HashMap<PlayerId, u8>,
    pub last_roll: Option<Roll>,
}

impl Display for GameSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "state={} | turn={} (id {}) | moves={:?}",
            self.state,
            self.current_player.name(),
            self.current_player.id(),
            self.remaining
        )
    }
}
