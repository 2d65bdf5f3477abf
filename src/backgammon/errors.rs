use thiserror::Error;

use crate::backgammon::{Distances, PlayerId};

/// Why a bear-off was refused before any distance was looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearOffBlock {
    /// At least one checker is still outside the home board.
    NotAllInHome,
    /// At least one checker is waiting on the bar.
    CheckersOnBar,
}

impl std::fmt::Display for BearOffBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BearOffBlock::NotAllInHome => write!(f, "not every checker is in the home board"),
            BearOffBlock::CheckersOnBar => write!(f, "checkers are waiting on the bar"),
        }
    }
}

/// A rejected board or game command.
///
/// Every variant is recoverable: the command left the board and game untouched,
/// and the caller may retry with different input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    #[error("point index {0} out of range (0..=23)")]
    IndexOutOfRange(u8),
    #[error("no checker of your own on point {0}")]
    NoOwnCheckerAtOrigin(u8),
    #[error("destination {0} is blocked by the opponent")]
    DestinationBlockedByOpponent(u8),
    #[error("distance {requested} is not among the available moves {available:?}")]
    DistanceNotAvailable { requested: u8, available: Distances },
    #[error("checkers on the bar must reenter from point {entry} first")]
    MustReenterFromBarFirst { entry: u8 },
    #[error("cannot bear off: {0}")]
    CannotBearOff(BearOffBlock),
    #[error("cannot bear off from {from} with a larger die: checkers farther away need a smaller die first")]
    OverBearingBlockedByFartherChecker { from: u8 },
    #[error("moving from {from} to {to} goes against your direction of play")]
    WrongDirection { from: u8, to: u8 },
    #[error("player {0} has no checkers on the bar")]
    EmptyBar(PlayerId),
    #[error("player {0} is not seated at this board")]
    UnknownPlayer(PlayerId),
    #[error("the game is already finished")]
    GameFinished,
}

/// Mistakes made while assembling a game, as opposed to rule violations during play.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("both players were given the id {0}")]
    DuplicatePlayerId(PlayerId),
}
