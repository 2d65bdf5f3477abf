mod board;
pub use board::{BEAR_OFF, Board, CHECKERS_PER_PLAYER, POINTS};

mod player;
pub use player::{IdSequence, Player, PlayerId};

mod side;
pub use side::Side;

mod position;
pub use position::Position;

mod errors;
pub use errors::{BearOffBlock, RuleError, SetupError};

mod state;
pub use state::{GameSnapshot, GameState};

mod game;
pub use game::{Applied, Game};

mod halfmove;
pub use halfmove::{HalfMove, MoveKind};

mod dice;
pub use dice::{Dice, Distances, Roll};
