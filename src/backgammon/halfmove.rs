use std::fmt::{Debug, Display};

use serde::Serialize;

use crate::backgammon::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Point to point.
    Normal,
    /// From the bar onto the board; `from` is the mover's entry point.
    Reenter,
    /// From the home board off the board; `to` is [`crate::backgammon::BEAR_OFF`].
    BearOff,
}

/// A single checker move that passed validation, together with the die it
/// consumes. The die can exceed the bear-off distance when over-bearing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HalfMove {
    pub from: u8,
    pub to: u8,
    pub distance: u8,
    pub kind: MoveKind,
}

impl HalfMove {
    pub fn origin(&self) -> Position {
        match self.kind {
            MoveKind::Reenter => Position::Bar,
            _ => Position::Point(self.from),
        }
    }

    pub fn destination(&self) -> Position {
        match self.kind {
            MoveKind::BearOff => Position::Off,
            _ => Position::Point(self.to),
        }
    }
}

impl Debug for HalfMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {:?} ({})", self.origin(), self.destination(), self.distance)
    }
}

impl Display for HalfMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.origin(), self.destination(), self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backgammon::BEAR_OFF;

    #[test]
    fn positions_follow_the_kind() {
        let reenter = HalfMove { from: 0, to: 3, distance: 3, kind: MoveKind::Reenter };
        assert_eq!(reenter.origin(), Position::Bar);
        assert_eq!(reenter.to_string(), "bar -> 3 (3)");

        let bear_off = HalfMove { from: 23, to: BEAR_OFF, distance: 5, kind: MoveKind::BearOff };
        assert_eq!(bear_off.destination(), Position::Off);
        assert_eq!(bear_off.to_string(), "23 -> off (5)");
        assert_eq!(Position::destination(BEAR_OFF), Position::Off);
        assert_eq!(Position::destination(7), Position::Point(7));
    }
}
