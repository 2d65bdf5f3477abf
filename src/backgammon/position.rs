use std::fmt::Display;

use serde::Serialize;

use crate::backgammon::BEAR_OFF;

/// Where a checker can be: on a point, on the bar, or borne off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Bar,
    Off,
    Point(u8),
}

impl Position {
    /// Reads a destination index, treating [`BEAR_OFF`] as [`Position::Off`].
    pub fn destination(index: u8) -> Self {
        if index == BEAR_OFF { Position::Off } else { Position::Point(index) }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Bar => write!(f, "bar"),
            Position::Off => write!(f, "off"),
            Position::Point(index) => write!(f, "{index}"),
        }
    }
}
