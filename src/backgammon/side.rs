use std::ops::RangeInclusive;

use serde::Serialize;

use crate::backgammon::POINTS;

/// The seat a player occupies. The seat fixes everything direction-dependent:
/// White moves toward higher point indices and bears off past 23, Black moves
/// toward lower indices and bears off past 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::White, Side::Black];

    pub fn opposite(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn seat(&self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Seat 0 is White; any other index is Black.
    pub fn from_seat(seat: usize) -> Side {
        if seat == 0 { Side::White } else { Side::Black }
    }

    /// The point a checker on the bar reenters from.
    pub fn entry_point(&self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => POINTS - 1,
        }
    }

    pub fn home(&self) -> RangeInclusive<u8> {
        match self {
            Side::White => POINTS - 6..=POINTS - 1,
            Side::Black => 0..=5,
        }
    }

    pub fn is_home(&self, point: u8) -> bool {
        self.home().contains(&point)
    }

    pub fn is_forward(&self, from: u8, to: u8) -> bool {
        match self {
            Side::White => to > from,
            Side::Black => to < from,
        }
    }

    /// Exact die needed to carry a checker from `from` off the board.
    pub fn bear_off_distance(&self, from: u8) -> u8 {
        match self {
            Side::White => POINTS - from,
            Side::Black => from + 1,
        }
    }

    /// Whether a checker on `a` is strictly farther from the bearing-off edge
    /// than one on `b`.
    pub fn is_farther(&self, a: u8, b: u8) -> bool {
        match self {
            Side::White => a < b,
            Side::Black => a > b,
        }
    }

    /// The point reached by moving `distance` forward from `from`, if it is
    /// still on the board.
    pub fn advance(&self, from: u8, distance: u8) -> Option<u8> {
        match self {
            Side::White => from.checked_add(distance).filter(|&to| to < POINTS),
            Side::Black => from.checked_sub(distance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_mirror_each_other() {
        for side in Side::BOTH {
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(Side::from_seat(side.seat()), side);
        }
        assert_eq!(Side::White.entry_point(), 0);
        assert_eq!(Side::Black.entry_point(), 23);
        assert_eq!(Side::White.home(), 18..=23);
        assert_eq!(Side::Black.home(), 0..=5);
    }

    #[test]
    fn bear_off_distance_counts_from_the_edge() {
        assert_eq!(Side::White.bear_off_distance(23), 1);
        assert_eq!(Side::White.bear_off_distance(18), 6);
        assert_eq!(Side::Black.bear_off_distance(0), 1);
        assert_eq!(Side::Black.bear_off_distance(2), 3);
    }

    #[test]
    fn direction() {
        assert!(Side::White.is_forward(3, 5));
        assert!(!Side::White.is_forward(5, 3));
        assert!(Side::Black.is_forward(5, 3));
        assert!(!Side::Black.is_forward(4, 4));
        assert!(Side::White.is_farther(18, 21));
        assert!(Side::Black.is_farther(4, 1));
    }

    #[test]
    fn advance_stops_at_the_edge() {
        assert_eq!(Side::White.advance(20, 3), Some(23));
        assert_eq!(Side::White.advance(20, 4), None);
        assert_eq!(Side::Black.advance(3, 3), Some(0));
        assert_eq!(Side::Black.advance(3, 4), None);
    }
}
