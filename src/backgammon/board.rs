use std::fmt::Display;

use hashbrown::HashMap;
use tracing::debug;

use crate::backgammon::{BearOffBlock, PlayerId, RuleError, Side};

/// Number of points on the board.
pub const POINTS: u8 = 24;

/// Destination index meaning "bear the checker off". Never a real point.
pub const BEAR_OFF: u8 = 24;

pub const CHECKERS_PER_PLAYER: u8 = 15;

/// Starting layout for White as `(point, checkers)`. Black's is the mirror image.
const STANDARD_LAYOUT: [(u8, u8); 4] = [(0, 2), (11, 5), (16, 3), (18, 5)];

/// The 24 points, the bar and the borne-off trays.
///
/// A point is a stack of owner tags; checkers of the same owner are
/// interchangeable so nothing else is stored per checker. The board knows which
/// player sits White and which sits Black because the home board and the bar
/// entry point depend on the seat.
///
/// All primitives validate point indices and report [`RuleError::IndexOutOfRange`]
/// without touching the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    points: [Vec<PlayerId>; POINTS as usize],
    bar: HashMap<PlayerId, u8>,
    borne_off: HashMap<PlayerId, u8>,
    seats: [PlayerId; 2],
}

impl Board {
    /// Creates an empty board with `white` in seat 0 and `black` in seat 1.
    pub fn new(white: PlayerId, black: PlayerId) -> Self {
        Board {
            points: std::array::from_fn(|_| Vec::new()),
            bar: HashMap::new(),
            borne_off: HashMap::new(),
            seats: [white, black],
        }
    }

    /// Creates a board already set up with [`Self::standard_layout`].
    pub fn with_standard_layout(white: PlayerId, black: PlayerId) -> Self {
        let mut board = Self::new(white, black);
        board.standard_layout();
        board
    }

    /// Removes every checker from the points, the bar and the trays.
    pub fn clear(&mut self) {
        self.points.iter_mut().for_each(Vec::clear);
        self.bar.clear();
        self.borne_off.clear();
    }

    /// Clears the board and sets up 15 checkers per side in the usual opening
    /// position.
    pub fn standard_layout(&mut self) {
        self.clear();
        let [white, black] = self.seats;
        for (point, count) in STANDARD_LAYOUT {
            self.points[point as usize].extend(std::iter::repeat_n(white, count as usize));
            self.points[(POINTS - 1 - point) as usize].extend(std::iter::repeat_n(black, count as usize));
        }
    }

    pub fn seats(&self) -> [PlayerId; 2] {
        self.seats
    }

    pub fn player_on(&self, side: Side) -> PlayerId {
        self.seats[side.seat()]
    }

    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        Side::BOTH.into_iter().find(|side| self.seats[side.seat()] == player)
    }

    fn index(point: u8) -> Result<usize, RuleError> {
        if point < POINTS {
            Ok(point as usize)
        } else {
            Err(RuleError::IndexOutOfRange(point))
        }
    }

    /// The owners of the checkers stacked on `point`, bottom first.
    pub fn point(&self, point: u8) -> Result<&[PlayerId], RuleError> {
        Ok(&self.points[Self::index(point)?])
    }

    pub fn points(&self) -> impl Iterator<Item = &[PlayerId]> {
        self.points.iter().map(Vec::as_slice)
    }

    pub fn count_on(&self, player: PlayerId, point: u8) -> Result<u8, RuleError> {
        let stack = self.point(point)?;
        Ok(stack.iter().filter(|&&owner| owner == player).count() as u8)
    }

    pub fn has_checker(&self, player: PlayerId, point: u8) -> Result<bool, RuleError> {
        Ok(self.point(point)?.contains(&player))
    }

    /// Puts a checker on `point` with no rule enforcement. Setup and tests only.
    pub fn place(&mut self, owner: PlayerId, point: u8) -> Result<(), RuleError> {
        let index = Self::index(point)?;
        self.points[index].push(owner);
        Ok(())
    }

    /// Takes one of `owner`'s checkers off `point`. `false` when there is none.
    pub fn remove_one(&mut self, owner: PlayerId, point: u8) -> Result<bool, RuleError> {
        let stack = &mut self.points[Self::index(point)?];
        match stack.iter().position(|&o| o == owner) {
            Some(pos) => {
                stack.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// A point is blocked for `mover` when at least two checkers on it belong to
    /// someone else.
    pub fn is_blocked_for(&self, mover: PlayerId, point: u8) -> Result<bool, RuleError> {
        let stack = self.point(point)?;
        Ok(stack.iter().filter(|&&owner| owner != mover).count() >= 2)
    }

    /// Moves a checker with no blocking or hitting. `false` when `owner` has no
    /// checker on `from`.
    pub fn move_unchecked(&mut self, owner: PlayerId, from: u8, to: u8) -> Result<bool, RuleError> {
        Self::index(from)?;
        Self::index(to)?;
        if !self.remove_one(owner, from)? {
            return Ok(false);
        }
        self.place(owner, to)?;
        Ok(true)
    }

    /// Moves one of `mover`'s checkers, hitting a lone opposing checker on the
    /// destination. Returns the id of the player that was hit, if any.
    pub fn move_guarded(&mut self, mover: PlayerId, from: u8, to: u8) -> Result<Option<PlayerId>, RuleError> {
        let to_index = Self::index(to)?;
        if !self.has_checker(mover, from)? {
            return Err(RuleError::NoOwnCheckerAtOrigin(from));
        }
        if self.is_blocked_for(mover, to)? {
            return Err(RuleError::DestinationBlockedByOpponent(to));
        }
        self.remove_one(mover, from)?;
        Ok(self.occupy(mover, to_index))
    }

    /// Hit-then-place. The destination has already been checked for blocking.
    fn occupy(&mut self, mover: PlayerId, index: usize) -> Option<PlayerId> {
        let stack = &mut self.points[index];
        let mut hit = None;
        if let Some(pos) = stack.iter().position(|&owner| owner != mover) {
            let victim = stack.remove(pos);
            debug!(%victim, point = index, "checker hit");
            hit = Some(victim);
        }
        stack.push(mover);
        if let Some(victim) = hit {
            self.send_to_bar(victim);
        }
        hit
    }

    pub fn send_to_bar(&mut self, player: PlayerId) -> u8 {
        let count = self.bar.entry(player).or_insert(0);
        *count += 1;
        *count
    }

    pub fn bar_count(&self, player: PlayerId) -> u8 {
        self.bar.get(&player).copied().unwrap_or(0)
    }

    pub fn register_borne_off(&mut self, player: PlayerId) -> u8 {
        let count = self.borne_off.entry(player).or_insert(0);
        *count += 1;
        *count
    }

    pub fn borne_off_count(&self, player: PlayerId) -> u8 {
        self.borne_off.get(&player).copied().unwrap_or(0)
    }

    /// Checkers `player` has standing on points.
    pub fn checkers_of(&self, player: PlayerId) -> u8 {
        self.points
            .iter()
            .map(|stack| stack.iter().filter(|&&owner| owner == player).count())
            .sum::<usize>() as u8
    }

    /// Points, bar and tray together. 15 for every player in a real game.
    pub fn checker_total(&self, player: PlayerId) -> u8 {
        self.checkers_of(player) + self.bar_count(player) + self.borne_off_count(player)
    }

    fn bear_off_block(&self, player: PlayerId, side: Side) -> Option<BearOffBlock> {
        if self.bar_count(player) > 0 {
            return Some(BearOffBlock::CheckersOnBar);
        }
        let outside = (0..POINTS)
            .filter(|&point| !side.is_home(point))
            .any(|point| self.points[point as usize].contains(&player));
        outside.then_some(BearOffBlock::NotAllInHome)
    }

    /// `player` may bear off once nothing is on the bar and every checker is in
    /// the home board. Always `false` for a player who is not seated.
    pub fn can_bear_off(&self, player: PlayerId) -> bool {
        self.side_of(player)
            .is_some_and(|side| self.bear_off_block(player, side).is_none())
    }

    pub fn bear_off(&mut self, player: PlayerId, from: u8) -> Result<(), RuleError> {
        let index = Self::index(from)?;
        let side = self.side_of(player).ok_or(RuleError::UnknownPlayer(player))?;
        if let Some(block) = self.bear_off_block(player, side) {
            return Err(RuleError::CannotBearOff(block));
        }
        if !self.remove_one(player, from)? {
            return Err(RuleError::NoOwnCheckerAtOrigin(from));
        }
        let total = self.register_borne_off(player);
        debug!(%player, from = index, total, "checker borne off");
        Ok(())
    }

    /// Brings a checker from the bar onto `to`, hitting a lone opposing checker.
    pub fn reenter_from_bar(&mut self, player: PlayerId, to: u8) -> Result<Option<PlayerId>, RuleError> {
        let index = Self::index(to)?;
        if self.bar_count(player) == 0 {
            return Err(RuleError::EmptyBar(player));
        }
        if self.is_blocked_for(player, to)? {
            return Err(RuleError::DestinationBlockedByOpponent(to));
        }
        if let Some(count) = self.bar.get_mut(&player) {
            *count -= 1;
        }
        Ok(self.occupy(player, index))
    }

    pub fn has_winner(&self) -> bool {
        self.winner_id().is_some()
    }

    pub fn winner_id(&self) -> Option<PlayerId> {
        self.borne_off
            .iter()
            .find(|&(_, &count)| count >= CHECKERS_PER_PLAYER)
            .map(|(&player, _)| player)
    }

    /// Net checkers per point from White's point of view: positive for White,
    /// negative for Black.
    pub fn signed_counts(&self) -> [i8; POINTS as usize] {
        let [white, black] = self.seats;
        std::array::from_fn(|i| {
            self.points[i].iter().fold(0i8, |acc, &owner| {
                if owner == white {
                    acc + 1
                } else if owner == black {
                    acc - 1
                } else {
                    acc
                }
            })
        })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = self.signed_counts();
        let [white, black] = self.seats;
        writeln!(f, "11  10   9   8   7   6  | W |   5   4   3   2   1   0")?;
        writeln!(
            f,
            "{:2}  {:2}  {:2}  {:2}  {:2}  {:2}  | {:1} |  {:2}  {:2}  {:2}  {:2}  {:2}  {:2}",
            b[11], b[10], b[9], b[8], b[7], b[6],
            self.bar_count(white),
            b[5], b[4], b[3], b[2], b[1], b[0],
        )?;
        writeln!(f, "=========================================================")?;
        writeln!(
            f,
            "{:2}  {:2}  {:2}  {:2}  {:2}  {:2}  | {:1} |  {:2}  {:2}  {:2}  {:2}  {:2}  {:2}",
            b[12], b[13], b[14], b[15], b[16], b[17],
            self.bar_count(black),
            b[18], b[19], b[20], b[21], b[22], b[23],
        )?;
        writeln!(f, "12  13  14  15  16  17  | B |  18  19  20  21  22  23")?;
        write!(
            f,
            "off: W {} / B {}",
            self.borne_off_count(white),
            self.borne_off_count(black)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (PlayerId, PlayerId) {
        (PlayerId::new(1).unwrap(), PlayerId::new(2).unwrap())
    }

    fn empty() -> (Board, PlayerId, PlayerId) {
        let (w, b) = ids();
        (Board::new(w, b), w, b)
    }

    #[test]
    fn index_validation() {
        let (mut board, w, _) = empty();
        assert!(board.point(0).is_ok());
        assert!(board.point(23).is_ok());
        assert_eq!(board.point(24), Err(RuleError::IndexOutOfRange(24)));
        assert_eq!(board.place(w, 30), Err(RuleError::IndexOutOfRange(30)));
        assert_eq!(board.move_unchecked(w, 0, 99), Err(RuleError::IndexOutOfRange(99)));
        assert_eq!(board.checkers_of(w), 0);
    }

    #[test]
    fn place_and_remove() {
        let (mut board, w, b) = empty();
        board.place(w, 3).unwrap();
        board.place(w, 3).unwrap();
        assert_eq!(board.count_on(w, 3), Ok(2));
        assert_eq!(board.remove_one(w, 3), Ok(true));
        assert_eq!(board.remove_one(b, 3), Ok(false));
        assert_eq!(board.point(3).unwrap(), &[w]);
    }

    #[test]
    fn move_unchecked_requires_own_checker() {
        let (mut board, w, b) = empty();
        board.place(w, 0).unwrap();
        assert_eq!(board.move_unchecked(b, 0, 5), Ok(false));
        assert_eq!(board.move_unchecked(w, 0, 5), Ok(true));
        assert_eq!(board.point(0).unwrap(), &[] as &[PlayerId]);
        assert_eq!(board.point(5).unwrap(), &[w]);
    }

    #[test]
    fn blocking_needs_two_opposing_checkers() {
        let (mut board, w, b) = empty();
        assert_eq!(board.is_blocked_for(w, 5), Ok(false));
        board.place(b, 5).unwrap();
        assert_eq!(board.is_blocked_for(w, 5), Ok(false));
        board.place(b, 5).unwrap();
        assert_eq!(board.is_blocked_for(w, 5), Ok(true));
        assert_eq!(board.is_blocked_for(b, 5), Ok(false));
    }

    #[test]
    fn move_guarded_rejects_blocked_destination() {
        let (mut board, w, b) = empty();
        board.place(w, 3).unwrap();
        board.place(b, 5).unwrap();
        board.place(b, 5).unwrap();
        assert_eq!(board.move_guarded(w, 3, 5), Err(RuleError::DestinationBlockedByOpponent(5)));
        assert_eq!(board.move_guarded(w, 4, 6), Err(RuleError::NoOwnCheckerAtOrigin(4)));
        assert_eq!(board.point(3).unwrap(), &[w]);
    }

    #[test]
    fn move_guarded_hits_a_blot() {
        let (mut board, w, b) = empty();
        board.place(w, 3).unwrap();
        board.place(b, 5).unwrap();
        assert_eq!(board.move_guarded(w, 3, 5), Ok(Some(b)));
        assert_eq!(board.point(5).unwrap(), &[w]);
        assert_eq!(board.bar_count(b), 1);
        assert_eq!(board.move_guarded(w, 5, 7), Ok(None));
    }

    #[test]
    fn bar_and_tray_counters() {
        let (mut board, w, _) = empty();
        assert_eq!(board.bar_count(w), 0);
        assert_eq!(board.send_to_bar(w), 1);
        assert_eq!(board.send_to_bar(w), 2);
        assert_eq!(board.borne_off_count(w), 0);
        assert_eq!(board.register_borne_off(w), 1);
        assert_eq!(board.checker_total(w), 3);
    }

    #[test]
    fn winner_after_fifteen_borne_off() {
        let (mut board, w, _) = empty();
        assert!(!board.has_winner());
        assert_eq!(board.winner_id(), None);
        for _ in 0..CHECKERS_PER_PLAYER {
            board.register_borne_off(w);
        }
        assert!(board.has_winner());
        assert_eq!(board.winner_id(), Some(w));
    }

    #[test]
    fn can_bear_off_depends_on_seat() {
        let (mut board, w, b) = empty();
        board.place(w, 20).unwrap();
        board.place(b, 2).unwrap();
        assert!(board.can_bear_off(w));
        assert!(board.can_bear_off(b));
        board.place(w, 17).unwrap();
        assert!(!board.can_bear_off(w));
        board.send_to_bar(b);
        assert!(!board.can_bear_off(b));
        assert!(!board.can_bear_off(PlayerId::new(9).unwrap()));
    }

    #[test]
    fn bear_off_reasons() {
        let (mut board, w, _) = empty();
        board.place(w, 17).unwrap();
        assert_eq!(board.bear_off(w, 17), Err(RuleError::CannotBearOff(BearOffBlock::NotAllInHome)));
        board.clear();
        board.place(w, 22).unwrap();
        board.send_to_bar(w);
        assert_eq!(board.bear_off(w, 22), Err(RuleError::CannotBearOff(BearOffBlock::CheckersOnBar)));
        board.clear();
        board.place(w, 22).unwrap();
        assert_eq!(board.bear_off(w, 21), Err(RuleError::NoOwnCheckerAtOrigin(21)));
        assert_eq!(board.bear_off(w, 22), Ok(()));
        assert_eq!(board.borne_off_count(w), 1);
        assert_eq!(board.checkers_of(w), 0);
    }

    #[test]
    fn reenter_from_bar() {
        let (mut board, w, b) = empty();
        assert_eq!(board.reenter_from_bar(w, 3), Err(RuleError::EmptyBar(w)));
        board.send_to_bar(w);
        board.place(b, 3).unwrap();
        board.place(b, 3).unwrap();
        assert_eq!(board.reenter_from_bar(w, 3), Err(RuleError::DestinationBlockedByOpponent(3)));
        assert_eq!(board.bar_count(w), 1);
        board.place(b, 4).unwrap();
        assert_eq!(board.reenter_from_bar(w, 4), Ok(Some(b)));
        assert_eq!(board.bar_count(w), 0);
        assert_eq!(board.bar_count(b), 1);
    }

    #[test]
    fn standard_layout_has_fifteen_each() {
        let (w, b) = ids();
        let board = Board::with_standard_layout(w, b);
        assert_eq!(board.checkers_of(w), CHECKERS_PER_PLAYER);
        assert_eq!(board.checkers_of(b), CHECKERS_PER_PLAYER);
        assert_eq!(
            board.signed_counts(),
            [2, 0, 0, 0, 0, -5, 0, -3, 0, 0, 0, 5, -5, 0, 0, 0, 3, 0, 5, 0, 0, 0, 0, -2]
        );
    }

    #[test]
    fn clear_empties_everything() {
        let (w, b) = ids();
        let mut board = Board::with_standard_layout(w, b);
        board.send_to_bar(w);
        board.register_borne_off(b);
        board.clear();
        assert!(board.points().all(|stack| stack.is_empty()));
        assert_eq!(board.bar_count(w), 0);
        assert_eq!(board.borne_off_count(b), 0);
    }

    #[test]
    fn display_shows_bar_and_tray() {
        let (w, b) = ids();
        let mut board = Board::with_standard_layout(w, b);
        board.register_borne_off(b);
        let text = board.to_string();
        assert!(text.contains("off: W 0 / B 1"));
        assert_eq!(text.lines().count(), 6);
    }
}
