use tracing::{debug, info, instrument};

use crate::backgammon::{
    BEAR_OFF, BearOffBlock, Board, Dice, Distances, GameSnapshot, GameState, HalfMove, MoveKind, POINTS, Player,
    PlayerId, Position, Roll, RuleError, SetupError, Side,
};

/// What a successful move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub half_move: HalfMove,
    /// The opponent whose blot was sent to the bar.
    pub hit: Option<PlayerId>,
    /// Set by [`Game::move_checker`] when the move used up the last distance.
    pub turn_ended: bool,
}

/// A two-player game: the board, the dice, whose turn it is and which
/// distances are still left to play.
///
/// The player in seat 0 plays White and the one in seat 1 plays Black (see
/// [`Side`]). Every command either succeeds or leaves the game exactly as it
/// was; the reason for the most recent rejection is kept in
/// [`Game::last_error`].
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    dice: Dice,
    current: usize,
    remaining: Distances,
    state: GameState,
    last_error: Option<RuleError>,
}

impl Game {
    /// Seats `white` and `black` at an empty board. A `starting_index` other
    /// than 0 or 1 falls back to 0.
    pub fn new(white: Player, black: Player, starting_index: usize) -> Result<Self, SetupError> {
        Self::with_dice(white, black, starting_index, Dice::new())
    }

    /// Like [`Game::new`] with reproducible dice.
    pub fn with_seed(white: Player, black: Player, starting_index: usize, seed: u64) -> Result<Self, SetupError> {
        Self::with_dice(white, black, starting_index, Dice::with_seed(seed))
    }

    fn with_dice(white: Player, black: Player, starting_index: usize, dice: Dice) -> Result<Self, SetupError> {
        if white.id() == black.id() {
            return Err(SetupError::DuplicatePlayerId(white.id()));
        }
        Ok(Game {
            board: Board::new(white.id(), black.id()),
            players: [white, black],
            dice,
            current: if starting_index < 2 { starting_index } else { 0 },
            remaining: Distances::new(),
            state: GameState::Initial,
            last_error: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_side(&self) -> Side {
        Side::from_seat(self.current)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Distances still to be played this turn.
    pub fn available_moves(&self) -> Distances {
        self.remaining
    }

    pub fn last_error(&self) -> Option<RuleError> {
        self.last_error
    }

    pub fn last_roll(&self) -> Option<Roll> {
        self.dice.last_roll()
    }

    pub fn is_over(&self) -> bool {
        self.board.has_winner()
    }

    pub fn winner(&self) -> Option<&Player> {
        let id = self.board.winner_id()?;
        self.players.iter().find(|player| player.id() == id)
    }

    /// Reseeds the dice; see [`Dice::set_seed`].
    pub fn use_seed(&mut self, seed: u64) {
        self.dice.set_seed(seed);
    }

    fn reject(&mut self, error: RuleError) -> RuleError {
        debug!(%error, "command rejected");
        self.last_error = Some(error);
        error
    }

    fn refresh_state(&mut self) {
        if self.board.has_winner() {
            if self.state != GameState::Finished {
                info!(winner = ?self.board.winner_id(), "game finished");
            }
            self.state = GameState::Finished;
        } else if !self.remaining.is_empty() {
            self.state = GameState::InProgress;
        }
    }

    /// Rolls for the current player, replacing whatever distances were left.
    #[instrument(skip(self), fields(player = %self.current_player().id()))]
    pub fn roll(&mut self) -> Result<Roll, RuleError> {
        if self.state == GameState::Finished {
            return Err(self.reject(RuleError::GameFinished));
        }
        self.last_error = None;
        let roll = self.dice.roll();
        self.remaining = roll.distances;
        if self.state == GameState::Initial {
            self.state = GameState::InProgress;
        }
        self.refresh_state();
        debug!(%roll, "dice rolled");
        Ok(roll)
    }

    /// Checks whether the current player may move from `from` to `to` and
    /// which die that would use. Pass [`BEAR_OFF`] as `to` to bear off.
    pub fn validate_move(&self, from: u8, to: u8) -> Result<HalfMove, RuleError> {
        if self.state == GameState::Finished {
            return Err(RuleError::GameFinished);
        }
        if from >= POINTS {
            return Err(RuleError::IndexOutOfRange(from));
        }
        if to > BEAR_OFF {
            return Err(RuleError::IndexOutOfRange(to));
        }
        let side = self.current_side();
        let mover = self.current_player().id();

        if self.board.bar_count(mover) > 0 {
            let entry = side.entry_point();
            if from != entry || to == BEAR_OFF {
                return Err(RuleError::MustReenterFromBarFirst { entry });
            }
            if self.board.is_blocked_for(mover, to)? {
                return Err(RuleError::DestinationBlockedByOpponent(to));
            }
            let distance = to.abs_diff(entry);
            return self.require_distance(HalfMove { from, to, distance, kind: MoveKind::Reenter });
        }

        match Position::destination(to) {
            Position::Off => self.validate_bear_off(mover, side, from),
            _ => {
                if !side.is_forward(from, to) {
                    return Err(RuleError::WrongDirection { from, to });
                }
                let distance = from.abs_diff(to);
                if !self.board.has_checker(mover, from)? {
                    return Err(RuleError::NoOwnCheckerAtOrigin(from));
                }
                if self.board.is_blocked_for(mover, to)? {
                    return Err(RuleError::DestinationBlockedByOpponent(to));
                }
                self.require_distance(HalfMove { from, to, distance, kind: MoveKind::Normal })
            }
        }
    }

    fn validate_bear_off(&self, mover: PlayerId, side: Side, from: u8) -> Result<HalfMove, RuleError> {
        if !self.board.can_bear_off(mover) {
            return Err(RuleError::CannotBearOff(BearOffBlock::NotAllInHome));
        }
        if !self.board.has_checker(mover, from)? {
            return Err(RuleError::NoOwnCheckerAtOrigin(from));
        }
        let exact = side.bear_off_distance(from);
        let bear_off = |distance| HalfMove { from, to: BEAR_OFF, distance, kind: MoveKind::BearOff };
        if self.remaining.contains(&exact) {
            return Ok(bear_off(exact));
        }

        let larger = self.remaining.iter().copied().filter(|&die| die > exact).min();
        let farther = (0..POINTS)
            .filter(|&point| side.is_farther(point, from))
            .any(|point| self.board.point(point).is_ok_and(|stack| stack.contains(&mover)));
        match larger {
            Some(_) if farther => Err(RuleError::OverBearingBlockedByFartherChecker { from }),
            Some(die) => Ok(bear_off(die)),
            None => Err(RuleError::DistanceNotAvailable { requested: exact, available: self.remaining }),
        }
    }

    fn require_distance(&self, half_move: HalfMove) -> Result<HalfMove, RuleError> {
        if self.remaining.contains(&half_move.distance) {
            Ok(half_move)
        } else {
            Err(RuleError::DistanceNotAvailable { requested: half_move.distance, available: self.remaining })
        }
    }

    /// Plays one checker and spends its die. The turn is not passed, even when
    /// no distances are left; see [`Game::move_checker`] for that.
    #[instrument(skip(self), fields(player = %self.current_player().id()))]
    pub fn apply_move(&mut self, from: u8, to: u8) -> Result<Applied, RuleError> {
        self.last_error = None;
        let half_move = self.validate_move(from, to).map_err(|e| self.reject(e))?;
        let mover = self.current_player().id();
        let outcome = match half_move.kind {
            MoveKind::BearOff => self.board.bear_off(mover, from).map(|()| None),
            MoveKind::Reenter => self.board.reenter_from_bar(mover, to),
            MoveKind::Normal => self.board.move_guarded(mover, from, to),
        };
        let hit = outcome.map_err(|e| self.reject(e))?;
        self.remaining.remove_first(&half_move.distance);
        debug!(%half_move, ?hit, remaining = ?self.remaining, "checker moved");
        self.refresh_state();
        if self.state == GameState::Finished {
            self.remaining.clear();
        }
        Ok(Applied { half_move, hit, turn_ended: false })
    }

    /// [`Game::apply_move`], then passes the turn once every distance is used.
    pub fn move_checker(&mut self, from: u8, to: u8) -> Result<Applied, RuleError> {
        let mut applied = self.apply_move(from, to)?;
        if self.state == GameState::Finished {
            return Ok(applied);
        }
        if self.remaining.is_empty() {
            self.end_turn();
            applied.turn_ended = true;
        } else {
            self.refresh_state();
        }
        Ok(applied)
    }

    /// Hands the turn to the other player and drops any unused distances.
    /// Does nothing once the game is finished.
    #[instrument(skip(self), fields(player = %self.current_player().id()))]
    pub fn end_turn(&mut self) {
        if self.state == GameState::Finished {
            return;
        }
        self.current = 1 - self.current;
        self.remaining.clear();
        self.refresh_state();
        debug!(next = %self.current_player().id(), "turn ended");
    }

    /// Puts a checker of the current player on `point` without any rule
    /// checks. Meant for setting up positions.
    pub fn place_checker(&mut self, point: u8) -> Result<(), RuleError> {
        if self.state == GameState::Finished {
            return Err(self.reject(RuleError::GameFinished));
        }
        self.last_error = None;
        let owner = self.current_player().id();
        self.board.place(owner, point).map_err(|e| self.reject(e))?;
        if self.state == GameState::Initial {
            self.state = GameState::InProgress;
        }
        self.refresh_state();
        Ok(())
    }

    /// Overrides the distances left this turn. Meant for setting up positions.
    pub fn set_remaining(&mut self, distances: &[u8]) {
        self.remaining = Distances::from_slice(distances);
        self.refresh_state();
    }

    /// Gives `edit` temporary mutable access to the board, then brings the
    /// lifecycle state up to date. Meant for setting up positions.
    pub fn setup_board<R>(&mut self, edit: impl FnOnce(&mut Board) -> R) -> R {
        let result = edit(&mut self.board);
        self.refresh_state();
        result
    }

    /// Empties the board and returns to the first player's turn before any roll.
    pub fn reset(&mut self) {
        self.board.clear();
        self.remaining.clear();
        self.current = 0;
        self.state = GameState::Initial;
        self.last_error = None;
    }

    /// [`Game::reset`] followed by the standard opening layout.
    pub fn reset_standard_layout(&mut self) {
        self.reset();
        self.board.standard_layout();
    }

    /// Every single-checker move the current player could make now with one
    /// of the remaining distances.
    ///
    /// Only the next checker is considered, not whole-turn sequences. An empty
    /// list means the player is stuck and should [`Game::end_turn`].
    pub fn legal_moves(&self) -> Vec<HalfMove> {
        let side = self.current_side();
        let mover = self.current_player().id();
        let mut dice = self.remaining.to_vec();
        dice.sort_unstable();
        dice.dedup();

        let origins: Vec<u8> = if self.board.bar_count(mover) > 0 {
            vec![side.entry_point()]
        } else {
            (0..POINTS)
                .filter(|&point| self.board.point(point).is_ok_and(|stack| stack.contains(&mover)))
                .collect()
        };
        let bar = self.board.bar_count(mover) > 0;

        let mut moves = Vec::new();
        for from in origins {
            for &die in &dice {
                if let Some(to) = side.advance(from, die) {
                    moves.extend(self.validate_move(from, to));
                }
            }
            if !bar && self.board.can_bear_off(mover) {
                moves.extend(self.validate_move(from, BEAR_OFF));
            }
        }
        moves
    }

    pub fn state_snapshot(&self) -> GameSnapshot {
        let ids = self.players.each_ref().map(Player::id);
        GameSnapshot {
            state: self.state,
            current_player: self.current_player().clone(),
            remaining: self.remaining.to_vec(),
            points: self.board.points().map(<[PlayerId]>::to_vec).collect(),
            bar: ids.iter().map(|&id| (id, self.board.bar_count(id))).collect(),
            borne_off: ids.iter().map(|&id| (id, self.board.borne_off_count(id))).collect(),
            last_roll: self.dice.last_roll(),
        }
    }

    /// One line: lifecycle state, whose turn, remaining distances.
    pub fn summary(&self) -> String {
        self.state_snapshot().to_string()
    }
}
