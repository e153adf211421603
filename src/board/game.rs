/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::SIZE;
use crate::{Move, MoveList, Piece, Position, Result, Side, Square, TablutError};

/// A game of Tablut.
///
/// This type tracks the current [`Position`], every position reached so far, the moves that
/// produced them, and whether (and by whom) the game has been won.
/// It is the single authority on legality and game-over state.
///
/// The basic methods you're probably looking for are [`Board::new`], [`Board::make_move`],
/// [`Board::undo`], and [`Board::legal_moves`].
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    /// The current layout and side to move.
    pub(super) position: Position,

    /// Every position reached, oldest first. The last entry is always `position`.
    history: Vec<Position>,

    /// Moves applied and not undone, oldest first.
    pub(super) moves: MoveList,

    /// Ply count at which the side to move loses, if set.
    move_limit: Option<usize>,

    /// The winner of the current position, if the game has ended.
    winner: Option<Side>,

    /// Whether the current position repeats one earlier in `history`.
    repeated: bool,

    /// [`Board::undo`] will never shrink `history` below this length.
    undo_floor: usize,
}

impl Board {
    /// Creates a new [`Board`] in the standard starting position, with Black to move.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Board, Piece, Side, Square};
    /// let board = Board::new();
    /// assert_eq!(board.turn(), Side::Black);
    /// assert_eq!(board.get(Square::THRONE), Piece::King);
    /// assert_eq!(board.move_count(), 0);
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        Self::with_position(Position::initial())
    }

    /// Creates a new [`Board`] starting from an arbitrary [`Position`].
    ///
    /// The position becomes the initial entry of the history.
    /// If the position is already decided (no King, the King on an edge, or no move for the side to move),
    /// the board starts with that winner.
    /// Fails if the position has more than one King.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Board, Piece, Position, Side, Square};
    /// let kingless = Position::empty(Side::Black)
    ///     .with(Square::A1, Piece::Black)
    ///     .with(Square::C3, Piece::White);
    /// let board = Board::from_position(kingless).unwrap();
    /// assert_eq!(board.winner(), Some(Side::Black));
    /// ```
    pub fn from_position(position: Position) -> Result<Self> {
        position.validate()?;
        Ok(Self::with_position(position))
    }

    /// Creates a new [`Board`] from an encoded position string.
    ///
    /// Equivalent to parsing a [`Position`] and calling [`Board::from_position`].
    #[inline(always)]
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        Self::from_position(encoded.parse()?)
    }

    fn with_position(position: Position) -> Self {
        let mut board = Self {
            position,
            history: vec![position],
            moves: MoveList::new(),
            move_limit: None,
            winner: None,
            repeated: false,
            undo_floor: 1,
        };
        board.winner = board.decide_winner();
        board
    }

    /// Returns an independent copy of this board that cannot be undone past its current position.
    ///
    /// The copy keeps the full position and move history, so legality and repetition
    /// behave exactly as on `self`, but nothing done to it is visible here.
    /// This is what a search uses as its scratch board.
    pub fn fork(&self) -> Self {
        Self {
            undo_floor: self.history.len(),
            ..self.clone()
        }
    }

    /// Returns the side whose turn it is.
    #[inline(always)]
    pub const fn turn(&self) -> Side {
        self.position.side_to_move()
    }

    /// Returns the winner of the current position, or `None` if the game is undecided.
    #[inline(always)]
    pub const fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Returns `true` if the game is over.
    #[inline(always)]
    pub const fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Returns `true` if the current position has occurred before in this game.
    #[inline(always)]
    pub const fn repeated_position(&self) -> bool {
        self.repeated
    }

    /// Returns the number of moves made since the initial position that have not been undone.
    #[inline(always)]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the ply count at which the side to move loses, if a limit is set.
    #[inline(always)]
    pub const fn move_limit(&self) -> Option<usize> {
        self.move_limit
    }

    /// Limits the game to `n` moves per side.
    ///
    /// Once `2 * n` plies have been played, the side to move loses.
    /// Fails if that many plies have already been played.
    ///
    /// # Example
    /// ```
    /// # use tablut::Board;
    /// let mut board = Board::new();
    /// assert!(board.set_move_limit(0).is_err());
    /// assert!(board.set_move_limit(40).is_ok());
    /// assert_eq!(board.move_limit(), Some(80));
    /// ```
    pub fn set_move_limit(&mut self, n: usize) -> Result<()> {
        let plies = n.saturating_mul(2);
        if plies <= self.move_count() {
            return Err(TablutError::InvalidConfiguration(format!(
                "move limit of {n} per side has already been reached after {} moves",
                self.move_count()
            )));
        }

        self.move_limit = Some(plies);
        Ok(())
    }

    /// Returns the current [`Position`].
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the moves that led from the initial position to the current one.
    #[inline(always)]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the piece on `square`.
    #[inline(always)]
    pub const fn get(&self, square: Square) -> Piece {
        self.position.get(square)
    }

    /// Returns the piece at (`col`, `row`), both in `[0, 8]`.
    #[inline(always)]
    pub fn get_at(&self, col: u8, row: u8) -> Result<Piece> {
        Ok(self.get(Square::new(col, row)?))
    }

    /// Returns the square the King is on, or `None` if it has been captured.
    #[inline(always)]
    pub fn king_square(&self) -> Option<Square> {
        self.position.king_square()
    }

    /// Returns the squares of every piece belonging to `side` (King included for White), in index order.
    pub fn piece_locations(&self, side: Side) -> Vec<Square> {
        self.position.pieces(side).collect()
    }

    /// Returns the textual encoding of the current position.
    #[inline(always)]
    pub fn encode(&self) -> String {
        self.position.to_string()
    }

    /// Applies `mv` if it is legal. If it is not legal, this does nothing.
    ///
    /// See [`Board::make_move_checked`] for a version that reports illegal moves.
    #[inline(always)]
    pub fn make_move(&mut self, mv: Move) {
        if self.is_legal(mv) {
            self.apply(mv);
        }
    }

    /// Equivalent to [`Board::make_move`] on the move `from`-`to`.
    ///
    /// Does nothing if the two squares do not form a rook move.
    #[inline(always)]
    pub fn make_move_from_to(&mut self, from: Square, to: Square) {
        if let Ok(mv) = Move::new(from, to) {
            self.make_move(mv);
        }
    }

    /// Applies `mv` if it is legal. If it is not legal, returns an `Err`.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Board, TablutError};
    /// let mut board = Board::new();
    /// assert!(board.make_move_checked("d9-d7".parse().unwrap()).is_ok());
    ///
    /// let illegal = "d7-d9".parse().unwrap(); // White to move
    /// assert_eq!(board.make_move_checked(illegal), Err(TablutError::IllegalMove(illegal)));
    /// ```
    pub fn make_move_checked(&mut self, mv: Move) -> Result<()> {
        if !self.is_legal(mv) {
            return Err(TablutError::IllegalMove(mv));
        }
        self.apply(mv);
        Ok(())
    }

    /// Applies the provided moves in order, stopping at the first illegal one.
    pub fn make_moves(&mut self, moves: impl IntoIterator<Item = Move>) -> Result<()> {
        for mv in moves {
            self.make_move_checked(mv)?;
        }
        Ok(())
    }

    /// Moves the piece, resolves captures, records the new position, and decides the game if it has ended.
    fn apply(&mut self, mv: Move) {
        let piece = self.position.get(mv.from());
        self.position.set(mv.to(), piece);
        self.position.set(mv.from(), Piece::Empty);
        self.position.toggle_side_to_move();

        self.resolve_captures(mv.to());

        self.moves.push(mv);
        self.repeated = self.history.contains(&self.position);
        self.history.push(self.position);
        self.winner = self.decide_winner();
    }

    /// Determines the winner of the current position.
    ///
    /// A repeated position is won by the side to move. Otherwise the King decides the game,
    /// then a side to move without moves loses, and finally so does a side to move that has hit the move limit.
    fn decide_winner(&self) -> Option<Side> {
        let stm = self.turn();

        if self.repeated {
            return Some(stm);
        }

        self.position_winner().or_else(|| {
            self.move_limit
                .is_some_and(|limit| self.move_count() >= limit)
                .then_some(stm.opponent())
        })
    }

    /// The winner decided by the pieces on the board alone, ignoring the game's history.
    fn position_winner(&self) -> Option<Side> {
        let stm = self.turn();

        match self.king_square() {
            None => Some(Side::Black),
            Some(king) if king.is_edge() => Some(Side::White),
            _ if !self.has_move(stm) => Some(stm.opponent()),
            _ => None,
        }
    }

    /// Reverts the most recent move.
    ///
    /// Has no effect on the initial position (or, for a [`Board::fork`], the position it was forked at).
    /// The winner is recomputed for the position returned to, so it is cleared unless that position was
    /// itself decided.
    pub fn undo(&mut self) {
        if self.history.len() <= self.undo_floor {
            return;
        }

        self.history.pop();
        self.moves.pop();

        if let Some((current, earlier)) = self.history.split_last() {
            self.position = *current;
            self.repeated = earlier.contains(current);
        }
        self.winner = self.decide_winner();
    }

    /// Returns a text representation of this board, one row per line, row 9 first.
    ///
    /// If `coordinates` is set, row numbers are written down the left side and column letters along the bottom.
    pub fn render(&self, coordinates: bool) -> String {
        let mut out = String::with_capacity(256);

        for row in (0..SIZE).rev() {
            if coordinates {
                out.push_str(&format!("{:>2}", row + 1));
            } else {
                out.push_str("  ");
            }

            for col in 0..SIZE {
                out.push(' ');
                out.push(self.get(Square::new_unchecked(col, row)).char());
            }
            out.push('\n');
        }

        if coordinates {
            out.push_str("  ");
            for col in 0..SIZE {
                out.push(' ');
                out.push(Square::new_unchecked(col, 0).col_char());
            }
            out.push('\n');
        }

        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Displays the board with coordinates.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("position", &self.position)
            .field("moves", &self.moves)
            .field("move_limit", &self.move_limit)
            .field("winner", &self.winner)
            .field("repeated", &self.repeated)
            .finish()
    }
}
