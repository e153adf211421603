/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Board, Score, Side};

/// Encapsulates the logic of scoring a Tablut position.
///
/// A high score is good for White, and a low score is good for Black.
/// Decided games score [`Score::WIN`] for the winner; otherwise the score is the material balance,
/// with the King counted as one of White's pieces.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    /// The board whose position to evaluate.
    board: &'a Board,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] for the provided board.
    #[inline(always)]
    pub const fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Evaluate this position from White's perspective.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Board, Evaluator};
    /// let board = Board::new();
    /// // 8 defenders and the King, against 16 attackers
    /// assert_eq!(Evaluator::new(&board).eval(), -7);
    /// ```
    #[inline(always)]
    pub fn eval(&self) -> Score {
        match self.board.winner() {
            Some(side) => Score::win_for(side),
            None => Score(self.material(Side::White) - self.material(Side::Black)),
        }
    }

    /// Evaluate this position from `side`'s perspective.
    ///
    /// A positive number is good for `side`, while a negative number is better for the opponent.
    #[inline(always)]
    pub fn eval_for(&self, side: Side) -> Score {
        self.eval() * side.negation_multiplier()
    }

    /// Number of pieces `side` has on the board, King included.
    #[inline(always)]
    fn material(&self, side: Side) -> i32 {
        self.board.position().count(side) as i32
    }
}

impl fmt::Display for Evaluator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let king = if self.board.king_square().is_some() { 1 } else { 0 };

        writeln!(f, "White: {} ({king} King)", self.material(Side::White))?;
        writeln!(f, "Black: {}", self.material(Side::Black))?;
        match self.board.winner() {
            Some(side) => write!(f, "Winner: {side}"),
            None => write!(f, "Winner: (none)"),
        }
    }
}
