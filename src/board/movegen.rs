/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::Board;
use crate::{Direction, Move, MoveList, Side, Square};

impl Board {
    /// Returns `true` if the piece on `from` belongs to the side to move.
    #[inline(always)]
    pub fn is_legal_origin(&self, from: Square) -> bool {
        self.get(from).is_side(self.turn())
    }

    /// Returns `true` if `from` and `to` share a row or column and every square
    /// after `from`, up to and including `to`, is empty.
    pub fn is_unblocked_move(&self, from: Square, to: Square) -> bool {
        let Some(dir) = from.direction_to(to) else {
            return false;
        };

        let mut square = from;
        while square != to {
            match square.step(dir) {
                Some(next) if self.get(next).is_empty() => square = next,
                _ => return false,
            }
        }

        true
    }

    /// Returns `true` if `mv` is legal in the current position.
    ///
    /// A move is legal when it is an unblocked rook move of one of the side to move's pieces
    /// onto an empty square, is not onto the throne unless the King is moving,
    /// and has not already been played earlier in this game.
    #[inline(always)]
    pub fn is_legal(&self, mv: Move) -> bool {
        self.is_legal_origin(mv.from()) && self.is_legal_for(self.turn(), mv)
    }

    /// Equivalent to [`Board::is_legal`] on the move `from`-`to`.
    ///
    /// Returns `false` if the two squares do not form a rook move.
    #[inline(always)]
    pub fn is_legal_from_to(&self, from: Square, to: Square) -> bool {
        Move::new(from, to).is_ok_and(|mv| self.is_legal(mv))
    }

    /// Checks every legality rule except whose turn it is.
    fn is_legal_for(&self, side: Side, mv: Move) -> bool {
        let piece = self.get(mv.from());

        piece.is_side(side)
            && self.is_unblocked_move(mv.from(), mv.to())
            && (mv.to() != Square::THRONE || piece.is_king())
            && !self.moves.contains(&mv)
    }

    /// Generates every legal move for `side`, as if it were `side`'s turn.
    ///
    /// Moves are grouped by origin square in index order, and each group is ordered by destination index.
    /// This order is deterministic, which the search relies on.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Board, Side};
    /// let board = Board::new();
    /// assert_eq!(board.legal_moves(Side::Black).len(), 80);
    /// assert_eq!(board.legal_moves(Side::White).len(), 56);
    /// ```
    pub fn legal_moves(&self, side: Side) -> MoveList {
        let mut moves = MoveList::with_capacity(128);

        for from in self.position.pieces(side) {
            let start = moves.len();
            self.push_moves_from(side, from, &mut moves);
            moves[start..].sort_unstable_by_key(|mv| mv.to());
        }

        moves
    }

    /// Generates every legal move of the piece on `from`, ordered by destination index.
    ///
    /// Empty if that piece does not belong to the side to move.
    pub fn legal_moves_from(&self, from: Square) -> MoveList {
        let mut moves = MoveList::new();
        if self.is_legal_origin(from) {
            self.push_moves_from(self.turn(), from, &mut moves);
            moves.sort_unstable_by_key(|mv| mv.to());
        }
        moves
    }

    /// Returns `true` if `side` has at least one legal move.
    pub fn has_move(&self, side: Side) -> bool {
        self.position
            .pieces(side)
            .any(|from| self.destinations(side, from).next().is_some())
    }

    /// Appends the legal moves of the piece on `from` to `moves`, in ray order.
    fn push_moves_from(&self, side: Side, from: Square, moves: &mut MoveList) {
        moves.extend(self.destinations(side, from).map(|to| Move::new_unchecked(from, to)));
    }

    /// Walks outward from `from` in every direction, yielding each square the piece may legally stop on.
    fn destinations(&self, side: Side, from: Square) -> impl Iterator<Item = Square> + '_ {
        Direction::ALL
            .into_iter()
            .flat_map(move |dir| {
                (1..)
                    .map_while(move |n| from.offset(dir, n))
                    .take_while(move |&sq| self.get(sq).is_empty())
            })
            .filter(move |&to| self.is_legal_for(side, Move::new_unchecked(from, to)))
    }
}
