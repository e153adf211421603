/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::Board;
use crate::{Direction, Piece, Side, Square};

/// Minimum number of attackers beside an occupied throne for it to be hostile to White.
const THRONE_SIEGE: usize = 3;

impl Board {
    /// Returns `true` if `square` is hostile to the pieces the last move could capture.
    ///
    /// Hostility is judged from the point of view of the side that just moved,
    /// which is the opponent of [`Board::turn`]. A square is hostile if:
    /// - it is the empty throne,
    /// - it holds one of the mover's soldiers,
    /// - it holds the King and Black is to move (the King helps White capture),
    /// - it is the occupied throne, White is to move, and at least three attackers surround it.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Board, Piece, Position, Side, Square};
    /// let pos = Position::empty(Side::White)
    ///     .with(Square::E6, Piece::Black)
    ///     .with(Square::E4, Piece::Black)
    ///     .with(Square::F5, Piece::Black)
    ///     .with(Square::A1, Piece::King);
    /// let board = Board::from_position(pos).unwrap();
    /// assert!(board.is_hostile(Square::THRONE));
    /// assert!(board.is_hostile(Square::E6));
    /// assert!(!board.is_hostile(Square::A1));
    /// ```
    pub fn is_hostile(&self, square: Square) -> bool {
        let piece = self.get(square);
        let turn = self.turn();

        if square == Square::THRONE {
            if piece.is_empty() {
                return true;
            }
            if turn.is_white() && self.throne_attackers() >= THRONE_SIEGE {
                return true;
            }
        }

        piece == turn.opponent().soldier() || (piece.is_king() && turn.is_black())
    }

    /// Removes every piece captured by the piece that just landed on `to`.
    ///
    /// Must be called after the turn has passed to the opponent of the mover.
    pub(super) fn resolve_captures(&mut self, to: Square) {
        let mover = self.get(to);

        for dir in Direction::ALL {
            let (Some(adjacent), Some(far)) = (to.step(dir), to.offset(dir, 2)) else {
                continue;
            };

            let victim = self.get(adjacent);
            if !mover.is_opponent_of(victim) {
                continue;
            }

            let captured = if victim.is_king() && is_king_stronghold(adjacent) {
                adjacent.neighbors().all(|sq| self.is_hostile(sq))
            } else {
                self.is_hostile(far)
            };

            if captured {
                self.position.set(adjacent, Piece::Empty);
            }
        }
    }

    /// Counts the Black pieces orthogonally adjacent to the throne.
    fn throne_attackers(&self) -> usize {
        Square::THRONE_NEIGHBORS
            .iter()
            .filter(|&&sq| self.get(sq).is_side(Side::Black))
            .count()
    }
}

/// The King must be surrounded on all four sides to be captured on these squares.
#[inline(always)]
fn is_king_stronghold(square: Square) -> bool {
    square == Square::THRONE || Square::THRONE_NEIGHBORS.contains(&square)
}

#[cfg(test)]
mod tests {
    use crate::{Board, Piece, Position, Side, Square};

    fn board(side_to_move: Side, pieces: &[(Square, Piece)]) -> Board {
        let pos = pieces
            .iter()
            .fold(Position::empty(side_to_move), |pos, &(sq, piece)| pos.with(sq, piece));
        Board::from_position(pos).unwrap()
    }

    #[test]
    fn test_occupied_throne_hostility() {
        let attackers_on_throne = [(Square::THRONE, Piece::Black), (Square::A1, Piece::King)];
        assert!(board(Side::White, &attackers_on_throne).is_hostile(Square::THRONE));
        assert!(!board(Side::Black, &attackers_on_throne).is_hostile(Square::THRONE));

        let besieged = [
            (Square::THRONE, Piece::King),
            (Square::E6, Piece::Black),
            (Square::E4, Piece::Black),
            (Square::F5, Piece::Black),
        ];
        assert!(board(Side::White, &besieged).is_hostile(Square::THRONE));
        assert!(!board(Side::White, &besieged[..3]).is_hostile(Square::THRONE));
    }

    #[test]
    fn test_king_is_hostile_only_to_black() {
        let pieces = [(Square::C3, Piece::King)];
        assert!(board(Side::Black, &pieces).is_hostile(Square::C3));
        assert!(!board(Side::White, &pieces).is_hostile(Square::C3));
    }

    #[test]
    fn test_custodial_capture() {
        let mut board = Board::new();
        board.make_moves(["d1-d3".parse().unwrap(), "c5-c3".parse().unwrap()]).unwrap();

        assert_eq!(board.get(Square::D3), Piece::Empty);
        assert_eq!(board.get(Square::C3), Piece::White);
        assert_eq!(board.position().count(Side::Black), 15);
    }

    #[test]
    fn test_capture_against_empty_throne() {
        // The King has left the throne, so it works as an anvil for Black
        let mut board = board(
            Side::Black,
            &[
                (Square::E6, Piece::Black),
                (Square::E4, Piece::Black),
                (Square::F5, Piece::Black),
                (Square::D5, Piece::White),
                (Square::C9, Piece::Black),
                (Square::A1, Piece::White),
                (Square::B7, Piece::King),
            ],
        );
        board.make_move("c9-c5".parse().unwrap());

        assert_eq!(board.get(Square::D5), Piece::Empty);
        assert_eq!(board.position().count(Side::Black), 4);
    }

    #[test]
    fn test_capture_against_besieged_throne() {
        let mut board = board(
            Side::Black,
            &[
                (Square::THRONE, Piece::King),
                (Square::E6, Piece::Black),
                (Square::E4, Piece::Black),
                (Square::F5, Piece::Black),
                (Square::D5, Piece::White),
                (Square::C9, Piece::Black),
                (Square::A1, Piece::White),
            ],
        );
        board.make_move("c9-c5".parse().unwrap());

        assert_eq!(board.get(Square::D5), Piece::Empty);
        assert_eq!(board.get(Square::THRONE), Piece::King);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_capture_needs_far_square_on_board() {
        let mut board = board(
            Side::Black,
            &[
                (Square::A5, Piece::White),
                (Square::B9, Piece::Black),
                (Square::E9, Piece::King),
            ],
        );
        board.make_move("b9-b5".parse().unwrap());

        assert_eq!(board.get(Square::A5), Piece::White);
    }
}
