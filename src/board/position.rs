/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt::{self, Write},
    ops::Index,
    str::FromStr,
};

use crate::{Piece, Result, Side, Square, TablutError};

/// Starting squares of the attackers.
pub const INITIAL_ATTACKERS: [Square; 16] = [
    Square::A4,
    Square::A5,
    Square::A6,
    Square::B5,
    Square::I4,
    Square::I5,
    Square::I6,
    Square::H5,
    Square::D1,
    Square::E1,
    Square::F1,
    Square::E2,
    Square::D9,
    Square::E9,
    Square::F9,
    Square::E8,
];

/// Starting squares of the King's defenders.
pub const INITIAL_DEFENDERS: [Square; 8] = [
    Square::NTHRONE,
    Square::ETHRONE,
    Square::STHRONE,
    Square::WTHRONE,
    Square::E7,
    Square::E3,
    Square::C5,
    Square::G5,
];

/// Length of an encoded position: one character for the side to move, then one per square.
pub const ENCODED_LEN: usize = Square::COUNT + 1;

/// A snapshot of the board: the occupant of every square, and whose turn it is.
///
/// This holds no move counters or history; it is the unit the [`crate::Board`] records
/// for undo and repetition detection.
///
/// Its [`fmt::Display`] output is the textual encoding of the position: the side to move
/// (`'B'` or `'W'`) followed by one of `'-'`, `'B'`, `'W'`, `'K'` for each square in index order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Occupants, indexed by [`Square::index`].
    cells: [Piece; Square::COUNT],

    /// The side whose turn it is.
    side_to_move: Side,
}

impl Position {
    /// Creates a [`Position`] with no pieces on it and `side_to_move` to play.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Position, Side, Piece, Square};
    /// let pos = Position::empty(Side::White);
    /// assert!(Square::iter().all(|sq| pos[sq] == Piece::Empty));
    /// ```
    #[inline(always)]
    pub const fn empty(side_to_move: Side) -> Self {
        Self {
            cells: [Piece::Empty; Square::COUNT],
            side_to_move,
        }
    }

    /// Creates the standard Tablut starting position, with Black to move.
    pub fn initial() -> Self {
        let mut pos = Self::empty(Side::Black);

        pos.set(Square::THRONE, Piece::King);
        for square in INITIAL_ATTACKERS {
            pos.set(square, Piece::Black);
        }
        for square in INITIAL_DEFENDERS {
            pos.set(square, Piece::White);
        }

        pos
    }

    /// Returns the piece on `square`.
    #[inline(always)]
    pub const fn get(&self, square: Square) -> Piece {
        self.cells[square.index()]
    }

    /// Places `piece` on `square`, replacing whatever was there.
    #[inline(always)]
    pub fn set(&mut self, square: Square, piece: Piece) {
        self.cells[square.index()] = piece;
    }

    /// Builder-style version of [`Position::set`].
    #[inline(always)]
    pub fn with(mut self, square: Square, piece: Piece) -> Self {
        self.set(square, piece);
        self
    }

    /// Returns the side whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Passes the turn to the other side.
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Returns the square the King is on, if it is still on the board.
    #[inline(always)]
    pub fn king_square(&self) -> Option<Square> {
        Square::iter().find(|&sq| self.get(sq).is_king())
    }

    /// Returns an iterator over every occupied square belonging to `side`, in index order.
    #[inline(always)]
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        Square::iter().filter(move |&sq| self.get(sq).is_side(side))
    }

    /// Counts the pieces (King included) belonging to `side`.
    #[inline(always)]
    pub fn count(&self, side: Side) -> usize {
        self.cells.iter().filter(|piece| piece.is_side(side)).count()
    }

    /// Fails if more than one King is on the board.
    pub(crate) fn validate(&self) -> Result<()> {
        let kings = self.cells.iter().filter(|piece| piece.is_king()).count();
        if kings > 1 {
            return Err(TablutError::InvalidPosition(format!(
                "expected at most one King. Found {kings}"
            )));
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl Index<Square> for Position {
    type Output = Piece;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.cells[index.index()]
    }
}

impl FromStr for Position {
    type Err = TablutError;

    /// Decodes a position from its textual encoding.
    ///
    /// # Example
    /// ```
    /// # use tablut::Position;
    /// let pos = Position::initial();
    /// let decoded: Position = pos.to_string().parse().unwrap();
    /// assert_eq!(pos, decoded);
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.chars().count() != ENCODED_LEN {
            return Err(TablutError::InvalidPosition(format!(
                "encoding must be {ENCODED_LEN} characters long. Got {}",
                s.chars().count()
            )));
        }

        let mut chars = s.chars();
        let side = chars
            .next()
            .ok_or_else(|| TablutError::InvalidPosition(String::from("empty encoding")))?;
        let mut pos = Self::empty(Side::from_char(side)?);

        for (square, c) in Square::iter().zip(chars) {
            pos.set(square, Piece::from_char(c)?);
        }

        pos.validate()?;
        Ok(pos)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.side_to_move.char())?;
        for piece in self.cells {
            f.write_char(piece.char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_encoding() {
        let encoded = Position::initial().to_string();
        assert_eq!(encoded.len(), ENCODED_LEN);
        assert_eq!(
            encoded,
            "B---BBB-------B--------W----B---W---BBBWWKWWBBB---W---B----W--------B-------BBB---"
        );
    }

    #[test]
    fn test_initial_counts() {
        let pos = Position::initial();
        assert_eq!(pos.count(Side::Black), 16);
        assert_eq!(pos.count(Side::White), 9);
        assert_eq!(pos.king_square(), Some(Square::THRONE));
        assert_eq!(pos.side_to_move(), Side::Black);
    }

    #[test]
    fn test_decoding_rejects_malformed_input() {
        let encoded = Position::initial().to_string();

        assert!(encoded[1..].parse::<Position>().is_err());
        assert!(encoded.replacen('B', "X", 1).parse::<Position>().is_err());
        assert!(encoded.replacen('-', "K", 1).parse::<Position>().is_err());

        // Lowercase is rejected for the side to move as well as for cells
        assert!(encoded.replacen('B', "b", 1).parse::<Position>().is_err());
        assert!(encoded.replacen('K', "k", 1).parse::<Position>().is_err());
    }
}
