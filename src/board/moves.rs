/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use super::square::{parse_col, parse_row};
use crate::{Result, Square, TablutError};

/// A list of moves, in generation order.
pub type MoveList = Vec<Move>;

/// A rook move of a single piece from one square to another.
///
/// A [`Move`] is always between two distinct squares sharing a row or column.
/// Whether it is *legal* depends on the board it is played on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new [`Move`] from `from` to `to`.
    ///
    /// Fails if the squares are equal or do not share a row or column.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Move, Square};
    /// let mv = Move::new(Square::D9, Square::D7).unwrap();
    /// assert_eq!(mv.to_string(), "d9-d7");
    /// assert!(Move::new(Square::D9, Square::E8).is_err());
    /// ```
    #[inline(always)]
    pub fn new(from: Square, to: Square) -> Result<Self> {
        if !from.is_rook_move(to) {
            return Err(TablutError::InvalidMove(format!("{from}-{to}")));
        }
        Ok(Self::new_unchecked(from, to))
    }

    /// Creates a new [`Move`] without checking that it is a rook move.
    #[inline(always)]
    pub(crate) const fn new_unchecked(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// The square the moving piece starts on.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The square the moving piece lands on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }
}

impl FromStr for Move {
    type Err = TablutError;

    /// Parses a move such as `d9-d7`.
    ///
    /// The destination may be abbreviated to a row (`d9-7`) or a column (`d9-f`),
    /// in which case the other coordinate is taken from the origin.
    fn from_str(s: &str) -> Result<Self> {
        let err = || TablutError::InvalidMove(s.to_string());

        let (from, to) = s.trim().split_once('-').ok_or_else(err)?;
        let from: Square = from.trim().parse().map_err(|_| err())?;
        let to = to.trim();

        let mut chars = to.chars();
        let to = match (chars.next(), chars.next()) {
            (Some(c), None) => {
                if let Some(row) = parse_row(c) {
                    Square::new_unchecked(from.col(), row)
                } else if let Some(col) = parse_col(c) {
                    Square::new_unchecked(col, from.row())
                } else {
                    return Err(err());
                }
            }
            _ => to.parse().map_err(|_| err())?,
        };

        Self::new(from, to).map_err(|_| err())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_parsing() {
        let mv = Move::new(Square::D9, Square::D7).unwrap();
        assert_eq!("d9-d7".parse::<Move>().unwrap(), mv);
        assert_eq!("d9-7".parse::<Move>().unwrap(), mv);
        assert_eq!(" D9 - D7 ".parse::<Move>().unwrap(), mv);
        assert_eq!(
            "d9-f".parse::<Move>().unwrap(),
            Move::new(Square::D9, Square::F9).unwrap()
        );
    }

    #[test]
    fn test_move_parsing_rejects_non_rook_moves() {
        assert!("d9-e8".parse::<Move>().is_err());
        assert!("d9-d9".parse::<Move>().is_err());
        assert!("d9-9".parse::<Move>().is_err());
        assert!("d9d7".parse::<Move>().is_err());
        assert!("z9-d7".parse::<Move>().is_err());
        assert!("d9-".parse::<Move>().is_err());
    }
}
