/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use crate::{Result, TablutError};

/// Number of squares on one side of the board.
pub const SIZE: u8 = 9;

/// Every square on the board, in index order.
///
/// Built once at compile time; [`Square::iter`] walks this table.
const ALL_SQUARES: [Square; Square::COUNT] = {
    let mut squares = [Square(0); Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        squares[i] = Square(i as u8);
        i += 1;
    }

    squares
};

/// One of the four orthogonal directions a rook move can travel.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    /// Towards row 9.
    Up,
    /// Towards row 1.
    Down,
    /// Towards column a.
    Left,
    /// Towards column i.
    Right,
}

impl Direction {
    /// All four directions, in the order captures are resolved.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The `(column, row)` step taken when travelling in this direction.
    #[inline(always)]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Represents a single square on the `9x9` Tablut board.
///
/// Squares are stored as an index using row-major order from `a1`,
/// so `index = column + row * 9`:
/// ```text
/// 9| 72 73 74 75 76 77 78 79 80
/// 8| 63 64 65 66 67 68 69 70 71
/// 7| 54 55 56 57 58 59 60 61 62
/// 6| 45 46 47 48 49 50 51 52 53
/// 5| 36 37 38 39 40 41 42 43 44
/// 4| 27 28 29 30 31 32 33 34 35
/// 3| 18 19 20 21 22 23 24 25 26
/// 2|  9 10 11 12 13 14 15 16 17
/// 1|  0  1  2  3  4  5  6  7  8
///  +---------------------------
///     a  b  c  d  e  f  g  h  i
/// ```
/// This is also the order in which positions are encoded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    pub const A1: Self = Self::new_unchecked(0, 0);
    pub const A2: Self = Self::new_unchecked(0, 1);
    pub const A3: Self = Self::new_unchecked(0, 2);
    pub const A4: Self = Self::new_unchecked(0, 3);
    pub const A5: Self = Self::new_unchecked(0, 4);
    pub const A6: Self = Self::new_unchecked(0, 5);
    pub const A7: Self = Self::new_unchecked(0, 6);
    pub const A8: Self = Self::new_unchecked(0, 7);
    pub const A9: Self = Self::new_unchecked(0, 8);

    pub const B1: Self = Self::new_unchecked(1, 0);
    pub const B2: Self = Self::new_unchecked(1, 1);
    pub const B3: Self = Self::new_unchecked(1, 2);
    pub const B4: Self = Self::new_unchecked(1, 3);
    pub const B5: Self = Self::new_unchecked(1, 4);
    pub const B6: Self = Self::new_unchecked(1, 5);
    pub const B7: Self = Self::new_unchecked(1, 6);
    pub const B8: Self = Self::new_unchecked(1, 7);
    pub const B9: Self = Self::new_unchecked(1, 8);

    pub const C1: Self = Self::new_unchecked(2, 0);
    pub const C2: Self = Self::new_unchecked(2, 1);
    pub const C3: Self = Self::new_unchecked(2, 2);
    pub const C4: Self = Self::new_unchecked(2, 3);
    pub const C5: Self = Self::new_unchecked(2, 4);
    pub const C6: Self = Self::new_unchecked(2, 5);
    pub const C7: Self = Self::new_unchecked(2, 6);
    pub const C8: Self = Self::new_unchecked(2, 7);
    pub const C9: Self = Self::new_unchecked(2, 8);

    pub const D1: Self = Self::new_unchecked(3, 0);
    pub const D2: Self = Self::new_unchecked(3, 1);
    pub const D3: Self = Self::new_unchecked(3, 2);
    pub const D4: Self = Self::new_unchecked(3, 3);
    pub const D5: Self = Self::new_unchecked(3, 4);
    pub const D6: Self = Self::new_unchecked(3, 5);
    pub const D7: Self = Self::new_unchecked(3, 6);
    pub const D8: Self = Self::new_unchecked(3, 7);
    pub const D9: Self = Self::new_unchecked(3, 8);

    pub const E1: Self = Self::new_unchecked(4, 0);
    pub const E2: Self = Self::new_unchecked(4, 1);
    pub const E3: Self = Self::new_unchecked(4, 2);
    pub const E4: Self = Self::new_unchecked(4, 3);
    pub const E5: Self = Self::new_unchecked(4, 4);
    pub const E6: Self = Self::new_unchecked(4, 5);
    pub const E7: Self = Self::new_unchecked(4, 6);
    pub const E8: Self = Self::new_unchecked(4, 7);
    pub const E9: Self = Self::new_unchecked(4, 8);

    pub const F1: Self = Self::new_unchecked(5, 0);
    pub const F2: Self = Self::new_unchecked(5, 1);
    pub const F3: Self = Self::new_unchecked(5, 2);
    pub const F4: Self = Self::new_unchecked(5, 3);
    pub const F5: Self = Self::new_unchecked(5, 4);
    pub const F6: Self = Self::new_unchecked(5, 5);
    pub const F7: Self = Self::new_unchecked(5, 6);
    pub const F8: Self = Self::new_unchecked(5, 7);
    pub const F9: Self = Self::new_unchecked(5, 8);

    pub const G1: Self = Self::new_unchecked(6, 0);
    pub const G2: Self = Self::new_unchecked(6, 1);
    pub const G3: Self = Self::new_unchecked(6, 2);
    pub const G4: Self = Self::new_unchecked(6, 3);
    pub const G5: Self = Self::new_unchecked(6, 4);
    pub const G6: Self = Self::new_unchecked(6, 5);
    pub const G7: Self = Self::new_unchecked(6, 6);
    pub const G8: Self = Self::new_unchecked(6, 7);
    pub const G9: Self = Self::new_unchecked(6, 8);

    pub const H1: Self = Self::new_unchecked(7, 0);
    pub const H2: Self = Self::new_unchecked(7, 1);
    pub const H3: Self = Self::new_unchecked(7, 2);
    pub const H4: Self = Self::new_unchecked(7, 3);
    pub const H5: Self = Self::new_unchecked(7, 4);
    pub const H6: Self = Self::new_unchecked(7, 5);
    pub const H7: Self = Self::new_unchecked(7, 6);
    pub const H8: Self = Self::new_unchecked(7, 7);
    pub const H9: Self = Self::new_unchecked(7, 8);

    pub const I1: Self = Self::new_unchecked(8, 0);
    pub const I2: Self = Self::new_unchecked(8, 1);
    pub const I3: Self = Self::new_unchecked(8, 2);
    pub const I4: Self = Self::new_unchecked(8, 3);
    pub const I5: Self = Self::new_unchecked(8, 4);
    pub const I6: Self = Self::new_unchecked(8, 5);
    pub const I7: Self = Self::new_unchecked(8, 6);
    pub const I8: Self = Self::new_unchecked(8, 7);
    pub const I9: Self = Self::new_unchecked(8, 8);

    /// The center square, where the King starts.
    pub const THRONE: Self = Self::E5;

    /// The square directly above the throne.
    pub const NTHRONE: Self = Self::E6;

    /// The square directly below the throne.
    pub const STHRONE: Self = Self::E4;

    /// The square directly left of the throne.
    pub const WTHRONE: Self = Self::D5;

    /// The square directly right of the throne.
    pub const ETHRONE: Self = Self::F5;

    /// The four squares orthogonally adjacent to the throne.
    pub const THRONE_NEIGHBORS: [Self; 4] = [Self::NTHRONE, Self::STHRONE, Self::ETHRONE, Self::WTHRONE];

    pub const COUNT: usize = 81;

    /// Returns an iterator over all squares, in index order.
    ///
    /// # Example
    /// ```
    /// # use tablut::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 81);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::I9);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        ALL_SQUARES.into_iter()
    }

    /// Creates a new [`Square`] from a column and row, both in `[0, 8]`.
    ///
    /// # Example
    /// ```
    /// # use tablut::Square;
    /// let d7 = Square::new(3, 6);
    /// assert_eq!(d7.unwrap(), Square::D7);
    /// assert!(Square::new(9, 0).is_err());
    /// ```
    #[inline(always)]
    pub fn new(col: u8, row: u8) -> Result<Self> {
        if col >= SIZE || row >= SIZE {
            return Err(TablutError::InvalidSquare(format!("({col}, {row})")));
        }
        Ok(Self::new_unchecked(col, row))
    }

    /// Creates a new [`Square`] from a column and row, without bounds checking.
    #[inline(always)]
    pub const fn new_unchecked(col: u8, row: u8) -> Self {
        debug_assert!(col < SIZE && row < SIZE);
        Self(col + row * SIZE)
    }

    /// Creates a new [`Square`] from its index in `[0, 80]`.
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            return Err(TablutError::InvalidSquare(format!("index {index}")));
        }
        Ok(Self(index as u8))
    }

    /// Returns the index of this square, suitable for indexing into lists of 81 elements.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the column of this square, `0` being column `a`.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 % SIZE
    }

    /// Returns the row of this square, `0` being row `1`.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 / SIZE
    }

    /// Returns `true` if this square lies on the outermost ring of the board.
    ///
    /// # Example
    /// ```
    /// # use tablut::Square;
    /// assert!(Square::C9.is_edge());
    /// assert!(!Square::C8.is_edge());
    /// ```
    #[inline(always)]
    pub const fn is_edge(&self) -> bool {
        let (col, row) = (self.col(), self.row());
        col == 0 || row == 0 || col == SIZE - 1 || row == SIZE - 1
    }

    /// Returns `true` if `self` and `other` are distinct squares sharing a row or a column.
    ///
    /// # Example
    /// ```
    /// # use tablut::Square;
    /// assert!(Square::D9.is_rook_move(Square::D7));
    /// assert!(!Square::D9.is_rook_move(Square::E8));
    /// assert!(!Square::D9.is_rook_move(Square::D9));
    /// ```
    #[inline(always)]
    pub const fn is_rook_move(&self, other: Square) -> bool {
        self.0 != other.0 && (self.col() == other.col() || self.row() == other.row())
    }

    /// Returns the [`Direction`] from `self` towards `other`, if they are a rook move apart.
    pub const fn direction_to(&self, other: Square) -> Option<Direction> {
        if !self.is_rook_move(other) {
            return None;
        }

        Some(if self.col() == other.col() {
            if other.row() > self.row() {
                Direction::Up
            } else {
                Direction::Down
            }
        } else if other.col() > self.col() {
            Direction::Right
        } else {
            Direction::Left
        })
    }

    /// Returns the square `n` steps away in `direction`, if it is on the board.
    #[inline(always)]
    pub const fn offset(&self, direction: Direction, n: i8) -> Option<Self> {
        let (dc, dr) = direction.offset();
        let col = self.col() as i8 + dc * n;
        let row = self.row() as i8 + dr * n;

        if col < 0 || row < 0 || col >= SIZE as i8 || row >= SIZE as i8 {
            None
        } else {
            Some(Self::new_unchecked(col as u8, row as u8))
        }
    }

    /// Returns the adjacent square in `direction`, if it is on the board.
    #[inline(always)]
    pub const fn step(&self, direction: Direction) -> Option<Self> {
        self.offset(direction, 1)
    }

    /// Returns an iterator over the (up to four) squares orthogonally adjacent to this one.
    #[inline(always)]
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        Direction::ALL.into_iter().filter_map(move |dir| self.step(dir))
    }

    /// Returns the square midway between `self` and `other`,
    /// if they share a row or column and are exactly two squares apart.
    ///
    /// # Example
    /// ```
    /// # use tablut::Square;
    /// assert_eq!(Square::C5.between(Square::E5), Some(Square::D5));
    /// assert_eq!(Square::E7.between(Square::E5), Some(Square::E6));
    /// assert_eq!(Square::C5.between(Square::F5), None);
    /// ```
    pub const fn between(&self, other: Square) -> Option<Self> {
        match self.direction_to(other) {
            Some(dir) if self.col().abs_diff(other.col()) + self.row().abs_diff(other.row()) == 2 => {
                self.step(dir)
            }
            _ => None,
        }
    }

    /// Returns the column of this square as a char in `[a, i]`.
    #[inline(always)]
    pub const fn col_char(&self) -> char {
        (b'a' + self.col()) as char
    }

    /// Returns the row of this square as a char in `[1, 9]`.
    #[inline(always)]
    pub const fn row_char(&self) -> char {
        (b'1' + self.row()) as char
    }
}

/// Parses a column letter in `[a, i]`, case-insensitive.
pub(crate) fn parse_col(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    ('a'..='i').contains(&c).then(|| c as u8 - b'a')
}

/// Parses a row digit in `[1, 9]`.
pub(crate) fn parse_row(c: char) -> Option<u8> {
    ('1'..='9').contains(&c).then(|| c as u8 - b'1')
}

impl FromStr for Square {
    type Err = TablutError;

    /// Parses a square such as `e5` (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        let err = || TablutError::InvalidSquare(s.to_string());

        let mut chars = s.trim().chars();
        let col = chars.next().and_then(parse_col).ok_or_else(err)?;
        let row = chars.next().and_then(parse_row).ok_or_else(err)?;

        if chars.next().is_some() {
            return Err(err());
        }

        Ok(Self::new_unchecked(col, row))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col_char(), self.row_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.col(), self.row())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_coordinates() {
        assert_eq!(Square::A1.index(), 0);
        assert_eq!(Square::I9.index(), 80);
        assert_eq!(Square::D7.col(), 3);
        assert_eq!(Square::D7.row(), 6);
        assert_eq!(Square::THRONE, Square::new(4, 4).unwrap());

        for square in Square::iter() {
            assert_eq!(Square::new(square.col(), square.row()).unwrap(), square);
            assert_eq!(Square::from_index(square.index()).unwrap(), square);
        }
    }

    #[test]
    fn test_square_parsing() {
        assert_eq!("d9".parse::<Square>().unwrap(), Square::D9);
        assert_eq!("I1".parse::<Square>().unwrap(), Square::I1);
        assert!("j1".parse::<Square>().is_err());
        assert!("a0".parse::<Square>().is_err());
        assert!("a10".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
        assert_eq!(Square::F7.to_string(), "f7");
    }

    #[test]
    fn test_offsets_stay_on_board() {
        assert_eq!(Square::A1.step(Direction::Left), None);
        assert_eq!(Square::A1.step(Direction::Down), None);
        assert_eq!(Square::A1.offset(Direction::Up, 2), Some(Square::A3));
        assert_eq!(Square::I9.offset(Direction::Left, 8), Some(Square::A9));
        assert_eq!(Square::A1.neighbors().count(), 2);
        assert_eq!(Square::A5.neighbors().count(), 3);
        assert_eq!(Square::THRONE.neighbors().count(), 4);
    }

    #[test]
    fn test_direction_to() {
        assert_eq!(Square::E5.direction_to(Square::E9), Some(Direction::Up));
        assert_eq!(Square::E5.direction_to(Square::E1), Some(Direction::Down));
        assert_eq!(Square::E5.direction_to(Square::A5), Some(Direction::Left));
        assert_eq!(Square::E5.direction_to(Square::I5), Some(Direction::Right));
        assert_eq!(Square::E5.direction_to(Square::F6), None);
        assert_eq!(Square::E5.direction_to(Square::E5), None);
    }

    #[test]
    fn test_throne_neighbors_surround_throne() {
        for square in Square::THRONE_NEIGHBORS {
            assert!(Square::THRONE.is_rook_move(square));
            assert_eq!(Square::THRONE.offset(Square::THRONE.direction_to(square).unwrap(), 1), Some(square));
        }
    }
}
