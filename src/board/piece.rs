/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use crate::{Result, TablutError};

/// One of the two players.
///
/// White defends the King and includes it; Black attacks.
/// In Tablut, Black moves first, and therefore [`Side`] defaults to [`Side::Black`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Side {
    White,
    #[default]
    Black,
}

impl Side {
    /// Number of side variants.
    pub const COUNT: usize = 2;

    /// Returns this [`Side`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use tablut::Side;
    /// assert_eq!(Side::White.opponent(), Side::Black);
    /// assert_eq!(Side::Black.opponent(), Side::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns `true` if this [`Side`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns `true` if this [`Side`] is Black.
    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// Returns this [`Side`] as a `usize`, for indexing into lists.
    ///
    /// Will be `0` for White, `1` for Black.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns `1` for White and `-1` for Black.
    ///
    /// Scores are positive when they favor White, so this orients a score towards a side.
    #[inline(always)]
    pub const fn negation_multiplier(&self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// The character used for this side in the position encoding.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::White => 'W',
            Self::Black => 'B',
        }
    }

    /// Parses a side from its position-encoding character.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'W' => Ok(Self::White),
            'B' => Ok(Self::Black),
            _ => Err(TablutError::InvalidPosition(format!(
                "side to move must be 'W' or 'B'. Found {c:?}"
            ))),
        }
    }

    /// Fetches a human-readable name for this [`Side`].
    ///
    /// # Example
    /// ```
    /// # use tablut::Side;
    /// assert_eq!(Side::White.name(), "White");
    /// ```
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }

    /// The piece a side's ordinary soldiers are represented by.
    #[inline(always)]
    pub const fn soldier(&self) -> Piece {
        match self {
            Self::White => Piece::White,
            Self::Black => Piece::Black,
        }
    }
}

impl FromStr for Side {
    type Err = TablutError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => Err(TablutError::InvalidConfiguration(format!(
                "unknown side {s:?}: expected \"white\" or \"black\""
            ))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The occupant of a single square.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    #[default]
    Empty,
    White,
    Black,
    King,
}

impl Piece {
    /// Returns the [`Side`] this piece belongs to, or `None` for an empty square.
    ///
    /// The King belongs to White.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Piece, Side};
    /// assert_eq!(Piece::King.side(), Some(Side::White));
    /// assert_eq!(Piece::Black.side(), Some(Side::Black));
    /// assert_eq!(Piece::Empty.side(), None);
    /// ```
    #[inline(always)]
    pub const fn side(&self) -> Option<Side> {
        match self {
            Self::Empty => None,
            Self::White | Self::King => Some(Side::White),
            Self::Black => Some(Side::Black),
        }
    }

    /// Returns `true` if this piece belongs to `side`.
    #[inline(always)]
    pub const fn is_side(&self, side: Side) -> bool {
        match self.side() {
            Some(own) => own as u8 == side as u8,
            None => false,
        }
    }

    /// Returns `true` if `self` and `other` are both pieces, on opposing sides.
    ///
    /// # Example
    /// ```
    /// # use tablut::Piece;
    /// assert!(Piece::King.is_opponent_of(Piece::Black));
    /// assert!(!Piece::King.is_opponent_of(Piece::White));
    /// assert!(!Piece::Black.is_opponent_of(Piece::Empty));
    /// ```
    #[inline(always)]
    pub const fn is_opponent_of(&self, other: Piece) -> bool {
        match (self.side(), other.side()) {
            (Some(a), Some(b)) => a as u8 != b as u8,
            _ => false,
        }
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self, Self::King)
    }

    /// The character used for this piece in the position encoding and board display.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Empty => '-',
            Self::White => 'W',
            Self::Black => 'B',
            Self::King => 'K',
        }
    }

    /// Parses a piece from its position-encoding character.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '-' => Ok(Self::Empty),
            'W' => Ok(Self::White),
            'B' => Ok(Self::Black),
            'K' => Ok(Self::King),
            _ => Err(TablutError::InvalidPosition(format!(
                "piece must be one of '-', 'W', 'B', 'K'. Found {c:?}"
            ))),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "Empty",
            Self::White => "White",
            Self::Black => "Black",
            Self::King => "King",
        };
        write!(f, "{name}")
    }
}
