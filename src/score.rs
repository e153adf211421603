/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::Side;

/// A numerical representation of the evaluation of a position, in units of pieces.
///
/// Scores are always from White's point of view: positive favors White, negative favors Black.
/// The magnitude is capped at [`Self::INF`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// Largest possible score ever achievable.
    pub const INF: Self = Self(i32::MAX);

    /// Score of a position White has won. Black wins score `-WIN`.
    pub const WIN: Self = Self(Self::INF.0 - 20);

    /// Returns the score of a position won by `side`.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Score, Side};
    /// assert_eq!(Score::win_for(Side::White), Score::WIN);
    /// assert_eq!(Score::win_for(Side::Black), -Score::WIN);
    /// ```
    #[inline(always)]
    pub const fn win_for(side: Side) -> Self {
        Self(Self::WIN.0 * side.negation_multiplier())
    }

    /// Returns `true` if the score is the score of a decided game.
    #[inline(always)]
    pub const fn is_win(&self) -> bool {
        self.0.abs() >= Self::WIN.0
    }

    /// Returns the side this score declares the winner, if any.
    #[inline(always)]
    pub const fn winner(&self) -> Option<Side> {
        if !self.is_win() {
            None
        } else if self.0 > 0 {
            Some(Side::White)
        } else {
            Some(Side::Black)
        }
    }
}

impl std::ops::Mul<i32> for Score {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: i32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl std::ops::Neg for Score {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(self.0.neg())
    }
}

impl PartialEq<i32> for Score {
    fn eq(&self, other: &i32) -> bool {
        self.0.eq(other)
    }
}

impl PartialOrd<i32> for Score {
    fn partial_cmp(&self, other: &i32) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

impl fmt::Display for Score {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(side) => write!(f, "{} ({side} wins)", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_scores() {
        assert_eq!(Score::WIN, 2147483627);
        assert!(Score::WIN.is_win());
        assert!((-Score::WIN).is_win());
        assert!(!Score(40).is_win());
        assert_eq!((-Score::WIN).winner(), Some(Side::Black));
        assert_eq!(Score(-3).winner(), None);
        assert!(-Score::INF < -Score::WIN);
        assert_eq!(Score::INF * Side::Black.negation_multiplier(), -Score::INF);
    }
}
