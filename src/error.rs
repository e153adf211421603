/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

use crate::{Move, Side};

/// Errors produced by the rules engine and the search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TablutError {
    /// The move is not legal in the current position.
    #[error("illegal move {0}")]
    IllegalMove(Move),

    /// A setting was rejected, such as a move limit that has already been exceeded.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Text that does not name one of the 81 squares.
    #[error("invalid square {0:?}: expected a column in [a, i] followed by a row in [1, 9]")]
    InvalidSquare(String),

    /// Text that does not describe a rook move.
    #[error("invalid move {0:?}")]
    InvalidMove(String),

    /// A position encoding or layout that cannot exist on a board.
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// The side to move has nothing to play.
    #[error("{0} has no legal moves")]
    NoLegalMoves(Side),

    /// The game has already been decided.
    #[error("the game is over: {0} has won")]
    GameOver(Side),
}

/// Result alias used throughout the rules engine.
pub type Result<T, E = TablutError> = std::result::Result<T, E>;
