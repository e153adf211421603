/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Hostility of squares and removal of captured pieces.
mod capture;

/// The [`Board`] type, which tracks a game from start to finish.
mod game;

/// Legality checks and legal move generation.
mod movegen;

/// The [`Move`] type and its text format.
mod moves;

/// Perft node counting.
mod perft;

/// Sides and pieces.
mod piece;

/// A snapshot of the pieces on the board and the side to move.
mod position;

/// Squares and directions on a 9x9 board.
mod square;

pub use game::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
