/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The rules of Tablut: squares, pieces, moves, positions, and the game itself.
mod board;

/// Command-line options and interactive engine commands.
mod cli;

/// Code related to the engine's functionality, such as user input handling.
mod engine;

/// Errors produced by the rules engine and the search.
mod error;

/// Evaluation of Tablut positions.
mod eval;

/// Scores assigned to positions.
mod score;

/// Main engine logic; all search related code.
mod search;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use error::*;
pub use eval::*;
pub use score::*;
pub use search::*;
