/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::Board;

/// Perform a perft at the specified depth, counting the positions reachable in exactly `depth` plies.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// Positions that have already been won have no continuations.
///
/// # Example
/// ```
/// # use tablut::{perft, Board};
/// let board = Board::new();
/// assert_eq!(perft(&board, 1), 80);
/// ```
#[inline(always)]
pub fn perft(board: &Board, depth: usize) -> u64 {
    perft_generic::<true, false>(board, depth)
}

/// Perform a splitperft at the specified depth,
/// printing the number of nodes reachable after each move available at the root node.
#[inline(always)]
pub fn splitperft(board: &Board, depth: usize) -> u64 {
    perft_generic::<true, true>(board, depth)
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, this will perform a splitperft.
///
/// The moves are played on a [`Board::fork`], so `board` itself is never modified.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(board: &Board, depth: usize) -> u64 {
    let mut scratch = board.fork();
    let nodes = recurse::<BULK, SPLIT>(&mut scratch, depth);
    debug_assert_eq!(scratch.position(), board.position());
    nodes
}

fn recurse<const BULK: bool, const SPLIT: bool>(board: &mut Board, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }
    if board.is_game_over() {
        return 0;
    }

    let moves = board.legal_moves(board.turn());

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return moves.len() as u64;
    }

    moves.into_iter().fold(0, |nodes, mv| {
        board.make_move(mv);
        let new_nodes = recurse::<BULK, false>(board, depth - 1);
        board.undo();

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes + new_nodes
    })
}
