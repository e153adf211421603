/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Board, Evaluator, Move, Result, Score, Side, TablutError};

/// Number of plies in each game phase used by [`heuristic_depth`].
pub const PHASE_LENGTH: usize = 30;

/// Search depth for each game phase, opening first. The last entry applies to the rest of the game.
pub const PHASE_DEPTHS: [u8; 4] = [1, 1, 1, 1];

/// Depth used when no depth is configured and the board offers no better guess.
pub const DEFAULT_DEPTH: u8 = PHASE_DEPTHS[0];

/// Returns a heuristically determined maximum search depth for a game that is `move_count` plies old.
///
/// # Example
/// ```
/// # use tablut::{heuristic_depth, DEFAULT_DEPTH};
/// assert_eq!(heuristic_depth(0), DEFAULT_DEPTH);
/// assert_eq!(heuristic_depth(500), 1);
/// ```
#[inline(always)]
pub fn heuristic_depth(move_count: usize) -> u8 {
    let phase = (move_count / PHASE_LENGTH).min(PHASE_DEPTHS.len() - 1);
    PHASE_DEPTHS[phase]
}

/// Receives the move a [`Search`] decides on.
pub trait MoveReporter {
    /// Called exactly once per successful search, with the side that is to play `mv`.
    fn report_move(&mut self, side: Side, mv: Move);
}

impl<F: FnMut(Side, Move)> MoveReporter for F {
    #[inline(always)]
    fn report_move(&mut self, side: Side, mv: Move) {
        self(side, mv)
    }
}

/// The result of a search, containing the best move found, score, and total nodes searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    /// Best move found during the search.
    pub bestmove: Option<Move>,

    /// Evaluation of the position after `bestmove` is made, from White's perspective.
    pub score: Score,

    /// Number of nodes searched.
    pub nodes: u64,

    /// Depth the search was run to.
    pub depth: u8,
}

impl Default for SearchResult {
    /// A default search result has no move and the worst possible score.
    #[inline(always)]
    fn default() -> Self {
        Self {
            bestmove: None,
            score: -Score::INF,
            nodes: 0,
            depth: 0,
        }
    }
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Depth to execute the search to.
    ///
    /// If `None`, the depth is chosen by [`heuristic_depth`].
    pub max_depth: Option<u8>,
}

impl SearchConfig {
    /// A config that always searches to `depth`.
    #[inline(always)]
    pub const fn with_depth(depth: u8) -> Self {
        Self {
            max_depth: Some(depth),
        }
    }

    /// The depth a search on `board` will run to. Never less than 1.
    #[inline(always)]
    pub fn depth_for(&self, board: &Board) -> u8 {
        self.max_depth
            .unwrap_or_else(|| heuristic_depth(board.move_count()))
            .max(1)
    }
}

/// Executes a minimax search with alpha-beta pruning on a private copy of a board.
///
/// Scores are always from White's perspective: White maximizes and Black minimizes.
/// When two moves score the same, the one generated later is preferred.
pub struct Search {
    /// Scratch board that moves are made and undone on.
    board: Board,

    /// Configuration variables for this instance of the search.
    config: SearchConfig,

    /// Best move found at the root so far.
    bestmove: Option<Move>,

    /// Number of nodes visited so far.
    nodes: u64,
}

impl Search {
    /// Construct a new [`Search`] instance to execute on a fork of the provided [`Board`].
    ///
    /// Nothing done by the search is ever visible on `board`.
    #[inline(always)]
    pub fn new(board: &Board, config: SearchConfig) -> Self {
        Self {
            board: board.fork(),
            config,
            bestmove: None,
            nodes: 0,
        }
    }

    /// Start the search, reporting the chosen move to `reporter` and returning the results.
    ///
    /// Fails with [`TablutError::GameOver`] if the game has already been won,
    /// and with [`TablutError::NoLegalMoves`] if the side to move cannot move.
    ///
    /// # Example
    /// ```
    /// # use tablut::{Board, Move, Search, SearchConfig, Side};
    /// let board = Board::new();
    /// let mut reported = None;
    /// let res = Search::new(&board, SearchConfig::default())
    ///     .start(|_: Side, mv: Move| reported = Some(mv))
    ///     .unwrap();
    ///
    /// assert_eq!(res.bestmove, reported);
    /// assert!(board.is_legal(res.bestmove.unwrap()));
    /// ```
    pub fn start(mut self, mut reporter: impl MoveReporter) -> Result<SearchResult> {
        if let Some(winner) = self.board.winner() {
            return Err(TablutError::GameOver(winner));
        }

        let side = self.board.turn();
        if !self.board.has_move(side) {
            return Err(TablutError::NoLegalMoves(side));
        }

        let depth = self.config.depth_for(&self.board);
        log::debug!("Starting depth {depth} search for {side} on {}", self.board.encode());

        let start = *self.board.position();
        let score = self.find_move(depth, true, side, -Score::INF, Score::INF);
        debug_assert_eq!(
            *self.board.position(),
            start,
            "search must leave its board as it found it"
        );

        let mv = self.bestmove.ok_or(TablutError::NoLegalMoves(side))?;
        log::debug!("Search chose {mv} with score {score:?} after {} nodes", self.nodes);

        reporter.report_move(side, mv);

        Ok(SearchResult {
            bestmove: Some(mv),
            score,
            nodes: self.nodes,
            depth,
        })
    }

    /// Returns the value of the current position searched `depth` plies deep with `sense` to move,
    /// saving the chosen move into `self.bestmove` if `save` is set.
    ///
    /// The returned value is exact if it lies strictly between `alpha` and `beta`.
    /// Otherwise it is only a bound, and the search of this node was cut off early.
    fn find_move(&mut self, depth: u8, save: bool, sense: Side, mut alpha: Score, mut beta: Score) -> Score {
        self.nodes += 1;

        if depth == 0 || self.board.is_game_over() {
            return Evaluator::new(&self.board).eval();
        }

        let mut best = -Score::INF * sense.negation_multiplier();

        for mv in self.board.legal_moves(sense) {
            self.board.make_move(mv);
            let score = self.find_move(depth - 1, false, sense.opponent(), alpha, beta);
            self.board.undo();

            let improves = match sense {
                Side::White => score >= best,
                Side::Black => score <= best,
            };

            if improves {
                best = score;
                if save {
                    self.bestmove = Some(mv);
                }

                match sense {
                    Side::White => alpha = alpha.max(best),
                    Side::Black => beta = beta.min(best),
                }
            }

            // Cutoff
            if alpha >= beta {
                break;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_depth_covers_every_phase() {
        for plies in [0, 29, 30, 59, 60, 89, 90, 1000] {
            assert_eq!(heuristic_depth(plies), 1);
        }
        assert_eq!(SearchConfig::with_depth(0).depth_for(&Board::new()), 1);
        assert_eq!(SearchConfig::with_depth(3).depth_for(&Board::new()), 3);
    }

    #[test]
    fn test_search_prefers_last_of_equal_moves() {
        // Every Black move leaves the material unchanged, so the last one generated wins
        let res = Search::new(&Board::new(), SearchConfig::with_depth(1))
            .start(|_: Side, _: Move| {})
            .unwrap();

        assert_eq!(res.bestmove.unwrap().to_string(), "f9-i9");
        assert_eq!(res.score, -7);
        assert_eq!(res.depth, 1);
        assert_eq!(res.nodes, 81);
    }

    #[test]
    fn test_search_finds_only_capture() {
        let mut board = Board::new();
        board.make_move("d1-d3".parse().unwrap());

        let mut reports = Vec::new();
        let res = Search::new(&board, SearchConfig::with_depth(1))
            .start(|side: Side, mv: Move| reports.push((side, mv)))
            .unwrap();

        let capture = "c5-c3".parse().unwrap();
        assert_eq!(res.bestmove, Some(capture));
        assert_eq!(res.score, -6);
        assert_eq!(reports, vec![(Side::White, capture)]);
    }

    #[test]
    fn test_search_rejects_finished_game() {
        let mut board = Board::new();
        for mv in ["a4-a2", "c5-c2", "a2-a3", "c2-c3", "a3-a4", "c3-c5"] {
            board.make_move(mv.parse().unwrap());
        }

        let err = Search::new(&board, SearchConfig::default()).start(|_: Side, _: Move| {});
        assert_eq!(err, Err(TablutError::GameOver(Side::Black)));
    }
}
