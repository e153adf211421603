/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tablut::{Board, Move, Piece, Position, Side, Square, TablutError};

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

/// Builds a board from a list of pieces, with `side_to_move` to play.
fn setup(side_to_move: Side, pieces: &[(Square, Piece)]) -> Board {
    let pos = pieces
        .iter()
        .fold(Position::empty(side_to_move), |pos, &(sq, piece)| pos.with(sq, piece));
    Board::from_position(pos).unwrap()
}

#[test]
fn test_initial_board() {
    let board = Board::new();

    assert_eq!(board.turn(), Side::Black);
    assert_eq!(board.winner(), None);
    assert_eq!(board.move_count(), 0);
    assert_eq!(board.get(Square::THRONE), Piece::King);
    assert_eq!(board.piece_locations(Side::Black).len(), 16);
    assert_eq!(board.piece_locations(Side::White).len(), 9);
    assert_eq!(board.get_at(4, 4).unwrap(), Piece::King);
    assert!(board.get_at(9, 4).is_err());
}

#[test]
fn test_three_ply_game() {
    let mut board = Board::new();
    board.make_moves([mv("d9-d7"), mv("e3-d3"), mv("f9-f7")]).unwrap();

    assert_eq!(board.move_count(), 3);
    assert_eq!(board.turn(), Side::White);

    // f7 and d7 close on the defender at e7
    assert_eq!(board.get(Square::E7), Piece::Empty);
    assert_eq!(board.position().count(Side::Black), 16);
    assert_eq!(board.position().count(Side::White), 8);
    assert_eq!(board.king_square(), Some(Square::THRONE));
}

#[test]
fn test_illegal_moves_are_ignored() {
    let mut board = Board::new();
    let before = board.clone();

    // White piece, Black to move
    board.make_move(mv("e3-d3"));
    // Blocked by e2
    board.make_move(mv("e1-e3"));
    assert_eq!(board, before);

    assert_eq!(
        board.make_move_checked(mv("e3-d3")),
        Err(TablutError::IllegalMove(mv("e3-d3")))
    );
}

#[test]
fn test_undo_restores_position() {
    let mut board = Board::new();
    board.make_moves([mv("d1-d3"), mv("c5-c3")]).unwrap();
    assert_eq!(board.get(Square::D3), Piece::Empty);

    board.undo();
    assert_eq!(board.get(Square::D3), Piece::Black);
    assert_eq!(board.get(Square::C5), Piece::White);
    assert_eq!(board.turn(), Side::White);

    board.undo();
    assert_eq!(board.position(), Board::new().position());
    assert_eq!(board.move_count(), 0);

    // Nothing left to undo
    board.undo();
    assert_eq!(board.move_count(), 0);
}

#[test]
fn test_king_captured_on_throne() {
    let mut board = setup(
        Side::Black,
        &[
            (Square::THRONE, Piece::King),
            (Square::E6, Piece::Black),
            (Square::E4, Piece::Black),
            (Square::D5, Piece::Black),
            (Square::H5, Piece::Black),
            (Square::A1, Piece::White),
        ],
    );
    board.make_move(mv("h5-f5"));

    assert_eq!(board.king_square(), None);
    assert_eq!(board.winner(), Some(Side::Black));
}

#[test]
fn test_king_beside_throne_needs_four_attackers() {
    let mut pieces = vec![
        (Square::E6, Piece::King),
        (Square::D6, Piece::Black),
        (Square::F6, Piece::Black),
        (Square::E9, Piece::Black),
        (Square::A1, Piece::White),
    ];

    // The empty throne counts as the fourth attacker
    let mut board = setup(Side::Black, &pieces);
    board.make_move(mv("e9-e7"));
    assert_eq!(board.get(Square::E6), Piece::Empty);
    assert_eq!(board.winner(), Some(Side::Black));

    // Without f6, the King survives
    pieces.retain(|&(sq, _)| sq != Square::F6);
    let mut board = setup(Side::Black, &pieces);
    board.make_move(mv("e9-e7"));
    assert_eq!(board.get(Square::E6), Piece::King);
    assert_eq!(board.winner(), None);
}

#[test]
fn test_king_captured_away_from_throne() {
    let mut board = setup(
        Side::Black,
        &[
            (Square::C7, Piece::King),
            (Square::B7, Piece::Black),
            (Square::D9, Piece::Black),
            (Square::A1, Piece::White),
        ],
    );
    board.make_move(mv("d9-d7"));

    assert_eq!(board.king_square(), None);
    assert_eq!(board.winner(), Some(Side::Black));
}

#[test]
fn test_king_escapes_to_edge() {
    let mut board = setup(
        Side::White,
        &[
            (Square::C7, Piece::King),
            (Square::B2, Piece::Black),
            (Square::H2, Piece::Black),
        ],
    );
    board.make_move_from_to(Square::C7, Square::C9);

    assert_eq!(board.king_square(), Some(Square::C9));
    assert_eq!(board.winner(), Some(Side::White));
}

#[test]
fn test_repeated_position_ends_game() {
    let mut board = Board::new();
    let moves = ["a4-a2", "c5-c2", "a2-a3", "c2-c3", "a3-a4", "c3-c5"];
    board.make_moves(moves.map(mv)).unwrap();

    // Back at the initial position, with Black to move
    assert_eq!(board.position(), &Position::initial());
    assert!(board.repeated_position());
    assert_eq!(board.winner(), Some(Side::Black));

    board.undo();
    assert!(!board.repeated_position());
    assert_eq!(board.winner(), None);
    assert_eq!(board.move_count(), 5);
}

#[test]
fn test_move_limit() {
    let mut board = Board::new();
    board.set_move_limit(2).unwrap();
    board.make_moves([mv("d9-d7"), mv("e3-d3"), mv("d7-d8")]).unwrap();
    assert_eq!(board.winner(), None);

    board.make_move(mv("d3-d2"));
    // Black is to move when the limit is reached, so White wins
    assert_eq!(board.winner(), Some(Side::White));

    board.undo();
    assert_eq!(board.winner(), None);
    assert!(board.set_move_limit(1).is_err());
}

#[test]
fn test_no_legal_moves_loses() {
    // The King is boxed in on the throne, and White has nothing else to move
    let mut board = setup(
        Side::Black,
        &[
            (Square::THRONE, Piece::King),
            (Square::E6, Piece::Black),
            (Square::E4, Piece::Black),
            (Square::D5, Piece::Black),
            (Square::F5, Piece::Black),
            (Square::A1, Piece::Black),
        ],
    );
    board.make_move(mv("a1-a2"));

    assert_eq!(board.turn(), Side::White);
    assert_eq!(board.king_square(), Some(Square::THRONE));
    assert!(!board.has_move(Side::White));
    assert_eq!(board.winner(), Some(Side::Black));
}

#[test]
fn test_encoding_roundtrip() {
    let mut board = Board::new();
    board.make_moves([mv("d1-d3"), mv("c5-c3")]).unwrap();

    let encoded = board.encode();
    assert!(encoded.starts_with('B'));

    let decoded = Board::from_encoded(&encoded).unwrap();
    assert_eq!(decoded.position(), board.position());
    assert_eq!(decoded.move_count(), 0);
}

#[test]
fn test_decided_positions_have_winner() {
    let kingless = setup(Side::Black, &[(Square::A1, Piece::Black), (Square::C3, Piece::White)]);
    assert_eq!(kingless.winner(), Some(Side::Black));

    let escaped = setup(
        Side::Black,
        &[
            (Square::C9, Piece::King),
            (Square::A1, Piece::Black),
            (Square::C3, Piece::White),
        ],
    );
    assert_eq!(escaped.winner(), Some(Side::White));

    // The same holds when the position arrives encoded
    let decoded = Board::from_encoded(&escaped.encode()).unwrap();
    assert_eq!(decoded.winner(), Some(Side::White));

    let undecided = setup(
        Side::Black,
        &[
            (Square::C7, Piece::King),
            (Square::A1, Piece::Black),
            (Square::C3, Piece::White),
        ],
    );
    assert_eq!(undecided.winner(), None);
}

#[test]
fn test_legal_moves_satisfy_every_rule() {
    let mut board = Board::new();
    board.make_moves([mv("d1-d3"), mv("c5-c3")]).unwrap();

    let side = board.turn();
    let moves = board.legal_moves(side);

    for &m in &moves {
        let piece = board.get(m.from());
        assert!(piece.is_side(side), "{m} moves a {piece:?}");
        assert_eq!(board.get(m.to()), Piece::Empty, "{m} lands on a piece");
        assert!(board.is_unblocked_move(m.from(), m.to()), "{m} is blocked");
        assert!(m.to() != Square::THRONE || piece == Piece::King, "{m} enters the throne");
        assert!(!board.moves().contains(&m), "{m} was already played");
    }

    // Nothing legal is left out
    let legal_pairs = Square::iter()
        .flat_map(|from| Square::iter().map(move |to| (from, to)))
        .filter(|&(from, to)| board.is_legal_from_to(from, to))
        .count();
    assert_eq!(legal_pairs, moves.len());
}

#[test]
fn test_undo_reverts_every_legal_move() {
    let mut board = Board::new();
    board.make_moves([mv("d1-d3"), mv("c5-c3")]).unwrap();

    let encoded = board.encode();
    let count = board.move_count();

    for m in board.legal_moves(board.turn()) {
        board.make_move(m);
        assert_eq!(board.move_count(), count + 1, "{m} was not applied");

        board.undo();
        assert_eq!(board.encode(), encoded, "undo of {m}");
        assert_eq!(board.move_count(), count, "undo of {m}");
        assert_eq!(board.winner(), None, "undo of {m}");
    }
}
