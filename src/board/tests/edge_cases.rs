//! Edge case tests for special positions and rule interactions.

use super::{sq, tables};
use crate::board::{Bitboard, Board, CastlingRights, Color, MoveKind, Piece};

fn targets(board: &Board, from: &str) -> Bitboard {
    board.candidates(tables(), sq(from)).all()
}

#[test]
fn test_double_push_blocked_on_skipped_square() {
    let board = Board::try_from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
    assert!(targets(&board, "e2").is_empty());
}

#[test]
fn test_double_push_blocked_on_target_square() {
    let board = Board::try_from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
    let c = board.candidates(tables(), sq("e2"));
    assert_eq!(c.moves, Bitboard::from_square(sq("e3")));
    assert!(c.captures.is_empty());
}

#[test]
fn test_pawn_on_a_file_captures_one_way() {
    let board = Board::try_from_fen("4k3/8/8/8/8/1p6/P7/4K3 w - - 0 1").unwrap();
    let c = board.candidates(tables(), sq("a2"));
    assert_eq!(c.captures, Bitboard::from_square(sq("b3")));
    assert_eq!(c.moves.popcount(), 2);
}

#[test]
fn test_en_passant_only_for_adjacent_pawn() {
    // e6 is the target but only the pawn on d5 stands next to e5
    let board = Board::try_from_fen("4k3/8/8/1P1Pp3/8/8/8/4K3 w - e6 0 1").unwrap();
    assert!(targets(&board, "d5").contains(sq("e6")));
    assert!(!targets(&board, "b5").contains(sq("e6")));
}

#[test]
fn test_en_passant_expires_after_one_move() {
    let mut board = Board::try_from_fen("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1").unwrap();
    board.apply_move(tables(), sq("e1"), sq("e2")).unwrap();
    board.apply_move(tables(), sq("e8"), sq("e7")).unwrap();
    assert_eq!(board.en_passant(), None);
    assert!(!targets(&board, "d5").contains(sq("e6")));
}

#[test]
fn test_castling_blocked_by_piece_between() {
    let board = Board::try_from_fen("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").unwrap();
    let king = targets(&board, "e1");
    assert!(!king.contains(sq("g1")));
    assert!(!king.contains(sq("c1")));
}

#[test]
fn test_queenside_castling_needs_b_file_empty() {
    let board = Board::try_from_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1").unwrap();
    assert!(!targets(&board, "e1").contains(sq("c1")));

    let board = Board::try_from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    assert!(targets(&board, "e1").contains(sq("c1")));
}

#[test]
fn test_castling_needs_rook_on_corner() {
    let board = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1").unwrap();
    let king = targets(&board, "e1");
    assert!(!king.contains(sq("g1")));
    assert!(!king.contains(sq("c1")));
}

#[test]
fn test_castling_without_right() {
    let board = Board::try_from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    assert_eq!(targets(&board, "e1").popcount(), 5);
}

#[test]
fn test_capturing_rook_on_corner_revokes_right() {
    let mut board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = board.apply_move(tables(), sq("a1"), sq("a8")).unwrap();
    assert_eq!(mv.captured(), Some(Piece::Rook));

    let rights = board.castling_rights();
    assert!(!rights.has(Color::White, false));
    assert!(rights.has(Color::White, true));
    assert!(!rights.has(Color::Black, false));
    assert!(rights.has(Color::Black, true));
}

#[test]
fn test_promotion_by_capture_in_corner() {
    let mut board = Board::try_from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let c = board.candidates(tables(), sq("a7"));
    assert!(c.captures.contains(sq("b8")));
    let mv = board.apply_move(tables(), sq("a7"), sq("b8")).unwrap();
    assert_eq!(mv.kind(), MoveKind::PromotionCapture);
    assert_eq!(board.piece_at(sq("b8")), Some((Color::White, Piece::Queen)));
    assert_eq!(board.halfmove_clock(), 0);
}

#[test]
fn test_kings_can_capture_each_other() {
    // No check rules: adjacent kings are just pieces
    let mut board = Board::try_from_fen("8/8/8/8/8/8/8/Kk6 w - - 0 1").unwrap();
    assert!(board.candidates(tables(), sq("a1")).captures.contains(sq("b1")));
    board.apply_move(tables(), sq("a1"), sq("b1")).unwrap();
    assert_eq!(board.pieces(Color::Black, Piece::King), Bitboard::EMPTY);
    assert!(board.validate().is_ok());
}

#[test]
fn test_cleared_board_has_no_candidates() {
    let mut board = Board::new();
    board.clear();
    assert!(board.side_candidates(tables()).is_empty());
    assert_eq!(board.castling_rights(), CastlingRights::none());
    assert_eq!(board.empty_squares(), !Bitboard::EMPTY);
}
