use super::super::{AttackTables, Board, Color, Piece, Square};
use super::Candidates;

/// Files of the squares that must be empty, the king's target file and the
/// rook's file, for kingside and queenside castling.
const KINGSIDE: (&[u8], u8, u8) = (&[5, 6], 6, 7);
const QUEENSIDE: (&[u8], u8, u8) = (&[1, 2, 3], 2, 0);

impl Board {
    pub(crate) fn king_candidates(&self, tables: &AttackTables, from: Square) -> Candidates {
        let mut candidates = Candidates::split(self, tables.king_attacks(from));
        let color = self.side_to_move;
        for kingside in [true, false] {
            if let Some(target) = self.castle_target(color, from, kingside) {
                candidates.moves.set(target);
            }
        }
        candidates
    }

    /// The king's destination for castling on one wing, if the right is
    /// held, the king and rook stand on their home squares and every square
    /// between them is empty.
    pub(crate) fn castle_target(&self, color: Color, from: Square, kingside: bool) -> Option<Square> {
        let rank = color.back_rank();
        if !self.castling.has(color, kingside) || Square::from_file_rank(4, rank) != Some(from) {
            return None;
        }
        let (between, king_file, rook_file) = if kingside { KINGSIDE } else { QUEENSIDE };
        let rook = Square::from_file_rank(rook_file, rank)?;
        if !self.pieces(color, Piece::Rook).contains(rook) {
            return None;
        }
        for &file in between {
            if !self.is_empty(Square::from_file_rank(file, rank)?) {
                return None;
            }
        }
        Square::from_file_rank(king_file, rank)
    }
}

/// Rook origin and destination for a king castling onto `king_to`.
pub(crate) fn castle_rook_squares(king_to: Square) -> Option<(Square, Square)> {
    let rank = king_to.rank();
    let (rook_from, rook_to) = match king_to.file() {
        6 => (KINGSIDE.2, 5),
        2 => (QUEENSIDE.2, 3),
        _ => return None,
    };
    Some((
        Square::from_file_rank(rook_from, rank)?,
        Square::from_file_rank(rook_to, rank)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Bitboard, CastlingRights};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn tables() -> &'static AttackTables {
        AttackTables::shared().unwrap()
    }

    #[test]
    fn test_king_blocked_at_start() {
        assert!(Board::new().candidates(tables(), Square::E1).is_empty());
    }

    #[test]
    fn test_both_castles_offered() {
        let board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let c = board.candidates(tables(), Square::E1);
        assert!(c.moves.contains(Square::G1));
        assert!(c.moves.contains(Square::C1));
        // d1 d2 e2 f2 f1 plus the two castles
        assert_eq!(c.moves.popcount(), 7);
    }

    #[test]
    fn test_castle_needs_right() {
        let board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1").unwrap();
        let c = board.candidates(tables(), Square::E1);
        assert!(!c.moves.contains(Square::G1));
        assert!(c.moves.contains(Square::C1));
    }

    #[test]
    fn test_castle_needs_empty_squares() {
        // b1 occupied blocks queenside even though c1 and d1 are free
        let board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").unwrap();
        let c = board.candidates(tables(), Square::E1);
        assert!(!c.moves.contains(Square::C1));
        assert!(c.moves.contains(Square::G1));
    }

    #[test]
    fn test_castle_needs_rook_present() {
        let mut board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        board.remove_piece(Square::H1);
        assert_eq!(board.castling_rights(), CastlingRights::all());
        let c = board.candidates(tables(), Square::E1);
        assert!(!c.moves.contains(Square::G1));
    }

    #[test]
    fn test_black_castles() {
        let board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let c = board.candidates(tables(), Square::E8);
        assert!(c.moves.contains(Square::G8));
        assert!(c.moves.contains(Square::C8));
    }

    #[test]
    fn test_king_captures() {
        let board = Board::try_from_fen("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1").unwrap();
        let c = board.candidates(tables(), Square::E1);
        assert_eq!(c.captures, Bitboard::from_square(sq("d2")));
    }

    #[test]
    fn test_rook_squares() {
        assert_eq!(castle_rook_squares(Square::G1), Some((Square::H1, Square::F1)));
        assert_eq!(castle_rook_squares(Square::C8), Some((Square::A8, Square::D8)));
        assert_eq!(castle_rook_squares(Square::E1), None);
    }
}
