use log::debug;

use super::movegen::castle_rook_squares;
use super::{AttackTables, Board, Color, Move, MoveError, MoveKind, Piece, Square};

impl Board {
    /// Applies the move `from` -> `to` for the side to move.
    ///
    /// The destination must be one of the candidates of the piece on `from`.
    /// On error the board is unchanged. On success returns the record of
    /// what was applied.
    pub fn apply_move(
        &mut self,
        tables: &AttackTables,
        from: Square,
        to: Square,
    ) -> Result<Move, MoveError> {
        let (color, piece) = self
            .piece_at(from)
            .ok_or(MoveError::EmptySquare { square: from })?;
        if color != self.side_to_move {
            return Err(MoveError::WrongSide {
                square: from,
                color,
            });
        }
        if !self.candidates(tables, from).contains(to) {
            return Err(MoveError::IllegalDestination { from, to });
        }

        let mv = self.classify(from, to, color, piece);
        self.execute(&mv);
        debug!("{color} played {mv} ({:?})", mv.kind);
        Ok(mv)
    }

    /// Works out which rule a candidate move triggers.
    fn classify(&self, from: Square, to: Square, color: Color, piece: Piece) -> Move {
        let captured = self.piece_at(to).map(|(_, p)| p);
        let kind = match piece {
            Piece::Pawn if captured.is_none() && from.file() != to.file() => MoveKind::EnPassant,
            Piece::Pawn if to.rank() == color.pawn_promotion_rank() => {
                if captured.is_some() {
                    MoveKind::PromotionCapture
                } else {
                    MoveKind::Promotion
                }
            }
            Piece::Pawn if from.rank().abs_diff(to.rank()) == 2 => MoveKind::DoublePawnPush,
            Piece::King if from.file().abs_diff(to.file()) == 2 => {
                if to.file() > from.file() {
                    MoveKind::CastleKingside
                } else {
                    MoveKind::CastleQueenside
                }
            }
            _ if captured.is_some() => MoveKind::Capture,
            _ => MoveKind::Quiet,
        };
        let captured = if kind == MoveKind::EnPassant {
            Some(Piece::Pawn)
        } else {
            captured
        };
        Move {
            from,
            to,
            color,
            piece,
            kind,
            captured,
        }
    }

    /// Performs a classified move. Every piece edit goes through the
    /// mutation primitives, so the aggregates are current after each step.
    fn execute(&mut self, mv: &Move) {
        let color = mv.color;

        if mv.kind == MoveKind::EnPassant {
            if let Some(bypassed) = mv.to.offset(0, -color.pawn_direction()) {
                self.remove_piece(bypassed);
            }
        }

        self.move_piece(mv.from, mv.to);

        match mv.kind {
            MoveKind::Promotion | MoveKind::PromotionCapture => {
                self.put_piece(mv.to, color, Piece::Queen);
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                if let Some((rook_from, rook_to)) = castle_rook_squares(mv.to) {
                    self.move_piece(rook_from, rook_to);
                }
            }
            _ => {}
        }

        self.en_passant = if mv.kind == MoveKind::DoublePawnPush {
            mv.from.offset(0, color.pawn_direction())
        } else {
            None
        };

        self.revoke_castling(mv);

        if mv.piece == Piece::Pawn || mv.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = color.opponent();
    }

    /// A king move drops both of its side's rights. A rook leaving its home
    /// corner, or being captured there, drops that wing's right.
    fn revoke_castling(&mut self, mv: &Move) {
        if mv.piece == Piece::King {
            self.castling.remove_color(mv.color);
        }
        if mv.piece == Piece::Rook {
            if let Some(kingside) = rook_home_wing(mv.color, mv.from) {
                self.castling.remove(mv.color, kingside);
            }
        }
        if mv.captured == Some(Piece::Rook) {
            let them = mv.color.opponent();
            if let Some(kingside) = rook_home_wing(them, mv.to) {
                self.castling.remove(them, kingside);
            }
        }
    }
}

/// Which wing's rook starts on `sq` for `color`, if any.
fn rook_home_wing(color: Color, sq: Square) -> Option<bool> {
    if sq.rank() != color.back_rank() {
        return None;
    }
    match sq.file() {
        0 => Some(false),
        7 => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Bitboard, CastlingRights, Side};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn tables() -> &'static AttackTables {
        AttackTables::shared().unwrap()
    }

    fn play(board: &mut Board, from: &str, to: &str) -> Move {
        board.apply_move(tables(), sq(from), sq(to)).unwrap()
    }

    #[test]
    fn test_double_push_sets_en_passant() {
        let mut board = Board::new();
        let mv = play(&mut board, "e2", "e4");
        assert_eq!(mv.kind(), MoveKind::DoublePawnPush);
        assert_eq!(board.en_passant(), Some(sq("e3")));
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.piece_at(sq("e4")), Some((Color::White, Piece::Pawn)));
        assert!(board.is_empty(sq("e2")));

        play(&mut board, "g8", "f6");
        assert_eq!(board.en_passant(), None);
        assert_eq!(board.fullmove_number(), 2);
        assert_eq!(board.halfmove_clock(), 1);
    }

    #[test]
    fn test_rejections_leave_board_untouched() {
        let mut board = Board::new();
        let before = board.clone();
        let t = tables();
        assert_eq!(
            board.apply_move(t, sq("e4"), sq("e5")),
            Err(MoveError::EmptySquare { square: sq("e4") })
        );
        assert_eq!(
            board.apply_move(t, sq("e7"), sq("e5")),
            Err(MoveError::WrongSide {
                square: sq("e7"),
                color: Color::Black
            })
        );
        assert_eq!(
            board.apply_move(t, sq("e2"), sq("e5")),
            Err(MoveError::IllegalDestination {
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_clears_victim() {
        let mut board = Board::try_from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 5 10").unwrap();
        let mv = play(&mut board, "e4", "d5");
        assert_eq!(mv.kind(), MoveKind::Capture);
        assert_eq!(mv.captured(), Some(Piece::Pawn));
        assert!(board.pieces(Color::Black, Piece::Pawn).is_empty());
        assert_eq!(board.occupancy(Color::Black), Bitboard::from_square(Square::E8));
        assert_eq!(board.halfmove_clock(), 0);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_en_passant_removes_bypassed_pawn() {
        let mut board = Board::try_from_fen("4k3/4p3/8/3P4/8/8/8/4K3 b - - 0 1").unwrap();
        play(&mut board, "e7", "e5");
        assert_eq!(board.en_passant(), Some(sq("e6")));

        let mv = play(&mut board, "d5", "e6");
        assert_eq!(mv.kind(), MoveKind::EnPassant);
        assert!(mv.is_en_passant());
        assert_eq!(board.piece_at(sq("e6")), Some((Color::White, Piece::Pawn)));
        assert!(board.is_empty(sq("e5")));
        assert!(board.is_empty(sq("d5")));
        assert!(board.pieces(Color::Black, Piece::Pawn).is_empty());
    }

    #[test]
    fn test_black_en_passant() {
        let mut board = Board::try_from_fen("4k3/8/8/8/5p2/8/4P3/4K3 w - - 0 1").unwrap();
        play(&mut board, "e2", "e4");
        let mv = play(&mut board, "f4", "e3");
        assert_eq!(mv.kind(), MoveKind::EnPassant);
        assert!(board.pieces(Color::White, Piece::Pawn).is_empty());
        assert_eq!(board.piece_at(sq("e3")), Some((Color::Black, Piece::Pawn)));
    }

    #[test]
    fn test_kingside_castle_moves_rook() {
        let mut board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = play(&mut board, "e1", "g1");
        assert_eq!(mv.kind(), MoveKind::CastleKingside);
        assert_eq!(board.piece_at(Square::G1), Some((Color::White, Piece::King)));
        assert_eq!(board.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
        assert!(board.is_empty(Square::H1));
        assert!(board.is_empty(Square::E1));
        assert!(!board.castling_rights().has(Color::White, true));
        assert!(!board.castling_rights().has(Color::White, false));
        assert!(board.castling_rights().has(Color::Black, true));
        assert!(board.castling_rights().has(Color::Black, false));
    }

    #[test]
    fn test_queenside_castle_moves_rook() {
        let mut board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let mv = play(&mut board, "e8", "c8");
        assert_eq!(mv.kind(), MoveKind::CastleQueenside);
        assert_eq!(board.piece_at(Square::C8), Some((Color::Black, Piece::King)));
        assert_eq!(board.piece_at(Square::D8), Some((Color::Black, Piece::Rook)));
        assert!(board.is_empty(Square::A8));
        assert_eq!(board.castling_rights().to_string(), "KQ");
    }

    #[test]
    fn test_plain_king_move_revokes_both_rights() {
        let mut board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut board, "e1", "e2");
        assert_eq!(board.castling_rights().to_string(), "kq");
    }

    #[test]
    fn test_rook_move_revokes_one_wing() {
        let mut board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut board, "a1", "a5");
        assert_eq!(board.castling_rights().to_string(), "Kkq");
    }

    #[test]
    fn test_rook_capture_on_corner_revokes_victim_right() {
        let mut board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = play(&mut board, "h1", "h8");
        assert_eq!(mv.captured(), Some(Piece::Rook));
        assert_eq!(board.castling_rights().to_string(), "Qq");
    }

    #[test]
    fn test_promotion_to_queen() {
        let mut board = Board::try_from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = play(&mut board, "a7", "a8");
        assert_eq!(mv.kind(), MoveKind::Promotion);
        assert_eq!(mv.promotion(), Some(Piece::Queen));
        assert_eq!(mv.to_string(), "a7a8q");
        assert_eq!(board.piece_at(Square::A8), Some((Color::White, Piece::Queen)));
        assert!(board.pieces(Color::White, Piece::Pawn).is_empty());
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_capture_promotion_to_queen() {
        let mut board = Board::try_from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = play(&mut board, "a7", "b8");
        assert_eq!(mv.kind(), MoveKind::PromotionCapture);
        assert_eq!(mv.captured(), Some(Piece::Knight));
        assert_eq!(board.piece_at(Square::B8), Some((Color::White, Piece::Queen)));
        assert_eq!(board.occupancy(Side::Both).popcount(), 3);
    }

    #[test]
    fn test_black_promotes_on_rank_one() {
        let mut board = Board::try_from_fen("4k3/8/8/8/8/8/6p1/K7 b - - 0 1").unwrap();
        play(&mut board, "g2", "g1");
        assert_eq!(board.piece_at(Square::G1), Some((Color::Black, Piece::Queen)));
        assert_eq!(board.castling_rights(), CastlingRights::none());
    }
}
