//! Candidate destinations for the piece on a square.
//!
//! Candidates are pseudo-legal: they follow each piece's movement rules but
//! do not test whether the mover's own king is left in check.

mod kings;
mod knights;
mod pawns;
mod sliders;

pub(crate) use kings::castle_rook_squares;

use super::{AttackTables, Bitboard, Board, Piece, Side, Square};

/// Destinations split into non-capturing moves and captures.
///
/// Castling targets are moves. An en passant target is a capture even
/// though the square itself is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Candidates {
    pub moves: Bitboard,
    pub captures: Bitboard,
}

impl Candidates {
    /// Splits raw attack targets against the current occupancy.
    #[inline]
    fn split(board: &Board, targets: Bitboard) -> Self {
        let them = board.occupancy(board.side_to_move().opponent());
        Candidates {
            moves: targets & board.empty_squares(),
            captures: targets & them,
        }
    }

    #[inline]
    #[must_use]
    pub fn all(&self) -> Bitboard {
        self.moves | self.captures
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, sq: Square) -> bool {
        self.all().contains(sq)
    }
}

impl Board {
    /// Candidate moves and captures for the piece on `from`.
    ///
    /// Empty when `from` is empty or holds a piece of the side not to move.
    #[must_use]
    pub fn candidates(&self, tables: &AttackTables, from: Square) -> Candidates {
        match self.piece_at(from) {
            Some((color, piece)) if color == self.side_to_move => {
                self.piece_candidates(tables, from, piece)
            }
            _ => Candidates::default(),
        }
    }

    /// Every piece of the side to move that has at least one candidate.
    #[must_use]
    pub fn side_candidates(&self, tables: &AttackTables) -> Vec<(Square, Candidates)> {
        self.occupancy(Side::from(self.side_to_move))
            .iter()
            .map(|from| (from, self.candidates(tables, from)))
            .filter(|(_, c)| !c.is_empty())
            .collect()
    }

    fn piece_candidates(&self, tables: &AttackTables, from: Square, piece: Piece) -> Candidates {
        match piece {
            Piece::Pawn => self.pawn_candidates(tables, from),
            Piece::Knight => self.knight_candidates(tables, from),
            Piece::Bishop | Piece::Rook | Piece::Queen => {
                self.slider_candidates(tables, from, piece)
            }
            Piece::King => self.king_candidates(tables, from),
        }
    }
}
