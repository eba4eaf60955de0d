use std::fmt;

use log::trace;

use super::{
    AttackTables, Bitboard, CastlingRights, Color, InvariantError, Piece, Side, Square,
};

/// Position state: twelve piece bitboards plus the derived aggregates.
///
/// `occupied` and `empty` are caches of `pieces`. They are only ever written
/// by `sync_aggregates`, which every mutation primitive calls before
/// returning.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 3],
    pub(crate) empty: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) en_passant: Option<Square>,
    pub(crate) castling: CastlingRights,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    /// The standard starting position, White to move.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// A board with no pieces, White to move and no rights.
    #[must_use]
    pub fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 3],
            empty: Bitboard::ALL,
            side_to_move: Color::White,
            en_passant: None,
            castling: CastlingRights::none(),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Clears the board in place back to `Board::empty()`.
    pub fn clear(&mut self) {
        *self = Board::empty();
    }

    /// Restores the starting position in place.
    pub fn reset(&mut self) {
        self.clear();
        for file in 0..8u8 {
            for color in Color::BOTH {
                let back = color.back_rank();
                let pawns = color.pawn_start_rank();
                let (Some(back_sq), Some(pawn_sq)) = (
                    Square::from_file_rank(file, back),
                    Square::from_file_rank(file, pawns),
                ) else {
                    continue;
                };
                self.pieces[color.index()][BACK_RANK[file as usize].index()].set(back_sq);
                self.pieces[color.index()][Piece::Pawn.index()].set(pawn_sq);
            }
        }
        self.castling = CastlingRights::all();
        self.sync_aggregates();
    }

    // Queries

    /// Bitboard of one piece type of one color
    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Occupancy of one color, or of both with `Side::Both`
    #[inline]
    #[must_use]
    pub fn occupancy(&self, side: impl Into<Side>) -> Bitboard {
        self.occupied[side.into().index()]
    }

    #[inline]
    #[must_use]
    pub fn empty_squares(&self) -> Bitboard {
        self.empty
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Square skipped by the last double pawn advance, if any
    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.empty.contains(sq)
    }

    /// The piece on `sq` and its color
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if self.empty.contains(sq) {
            return None;
        }
        let color = if self.occupied[Side::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces(color, *piece).contains(sq))
            .map(|piece| (color, piece))
    }

    /// Squares holding a piece of color `by` that attacks `sq`.
    #[must_use]
    pub fn attackers_to(&self, tables: &AttackTables, sq: Square, by: Color) -> Bitboard {
        let occupancy = self.occupied[Side::Both.index()];
        let queens = self.pieces(by, Piece::Queen);
        let diagonal = self.pieces(by, Piece::Bishop) | queens;
        let orthogonal = self.pieces(by, Piece::Rook) | queens;

        // A pawn of `by` attacks sq iff a pawn of the other color on sq would attack it back
        (tables.pawn_attacks(by.opponent(), sq) & self.pieces(by, Piece::Pawn))
            | (tables.knight_attacks(sq) & self.pieces(by, Piece::Knight))
            | (tables.king_attacks(sq) & self.pieces(by, Piece::King))
            | (tables.bishop_attacks(sq, occupancy) & diagonal)
            | (tables.rook_attacks(sq, occupancy) & orthogonal)
    }

    // Mutation primitives. Each edits the piece bitboards and refreshes the
    // aggregates in the same call.

    /// Places a piece, replacing whatever stood on `sq`. Returns the
    /// replaced piece.
    pub fn put_piece(&mut self, sq: Square, color: Color, piece: Piece) -> Option<(Color, Piece)> {
        let replaced = self.take(sq);
        self.pieces[color.index()][piece.index()].set(sq);
        self.sync_aggregates();
        replaced
    }

    /// Removes and returns the piece on `sq`. Removing from an empty square
    /// is a no-op.
    pub fn remove_piece(&mut self, sq: Square) -> Option<(Color, Piece)> {
        let removed = self.take(sq);
        if removed.is_some() {
            self.sync_aggregates();
        }
        removed
    }

    /// Moves whatever stands on `from` to `to`, capturing any piece there.
    ///
    /// Returns the captured piece. Does nothing if `from` is empty or equals
    /// `to`. No chess rules are checked here.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<(Color, Piece)> {
        if from == to {
            return None;
        }
        let Some((color, piece)) = self.take(from) else {
            return None;
        };
        let captured = self.take(to);
        self.pieces[color.index()][piece.index()].set(to);
        self.sync_aggregates();
        trace!("moved {color} {piece:?} {from}->{to}");
        captured
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn set_en_passant(&mut self, target: Option<Square>) {
        self.en_passant = target;
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    pub fn set_clocks(&mut self, halfmove_clock: u32, fullmove_number: u32) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// Clears `sq` in every piece bitboard, leaving the aggregates stale.
    /// Callers must finish with `sync_aggregates`.
    fn take(&mut self, sq: Square) -> Option<(Color, Piece)> {
        for color in Color::BOTH {
            for piece in Piece::ALL {
                let bb = &mut self.pieces[color.index()][piece.index()];
                if bb.contains(sq) {
                    bb.clear(sq);
                    return Some((color, piece));
                }
            }
        }
        None
    }

    /// Recomputes occupancy and empty bitboards from the piece bitboards.
    pub(crate) fn sync_aggregates(&mut self) {
        for color in Color::BOTH {
            self.occupied[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        }
        self.occupied[Side::Both.index()] =
            self.occupied[Side::White.index()] | self.occupied[Side::Black.index()];
        self.empty = !self.occupied[Side::Both.index()];
        debug_assert!(self.validate().is_ok(), "{:?}", self.validate());
    }

    /// Checks the structural invariants and reports the first one broken:
    /// no square in two piece bitboards, aggregates equal to the union of
    /// their pieces, and `empty` the complement of total occupancy.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let mut seen = Bitboard::EMPTY;
        for bb in self.pieces.iter().flatten() {
            if let Some(square) = (seen & *bb).lsb() {
                return Err(InvariantError::OverlappingPieces { square });
            }
            seen |= *bb;
        }
        for color in Color::BOTH {
            let union = self.pieces[color.index()]
                .iter()
                .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
            if self.occupied[color.index()] != union {
                return Err(InvariantError::StaleOccupancy { side: color.into() });
            }
        }
        if self.occupied[Side::Both.index()] != seen {
            return Err(InvariantError::StaleOccupancy { side: Side::Both });
        }
        if self.empty != !seen {
            return Err(InvariantError::StaleEmpty);
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// Prints the position as an 8x8 grid of FEN letters, rank 8 at the top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0..8u8 {
                let ch = Square::from_file_rank(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |(color, piece)| piece.to_fen_char(color));
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        write!(f, "   a b c d e f g h")
    }
}
