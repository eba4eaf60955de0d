use log::{debug, log_enabled, Level};

use super::{Bitboard, Board, Color, Piece, Side};

impl Board {
    /// Logs every bitboard of the position at debug level.
    pub fn debug_bitboards(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        debug!("side to move: {}", self.side_to_move);
        debug!("castling: {}", self.castling);
        if let Some(ep) = self.en_passant {
            debug!("en passant target: {ep}");
        }
        debug!("all occupied: {:#018x}", self.occupancy(Side::Both).0);
        debug!("empty: {:#018x}", self.empty_squares().0);

        for color in Color::BOTH {
            for piece in Piece::ALL {
                let bb = self.pieces(color, piece).0;
                debug!("{color} {}: {bb:#018x}", piece.to_fen_char(color));
            }
        }
    }

    /// Logs one bitboard as a grid at debug level.
    pub fn debug_bitboard_grid(label: &str, bb: Bitboard) {
        if log_enabled!(Level::Debug) {
            debug!("{label} {:#018x}\n{bb}", bb.0);
        }
    }
}
