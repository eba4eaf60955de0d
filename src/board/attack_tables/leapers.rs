//! Attack sets for leaper pieces (pawns, knights, kings).
//!
//! Built with whole-board shifts. With a8 = 0, a shift right by 8 moves one
//! rank toward rank 8 and a shift right by 1 moves one file toward the a-file.
//! Each shift that changes file is gated on the origin's file so nothing wraps
//! onto the opposite edge.

use crate::board::types::{Bitboard, Color, Square};

const NOT_A: u64 = Bitboard::NOT_A_FILE.0;
const NOT_H: u64 = Bitboard::NOT_H_FILE.0;
const NOT_AB: u64 = Bitboard::NOT_AB_FILE.0;
const NOT_GH: u64 = Bitboard::NOT_GH_FILE.0;

/// Diagonal capture squares of a pawn. Forward advances are not attacks.
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    let b = Bitboard::from_square(sq).0;
    let mut attacks = 0u64;
    match color {
        Color::White => {
            if b & NOT_A != 0 {
                attacks |= b >> 9;
            }
            if b & NOT_H != 0 {
                attacks |= b >> 7;
            }
        }
        Color::Black => {
            if b & NOT_A != 0 {
                attacks |= b << 7;
            }
            if b & NOT_H != 0 {
                attacks |= b << 9;
            }
        }
    }
    Bitboard(attacks)
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    let b = Bitboard::from_square(sq).0;
    let mut attacks = 0u64;
    if b & NOT_A != 0 {
        attacks |= b >> 17;
        attacks |= b << 15;
    }
    if b & NOT_AB != 0 {
        attacks |= b >> 10;
        attacks |= b << 6;
    }
    if b & NOT_GH != 0 {
        attacks |= b >> 6;
        attacks |= b << 10;
    }
    if b & NOT_H != 0 {
        attacks |= b >> 15;
        attacks |= b << 17;
    }
    Bitboard(attacks)
}

pub fn king_attacks(sq: Square) -> Bitboard {
    let b = Bitboard::from_square(sq).0;
    let mut attacks = (b >> 8) | (b << 8);
    if b & NOT_A != 0 {
        attacks |= b >> 1;
        attacks |= b >> 9;
        attacks |= b << 7;
    }
    if b & NOT_H != 0 {
        attacks |= b << 1;
        attacks |= b >> 7;
        attacks |= b << 9;
    }
    Bitboard(attacks)
}
