//! Core chess types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - `Bitboard` - 64-bit set of squares
//! - `Square` - board square, a8 = 0 through h1 = 63
//! - `Piece`, `Color` and `Side` - piece types, movers and occupancy selectors
//! - `CastlingRights` - castling state
//! - `Move` - record of an applied move

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveKind};
pub use piece::{Color, Piece, Side};
pub use square::Square;
