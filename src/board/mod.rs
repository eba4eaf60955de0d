//! Chess board representation and move execution.
//!
//! Uses bitboards for piece placement and magic-indexed attack tables for
//! candidate generation. Supports captures, en passant, castling and queen
//! promotion. Check detection is out of scope: candidates are pseudo-legal.
//!
//! # Example
//! ```
//! use chess_core::board::{AttackTables, Board, Square};
//!
//! let tables = AttackTables::shared().unwrap();
//! let board = Board::new();
//! let e2: Square = "e2".parse().unwrap();
//! let candidates = board.candidates(tables, e2);
//! assert_eq!(candidates.moves.popcount(), 2);
//! assert!(candidates.captures.is_empty());
//! ```

pub mod attack_tables;
mod builder;
mod debug;
mod error;
mod fen;
mod make_move;
mod movegen;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use attack_tables::{AttackTables, MagicSource, Slider, TableConfig};
pub use builder::BoardBuilder;
pub use error::{FenError, InvariantError, MoveError, SquareError, TableError};
pub use movegen::Candidates;
pub use state::Board;
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveKind, Piece, Side, Square,
};

/// Standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
