//! Bitboard move generation and board state for chess.
//!
//! `board` holds the position, the attack tables and the move rules;
//! `game` wraps a board in the select/apply state machine a user interface
//! drives with clicks.

pub mod board;
pub mod game;

pub use board::{AttackTables, Bitboard, Board, Color, Move, Piece, Square};
pub use game::{ClickOutcome, Game, Selection, SharedGame};
