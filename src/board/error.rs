//! Error types for board operations.

use thiserror::Error;

use super::attack_tables::Slider;
use super::types::{Color, Side, Square};

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// FEN string has fewer than 6 fields
    #[error("FEN must have 6 fields, found {found}")]
    TooFewFields { found: usize },
    /// Anything after the fullmove number
    #[error("FEN must have 6 fields, found {found}")]
    TooManyFields { found: usize },
    /// A letter that is not a piece code
    #[error("invalid piece character '{char}' in FEN")]
    InvalidPiece { char: char },
    /// Anything else that does not belong in the placement field
    #[error("unexpected character '{char}' in piece placement")]
    UnexpectedCharacter { char: char },
    /// Placement does not describe exactly 8 ranks
    #[error("piece placement has {found} ranks, expected 8")]
    WrongRankCount { found: usize },
    /// A rank describes more or fewer than 8 files
    #[error("rank {rank} describes {files} files, expected 8")]
    WrongFileCount { rank: u8, files: usize },
    /// Invalid side to move (must be 'w' or 'b')
    #[error("invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSideToMove { found: String },
    /// Invalid castling character
    #[error("invalid castling character '{char}' in FEN")]
    InvalidCastling { char: char },
    /// Invalid en passant square
    #[error("invalid en passant square '{found}'")]
    InvalidEnPassant { found: String },
    /// Halfmove clock or fullmove number is not a number
    #[error("invalid move counter '{found}'")]
    InvalidCounter { found: String },
}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    #[error("square index {index} out of range (must be 0-63)")]
    OutOfRange { index: u8 },
    #[error("invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}

/// Failure to build the attack tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// No collision-free magic number was found within the attempt ceiling
    #[error("no {slider} magic found for square {square} after {attempts} attempts")]
    MagicSearchExhausted {
        slider: Slider,
        square: Square,
        attempts: u64,
    },
    /// A magic-indexed lookup disagrees with the ray-walking calculator
    #[error("{slider} table for square {square} disagrees with ray walk on occupancy {occupancy:#018x}")]
    Mismatch {
        slider: Slider,
        square: Square,
        occupancy: u64,
    },
}

/// Rejected move application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on {square}")]
    EmptySquare { square: Square },
    #[error("piece on {square} belongs to {color}, not the side to move")]
    WrongSide { square: Square, color: Color },
    #[error("{to} is not a legal destination from {from}")]
    IllegalDestination { from: Square, to: Square },
    #[error("no piece is selected")]
    NothingSelected,
}

/// First broken board invariant found by `Board::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("square {square} is set in more than one piece bitboard")]
    OverlappingPieces { square: Square },
    #[error("{side:?} occupancy does not match its piece bitboards")]
    StaleOccupancy { side: Side },
    #[error("empty-square bitboard is not the complement of total occupancy")]
    StaleEmpty,
}
