//! Slider geometry: relevance masks and the ray-walking attack calculator.

use std::fmt;

use crate::board::types::{Bitboard, Square};

/// The two slider movement patterns. A queen is the union of both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slider {
    Bishop,
    Rook,
}

// (file, rank) steps
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

impl Slider {
    pub const ALL: [Slider; 2] = [Slider::Bishop, Slider::Rook];

    #[inline]
    const fn directions(self) -> &'static [(i8, i8); 4] {
        match self {
            Slider::Bishop => &BISHOP_DIRECTIONS,
            Slider::Rook => &ROOK_DIRECTIONS,
        }
    }

    /// Upper bound on relevant occupancy bits for any square
    #[must_use]
    pub const fn max_relevant_bits(self) -> u32 {
        match self {
            Slider::Bishop => 9,
            Slider::Rook => 12,
        }
    }

    /// Squares whose occupancy can change this slider's attacks from `sq`.
    ///
    /// Each ray stops one short of the board edge: a blocker on the last
    /// square of a ray hides nothing.
    #[must_use]
    pub fn relevance_mask(self, sq: Square) -> Bitboard {
        let mut mask = Bitboard::EMPTY;
        for &(df, dr) in self.directions() {
            let mut cur = sq;
            while let Some(next) = cur.offset(df, dr) {
                if next.offset(df, dr).is_none() {
                    break;
                }
                mask.set(next);
                cur = next;
            }
        }
        mask
    }

    /// Ground-truth attack set, walking each ray one square at a time and
    /// stopping on (and including) the first occupied square of either color.
    #[must_use]
    pub fn ray_attacks(self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let mut attacks = Bitboard::EMPTY;
        for &(df, dr) in self.directions() {
            let mut cur = sq;
            while let Some(next) = cur.offset(df, dr) {
                attacks.set(next);
                if occupancy.contains(next) {
                    break;
                }
                cur = next;
            }
        }
        attacks
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slider::Bishop => write!(f, "bishop"),
            Slider::Rook => write!(f, "rook"),
        }
    }
}
