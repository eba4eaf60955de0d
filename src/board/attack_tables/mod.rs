//! Attack tables for move generation.
//!
//! Leaper attacks (pawn, knight, king) are stored per square. Slider attacks
//! (bishop, rook) are looked up through magic-number perfect hashing, with a
//! queen as the union of both. Every magic number is checked against the
//! ray-walking calculator for every occupancy subset before a table is used.

#![allow(clippy::inline_always)] // Performance-critical hot path functions

mod leapers;
mod magic;
mod occupancy;
mod rng;
mod sliders;

pub use leapers::{king_attacks, knight_attacks, pawn_attacks};
pub use magic::{find_magic, shipped_magics};
pub use occupancy::{set_occupancy, Occupancies};
pub use rng::{XorShift32, DEFAULT_MAGIC_SEED};
pub use sliders::Slider;

use once_cell::sync::OnceCell;

use self::magic::MagicTable;
use crate::board::error::TableError;
use crate::board::types::{Bitboard, Color, Square};

/// Attempt ceiling per square for a magic search
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000_000;

/// Where slider magic numbers come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MagicSource {
    /// Precomputed constants, each verified at build time. A square whose
    /// constant fails verification falls back to a search.
    #[default]
    Shipped,
    /// Search every square from scratch with the xorshift generator.
    Search { seed: u32, max_attempts: u64 },
}

impl MagicSource {
    /// Search seeded the same way as the offline generator
    #[must_use]
    pub const fn default_search() -> Self {
        MagicSource::Search {
            seed: DEFAULT_MAGIC_SEED,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Attack table build configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableConfig {
    pub magics: MagicSource,
}

static SHARED: OnceCell<AttackTables> = OnceCell::new();

/// Precomputed attack sets for every piece type.
///
/// Built once and then only read. Board values never own a copy; they take
/// a reference when they need to generate moves.
#[derive(Clone, Debug)]
pub struct AttackTables {
    pawn: [[Bitboard; 64]; 2],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    bishop: MagicTable,
    rook: MagicTable,
}

impl AttackTables {
    /// Builds the tables from the shipped magic numbers.
    pub fn new() -> Result<Self, TableError> {
        Self::with_config(&TableConfig::default())
    }

    pub fn with_config(config: &TableConfig) -> Result<Self, TableError> {
        let mut pawn = [[Bitboard::EMPTY; 64]; 2];
        let mut knight = [Bitboard::EMPTY; 64];
        let mut king = [Bitboard::EMPTY; 64];
        for sq in Square::all() {
            let i = sq.as_usize();
            for color in Color::BOTH {
                pawn[color.index()][i] = leapers::pawn_attacks(color, sq);
            }
            knight[i] = leapers::knight_attacks(sq);
            king[i] = leapers::king_attacks(sq);
        }

        let (bishop, rook) = match config.magics {
            MagicSource::Shipped => {
                let mut fallback = XorShift32::default();
                let mut verified = |slider: Slider| {
                    MagicTable::verified(slider, shipped_magics(slider), &mut fallback)
                };
                let bishop = verified(Slider::Bishop)?;
                let rook = verified(Slider::Rook)?;
                (bishop, rook)
            }
            MagicSource::Search { seed, max_attempts } => {
                let mut rng = XorShift32::new(seed);
                let rook = MagicTable::searched(Slider::Rook, &mut rng, max_attempts)?;
                let bishop = MagicTable::searched(Slider::Bishop, &mut rng, max_attempts)?;
                (bishop, rook)
            }
        };

        log::info!(
            "attack tables ready: {} bishop slots, {} rook slots",
            bishop.len(),
            rook.len()
        );

        Ok(AttackTables {
            pawn,
            knight,
            king,
            bishop,
            rook,
        })
    }

    /// Process-wide tables built from the shipped magics on first use.
    pub fn shared() -> Result<&'static AttackTables, TableError> {
        SHARED.get_or_try_init(AttackTables::new)
    }

    #[inline(always)]
    #[must_use]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq.as_usize()]
    }

    #[inline(always)]
    #[must_use]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        self.knight[sq.as_usize()]
    }

    #[inline(always)]
    #[must_use]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        self.king[sq.as_usize()]
    }

    /// Diagonal attacks from `sq`. Bits of `occupancy` outside the relevance
    /// mask are ignored.
    #[inline(always)]
    #[must_use]
    pub fn bishop_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop.attacks(sq, occupancy)
    }

    #[inline(always)]
    #[must_use]
    pub fn rook_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.rook.attacks(sq, occupancy)
    }

    #[inline]
    #[must_use]
    pub fn queen_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop_attacks(sq, occupancy) | self.rook_attacks(sq, occupancy)
    }

    #[inline]
    #[must_use]
    pub fn slider_attacks(&self, slider: Slider, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.table(slider).attacks(sq, occupancy)
    }

    #[must_use]
    pub fn relevance_mask(&self, slider: Slider, sq: Square) -> Bitboard {
        self.table(slider).mask(sq)
    }

    /// The magic number in use for `slider` on `sq`
    #[must_use]
    pub fn magic(&self, slider: Slider, sq: Square) -> u64 {
        self.table(slider).magic(sq)
    }

    #[inline(always)]
    fn table(&self, slider: Slider) -> &MagicTable {
        match slider {
            Slider::Bishop => &self.bishop,
            Slider::Rook => &self.rook,
        }
    }
}
