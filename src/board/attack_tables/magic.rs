//! Magic-number perfect hashing for slider attacks.
//!
//! For a square with relevance mask `m` of `k` bits and magic `n`, the slot of
//! an occupancy `occ` is `((occ & m) * n) >> (64 - k)`. Two occupancies may
//! share a slot only when their attack sets are equal.

use rand::RngCore;

use super::occupancy::Occupancies;
use super::sliders::Slider;
use super::DEFAULT_MAX_ATTEMPTS;
use crate::board::error::TableError;
use crate::board::types::{Bitboard, Square};

/// Candidates whose product with the mask leaves fewer set bits in the top
/// byte rarely hash well and are skipped without testing.
const TOP_BYTE: u64 = 0xFF00_0000_0000_0000;
const MIN_TOP_BYTE_BITS: u32 = 6;

#[rustfmt::skip]
pub(crate) const SHIPPED_BISHOP_MAGICS: [u64; 64] = [
    0x0040_0408_4440_4084, 0x0020_0420_8a00_4208, 0x0010_1900_4108_0202, 0x0108_0608_4504_2010,
    0x0581_1041_8080_0210, 0x2112_0804_4620_0010, 0x1080_8208_2006_0210, 0x03c0_8084_1022_0200,
    0x0004_0504_0444_0404, 0x0000_0210_0142_0088, 0x24d0_0808_0108_2102, 0x0001_020a_0a02_0400,
    0x0000_0403_0820_0402, 0x0004_0110_0210_0800, 0x0401_4841_0410_4005, 0x0801_0104_0202_0200,
    0x0040_0210_c388_0100, 0x0404_0220_2410_8200, 0x0810_0182_0020_4102, 0x0004_0028_01a0_2003,
    0x0085_0408_2008_0400, 0x8101_02c8_0888_0400, 0x000e_9004_1088_4800, 0x8002_0204_8084_0102,
    0x0220_2008_6509_0201, 0x2010_100a_0202_1202, 0x0152_0484_0802_2401, 0x0020_0800_0208_1110,
    0x4001_0010_2100_4000, 0x8000_4040_0a01_1002, 0x00e4_0040_8101_1002, 0x001c_0040_0101_2080,
    0x8004_2009_62a0_0220, 0x8422_1002_0850_0202, 0x2000_4022_0030_0c08, 0x8646_0200_8008_0080,
    0x8002_0a02_0010_0808, 0x2010_0048_8011_1000, 0x6230_00a0_8001_1400, 0x4200_8c03_4020_9202,
    0x0209_1882_4000_1000, 0x4004_08a8_8400_1800, 0x0011_0400_a608_0400, 0x1840_060a_4402_0800,
    0x0090_0801_0400_0041, 0x0201_0110_0080_8101, 0x1a22_0808_0504_f080, 0x8012_0206_0021_1212,
    0x0500_8610_1124_0000, 0x0180_8061_0820_0800, 0x4000_020e_0104_0044, 0x3000_0026_1044_000a,
    0x0802_2411_0202_0002, 0x0020_9060_6121_0001, 0x5a84_8410_0401_0310, 0x0004_0108_0101_1c04,
    0x000a_0101_0950_2200, 0x0000_004a_0201_2000, 0x5002_0101_0098_b028, 0x8040_0028_1104_0900,
    0x0028_0000_1002_0204, 0x0600_0020_202d_0240, 0x8918_8448_4208_2200, 0x4010_0110_2902_0020,
];

#[rustfmt::skip]
pub(crate) const SHIPPED_ROOK_MAGICS: [u64; 64] = [
    0x8a80_1040_0080_0020, 0x0140_0020_0010_0040, 0x0280_1880_a001_7001, 0x0100_0810_0100_0420,
    0x0200_0200_1008_0420, 0x0300_1c00_0201_0008, 0x8480_0080_0200_0100, 0x2080_0880_0440_2900,
    0x0000_8000_9820_4000, 0x2024_4010_0020_0040, 0x0100_8020_0080_1000, 0x0120_8008_0080_1000,
    0x0208_8080_8800_0400, 0x0002_8022_0080_0400, 0x2200_8001_0002_0080, 0x0801_0000_6082_1100,
    0x0080_0440_0642_2000, 0x0100_8080_2000_4000, 0x1210_8a00_1020_4200, 0x0140_8480_1000_0802,
    0x0481_8280_1400_2800, 0x8094_0040_0200_4100, 0x4010_0400_1001_0802, 0x0000_0200_0880_6104,
    0x0100_4000_8020_8000, 0x2040_0021_2008_1000, 0x0021_2006_8010_0081, 0x0020_1000_8008_0080,
    0x0002_000a_0020_0410, 0x0000_0200_8080_0400, 0x0080_0884_0010_0102, 0x0080_0046_0004_2881,
    0x4040_0080_4080_0020, 0x0440_0030_0020_0801, 0x0004_2000_1100_4500, 0x0188_0200_1010_0100,
    0x0014_8004_0180_2800, 0x2080_0400_8080_0200, 0x0124_0802_0400_1001, 0x0200_0465_0200_0484,
    0x0480_4000_8008_8020, 0x1000_4220_1003_4000, 0x0030_2001_0011_0040, 0x0000_1000_2101_0009,
    0x2002_0801_0011_0004, 0x0202_0080_0400_8002, 0x0020_0200_0401_0100, 0x2048_4400_4082_0001,
    0x0101_0022_0040_8200, 0x0040_8020_0040_1080, 0x4008_1420_0441_0100, 0x0206_0820_c012_0200,
    0x0001_0010_0408_0100, 0x020c_0200_8004_0080, 0x2935_6108_3002_2400, 0x0044_4400_4100_9200,
    0x0280_0010_4080_2101, 0x2100_1900_4000_2085, 0x80c0_0841_0010_2001, 0x4024_0810_0100_0421,
    0x0002_0030_a024_4872, 0x0012_0010_0841_4402, 0x0200_6104_900a_0804, 0x0001_0040_8100_2402,
];

/// Shipped constants for one slider, indexed by square.
#[must_use]
pub fn shipped_magics(slider: Slider) -> &'static [u64; 64] {
    match slider {
        Slider::Bishop => &SHIPPED_BISHOP_MAGICS,
        Slider::Rook => &SHIPPED_ROOK_MAGICS,
    }
}

#[inline(always)]
fn magic_index(masked: Bitboard, magic: u64, bits: u32) -> usize {
    (masked.0.wrapping_mul(magic) >> (64 - bits)) as usize
}

/// Fills a slot table for one square. On a conflicting collision returns the
/// occupancy that hit an already used slot holding different attacks.
///
/// Slider attack sets are never empty, so an empty slot means unused.
fn fill_slots(
    occupancies: &[Bitboard],
    attacks: &[Bitboard],
    magic: u64,
    bits: u32,
    slots: &mut [Bitboard],
) -> Result<(), Bitboard> {
    slots.fill(Bitboard::EMPTY);
    for (&occ, &attack) in occupancies.iter().zip(attacks) {
        let slot = &mut slots[magic_index(occ, magic, bits)];
        if slot.is_empty() {
            *slot = attack;
        } else if *slot != attack {
            return Err(occ);
        }
    }
    Ok(())
}

/// Every occupancy subset of the square's mask paired with its ray-walk attacks
fn ground_truth(slider: Slider, sq: Square, mask: Bitboard) -> (Vec<Bitboard>, Vec<Bitboard>) {
    let occupancies: Vec<Bitboard> = Occupancies::new(mask).collect();
    let attacks = occupancies
        .iter()
        .map(|&occ| slider.ray_attacks(sq, occ))
        .collect();
    (occupancies, attacks)
}

/// Searches for a magic number for `slider` on `sq`, drawing candidates from
/// `rng` as the AND of three 64-bit draws.
///
/// Every drawn candidate counts toward `max_attempts`, including ones the
/// top-byte filter discards.
pub fn find_magic<R: RngCore + ?Sized>(
    rng: &mut R,
    slider: Slider,
    sq: Square,
    max_attempts: u64,
) -> Result<u64, TableError> {
    let mask = slider.relevance_mask(sq);
    let bits = mask.popcount();
    let (occupancies, attacks) = ground_truth(slider, sq, mask);
    let mut slots = vec![Bitboard::EMPTY; 1 << bits];

    for attempt in 0..max_attempts {
        let candidate = rng.next_u64() & rng.next_u64() & rng.next_u64();
        if (mask.0.wrapping_mul(candidate) & TOP_BYTE).count_ones() < MIN_TOP_BYTE_BITS {
            continue;
        }
        if fill_slots(&occupancies, &attacks, candidate, bits, &mut slots).is_ok() {
            log::debug!("{slider} magic for {sq}: {candidate:#018x} after {} attempts", attempt + 1);
            return Ok(candidate);
        }
    }

    Err(TableError::MagicSearchExhausted {
        slider,
        square: sq,
        attempts: max_attempts,
    })
}

/// Hashing parameters of one square.
#[derive(Clone, Copy, Debug)]
struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    bits: u32,
    offset: usize,
}

/// Magic-indexed attack table for one slider over all 64 squares.
///
/// Slots of all squares live in one flat vector; each square owns
/// `2^bits` slots starting at its offset.
#[derive(Clone, Debug)]
pub(crate) struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<Bitboard>,
}

impl MagicTable {
    /// Builds the table, taking each square's magic from `magic_for`.
    ///
    /// `magic_for` receives the square and a check that reports whether a
    /// candidate hashes that square without conflict.
    pub(crate) fn build<F>(slider: Slider, mut magic_for: F) -> Result<Self, TableError>
    where
        F: FnMut(Square, &dyn Fn(u64) -> bool) -> Result<u64, TableError>,
    {
        let mut entries = [MagicEntry {
            mask: Bitboard::EMPTY,
            magic: 0,
            bits: 0,
            offset: 0,
        }; 64];
        let mut attacks: Vec<Bitboard> = Vec::new();

        for sq in Square::all() {
            let mask = slider.relevance_mask(sq);
            let bits = mask.popcount();
            let (occupancies, truth) = ground_truth(slider, sq, mask);

            let works = |magic: u64| {
                let mut scratch = vec![Bitboard::EMPTY; 1 << bits];
                fill_slots(&occupancies, &truth, magic, bits, &mut scratch).is_ok()
            };
            let magic = magic_for(sq, &works)?;

            let offset = attacks.len();
            attacks.resize(offset + (1 << bits), Bitboard::EMPTY);
            fill_slots(&occupancies, &truth, magic, bits, &mut attacks[offset..]).map_err(
                |occ| TableError::Mismatch {
                    slider,
                    square: sq,
                    occupancy: occ.0,
                },
            )?;
            entries[sq.as_usize()] = MagicEntry {
                mask,
                magic,
                bits,
                offset,
            };
        }

        Ok(MagicTable { entries, attacks })
    }

    /// Builds from `magics`, verifying every constant. A square whose
    /// constant collides gets a fresh search drawn from `fallback`.
    pub(crate) fn verified<R: RngCore + ?Sized>(
        slider: Slider,
        magics: &[u64; 64],
        fallback: &mut R,
    ) -> Result<Self, TableError> {
        MagicTable::build(slider, |sq, works| {
            let magic = magics[sq.as_usize()];
            if works(magic) {
                return Ok(magic);
            }
            log::warn!("{slider} magic {magic:#018x} for {sq} collides, searching");
            find_magic(&mut *fallback, slider, sq, DEFAULT_MAX_ATTEMPTS)
        })
    }

    /// Searches every square from scratch, drawing from `rng` in square order.
    pub(crate) fn searched<R: RngCore + ?Sized>(
        slider: Slider,
        rng: &mut R,
        max_attempts: u64,
    ) -> Result<Self, TableError> {
        MagicTable::build(slider, |sq, _| {
            find_magic(&mut *rng, slider, sq, max_attempts)
        })
    }

    #[inline]
    pub(crate) fn attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let entry = &self.entries[sq.as_usize()];
        let index = magic_index(occupancy & entry.mask, entry.magic, entry.bits);
        self.attacks[entry.offset + index]
    }

    #[inline]
    pub(crate) fn mask(&self, sq: Square) -> Bitboard {
        self.entries[sq.as_usize()].mask
    }

    #[inline]
    pub(crate) fn magic(&self, sq: Square) -> u64 {
        self.entries[sq.as_usize()].magic
    }

    /// Total slot count across all squares
    pub(crate) fn len(&self) -> usize {
        self.attacks.len()
    }
}
