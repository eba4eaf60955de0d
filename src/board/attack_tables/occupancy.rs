//! Enumeration of occupancy subsets of a relevance mask.

use crate::board::types::Bitboard;

/// Maps bit `i` of `index` onto the `i`-th set square of `mask`, counting
/// from the least significant end.
///
/// For a mask with `k` set bits this is a bijection between `0..2^k` and the
/// subsets of `mask`. Table verification and table population both rely on
/// this exact order.
#[must_use]
pub fn set_occupancy(index: usize, mask: Bitboard) -> Bitboard {
    let mut occupancy = Bitboard::EMPTY;
    let mut remaining = mask;
    let mut bit = 0;
    while let Some(sq) = remaining.pop_lsb() {
        if index & (1 << bit) != 0 {
            occupancy.set(sq);
        }
        bit += 1;
    }
    occupancy
}

/// Iterator over every subset of a mask in `set_occupancy` index order.
#[derive(Clone, Debug)]
pub struct Occupancies {
    mask: Bitboard,
    next: usize,
    count: usize,
}

impl Occupancies {
    #[must_use]
    pub fn new(mask: Bitboard) -> Self {
        Occupancies {
            mask,
            next: 0,
            count: 1usize << mask.popcount(),
        }
    }
}

impl Iterator for Occupancies {
    type Item = Bitboard;

    fn next(&mut self) -> Option<Bitboard> {
        if self.next == self.count {
            return None;
        }
        let occupancy = set_occupancy(self.next, self.mask);
        self.next += 1;
        Some(occupancy)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Occupancies {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::board::attack_tables::Slider;
    use crate::board::types::Square;

    #[test]
    fn test_index_zero_and_max() {
        let mask = Bitboard(0b1011_0000);
        assert_eq!(set_occupancy(0, mask), Bitboard::EMPTY);
        assert_eq!(set_occupancy(0b111, mask), mask);
        // lowest mask bit (bit 4) takes index bit 0
        assert_eq!(set_occupancy(0b001, mask), Bitboard(1 << 4));
        assert_eq!(set_occupancy(0b100, mask), Bitboard(1 << 7));
    }

    #[test]
    fn test_enumeration_is_a_bijection() {
        let mask = Slider::Rook.relevance_mask(Square::A1);
        let subsets: Vec<Bitboard> = Occupancies::new(mask).collect();
        assert_eq!(subsets.len(), 1 << 12);
        let distinct: HashSet<Bitboard> = subsets.iter().copied().collect();
        assert_eq!(distinct.len(), subsets.len());
        assert!(subsets.iter().all(|occ| *occ & !mask == Bitboard::EMPTY));
    }

    #[test]
    fn test_empty_mask_has_one_subset() {
        let mut it = Occupancies::new(Bitboard::EMPTY);
        assert_eq!(it.len(), 1);
        assert_eq!(it.next(), Some(Bitboard::EMPTY));
        assert_eq!(it.next(), None);
    }
}
