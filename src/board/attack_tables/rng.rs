//! Deterministic xorshift generator for magic-number candidates.

use rand::RngCore;

/// Seed used by the offline magic search.
pub const DEFAULT_MAGIC_SEED: u32 = 1_804_289_383;

/// 32-bit xorshift (13, 17, 5) whose 64-bit outputs are assembled from the
/// low 16 bits of four consecutive draws.
///
/// Identical seeds give identical candidate streams, so regenerated magic
/// tables are reproducible.
#[derive(Clone, Debug)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        XorShift32 { state: seed }
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(DEFAULT_MAGIC_SEED)
    }
}

impl RngCore for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    fn next_u64(&mut self) -> u64 {
        let n1 = u64::from(self.next_u32()) & 0xFFFF;
        let n2 = u64::from(self.next_u32()) & 0xFFFF;
        let n3 = u64::from(self.next_u32()) & 0xFFFF;
        let n4 = u64::from(self.next_u32()) & 0xFFFF;
        n1 | (n2 << 16) | (n3 << 32) | (n4 << 48)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
