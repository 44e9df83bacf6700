//! Anti-elimination guard.
//!
//! Two sinks keep timed work observable: [`Fnv1a`] folds every element of a
//! workload's output buffer into a checksum that ends up on stdout, and
//! [`Sink`] folds every iteration's result into an accumulator the optimizer
//! cannot see through.

use std::hint::black_box;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a, one word per element.
///
/// Elements are folded as whole words (not byte by byte) so that checksums
/// match the reference kernels in other languages, which hash `u32` casts of
/// each element.
#[derive(Clone, Copy, Debug)]
pub struct Fnv1a {
    state: u64,
}

impl Fnv1a {
    pub const OFFSET_BASIS: u64 = FNV_OFFSET_BASIS;

    pub fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }

    #[inline]
    pub fn write_word(&mut self, word: u64) {
        self.state ^= word;
        self.state = self.state.wrapping_mul(FNV_PRIME);
    }

    pub fn finish(&self) -> u64 {
        self.state
    }
}

impl Default for Fnv1a {
    fn default() -> Self {
        Self::new()
    }
}

/// Checksum of `i32` elements, each hashed as its `u32` bit pattern.
pub fn checksum_i32(values: &[i32]) -> u64 {
    let mut h = Fnv1a::new();
    for &v in values {
        h.write_word(u64::from(v as u32));
    }
    h.finish()
}

pub fn checksum_bytes(values: &[u8]) -> u64 {
    let mut h = Fnv1a::new();
    for &b in values {
        h.write_word(u64::from(b));
    }
    h.finish()
}

pub fn checksum_f64(values: &[f64]) -> u64 {
    let mut h = Fnv1a::new();
    for v in values {
        h.write_word(v.to_bits());
    }
    h.finish()
}

/// Accumulator for per-iteration results.
///
/// Each `consume` combines the word with wrapping addition and routes the
/// running value through `black_box`, so every iteration's result is a use.
#[derive(Debug, Default)]
pub struct Sink {
    acc: u64,
    folded: u64,
}

impl Sink {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn consume(&mut self, word: u64) {
        self.acc = black_box(self.acc.wrapping_add(word));
        self.folded += 1;
    }

    /// Number of results folded so far.
    pub fn folded(&self) -> u64 {
        self.folded
    }

    /// Final accumulator value, itself black-boxed.
    pub fn finish(self) -> u64 {
        black_box(self.acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_offset_basis() {
        assert_eq!(checksum_i32(&[]), Fnv1a::OFFSET_BASIS);
        assert_eq!(checksum_bytes(&[]), Fnv1a::OFFSET_BASIS);
    }

    #[test]
    fn single_word_matches_recurrence() {
        let expected = (FNV_OFFSET_BASIS ^ 5).wrapping_mul(FNV_PRIME);
        assert_eq!(checksum_i32(&[5]), expected);
    }

    #[test]
    fn negative_values_hash_as_u32() {
        let expected = (FNV_OFFSET_BASIS ^ 0xffff_ffff).wrapping_mul(FNV_PRIME);
        assert_eq!(checksum_i32(&[-1]), expected);
    }

    #[test]
    fn order_matters() {
        assert_ne!(checksum_i32(&[1, 2, 3]), checksum_i32(&[3, 2, 1]));
    }

    #[test]
    fn sink_counts_every_fold() {
        let mut sink = Sink::new();
        for i in 0..10 {
            sink.consume(i);
        }
        assert_eq!(sink.folded(), 10);
        assert_eq!(sink.finish(), 45);
    }

    #[test]
    fn sink_does_not_cancel_repeated_results() {
        let mut sink = Sink::new();
        sink.consume(7);
        sink.consume(7);
        assert_ne!(sink.finish(), 0);
    }
}
