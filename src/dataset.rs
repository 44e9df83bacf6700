//! Deterministic input generation for the seeded workloads.
//!
//! The generators are the xorshift family used by the reference kernels in
//! every other language of the comparison, so that a given `(size, seed)`
//! produces the same input everywhere and checksums can be compared across
//! implementations:
//!
//! ```text
//! Xorshift32     x ^= x << 13; x ^= x >> 17; x ^= x << 5        (sort, matmul)
//! Xorshift64Star x ^= x >> 12; x ^= x << 25; x ^= x >> 27;
//!                out = x * 0x2545F4914F6CDD1D                    (var_mc)
//! ```
//!
//! Both implement `rand`'s `RngCore`/`SeedableRng`, so `Rng::gen::<f64>()`
//! yields the usual 53-bit uniform in `[0, 1)`.

use rand::{Error, RngCore, SeedableRng};

use crate::error::{alloc_with_capacity, Result};

/// Replacement state when seeded with zero (a fixed point of xorshift).
const XORSHIFT32_ZERO_SEED: u32 = 0x9E37_79B9;
const XORSHIFT64_ZERO_SEED: u64 = 0x9E37_79B9_7F4A_7C15;
const XORSHIFT64_STAR_MUL: u64 = 0x2545_F491_4F6C_DD1D;

fn fill_bytes_from_u64(rng: &mut impl RngCore, dest: &mut [u8]) {
    for chunk in dest.chunks_mut(8) {
        let bytes = rng.next_u64().to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}

#[derive(Clone, Debug)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { XORSHIFT32_ZERO_SEED } else { seed },
        }
    }
}

impl RngCore for Xorshift32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_from_u64(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xorshift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// Truncates to the low 32 bits, like the C kernels' `(uint32_t)` cast.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

#[derive(Clone, Debug)]
pub struct Xorshift64Star {
    state: u64,
}

impl Xorshift64Star {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { XORSHIFT64_ZERO_SEED } else { seed },
        }
    }
}

impl RngCore for Xorshift64Star {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(XORSHIFT64_STAR_MUL)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_from_u64(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xorshift64Star {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// `len` non-negative 31-bit integers (sort input).
pub fn random_i31(rng: &mut Xorshift32, len: u64) -> Result<Vec<i32>> {
    let mut out = alloc_with_capacity("sort input", len)?;
    for _ in 0..len {
        out.push((rng.next_u32() & 0x7fff_ffff) as i32);
    }
    Ok(out)
}

/// Row-major `n x n` matrix with entries in `[-500, 500)`.
pub fn random_matrix(rng: &mut Xorshift32, n: u64) -> Result<Vec<i32>> {
    let cells = n.checked_mul(n).unwrap_or(u64::MAX);
    let mut out = alloc_with_capacity("matrix", cells)?;
    for _ in 0..cells {
        out.push((rng.next_u32() % 1000) as i32 - 500);
    }
    Ok(out)
}
