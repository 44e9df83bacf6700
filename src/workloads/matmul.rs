use rand::SeedableRng;

use crate::dataset::{random_matrix, Xorshift32};
use crate::error::{alloc_buffer, Result};
use crate::guard::checksum_i32;

use super::WorkloadResult;

/// `c = a * b` for row-major `n x n` matrices, i-k-j loop order so the inner
/// loop streams rows of `b` and `c`. Arithmetic wraps.
pub fn multiply(a: &[i32], b: &[i32], c: &mut [i32], n: usize) {
    debug_assert!(a.len() == n * n && b.len() == n * n && c.len() == n * n);
    if n == 0 {
        return;
    }
    for (i, row) in c.chunks_exact_mut(n).enumerate() {
        row.fill(0);
        let a_row = &a[i * n..(i + 1) * n];
        for (&aik, b_row) in a_row.iter().zip(b.chunks_exact(n)) {
            for (cij, &bkj) in row.iter_mut().zip(b_row) {
                *cij = cij.wrapping_add(aik.wrapping_mul(bkj));
            }
        }
    }
}

pub fn matmul(n: u64, seed: u64) -> Result<WorkloadResult> {
    let mut rng = Xorshift32::seed_from_u64(seed);
    let a = random_matrix(&mut rng, n)?;
    let b = random_matrix(&mut rng, n)?;
    let mut c = alloc_buffer("matrix product", a.len() as u64, 0i32)?;
    // a.len() == n * n succeeded, so n fits in usize.
    multiply(&a, &b, &mut c, n as usize);

    Ok(WorkloadResult {
        checksum: Some(checksum_i32(&c)),
        ..WorkloadResult::default()
    })
}
