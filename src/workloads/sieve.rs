use crate::error::{alloc_buffer, BenchError, Result};
use crate::guard::{checksum_bytes, Fnv1a};

use super::{ResultValue, WorkloadResult};

/// Composite flags for `0..=n` (1 = composite). Indices 0 and 1 stay 0.
pub fn composite_flags(n: u64) -> Result<Vec<u8>> {
    let len = n.checked_add(1).ok_or(BenchError::Allocation {
        what: "sieve",
        elements: n,
    })?;
    let mut flags = alloc_buffer("sieve", len, 0u8)?;
    // The buffer holds n + 1 bytes, so n fits in usize.
    let n = n as usize;
    let mut p = 2usize;
    while p <= n / p {
        if flags[p] == 0 {
            for q in (p * p..=n).step_by(p) {
                flags[q] = 1;
            }
        }
        p += 1;
    }
    Ok(flags)
}

pub fn sieve(n: u64) -> Result<WorkloadResult> {
    if n < 2 {
        return Ok(WorkloadResult {
            value: Some(ResultValue::Int(0)),
            checksum: Some(Fnv1a::OFFSET_BASIS),
            ..WorkloadResult::default()
        });
    }
    let flags = composite_flags(n)?;
    let primes = flags[2..].iter().filter(|&&f| f == 0).count() as u64;

    Ok(WorkloadResult {
        value: Some(ResultValue::Int(primes)),
        checksum: Some(checksum_bytes(&flags)),
        ..WorkloadResult::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: u64) -> u64 {
        match sieve(n).unwrap().value {
            Some(ResultValue::Int(c)) => c,
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn reference_counts() {
        assert_eq!(count(10), 4);
        assert_eq!(count(100), 25);
        assert_eq!(count(1_000), 168);
        assert_eq!(count(100_000), 9_592);
    }

    #[test]
    fn small_inputs() {
        assert_eq!(count(0), 0);
        assert_eq!(count(1), 0);
        assert_eq!(count(2), 1);
        assert_eq!(count(3), 2);
        assert_eq!(count(4), 2);
    }

    #[test]
    fn perfect_square_bound_is_marked() {
        let flags = composite_flags(49).unwrap();
        assert_eq!(flags[49], 1);
        assert_eq!(flags[47], 0);
    }

    #[test]
    fn checksum_is_stable() {
        assert_eq!(sieve(1000).unwrap().checksum, sieve(1000).unwrap().checksum);
    }
}
