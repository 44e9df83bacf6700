//! Fibonacci kernels. Both use wrapping `u64` arithmetic, so inputs past 93
//! still terminate (iteratively) with a deterministic, if meaningless, value.

pub fn fib_iter(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 2..=n {
        let next = a.wrapping_add(b);
        a = b;
        b = next;
    }
    b
}

/// Naive double recursion. Kept out of line so the measured cost is call
/// overhead and stack traffic, not whatever the optimizer can memoize.
#[inline(never)]
pub fn fib_rec(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    fib_rec(n - 1).wrapping_add(fib_rec(n - 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_cases() {
        assert_eq!(fib_iter(0), 0);
        assert_eq!(fib_iter(1), 1);
        assert_eq!(fib_rec(0), 0);
        assert_eq!(fib_rec(1), 1);
    }

    #[test]
    fn iterative_matches_recursive() {
        for n in 0..=25 {
            assert_eq!(fib_iter(n), fib_rec(n), "n = {n}");
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(fib_iter(10), 55);
        assert_eq!(fib_iter(40), 102_334_155);
        assert_eq!(fib_iter(90), 2_880_067_194_370_816_120);
    }

    #[test]
    fn overflow_wraps_instead_of_panicking() {
        let _ = fib_iter(200);
    }
}
