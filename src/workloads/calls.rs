use std::hint::black_box;

#[inline(never)]
fn callee(x: u64) -> u64 {
    x.wrapping_add(1)
}

/// Call `callee` `n` times and sum the results: `n * (n + 1) / 2`.
pub fn call_overhead(n: u64) -> u64 {
    let mut sink = 0u64;
    for i in 0..n {
        sink = black_box(sink.wrapping_add(callee(black_box(i))));
    }
    sink
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_every_call() {
        assert_eq!(call_overhead(0), 0);
        assert_eq!(call_overhead(1), 1);
        assert_eq!(call_overhead(1000), 500_500);
    }
}
