use clap::ValueEnum;

use crate::config::Defaults;

pub mod clock;
pub mod config;
pub mod dataset;
pub mod error;
pub mod guard;
pub mod harness;
pub mod report;
pub mod schema;
pub mod workloads;

pub use error::{BenchError, Result};

/// Largest `fib_rec` input; `fib(93)` is the last value that fits in `u64`.
pub const FIB_REC_MAX_SIZE: u64 = 93;

/// Workload selected once at startup.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum Task {
    /// Iterative Fibonacci (two accumulators).
    #[value(name = "fib_iter", alias = "fib-iter")]
    FibIter,
    /// Naive double-recursive Fibonacci; stresses calls and stack.
    ///
    /// Recursion depth equals the size, so sizes above
    /// [`FIB_REC_MAX_SIZE`] fall back to the default instead of overflowing
    /// the stack.
    #[value(name = "fib_rec", alias = "fib-rec")]
    FibRec,
    /// Sort of seeded pseudo-random integers.
    Sort,
    /// Dense integer matrix multiply (i-k-j order).
    Matmul,
    /// Sieve of Eratosthenes, counts primes <= size.
    Sieve,
    /// Monte Carlo Value-at-Risk over GBM price paths.
    #[value(name = "var_mc", aliases = ["var-mc", "monte_carlo"])]
    VarMc,
    /// Non-inlined function call overhead.
    Calls,
}

impl Task {
    pub const ALL: [Task; 7] = [
        Task::FibIter,
        Task::FibRec,
        Task::Sort,
        Task::Matmul,
        Task::Sieve,
        Task::VarMc,
        Task::Calls,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Task::FibIter => "fib_iter",
            Task::FibRec => "fib_rec",
            Task::Sort => "sort",
            Task::Matmul => "matmul",
            Task::Sieve => "sieve",
            Task::VarMc => "var_mc",
            Task::Calls => "calls",
        }
    }

    /// Size, repetitions, warmup and seed used when nothing overrides them.
    pub fn defaults(&self) -> Defaults {
        let (size, repetitions, warmup, seed) = match self {
            Task::FibIter => (90, 1, 1, 42),
            Task::FibRec => (35, 1, 1, 42),
            Task::Sort => (200_000, 10, 2, 42),
            Task::Matmul => (64, 50, 2, 42),
            Task::Sieve => (100_000, 100, 3, 42),
            Task::VarMc => (1_000_000, 1, 1, 123_456_789),
            Task::Calls => (1_000, 5_000_000, 5, 42),
        };
        let max_size = match self {
            Task::FibRec => FIB_REC_MAX_SIZE,
            _ => u64::MAX,
        };
        Defaults {
            size,
            max_size,
            repetitions,
            warmup,
            seed,
        }
    }
}
