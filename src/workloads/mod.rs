//! Reference workloads.
//!
//! Every kernel is a pure function of its size (and seed, where it draws
//! random input). Buffers are allocated per invocation and dropped before
//! it returns; allocation failure is the only error.

use std::fmt;

use crate::config::BenchConfig;
use crate::error::Result;
use crate::Task;

pub mod calls;
pub mod fib;
pub mod matmul;
pub mod monte_carlo;
pub mod sieve;
pub mod sort;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResultValue {
    Int(u64),
    Float(f64),
}

impl ResultValue {
    fn word(&self) -> u64 {
        match *self {
            ResultValue::Int(v) => v,
            ResultValue::Float(v) => v.to_bits(),
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Int(v) => write!(f, "{v}"),
            ResultValue::Float(v) => write!(f, "{v:.6}"),
        }
    }
}

/// What one workload invocation produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkloadResult {
    pub value: Option<ResultValue>,
    pub checksum: Option<u64>,
    /// First and last element of an ordered output.
    pub bounds: Option<(i64, i64)>,
    pub sum: Option<i64>,
}

impl WorkloadResult {
    pub fn int(value: u64) -> Self {
        Self {
            value: Some(ResultValue::Int(value)),
            ..Self::default()
        }
    }

    /// Reduce every field to one word for the guard sink.
    pub fn guard_word(&self) -> u64 {
        let mut word = self.value.map_or(0, |v| v.word());
        word ^= self.checksum.unwrap_or(0).rotate_left(17);
        if let Some((first, last)) = self.bounds {
            word = word.wrapping_add(first as u64).wrapping_add((last as u64).rotate_left(32));
        }
        word.wrapping_add(self.sum.unwrap_or(0) as u64)
    }
}

/// Run `task` once with the sizes and seed in `cfg`.
pub fn run(task: Task, cfg: &BenchConfig) -> Result<WorkloadResult> {
    match task {
        Task::FibIter => Ok(WorkloadResult::int(fib::fib_iter(cfg.size))),
        Task::FibRec => Ok(WorkloadResult::int(fib::fib_rec(cfg.size))),
        Task::Sort => sort::sort(cfg.size, cfg.seed),
        Task::Matmul => matmul::matmul(cfg.size, cfg.seed),
        Task::Sieve => sieve::sieve(cfg.size),
        Task::VarMc => monte_carlo::monte_carlo_var(cfg.size, cfg.steps, cfg.confidence, cfg.seed),
        Task::Calls => Ok(WorkloadResult::int(calls::call_overhead(cfg.size))),
    }
}
