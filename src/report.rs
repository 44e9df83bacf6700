//! Stdout report grammars.
//!
//! `lines` (the default, what the external runner parses):
//!
//! ```text
//! RESULT: <value>      when the workload yields a value
//! CHECKSUM: <u64>      when the workload yields a checksum
//! TIME_NS: <avg ns>    always, total elapsed / repetitions, truncated
//! ```
//!
//! At least one of `RESULT:` and `CHECKSUM:` is always present; a workload
//! with neither reports the guard accumulator as its checksum.
//!
//! `report` packs the same data into a single line:
//!
//! ```text
//! REPORT impl=<name> task=<task> n=<size> reps=<reps> time_ns_avg=<ns> [first=<v> last=<v>] [sum=<v>] [result=<v>] [checksum=<v>]
//! ```

use std::fmt::Write as _;

use clap::ValueEnum;

use crate::harness::Measured;

#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum Format {
    /// `RESULT:` / `CHECKSUM:` / `TIME_NS:` lines.
    #[default]
    Lines,
    /// One `REPORT key=value ...` line.
    Report,
    /// Pretty-printed JSON document.
    Json,
}

/// Identifies the run in single-line reports.
#[derive(Clone, Copy, Debug)]
pub struct RunLabel<'a> {
    pub impl_name: &'a str,
    pub task: &'a str,
    pub size: u64,
}

pub fn render_lines(m: &Measured) -> String {
    let mut out = String::new();
    if let Some(value) = m.result.value {
        let _ = writeln!(out, "RESULT: {value}");
    }
    match m.result.checksum {
        Some(cs) => {
            let _ = writeln!(out, "CHECKSUM: {cs}");
        }
        None if m.result.value.is_none() => {
            let _ = writeln!(out, "CHECKSUM: {}", m.guard);
        }
        None => {}
    }
    let _ = writeln!(out, "TIME_NS: {}", m.ns_per_iter);
    out
}

pub fn render_report(label: RunLabel<'_>, m: &Measured) -> String {
    let mut out = format!(
        "REPORT impl={} task={} n={} reps={} time_ns_avg={}",
        label.impl_name, label.task, label.size, m.iters, m.ns_per_iter
    );
    if let Some((first, last)) = m.result.bounds {
        let _ = write!(out, " first={first} last={last}");
    }
    if let Some(sum) = m.result.sum {
        let _ = write!(out, " sum={sum}");
    }
    if let Some(value) = m.result.value {
        let _ = write!(out, " result={value}");
    }
    let checksum = m
        .result
        .checksum
        .or(m.result.value.is_none().then_some(m.guard));
    if let Some(cs) = checksum {
        let _ = write!(out, " checksum={cs}");
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workloads::{ResultValue, WorkloadResult};

    fn measured(result: WorkloadResult) -> Measured {
        Measured {
            iters: 10,
            warmup_iters: 2,
            total_ns: 12_345,
            ns_per_iter: 1_234,
            result,
            guard: 99,
        }
    }

    #[test]
    fn value_and_checksum_lines() {
        let m = measured(WorkloadResult {
            value: Some(ResultValue::Int(25)),
            checksum: Some(77),
            ..WorkloadResult::default()
        });
        assert_eq!(render_lines(&m), "RESULT: 25\nCHECKSUM: 77\nTIME_NS: 1234\n");
    }

    #[test]
    fn value_only() {
        let m = measured(WorkloadResult::int(55));
        assert_eq!(render_lines(&m), "RESULT: 55\nTIME_NS: 1234\n");
    }

    #[test]
    fn empty_result_falls_back_to_guard() {
        let m = measured(WorkloadResult::default());
        assert_eq!(render_lines(&m), "CHECKSUM: 99\nTIME_NS: 1234\n");
    }

    #[test]
    fn float_result_line() {
        let m = measured(WorkloadResult {
            value: Some(ResultValue::Float(2.5)),
            checksum: Some(1),
            ..WorkloadResult::default()
        });
        assert!(render_lines(&m).starts_with("RESULT: 2.500000\n"));
    }

    #[test]
    fn single_line_report() {
        let m = measured(WorkloadResult {
            checksum: Some(5),
            bounds: Some((1, 9)),
            sum: Some(30),
            ..WorkloadResult::default()
        });
        let label = RunLabel {
            impl_name: "rust",
            task: "sort",
            size: 1000,
        };
        assert_eq!(
            render_report(label, &m),
            "REPORT impl=rust task=sort n=1000 reps=10 time_ns_avg=1234 first=1 last=9 sum=30 checksum=5\n"
        );
    }
}
