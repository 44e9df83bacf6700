use std::hint::black_box;

use tracing::{debug, info};

use crate::clock::{elapsed, Clock};
use crate::config::BenchConfig;
use crate::error::Result;
use crate::guard::Sink;
use crate::workloads::{self, WorkloadResult};
use crate::Task;

/// Driver phases, entered strictly in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Configuring,
    WarmingUp,
    Timing,
    Reporting,
    Done,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Configuring => "configuring",
            Phase::WarmingUp => "warming_up",
            Phase::Timing => "timing",
            Phase::Reporting => "reporting",
            Phase::Done => "done",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Measured {
    pub iters: u64,
    pub warmup_iters: u64,
    /// Elapsed time of the whole timed loop, at least 1.
    pub total_ns: u64,
    /// `total_ns / iters`, truncated.
    pub ns_per_iter: u64,
    /// Output of the last timed repetition.
    pub result: WorkloadResult,
    /// Final value of the guard sink.
    pub guard: u64,
}

/// Run `f` `warmup_iters` times untimed, then `iters` times between two clock
/// reads. Every timed result is folded into a [`Sink`]. The first error
/// aborts the measurement.
///
/// `on_phase` is called with [`Phase::WarmingUp`] before the first warmup
/// call and with [`Phase::Timing`] before the first clock read.
pub fn measure_fn<C: Clock>(
    clock: &C,
    iters: u64,
    warmup_iters: u64,
    mut on_phase: impl FnMut(Phase),
    mut f: impl FnMut() -> Result<WorkloadResult>,
) -> Result<Measured> {
    on_phase(Phase::WarmingUp);
    for _ in 0..warmup_iters {
        black_box(f()?);
    }

    on_phase(Phase::Timing);
    let iters = iters.max(1);
    let mut sink = Sink::new();
    let mut last = WorkloadResult::default();

    let t0 = clock.now();
    for _ in 0..iters {
        let r = f()?;
        sink.consume(r.guard_word());
        last = r;
    }
    let t1 = clock.now();

    let total_ns = elapsed(t0, t1);

    Ok(Measured {
        iters,
        warmup_iters,
        total_ns,
        ns_per_iter: total_ns / iters,
        result: last,
        guard: sink.finish(),
    })
}

/// Sequences one benchmark run through its phases.
pub struct Driver<C: Clock> {
    clock: C,
    history: Vec<Phase>,
}

impl<C: Clock> Driver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            history: vec![Phase::Configuring],
        }
    }

    pub fn phase(&self) -> Phase {
        *self.history.last().unwrap_or(&Phase::Configuring)
    }

    /// Phases visited so far, in order.
    pub fn history(&self) -> &[Phase] {
        &self.history
    }

    /// Measure `task` under `cfg`, then hand the measurement to `report`.
    ///
    /// Any workload or report error ends the run in the phase where it
    /// happened; nothing is retried.
    pub fn run<R>(
        &mut self,
        task: Task,
        cfg: &BenchConfig,
        report: impl FnOnce(&Measured) -> Result<R>,
    ) -> Result<R> {
        info!(
            task = task.name(),
            size = cfg.size,
            reps = cfg.repetitions,
            warmup = cfg.warmup,
            seed = cfg.seed,
            "starting benchmark"
        );

        let history = &mut self.history;
        let measured = measure_fn(
            &self.clock,
            cfg.repetitions,
            cfg.warmup,
            |next| enter(history, next),
            || workloads::run(task, black_box(cfg)),
        )?;

        enter(&mut self.history, Phase::Reporting);
        let out = report(&measured)?;

        enter(&mut self.history, Phase::Done);
        Ok(out)
    }
}

fn enter(history: &mut Vec<Phase>, next: Phase) {
    let from = history.last().copied().unwrap_or(Phase::Configuring);
    debug!(from = from.as_str(), to = next.as_str(), "phase transition");
    history.push(next);
}
