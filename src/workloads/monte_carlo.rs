//! Monte Carlo Value-at-Risk over geometric Brownian motion paths.
//!
//! Each path starts at `s0` and takes `steps` increments of `dt`, each
//! driven by a Box–Muller standard normal from a seeded xorshift64*
//! generator. The loss of a path is `s0 - s_T`; VaR is read from the upper
//! tail of the sorted losses.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};

use crate::dataset::Xorshift64Star;
use crate::error::{alloc_with_capacity, Result};
use crate::guard::checksum_f64;

use super::{ResultValue, WorkloadResult};

/// Floor for the first uniform so `ln(u1)` stays finite.
const MIN_UNIFORM: f64 = 1e-300;
const TRADING_DAYS: f64 = 252.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
    /// Length of one time step in years.
    pub dt: f64,
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            s0: 100.0,
            mu: 0.05,
            sigma: 0.20,
            dt: 1.0 / TRADING_DAYS,
        }
    }
}

fn standard_normal(rng: &mut Xorshift64Star) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(MIN_UNIFORM);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Simulate `paths` losses and return them sorted ascending.
pub fn simulate_losses(paths: u64, steps: u64, seed: u64, params: GbmParams) -> Result<Vec<f64>> {
    let mut rng = Xorshift64Star::seed_from_u64(seed);
    let mut losses = alloc_with_capacity("price paths", paths)?;

    let drift = (params.mu - 0.5 * params.sigma * params.sigma) * params.dt;
    let vol = params.sigma * params.dt.sqrt();

    for _ in 0..paths {
        let mut s = params.s0;
        for _ in 0..steps {
            let z = standard_normal(&mut rng);
            s *= (drift + vol * z).exp();
        }
        losses.push(params.s0 - s);
    }

    losses.sort_unstable_by(f64::total_cmp);
    Ok(losses)
}

/// Empirical VaR from ascending losses.
///
/// `idx = floor((1 - confidence) * len)` clamped to `[0, len - 1]`; the VaR
/// is the loss `idx` places below the maximum. Empty input yields 0.
pub fn value_at_risk(sorted_losses: &[f64], confidence: f64) -> f64 {
    let len = sorted_losses.len();
    if len == 0 {
        return 0.0;
    }
    // NaN and negatives saturate to 0 in the cast.
    let idx = (((1.0 - confidence) * len as f64).floor() as usize).min(len - 1);
    sorted_losses[len - 1 - idx]
}

pub fn monte_carlo_var(paths: u64, steps: u64, confidence: f64, seed: u64) -> Result<WorkloadResult> {
    let losses = simulate_losses(paths, steps, seed, GbmParams::default())?;
    let var = value_at_risk(&losses, confidence);

    Ok(WorkloadResult {
        value: Some(ResultValue::Float(var)),
        checksum: Some(checksum_f64(&losses)),
        ..WorkloadResult::default()
    })
}
