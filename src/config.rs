//! Benchmark configuration resolved from positional arguments and the
//! environment.
//!
//! Resolution never fails: anything missing, malformed or out of range falls
//! back to the workload's default and is logged at `warn`. A benchmark run
//! must not abort because of a misconfigured environment.

use tracing::warn;

pub const ENV_REPS: &str = "BENCH_REPS";
pub const ENV_WARMUP: &str = "WARMUP";
pub const ENV_SEED: &str = "SEED";

pub const DEFAULT_STEPS: u64 = 1;
pub const DEFAULT_CONFIDENCE: f64 = 0.99;

/// Per-workload fallback values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Defaults {
    pub size: u64,
    /// Largest accepted size; anything above falls back to `size`.
    pub max_size: u64,
    pub repetitions: u64,
    pub warmup: u64,
    pub seed: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    pub size: u64,
    pub repetitions: u64,
    pub warmup: u64,
    pub seed: u64,
    /// Time steps per path (Monte Carlo only).
    pub steps: u64,
    /// VaR confidence level in `(0, 1)` (Monte Carlo only).
    pub confidence: f64,
}

impl BenchConfig {
    pub fn from_defaults(d: Defaults) -> Self {
        Self {
            size: d.size,
            repetitions: d.repetitions,
            warmup: d.warmup,
            seed: d.seed,
            steps: DEFAULT_STEPS,
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

/// Parse a whole token as an integer. `"12abc"`, `""` and `" 12"` are all
/// rejected.
fn parse_int(token: &str) -> Option<i128> {
    token.parse::<i128>().ok()
}

/// Environment values may use `_` as a digit separator (`10_000_000`).
fn parse_env_int(raw: &str) -> Option<i128> {
    let cleaned: String = raw.chars().filter(|&c| c != '_').collect();
    parse_int(&cleaned)
}

fn at_least(value: Option<i128>, min: i128) -> Option<u64> {
    value
        .filter(|&v| v >= min)
        .and_then(|v| u64::try_from(v).ok())
}

fn env_value(
    env: &dyn Fn(&str) -> Option<String>,
    key: &str,
    min: i128,
    default: u64,
) -> u64 {
    match env(key) {
        None => default,
        Some(raw) if raw.is_empty() => default,
        Some(raw) => match at_least(parse_env_int(&raw), min) {
            Some(v) => v,
            None => {
                warn!(key, value = %raw, default, "ignoring invalid environment value");
                default
            }
        },
    }
}

fn positional_int(
    positionals: &[String],
    index: usize,
    what: &str,
    default: u64,
    max: u64,
) -> u64 {
    match positionals.get(index) {
        None => default,
        Some(raw) => match at_least(parse_int(raw), 1).filter(|&v| v <= max) {
            Some(v) => v,
            None => {
                warn!(argument = what, value = %raw, default, "ignoring invalid argument");
                default
            }
        },
    }
}

fn positional_confidence(positionals: &[String], index: usize) -> f64 {
    match positionals.get(index) {
        None => DEFAULT_CONFIDENCE,
        Some(raw) => match raw.parse::<f64>() {
            Ok(c) if c > 0.0 && c < 1.0 => c,
            _ => {
                warn!(
                    argument = "confidence",
                    value = %raw,
                    default = DEFAULT_CONFIDENCE,
                    "ignoring invalid argument"
                );
                DEFAULT_CONFIDENCE
            }
        },
    }
}

/// Resolve a [`BenchConfig`].
///
/// `positionals` are the raw arguments after the task name: size, then the
/// Monte Carlo step count and confidence. `env` looks up an environment
/// variable; pass `|k| std::env::var(k).ok()` for the process environment.
pub fn resolve(
    positionals: &[String],
    env: &dyn Fn(&str) -> Option<String>,
    defaults: Defaults,
) -> BenchConfig {
    BenchConfig {
        size: positional_int(positionals, 0, "size", defaults.size, defaults.max_size),
        repetitions: env_value(env, ENV_REPS, 1, defaults.repetitions),
        warmup: env_value(env, ENV_WARMUP, 0, defaults.warmup),
        seed: env_value(env, ENV_SEED, 1, defaults.seed),
        steps: positional_int(positionals, 1, "steps", DEFAULT_STEPS, u64::MAX),
        confidence: positional_confidence(positionals, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DEFAULTS: Defaults = Defaults {
        size: 1000,
        max_size: 1_000_000,
        repetitions: 10,
        warmup: 2,
        seed: 42,
    };

    fn with_env(pairs: &[(&str, &str)], positionals: &[&str]) -> BenchConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let args: Vec<String> = positionals.iter().map(|s| s.to_string()).collect();
        resolve(&args, &|k| vars.get(k).cloned(), DEFAULTS)
    }

    #[test]
    fn empty_inputs_give_defaults() {
        let cfg = with_env(&[], &[]);
        assert_eq!(cfg, BenchConfig::from_defaults(DEFAULTS));
    }

    #[test]
    fn reps_accept_underscores() {
        let cfg = with_env(&[(ENV_REPS, "10_000_000")], &[]);
        assert_eq!(cfg.repetitions, 10_000_000);
    }

    #[test]
    fn reps_reject_garbage() {
        assert_eq!(with_env(&[(ENV_REPS, "abc")], &[]).repetitions, 10);
        assert_eq!(with_env(&[(ENV_REPS, "12abc")], &[]).repetitions, 10);
        assert_eq!(with_env(&[(ENV_REPS, "")], &[]).repetitions, 10);
    }

    #[test]
    fn reps_reject_non_positive() {
        assert_eq!(with_env(&[(ENV_REPS, "-5")], &[]).repetitions, 10);
        assert_eq!(with_env(&[(ENV_REPS, "0")], &[]).repetitions, 10);
    }

    #[test]
    fn warmup_allows_zero() {
        assert_eq!(with_env(&[(ENV_WARMUP, "0")], &[]).warmup, 0);
        assert_eq!(with_env(&[(ENV_WARMUP, "-1")], &[]).warmup, 2);
        assert_eq!(with_env(&[(ENV_WARMUP, "1_0")], &[]).warmup, 10);
    }

    #[test]
    fn seed_override() {
        assert_eq!(with_env(&[(ENV_SEED, "7")], &[]).seed, 7);
        assert_eq!(with_env(&[(ENV_SEED, "0")], &[]).seed, 42);
    }

    #[test]
    fn size_requires_whole_numeric_token() {
        assert_eq!(with_env(&[], &["5000"]).size, 5000);
        assert_eq!(with_env(&[], &["50x"]).size, 1000);
        assert_eq!(with_env(&[], &["5_000"]).size, 1000);
        assert_eq!(with_env(&[], &["-3"]).size, 1000);
        assert_eq!(with_env(&[], &["0"]).size, 1000);
    }

    #[test]
    fn size_above_cap_falls_back() {
        assert_eq!(with_env(&[], &["1000000"]).size, 1_000_000);
        assert_eq!(with_env(&[], &["1000001"]).size, 1000);
    }

    #[test]
    fn huge_values_fall_back() {
        let too_big = "1".repeat(40);
        assert_eq!(with_env(&[(ENV_REPS, too_big.as_str())], &[]).repetitions, 10);
    }

    #[test]
    fn monte_carlo_positionals() {
        let cfg = with_env(&[], &["1000", "12", "0.95"]);
        assert_eq!(cfg.steps, 12);
        assert_eq!(cfg.confidence, 0.95);

        let cfg = with_env(&[], &["1000", "zero", "1.5"]);
        assert_eq!(cfg.steps, DEFAULT_STEPS);
        assert_eq!(cfg.confidence, DEFAULT_CONFIDENCE);
    }
}
