use rand::SeedableRng;

use crate::dataset::{random_i31, Xorshift32};
use crate::error::Result;
use crate::guard::checksum_i32;

use super::WorkloadResult;

/// Generate `n` seeded integers and sort them ascending.
pub fn sorted_values(n: u64, seed: u64) -> Result<Vec<i32>> {
    let mut rng = Xorshift32::seed_from_u64(seed);
    let mut values = random_i31(&mut rng, n)?;
    values.sort_unstable();
    Ok(values)
}

pub fn sort(n: u64, seed: u64) -> Result<WorkloadResult> {
    let values = sorted_values(n, seed)?;
    let bounds = values
        .first()
        .zip(values.last())
        .map(|(&first, &last)| (i64::from(first), i64::from(last)));
    let sum = values
        .iter()
        .fold(0i64, |acc, &v| acc.wrapping_add(i64::from(v)));

    Ok(WorkloadResult {
        value: None,
        checksum: Some(checksum_i32(&values)),
        bounds,
        sum: Some(sum),
    })
}
