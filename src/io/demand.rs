// src/io/demand.rs

//! Demand paths for replaying a policy outside the sampled distribution.

use rand::thread_rng;
use rand_distr::{Distribution, Poisson};

use crate::error::{InventoryError, Result};
use crate::model::demand::DemandModel;

/// Generates a demand path where every period has the exact same demand.
pub fn generate_constant_demand(periods: usize, value: u32) -> Vec<u32> {
    vec![value; periods]
}

/// Generates a demand path from a Poisson distribution.
pub fn generate_poisson_demand(periods: usize, lambda: f64) -> Result<Vec<u32>> {
    let poisson = Poisson::new(lambda).map_err(|e| {
        InventoryError::validation(format!("invalid poisson rate {}: {}", lambda, e))
    })?;
    let mut rng = thread_rng();

    Ok((0..periods)
        .map(|_| {
            let val: f64 = poisson.sample(&mut rng);
            val as u32
        })
        .collect())
}

/// Optimistic and pessimistic constant demand levels: the mean minus and
/// plus one standard deviation, rounded and clamped at zero.
pub fn deterministic_scenarios(demand: &DemandModel) -> (u32, u32) {
    let mean = demand.mean();
    let spread = demand.std_dev();
    let optimistic = (mean - spread).round().max(0.0) as u32;
    let pessimistic = (mean + spread).round().max(0.0) as u32;
    (optimistic, pessimistic)
}
