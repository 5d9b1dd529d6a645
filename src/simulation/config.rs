// src/simulation/config.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of independent demand paths.
    pub runs: usize,
    pub initial_inventory: usize,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            runs: 10_000,
            initial_inventory: 0,
            seed: None,
        }
    }
}
