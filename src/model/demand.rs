// src/model/demand.rs

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};

/// Absolute tolerance on the probability sum.
pub const PROBABILITY_TOLERANCE: f64 = 1e-8;

/// A discrete demand distribution shared by every period of the horizon.
///
/// Support values are demand quantities; they index the inventory axis after
/// clipping, hence the unsigned type. Repeated or unsorted support values are
/// allowed and act as independent weighted atoms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandModel {
    support: Vec<u32>,
    probabilities: Vec<f64>,
}

impl DemandModel {
    /// Builds a distribution from matching support and probability sequences.
    ///
    /// Fails with [`InventoryError::Validation`] if the lengths differ, the
    /// support is empty, a probability is negative or not finite, or the
    /// probabilities do not sum to 1 within [`PROBABILITY_TOLERANCE`].
    pub fn new(support: Vec<u32>, probabilities: Vec<f64>) -> Result<Self> {
        if support.len() != probabilities.len() {
            return Err(InventoryError::validation(format!(
                "support has {} values but {} probabilities were given",
                support.len(),
                probabilities.len()
            )));
        }
        if support.is_empty() {
            return Err(InventoryError::validation("support must not be empty"));
        }
        if let Some((i, p)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(InventoryError::validation(format!(
                "probability {} for demand {} is not a non-negative number",
                p, support[i]
            )));
        }

        let total: f64 = probabilities.iter().sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(InventoryError::validation(format!(
                "probabilities must sum to 1 (sum is {})",
                total
            )));
        }

        Ok(Self {
            support,
            probabilities,
        })
    }

    /// Deterministic demand of exactly `demand` units every period.
    pub fn point_mass(demand: u32) -> Self {
        Self {
            support: vec![demand],
            probabilities: vec![1.0],
        }
    }

    /// Equal weight on every value in `low..=high`.
    pub fn uniform(low: u32, high: u32) -> Result<Self> {
        if low > high {
            return Err(InventoryError::validation(format!(
                "uniform range {}..={} is empty",
                low, high
            )));
        }
        let support: Vec<u32> = (low..=high).collect();
        let weight = 1.0 / support.len() as f64;
        let probabilities = vec![weight; support.len()];
        Self::new(support, probabilities)
    }

    /// Poisson(`lambda`) restricted to `0..=max_demand` and renormalized.
    pub fn truncated_poisson(lambda: f64, max_demand: u32) -> Result<Self> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(InventoryError::validation(format!(
                "poisson rate must be a non-negative number, got {}",
                lambda
            )));
        }

        // Work in log space: exp(-lambda) underflows once lambda passes ~745.
        // ln p(k) = ln p(k-1) + ln(lambda) - ln(k); ln(0) = -inf zeroes k >= 1.
        let ln_lambda = lambda.ln();
        let mut log_mass = Vec::with_capacity(max_demand as usize + 1);
        let mut current = -lambda;
        log_mass.push(current);
        for k in 1..=max_demand {
            current += ln_lambda - f64::from(k).ln();
            log_mass.push(current);
        }

        let peak = log_mass.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let raw: Vec<f64> = log_mass.iter().map(|&l| (l - peak).exp()).collect();
        let total: f64 = raw.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(InventoryError::validation(format!(
                "poisson({}) has no representable mass on 0..={}",
                lambda, max_demand
            )));
        }

        let support = (0..=max_demand).collect();
        let probabilities = raw.into_iter().map(|p| p / total).collect();
        Self::new(support, probabilities)
    }

    pub fn support(&self) -> &[u32] {
        &self.support
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// `(demand, probability)` pairs in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.support
            .iter()
            .copied()
            .zip(self.probabilities.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.support.len()
    }

    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    pub fn max_demand(&self) -> u32 {
        self.support.iter().copied().max().unwrap_or(0)
    }

    pub fn mean(&self) -> f64 {
        self.iter().map(|(d, p)| d as f64 * p).sum()
    }

    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        self.iter()
            .map(|(d, p)| {
                let dev = d as f64 - mean;
                dev * dev * p
            })
            .sum::<f64>()
            .sqrt()
    }

    /// P(D <= level).
    pub fn cdf(&self, level: u32) -> f64 {
        self.iter()
            .filter(|(d, _)| *d <= level)
            .map(|(_, p)| p)
            .sum()
    }

    /// Smallest demand value whose cumulative probability reaches `q`.
    pub fn quantile(&self, q: f64) -> u32 {
        let mut atoms: Vec<(u32, f64)> = self.iter().collect();
        atoms.sort_by_key(|(d, _)| *d);

        let mut cumulative = 0.0;
        for (d, p) in atoms {
            cumulative += p;
            if cumulative + PROBABILITY_TOLERANCE >= q {
                return d;
            }
        }
        self.max_demand()
    }
}

/// Serialized form of a demand model, as found in problem files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DemandSpec {
    Discrete {
        support: Vec<u32>,
        probabilities: Vec<f64>,
    },
    Constant {
        demand: u32,
    },
    Uniform {
        low: u32,
        high: u32,
    },
    Poisson {
        lambda: f64,
        max_demand: u32,
    },
}

impl DemandSpec {
    pub fn build(&self) -> Result<DemandModel> {
        match self {
            DemandSpec::Discrete {
                support,
                probabilities,
            } => DemandModel::new(support.clone(), probabilities.clone()),
            DemandSpec::Constant { demand } => Ok(DemandModel::point_mass(*demand)),
            DemandSpec::Uniform { low, high } => DemandModel::uniform(*low, *high),
            DemandSpec::Poisson { lambda, max_demand } => {
                DemandModel::truncated_poisson(*lambda, *max_demand)
            }
        }
    }
}

impl Default for DemandSpec {
    fn default() -> Self {
        DemandSpec::Discrete {
            support: vec![0, 1, 2],
            probabilities: vec![0.3, 0.4, 0.3],
        }
    }
}
