// src/simulation/engine.rs

//! Monte Carlo evaluation of an ordering policy over the planning horizon.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, WeightedAliasIndex};
use serde::Serialize;
use tracing::{info, trace};

use crate::error::{InventoryError, Result};
use crate::model::demand::DemandModel;
use crate::model::inventory::{PeriodCost, StockPosition};
use crate::simulation::config::SimulationConfig;
use crate::solver::config::SolverConfig;
use crate::strategy::traits::OrderPolicy;

// Serialize so traces can be written to CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub period: usize,
    pub inventory_start: usize,
    pub order: usize,
    pub demand: u32,
    pub inventory_end: usize,
    pub shortage: usize,
    pub purchase_cost: f64,
    pub holding_cost: f64,
    pub shortage_cost: f64,
    pub total_cost: f64,
}

/// Summary statistics of the total cost over all simulated paths.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub policy: String,
    pub runs: usize,
    pub mean_cost: f64,
    pub std_dev: f64,
    pub min_cost: f64,
    pub max_cost: f64,
    /// Total cost of each path, sorted ascending.
    pub costs: Vec<f64>,
}

impl SimulationReport {
    fn from_costs(policy: &str, mut costs: Vec<f64>) -> Self {
        costs.sort_by(|a, b| a.total_cmp(b));

        let runs = costs.len();
        let mean_cost = costs.iter().sum::<f64>() / runs as f64;
        let variance = costs
            .iter()
            .map(|c| (c - mean_cost) * (c - mean_cost))
            .sum::<f64>()
            / runs as f64;

        Self {
            policy: policy.to_string(),
            runs,
            mean_cost,
            std_dev: variance.sqrt(),
            min_cost: costs[0],
            max_cost: costs[runs - 1],
            costs,
        }
    }

    /// Cost not exceeded in an `alpha` share of runs (linearly interpolated
    /// percentile of the simulated totals).
    pub fn value_at_risk(&self, alpha: f64) -> Result<f64> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(InventoryError::simulation(format!(
                "risk level must lie in (0, 1), got {}",
                alpha
            )));
        }
        let rank = alpha * (self.runs - 1) as f64;
        let low = rank.floor() as usize;
        let high = rank.ceil() as usize;
        let weight = rank - low as f64;
        Ok(self.costs[low] + (self.costs[high] - self.costs[low]) * weight)
    }
}

pub struct PolicySimulation {
    config: SimulationConfig,
    solver_config: SolverConfig,
    demand: DemandModel,
    sampler: WeightedAliasIndex<f64>,
}

impl PolicySimulation {
    pub fn new(
        config: SimulationConfig,
        solver_config: SolverConfig,
        demand: DemandModel,
    ) -> Result<Self> {
        solver_config.validate()?;
        if config.runs == 0 {
            return Err(InventoryError::simulation("at least one run is required"));
        }
        if config.initial_inventory > solver_config.max_inventory {
            return Err(InventoryError::simulation(format!(
                "initial inventory {} exceeds capacity {}",
                config.initial_inventory, solver_config.max_inventory
            )));
        }

        let sampler = WeightedAliasIndex::new(demand.probabilities().to_vec())
            .map_err(|e| InventoryError::simulation(format!("cannot sample demand: {}", e)))?;

        Ok(Self {
            config,
            solver_config,
            demand,
            sampler,
        })
    }

    /// Evaluates `policy` over `config.runs` sampled demand paths.
    pub fn run(&self, policy: &mut dyn OrderPolicy) -> Result<SimulationReport> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut costs = Vec::with_capacity(self.config.runs);
        for _ in 0..self.config.runs {
            let path = self.sample_path(&mut rng);
            costs.push(self.path_cost(policy, &path)?);
        }

        let report = SimulationReport::from_costs(policy.name(), costs);
        info!(
            policy = %report.policy,
            runs = report.runs,
            mean_cost = report.mean_cost,
            std_dev = report.std_dev,
            "simulation finished"
        );
        Ok(report)
    }

    /// One demand value per period drawn from the demand model.
    pub fn sample_path<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u32> {
        let support = self.demand.support();
        (0..self.solver_config.horizon)
            .map(|_| support[self.sampler.sample(rng)])
            .collect()
    }

    /// Plays `policy` against a fixed demand path and records every period.
    pub fn trace(
        &self,
        policy: &mut dyn OrderPolicy,
        demand_path: &[u32],
    ) -> Result<Vec<HistoryRecord>> {
        let mut records = Vec::with_capacity(demand_path.len());
        self.walk(policy, demand_path, |record| records.push(record))?;
        Ok(records)
    }

    fn path_cost(&self, policy: &mut dyn OrderPolicy, demand_path: &[u32]) -> Result<f64> {
        let mut total = 0.0;
        self.walk(policy, demand_path, |record| total += record.total_cost)?;
        Ok(total)
    }

    fn walk(
        &self,
        policy: &mut dyn OrderPolicy,
        demand_path: &[u32],
        mut visit: impl FnMut(HistoryRecord),
    ) -> Result<()> {
        if demand_path.len() > self.solver_config.horizon {
            return Err(InventoryError::simulation(format!(
                "demand path covers {} periods but the horizon is {}",
                demand_path.len(),
                self.solver_config.horizon
            )));
        }

        let mut stock = StockPosition::new(self.config.initial_inventory);
        for (period, &demand) in demand_path.iter().enumerate() {
            let inventory_start = stock.inventory;
            let order = policy.order_quantity(period, inventory_start);
            if inventory_start + order > self.solver_config.max_inventory {
                return Err(InventoryError::simulation(format!(
                    "policy '{}' ordered {} at inventory {} in period {}, exceeding capacity {}",
                    policy.name(),
                    order,
                    inventory_start,
                    period,
                    self.solver_config.max_inventory
                )));
            }

            let cost = stock.step(self.solver_config.costs.rates(period), order, demand);
            trace!(period, inventory_start, order, demand, "simulated period");

            visit(HistoryRecord {
                period,
                inventory_start,
                order,
                demand,
                inventory_end: stock.inventory,
                shortage: stock.last_shortage,
                purchase_cost: cost.purchase,
                holding_cost: cost.holding,
                shortage_cost: cost.shortage,
                total_cost: cost.total(),
            });
        }
        Ok(())
    }
}

/// Total cost of a trace split by component.
pub fn cost_breakdown(records: &[HistoryRecord]) -> PeriodCost {
    records.iter().fold(PeriodCost::default(), |acc, r| PeriodCost {
        purchase: acc.purchase + r.purchase_cost,
        holding: acc.holding + r.holding_cost,
        shortage: acc.shortage + r.shortage_cost,
    })
}
