// src/solver/backward.rs

//! Finite-horizon backward induction over `(period, inventory level)` states.
//!
//! Periods are resolved from `T - 1` down to `0`. Each state of period `t`
//! reads only row `t + 1` of the value table, so the levels of one period can
//! be computed on the rayon pool; the period loop acts as the barrier.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{InventoryError, Result};
use crate::model::demand::DemandModel;
use crate::model::inventory::{feasible_orders, next_inventory, period_cost, CostRates};
use crate::solver::config::SolverConfig;
use crate::solver::tables::{PolicyTable, ValueTable};

/// Output of a completed solve.
#[derive(Debug, Clone)]
pub struct Solution {
    pub values: ValueTable,
    pub policy: PolicyTable,
    /// Wall-clock time spent in the sweep.
    pub elapsed: Duration,
    /// `(state, order, demand)` terms summed by the sweep.
    pub evaluations: u64,
}

impl Solution {
    /// Minimum expected cost over the whole horizon from `initial_inventory`.
    pub fn expected_cost(&self, initial_inventory: usize) -> Option<f64> {
        self.values.get(0, initial_inventory)
    }
}

/// Single-use solver for one problem configuration.
///
/// [`Solver::solve`] consumes the solver, so a configuration cannot be
/// re-solved after mutation.
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    demand: DemandModel,
    values: ValueTable,
    policy: PolicyTable,
}

impl Solver {
    /// Validates the configuration and allocates both tables.
    pub fn new(config: SolverConfig, demand: DemandModel) -> Result<Self> {
        config.validate()?;

        // validate() has already bounded (T + 1) * (I_max + 1).
        let levels = config.max_inventory + 1;
        let values = ValueTable::unsolved(config.horizon + 1, levels);
        let policy = PolicyTable::zeroed(config.horizon, levels);

        Ok(Self {
            config,
            demand,
            values,
            policy,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn demand(&self) -> &DemandModel {
        &self.demand
    }

    /// Runs the full backward sweep and returns `(V, policy)`.
    ///
    /// Any internal fault aborts the solve; the partially filled tables are
    /// dropped with the solver.
    pub fn solve(mut self) -> Result<Solution> {
        let horizon = self.config.horizon;
        info!(
            horizon,
            max_inventory = self.config.max_inventory,
            max_order = self.config.max_order,
            support = self.demand.len(),
            parallel = self.config.parallel,
            "starting backward induction"
        );

        let start = Instant::now();
        let mut evaluations = 0u64;

        // Terminal condition: nothing is charged past the horizon.
        self.values.row_mut(horizon).fill(0.0);

        for period in (0..horizon).rev() {
            let cells = {
                let sweep = PeriodSweep {
                    period,
                    rates: self.config.costs.rates(period),
                    max_inventory: self.config.max_inventory,
                    max_order: self.config.max_order,
                    demand: &self.demand,
                    next_values: self.values.row(period + 1),
                };
                sweep.run(self.config.parallel)?
            };

            let values = self.values.row_mut(period);
            for (inventory, cell) in cells.iter().enumerate() {
                values[inventory] = cell.value;
            }
            let orders = self.policy.row_mut(period);
            for (inventory, cell) in cells.iter().enumerate() {
                orders[inventory] = cell.order;
            }
            evaluations += cells.iter().map(|cell| cell.terms).sum::<u64>();

            debug!(period, value_at_empty = cells[0].value, "period resolved");
        }

        let elapsed = start.elapsed();
        info!(
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            evaluations,
            "backward induction finished"
        );

        Ok(Solution {
            values: self.values,
            policy: self.policy,
            elapsed,
            evaluations,
        })
    }
}

/// Resolved state `(t, I)`.
#[derive(Debug, Clone, Copy)]
struct StateOutcome {
    value: f64,
    order: usize,
    terms: u64,
}

/// Everything needed to resolve the states of one period.
struct PeriodSweep<'a> {
    period: usize,
    rates: CostRates,
    max_inventory: usize,
    max_order: usize,
    demand: &'a DemandModel,
    next_values: &'a [f64],
}

impl PeriodSweep<'_> {
    /// `(V[t][I], policy[t][I])` for every level `I`, in level order.
    fn run(&self, parallel: bool) -> Result<Vec<StateOutcome>> {
        let levels = 0..=self.max_inventory;
        if parallel {
            levels
                .into_par_iter()
                .map(|inventory| self.solve_state(inventory))
                .collect()
        } else {
            levels.map(|inventory| self.solve_state(inventory)).collect()
        }
    }

    /// Picks the cheapest feasible order. Candidates are tried in ascending
    /// order and only a strict improvement replaces the incumbent, so ties go
    /// to the smallest order.
    fn solve_state(&self, inventory: usize) -> Result<StateOutcome> {
        if inventory > self.max_inventory {
            return Err(self.out_of_range(inventory));
        }

        let mut best_cost = f64::INFINITY;
        let mut best_order = 0;
        let mut candidates = 0u64;
        for order in feasible_orders(inventory, self.max_inventory, self.max_order) {
            let cost = self.expected_cost(inventory, order)?;
            candidates += 1;
            if cost < best_cost {
                best_cost = cost;
                best_order = order;
            }
        }
        Ok(StateOutcome {
            value: best_cost,
            order: best_order,
            terms: candidates * self.demand.len() as u64,
        })
    }

    /// `E[c_t*x + h*(I+x-D)^+ + p*(D-I-x)^+ + V[t+1][(I+x-D)^+]]`.
    fn expected_cost(&self, inventory: usize, order: usize) -> Result<f64> {
        let mut total = 0.0;
        for (demand, probability) in self.demand.iter() {
            let next = next_inventory(inventory, order, demand);
            let future = *self
                .next_values
                .get(next)
                .ok_or_else(|| self.out_of_range(next))?;
            let immediate = period_cost(self.rates, inventory, order, demand).total();
            total += probability * (immediate + future);
        }
        Ok(total)
    }

    fn out_of_range(&self, inventory: usize) -> InventoryError {
        InventoryError::StateOutOfRange {
            period: self.period,
            inventory,
            max_inventory: self.max_inventory,
        }
    }
}
