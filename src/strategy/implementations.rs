// src/strategy/implementations.rs

use crate::model::demand::DemandModel;
use crate::solver::config::SolverConfig;
use crate::solver::policy::reorder_levels;
use crate::solver::tables::PolicyTable;
use crate::strategy::optimization::newsvendor_order_up_to;
use crate::strategy::traits::OrderPolicy;

// =========================================================================
// 1. Optimal Policy (table lookup)
// =========================================================================

/// Follows a solved policy table state by state.
#[derive(Debug, Clone)]
pub struct OptimalPolicy {
    table: PolicyTable,
}

impl OptimalPolicy {
    pub fn new(table: PolicyTable) -> Self {
        Self { table }
    }
}

impl OrderPolicy for OptimalPolicy {
    fn order_quantity(&mut self, period: usize, inventory: usize) -> usize {
        // States outside the table never order.
        self.table.get(period, inventory).unwrap_or(0)
    }

    fn name(&self) -> &str {
        "optimal"
    }
}

// =========================================================================
// 2. Reorder Point Policy ((s, S))
// =========================================================================

/// Classical `(s, S)` rule: below `s`, order up to `S`; otherwise wait.
///
/// Orders are capped by the per-period limit and by storage capacity.
#[derive(Debug, Clone)]
pub struct ReorderPointPolicy {
    reorder_point: usize,
    order_up_to: usize,
    max_inventory: usize,
    max_order: usize,
}

impl ReorderPointPolicy {
    pub fn new(
        reorder_point: usize,
        order_up_to: usize,
        max_inventory: usize,
        max_order: usize,
    ) -> Self {
        Self {
            reorder_point,
            order_up_to,
            max_inventory,
            max_order,
        }
    }

    /// Uses the `(s, S)` reading of `period` in a solved table for the whole
    /// horizon. Returns `None` if that period never orders.
    pub fn from_solved(table: &PolicyTable, period: usize, config: &SolverConfig) -> Option<Self> {
        let levels = reorder_levels(table, period)?;
        // policy[t][s] > 0 means s itself must trigger an order.
        Some(Self::new(
            levels.reorder_point + 1,
            levels.order_up_to,
            config.max_inventory,
            config.max_order,
        ))
    }
}

impl OrderPolicy for ReorderPointPolicy {
    fn order_quantity(&mut self, _period: usize, inventory: usize) -> usize {
        if inventory >= self.reorder_point {
            return 0;
        }
        let target = self.order_up_to.min(self.max_inventory);
        target.saturating_sub(inventory).min(self.max_order)
    }

    fn name(&self) -> &str {
        "reorder-point"
    }
}

// =========================================================================
// 3. Newsvendor Policy (myopic base stock)
// =========================================================================

/// Orders up to the single-period critical-ratio quantile every period,
/// ignoring the rest of the horizon.
#[derive(Debug, Clone)]
pub struct NewsvendorPolicy {
    base_stock: ReorderPointPolicy,
}

impl NewsvendorPolicy {
    pub fn new(target: usize, max_inventory: usize, max_order: usize) -> Self {
        Self {
            base_stock: ReorderPointPolicy::new(target, target, max_inventory, max_order),
        }
    }

    /// Target computed from the period-0 cost rates.
    pub fn with_optimal_target(config: &SolverConfig, demand: &DemandModel) -> Self {
        let target = newsvendor_order_up_to(demand, config.costs.rates(0));
        Self::new(target, config.max_inventory, config.max_order)
    }

    pub fn target(&self) -> usize {
        self.base_stock.order_up_to
    }
}

impl OrderPolicy for NewsvendorPolicy {
    fn order_quantity(&mut self, period: usize, inventory: usize) -> usize {
        self.base_stock.order_quantity(period, inventory)
    }

    fn name(&self) -> &str {
        "newsvendor"
    }
}
