// src/model/inventory.rs

use std::ops::RangeInclusive;

use serde::Serialize;

/// Order quantities allowed at inventory level `inventory`.
///
/// The upper bound enforces both the per-order cap and the storage cap
/// (`inventory + order <= max_inventory`). Callers must pass
/// `inventory <= max_inventory`.
pub fn feasible_orders(
    inventory: usize,
    max_inventory: usize,
    max_order: usize,
) -> RangeInclusive<usize> {
    0..=max_order.min(max_inventory.saturating_sub(inventory))
}

/// Inventory carried into the next period. Unmet demand is charged as a
/// shortage, never carried as negative stock.
pub fn next_inventory(inventory: usize, order: usize, demand: u32) -> usize {
    (inventory + order).saturating_sub(demand as usize)
}

/// Units of demand left unmet after receiving `order`.
pub fn unmet_demand(inventory: usize, order: usize, demand: u32) -> usize {
    (demand as usize).saturating_sub(inventory + order)
}

/// Cost rates applied within a single period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRates {
    pub unit_cost: f64,
    pub holding: f64,
    pub shortage: f64,
}

/// One period's cost split by component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PeriodCost {
    pub purchase: f64,
    pub holding: f64,
    pub shortage: f64,
}

impl PeriodCost {
    pub fn total(&self) -> f64 {
        self.purchase + self.holding + self.shortage
    }
}

/// `c_t*x + h*max(I+x-D, 0) + p*max(D-I-x, 0)`.
pub fn period_cost(rates: CostRates, inventory: usize, order: usize, demand: u32) -> PeriodCost {
    PeriodCost {
        purchase: rates.unit_cost * order as f64,
        holding: rates.holding * next_inventory(inventory, order, demand) as f64,
        shortage: rates.shortage * unmet_demand(inventory, order, demand) as f64,
    }
}

/// On-hand stock of the single item as it moves through the horizon.
#[derive(Debug, Clone)]
pub struct StockPosition {
    pub inventory: usize,
    /// Demand left unserved in the most recent period.
    pub last_shortage: usize,
}

impl StockPosition {
    pub fn new(initial_inventory: usize) -> Self {
        Self {
            inventory: initial_inventory,
            last_shortage: 0,
        }
    }

    /// Receives `order` units, serves `demand`, and returns the period cost.
    /// Orders arrive immediately (no lead time).
    pub fn step(&mut self, rates: CostRates, order: usize, demand: u32) -> PeriodCost {
        let cost = period_cost(rates, self.inventory, order, demand);

        self.last_shortage = unmet_demand(self.inventory, order, demand);
        self.inventory = next_inventory(self.inventory, order, demand);

        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATES: CostRates = CostRates {
        unit_cost: 10.0,
        holding: 2.0,
        shortage: 20.0,
    };

    #[test]
    fn feasible_orders_respect_both_caps() {
        assert_eq!(feasible_orders(0, 5, 3), 0..=3);
        assert_eq!(feasible_orders(4, 5, 3), 0..=1);
        assert_eq!(feasible_orders(5, 5, 3), 0..=0);
        assert_eq!(feasible_orders(2, 5, 0), 0..=0);
    }

    #[test]
    fn next_inventory_clips_at_zero() {
        assert_eq!(next_inventory(3, 2, 4), 1);
        assert_eq!(next_inventory(1, 0, 4), 0);
        assert_eq!(unmet_demand(1, 0, 4), 3);
        assert_eq!(unmet_demand(3, 2, 4), 0);
    }

    #[test]
    fn cost_components() {
        let surplus = period_cost(RATES, 3, 2, 4);
        assert_eq!(surplus.purchase, 20.0);
        assert_eq!(surplus.holding, 2.0);
        assert_eq!(surplus.shortage, 0.0);

        let short = period_cost(RATES, 1, 0, 4);
        assert_eq!(short.total(), 60.0);
    }

    #[test]
    fn stock_position_tracks_last_step() {
        let mut stock = StockPosition::new(2);
        let cost = stock.step(RATES, 1, 5);
        assert_eq!(stock.inventory, 0);
        assert_eq!(stock.last_shortage, 2);
        assert_eq!(cost.total(), 10.0 + 40.0);
    }
}
