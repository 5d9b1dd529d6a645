// src/strategy/optimization.rs

//! Single-period (newsvendor) reference levels.

use crate::model::demand::DemandModel;
use crate::model::inventory::CostRates;

/// Critical Ratio (target service level) with a purchase cost:
/// `(p - c) / (p + h)`, clamped to `[0, 1]`.
///
/// A shortage penalty no larger than the unit cost makes stocking up
/// pointless, giving `0`.
pub fn calculate_critical_ratio(rates: CostRates) -> f64 {
    let denominator = rates.shortage + rates.holding;
    if denominator <= 0.0 {
        return 0.0;
    }
    ((rates.shortage - rates.unit_cost) / denominator).clamp(0.0, 1.0)
}

/// Myopic order-up-to level: the critical-ratio quantile of one period's
/// demand.
pub fn newsvendor_order_up_to(demand: &DemandModel, rates: CostRates) -> usize {
    let ratio = calculate_critical_ratio(rates);
    if ratio <= 0.0 {
        return 0;
    }
    demand.quantile(ratio) as usize
}
