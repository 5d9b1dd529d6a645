// src/solver/policy.rs

//! Read-only `(s, S)` projections over a solved policy.

use serde::Serialize;

use crate::solver::tables::{PolicyTable, ValueTable};

/// Reorder point `s` and order-up-to level `S` of one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReorderLevels {
    pub reorder_point: usize,
    pub order_up_to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub period: usize,
    pub reorder_point: Option<usize>,
    pub order_up_to: Option<usize>,
}

/// `s_t` is the smallest level at which an order is placed and
/// `S_t = s_t + policy[t][s_t]`. `None` when the period never orders or
/// `period` is past the horizon.
pub fn reorder_levels(policy: &PolicyTable, period: usize) -> Option<ReorderLevels> {
    if period >= policy.periods() {
        return None;
    }
    policy
        .row(period)
        .iter()
        .enumerate()
        .find(|(_, &order)| order > 0)
        .map(|(level, &order)| ReorderLevels {
            reorder_point: level,
            order_up_to: level + order,
        })
}

/// [`reorder_levels`] for every period of the horizon.
pub fn summarize(policy: &PolicyTable) -> Vec<PeriodSummary> {
    (0..policy.periods())
        .map(|period| {
            let levels = reorder_levels(policy, period);
            PeriodSummary {
                period,
                reorder_point: levels.map(|l| l.reorder_point),
                order_up_to: levels.map(|l| l.order_up_to),
            }
        })
        .collect()
}

/// Smallest level `I` of period `period` at which one extra unit of stock is
/// worth no more than its unit cost: `V[t][I] - V[t][I+1] <= unit_cost`.
///
/// Binary search, so it assumes the marginal value is non-increasing in `I`
/// (true for convex cost-to-go). Returns `I_max` when no level qualifies.
pub fn reorder_threshold(values: &ValueTable, period: usize, unit_cost: f64) -> Option<usize> {
    if period >= values.periods() {
        return None;
    }
    let row = values.row(period);
    let (mut low, mut high) = (0, values.levels() - 1);
    while low < high {
        let mid = (low + high) / 2;
        if row[mid] - row[mid + 1] <= unit_cost {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    Some(low)
}
