// src/solver/config.rs

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};
use crate::model::inventory::CostRates;

/// Per-period purchase costs plus the holding and shortage rates.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CostParams {
    /// `c_t` for `t = 0..T-1`. Entries past the horizon are ignored.
    pub unit_costs: Vec<f64>,
    pub holding: f64,
    pub shortage: f64,
}

impl CostParams {
    /// Same unit cost in every one of `horizon` periods.
    pub fn uniform(horizon: usize, unit_cost: f64, holding: f64, shortage: f64) -> Self {
        Self {
            unit_costs: vec![unit_cost; horizon],
            holding,
            shortage,
        }
    }

    /// Rates in force during `period`.
    pub fn rates(&self, period: usize) -> CostRates {
        CostRates {
            unit_cost: self.unit_costs[period],
            holding: self.holding,
            shortage: self.shortage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Number of planning periods `T`.
    pub horizon: usize,
    /// Storage capacity `I_max`.
    pub max_inventory: usize,
    /// Largest single-period order `x_max`.
    pub max_order: usize,
    pub costs: CostParams,
    /// Sweep inventory levels of each period on the rayon pool.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            horizon: 3,
            max_inventory: 5,
            max_order: 5,
            costs: CostParams::uniform(3, 1.0, 2.0, 10.0),
            parallel: false,
        }
    }
}

impl SolverConfig {
    pub fn new(horizon: usize, max_inventory: usize, max_order: usize, costs: CostParams) -> Self {
        Self {
            horizon,
            max_inventory,
            max_order,
            costs,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks every constraint the recursion relies on.
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(InventoryError::configuration("horizon must be at least 1"));
        }
        if self.costs.unit_costs.len() < self.horizon {
            return Err(InventoryError::configuration(format!(
                "{} unit costs given for a horizon of {} periods",
                self.costs.unit_costs.len(),
                self.horizon
            )));
        }
        check_rate("holding cost", self.costs.holding)?;
        check_rate("shortage penalty", self.costs.shortage)?;
        for (t, &c) in self.costs.unit_costs[..self.horizon].iter().enumerate() {
            check_rate(&format!("unit cost for period {}", t), c)?;
        }
        self.table_cells()?;
        Ok(())
    }

    /// Cells in the value table, `(T + 1) * (I_max + 1)`; errors on overflow.
    pub fn table_cells(&self) -> Result<usize> {
        let levels = self.max_inventory.checked_add(1);
        let periods = self.horizon.checked_add(1);
        levels
            .zip(periods)
            .and_then(|(levels, periods)| levels.checked_mul(periods))
            .ok_or_else(|| {
                InventoryError::configuration(format!(
                    "state space of {} periods by {} inventory levels is too large",
                    self.horizon, self.max_inventory
                ))
            })
    }
}

fn check_rate(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(InventoryError::configuration(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Truncates a float-valued dimension toward zero.
///
/// Negative and non-finite values are rejected instead of wrapped.
pub fn coerce_dimension(name: &str, value: f64) -> Result<usize> {
    if !value.is_finite() || value < 0.0 {
        return Err(InventoryError::configuration(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    if value >= usize::MAX as f64 {
        return Err(InventoryError::configuration(format!(
            "{} of {} does not fit the platform's index range",
            name, value
        )));
    }
    Ok(value.trunc() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let config = SolverConfig::new(0, 5, 5, CostParams::uniform(0, 1.0, 0.0, 1.0));
        assert!(matches!(
            config.validate(),
            Err(InventoryError::Configuration(_))
        ));
    }

    #[test]
    fn short_cost_sequence_is_rejected() {
        let config = SolverConfig::new(3, 5, 5, CostParams::uniform(2, 1.0, 0.0, 1.0));
        assert!(matches!(
            config.validate(),
            Err(InventoryError::Configuration(_))
        ));
    }

    #[test]
    fn negative_rates_are_rejected() {
        let mut config = SolverConfig::default();
        config.costs.holding = -1.0;
        assert!(config.validate().is_err());

        let mut config = SolverConfig::default();
        config.costs.shortage = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SolverConfig::default();
        config.costs.unit_costs[1] = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn coercion_truncates_toward_zero() {
        assert_eq!(coerce_dimension("horizon", 12.9).unwrap(), 12);
        assert_eq!(coerce_dimension("horizon", 0.4).unwrap(), 0);
        assert!(coerce_dimension("max_inventory", -1.0).is_err());
        assert!(coerce_dimension("max_order", f64::INFINITY).is_err());
    }

    #[test]
    fn coercion_rejects_values_beyond_index_range() {
        assert!(matches!(
            coerce_dimension("max_inventory", 1e20),
            Err(InventoryError::Configuration(_))
        ));
        assert!(matches!(
            coerce_dimension("max_inventory", usize::MAX as f64),
            Err(InventoryError::Configuration(_))
        ));
    }

    #[test]
    fn oversized_state_space_is_rejected() {
        let config = SolverConfig::new(1, usize::MAX, 1, CostParams::uniform(1, 1.0, 0.0, 1.0));
        assert!(matches!(
            config.validate(),
            Err(InventoryError::Configuration(_))
        ));

        let config = SolverConfig::new(usize::MAX / 2, 4, 1, CostParams::uniform(1, 1.0, 0.0, 1.0));
        assert!(config.table_cells().is_err());
        assert_eq!(SolverConfig::default().table_cells().unwrap(), 24);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SolverConfig = serde_json::from_str(r#"{"horizon": 3, "parallel": true}"#).unwrap();
        assert!(config.parallel);
        assert_eq!(config.max_inventory, 5);
    }
}
