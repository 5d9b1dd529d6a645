// src/error.rs

/// Errors raised while building, solving or evaluating an inventory problem.
///
/// Validation and configuration problems are reported at construction time,
/// before any table is allocated, so a rejected problem never yields a
/// partially solved result.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("invalid demand distribution: {0}")]
    Validation(String),

    #[error("invalid solver configuration: {0}")]
    Configuration(String),

    /// A transition or action bound left the inventory axis. Unreachable for
    /// well-formed configurations; treated as fatal for the whole solve.
    #[error("state out of range: period {period}, inventory {inventory} (max {max_inventory})")]
    StateOutOfRange {
        period: usize,
        inventory: usize,
        max_inventory: usize,
    },

    #[error("invalid simulation parameters: {0}")]
    Simulation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl InventoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn simulation(msg: impl Into<String>) -> Self {
        Self::Simulation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
