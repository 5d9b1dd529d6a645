// Error type shared by every layer
pub mod error;

// Domain model: demand distribution and single-period inventory dynamics
pub mod model;

// Backward-induction solver and (s, S) projections of its policy
pub mod solver;

// Ordering rules that can be replayed against demand
pub mod strategy;

// Monte Carlo evaluation of ordering rules
pub mod simulation;

// Problem files, demand paths and CSV/JSON exports
pub mod io;

// Re-export commonly used types
pub use error::{InventoryError, Result};
pub use model::{DemandModel, DemandSpec};
pub use simulation::{PolicySimulation, SimulationConfig, SimulationReport};
pub use solver::{
    coerce_dimension, reorder_levels, summarize, CostParams, PolicyTable, Solution, Solver,
    SolverConfig, ValueTable,
};
pub use strategy::{NewsvendorPolicy, OptimalPolicy, OrderPolicy, ReorderPointPolicy};
