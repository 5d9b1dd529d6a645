// src/solver/mod.rs

pub mod backward;
pub mod config;
pub mod policy;
pub mod tables;

pub use backward::{Solution, Solver};
pub use config::{coerce_dimension, CostParams, SolverConfig};
pub use policy::{reorder_levels, reorder_threshold, summarize, PeriodSummary, ReorderLevels};
pub use tables::{PolicyTable, ValueTable};
