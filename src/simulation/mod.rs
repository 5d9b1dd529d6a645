// src/simulation/mod.rs

pub mod config;
pub mod engine;

pub use config::SimulationConfig;
pub use engine::{cost_breakdown, HistoryRecord, PolicySimulation, SimulationReport};
