// src/io/problem.rs

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::demand::{DemandModel, DemandSpec};
use crate::simulation::config::SimulationConfig;
use crate::solver::config::SolverConfig;

/// A complete problem description as read from a JSON file. Missing
/// sections fall back to the built-in example problem.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProblemFile {
    pub solver: SolverConfig,
    pub demand: DemandSpec,
    pub simulation: SimulationConfig,
}

impl ProblemFile {
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn demand_model(&self) -> Result<DemandModel> {
        self.demand.build()
    }
}
