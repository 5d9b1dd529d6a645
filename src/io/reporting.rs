// src/io/reporting.rs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::simulation::engine::HistoryRecord;
use crate::solver::backward::Solution;
use crate::solver::policy::PeriodSummary;

fn level_header(levels: usize) -> Vec<String> {
    std::iter::once("period".to_string())
        .chain((0..levels).map(|level| format!("I{}", level)))
        .collect()
}

/// Writes `V` as CSV: one row per period (terminal row included), one column
/// per inventory level.
pub fn write_value_table(path: &Path, solution: &Solution) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(level_header(solution.values.levels()))?;
    for (period, row) in solution.values.rows().enumerate() {
        let record = std::iter::once(period.to_string()).chain(row.iter().map(|v| v.to_string()));
        wtr.write_record(record)?;
    }
    wtr.flush()?;

    info!(path = %path.display(), rows = solution.values.periods(), "exported value table");
    Ok(())
}

/// Writes the policy table as CSV in the same layout as the value table.
pub fn write_policy_table(path: &Path, solution: &Solution) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(level_header(solution.policy.levels()))?;
    for (period, row) in solution.policy.rows().enumerate() {
        let record = std::iter::once(period.to_string()).chain(row.iter().map(|x| x.to_string()));
        wtr.write_record(record)?;
    }
    wtr.flush()?;

    info!(path = %path.display(), rows = solution.policy.periods(), "exported policy table");
    Ok(())
}

/// Writes the `(s, S)` summary, one row per period.
pub fn write_policy_summary(path: &Path, summary: &[PeriodSummary]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in summary {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!(path = %path.display(), rows = summary.len(), "exported policy summary");
    Ok(())
}

/// Writes a simulated trajectory to a CSV file.
pub fn write_simulation_log(path: &Path, data: &[HistoryRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in data {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!(path = %path.display(), rows = data.len(), "exported simulation trace");
    Ok(())
}

#[derive(Serialize)]
struct SolutionDocument<'a> {
    value_function: Vec<&'a [f64]>,
    policy: Vec<&'a [usize]>,
    solution_time: f64,
}

/// Writes both tables and the solve time as a single JSON document.
pub fn write_solution_json(path: &Path, solution: &Solution) -> Result<()> {
    let document = SolutionDocument {
        value_function: solution.values.rows().collect(),
        policy: solution.policy.rows().collect(),
        solution_time: solution.elapsed.as_secs_f64(),
    };

    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &document)?;
    out.flush()?;

    info!(path = %path.display(), "exported solution document");
    Ok(())
}
