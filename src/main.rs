use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use inventory_dp::io::problem::ProblemFile;
use inventory_dp::io::{demand, reporting};
use inventory_dp::simulation::cost_breakdown;
use inventory_dp::{
    summarize, NewsvendorPolicy, OptimalPolicy, OrderPolicy, PolicySimulation,
    ReorderPointPolicy, Solution, Solver,
};

/// Optimal ordering for a single-item periodic-review inventory under
/// stochastic demand, by backward induction.
#[derive(Debug, Parser)]
#[command(name = "inventory-dp", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve the problem and print the (s, S) reading of every period.
    Solve {
        /// JSON problem file; the built-in example is used when omitted.
        #[arg(long)]
        problem: Option<PathBuf>,
        /// Directory for values.csv, policy.csv, summary.csv and solution.json.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Sweep inventory levels on the rayon pool.
        #[arg(long)]
        parallel: bool,
    },
    /// Solve, then Monte Carlo evaluate the optimal policy against heuristics.
    Simulate {
        #[arg(long)]
        problem: Option<PathBuf>,
        /// Overrides the number of runs in the problem file.
        #[arg(long)]
        runs: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Write the optimal policy's trace under the pessimistic scenario here.
        #[arg(long)]
        trace: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Solve {
            problem,
            out,
            parallel,
        } => {
            let mut problem = load_problem(problem.as_deref())?;
            problem.solver.parallel |= parallel;
            let solution = solve(&problem)?;
            print_summary(&solution);
            if let Some(dir) = out {
                export(&dir, &solution)?;
            }
        }
        Command::Simulate {
            problem,
            runs,
            seed,
            trace,
        } => {
            let mut problem = load_problem(problem.as_deref())?;
            if let Some(runs) = runs {
                problem.simulation.runs = runs;
            }
            if seed.is_some() {
                problem.simulation.seed = seed;
            }
            simulate(&problem, trace.as_deref())?;
        }
    }
    Ok(())
}

fn load_problem(path: Option<&Path>) -> Result<ProblemFile> {
    match path {
        Some(path) => ProblemFile::load(path)
            .with_context(|| format!("failed to load problem file {}", path.display())),
        None => Ok(ProblemFile::default()),
    }
}

fn solve(problem: &ProblemFile) -> Result<Solution> {
    let demand = problem.demand_model().context("invalid demand model")?;
    let solver =
        Solver::new(problem.solver.clone(), demand).context("invalid solver configuration")?;
    solver.solve().context("backward induction failed")
}

fn print_summary(solution: &Solution) {
    println!("=== Optimal Policy ===");
    println!("Solved in {:.4}s", solution.elapsed.as_secs_f64());
    if let Some(cost) = solution.expected_cost(0) {
        println!("Expected cost from empty stock: {:.2}", cost);
    }
    for period in summarize(&solution.policy) {
        match (period.reorder_point, period.order_up_to) {
            (Some(s), Some(big_s)) => println!("  t={:>3}: s={:>4}  S={:>4}", period.period, s, big_s),
            _ => println!("  t={:>3}: no orders", period.period),
        }
    }
}

fn export(dir: &Path, solution: &Solution) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    reporting::write_value_table(&dir.join("values.csv"), solution)?;
    reporting::write_policy_table(&dir.join("policy.csv"), solution)?;
    reporting::write_policy_summary(&dir.join("summary.csv"), &summarize(&solution.policy))?;
    reporting::write_solution_json(&dir.join("solution.json"), solution)?;
    Ok(())
}

fn simulate(problem: &ProblemFile, trace: Option<&Path>) -> Result<()> {
    let solution = solve(problem)?;
    let demand_model = problem.demand_model()?;
    let sim = PolicySimulation::new(
        problem.simulation.clone(),
        problem.solver.clone(),
        demand_model.clone(),
    )
    .context("invalid simulation parameters")?;

    let mut strategies: Vec<Box<dyn OrderPolicy>> =
        vec![Box::new(OptimalPolicy::new(solution.policy.clone()))];
    if let Some(policy) = ReorderPointPolicy::from_solved(&solution.policy, 0, &problem.solver) {
        strategies.push(Box::new(policy));
    }
    strategies.push(Box::new(NewsvendorPolicy::with_optimal_target(
        &problem.solver,
        &demand_model,
    )));

    println!("=== Monte Carlo Evaluation ({} runs) ===", problem.simulation.runs);
    if let Some(v0) = solution.expected_cost(problem.simulation.initial_inventory) {
        println!("Dynamic programming expected cost: {:.2}", v0);
    }
    for strategy in strategies.iter_mut() {
        let report = sim.run(&mut **strategy)?;
        println!(
            "{:>14}: mean {:>10.2}  std {:>8.2}  VaR95 {:>10.2}  VaR99 {:>10.2}",
            report.policy,
            report.mean_cost,
            report.std_dev,
            report.value_at_risk(0.95)?,
            report.value_at_risk(0.99)?
        );
    }

    let (optimistic, pessimistic) = demand::deterministic_scenarios(&demand_model);
    println!("\n=== Deterministic Scenarios ===");
    let mut optimal = OptimalPolicy::new(solution.policy.clone());
    for (label, level) in [("optimistic", optimistic), ("pessimistic", pessimistic)] {
        let path = demand::generate_constant_demand(problem.solver.horizon, level);
        let records = sim.trace(&mut optimal, &path)?;
        let breakdown = cost_breakdown(&records);
        println!(
            "{:>12} (D={}): purchase {:.2}  holding {:.2}  shortage {:.2}  total {:.2}",
            label,
            level,
            breakdown.purchase,
            breakdown.holding,
            breakdown.shortage,
            breakdown.total()
        );
        if label == "pessimistic" {
            if let Some(path) = trace {
                reporting::write_simulation_log(path, &records)?;
            }
        }
    }

    if demand_model.mean() > 0.0 {
        let path = demand::generate_poisson_demand(problem.solver.horizon, demand_model.mean())?;
        let records = sim.trace(&mut optimal, &path)?;
        println!(
            "{:>12} (mean {:.2}): total {:.2}",
            "poisson",
            demand_model.mean(),
            cost_breakdown(&records).total()
        );
    }
    Ok(())
}
