//! End-to-end checks of the public solver API on small hand-checkable problems.

use inventory_dp::io::problem::ProblemFile;
use inventory_dp::solver::reorder_threshold;
use inventory_dp::{
    coerce_dimension, reorder_levels, summarize, CostParams, DemandModel, InventoryError,
    NewsvendorPolicy, OptimalPolicy, PolicySimulation, ReorderPointPolicy, SimulationConfig,
    Solver, SolverConfig,
};

fn solve(config: SolverConfig, demand: DemandModel) -> inventory_dp::Solution {
    Solver::new(config, demand).unwrap().solve().unwrap()
}

#[test]
fn worked_two_period_scenario() {
    let config = SolverConfig::new(2, 5, 5, CostParams::uniform(2, 1.0, 0.0, 100.0));
    let demand = DemandModel::new(vec![1], vec![1.0]).unwrap();
    let solution = solve(config, demand);

    assert_eq!(solution.values.get(1, 0), Some(1.0));
    assert_eq!(solution.policy.get(1, 0), Some(1));
    assert_eq!(solution.values.get(1, 1), Some(0.0));
    assert_eq!(solution.policy.get(1, 1), Some(0));
    assert_eq!(solution.values.get(0, 0), Some(2.0));
    assert_eq!(solution.policy.get(0, 0), Some(1));
    assert!(solution.values.row(2).iter().all(|&v| v == 0.0));
}

#[test]
fn ties_resolve_to_the_smallest_order() {
    // Nothing costs anything, so every order ties at zero.
    let config = SolverConfig::new(3, 6, 6, CostParams::uniform(3, 0.0, 0.0, 0.0));
    let demand = DemandModel::uniform(0, 4).unwrap();
    let solution = solve(config, demand);

    assert!(solution.policy.rows().flatten().all(|&x| x == 0));
    assert!(solution.values.rows().flatten().all(|&v| v == 0.0));
}

#[test]
fn large_penalty_buys_the_smallest_shortage_free_order() {
    let config = SolverConfig::new(1, 5, 5, CostParams::uniform(1, 1.0, 0.0, 1000.0));
    let demand = DemandModel::new(vec![1, 2], vec![0.5, 0.5]).unwrap();
    let solution = solve(config, demand);

    assert_eq!(solution.policy.row(0), &[2, 1, 0, 0, 0, 0]);
    assert_eq!(solution.values.get(0, 0), Some(2.0));
}

#[test]
fn order_up_to_grows_with_the_penalty() {
    let demand = DemandModel::truncated_poisson(3.0, 10).unwrap();
    let mut previous = 0;
    for shortage in [5.0, 20.0, 100.0] {
        let config = SolverConfig::new(1, 20, 20, CostParams::uniform(1, 1.0, 1.0, shortage));
        let solution = solve(config, demand.clone());
        let levels = reorder_levels(&solution.policy, 0).unwrap();
        assert!(levels.order_up_to >= previous);
        previous = levels.order_up_to;
    }
}

#[test]
fn distribution_validation_round_trip() {
    assert!(matches!(
        DemandModel::new(vec![0, 1, 2], vec![0.5, 0.27, 0.2]),
        Err(InventoryError::Validation(_))
    ));
    assert!(DemandModel::new(vec![0, 1, 2], vec![0.5, 0.3, 0.2 + 1e-9]).is_ok());
    assert!(DemandModel::new(vec![0, 1, 2], vec![0.5, 0.3, 0.2 - 1e-9]).is_ok());
}

#[test]
fn configuration_errors_surface_at_construction() {
    let demand = DemandModel::point_mass(1);

    let short_costs = SolverConfig::new(4, 5, 5, CostParams::uniform(3, 1.0, 1.0, 1.0));
    assert!(matches!(
        Solver::new(short_costs, demand.clone()),
        Err(InventoryError::Configuration(_))
    ));

    let negative_penalty = SolverConfig::new(2, 5, 5, CostParams::uniform(2, 1.0, 1.0, -1.0));
    assert!(matches!(
        Solver::new(negative_penalty, demand),
        Err(InventoryError::Configuration(_))
    ));

    assert!(matches!(
        coerce_dimension("horizon", -3.0),
        Err(InventoryError::Configuration(_))
    ));
    assert_eq!(coerce_dimension("max_inventory", 100.7).unwrap(), 100);
}

#[test]
fn constant_demand_orders_every_period() {
    // Twelve periods of demand 5 with no holding incentive to stock ahead.
    let config = SolverConfig::new(12, 100, 100, CostParams::uniform(12, 10.0, 2.0, 20.0));
    let solution = solve(config, DemandModel::point_mass(5));

    let mut inventory = 0;
    let mut total_order = 0;
    for t in 0..12 {
        let order = solution.policy.get(t, inventory).unwrap();
        total_order += order;
        inventory = (inventory + order).saturating_sub(5);
    }
    assert_eq!(total_order, 60);
    assert_eq!(solution.expected_cost(0), Some(600.0));

    for period in summarize(&solution.policy) {
        assert_eq!(period.reorder_point, Some(0));
        assert_eq!(period.order_up_to, Some(5));
    }
}

#[test]
fn threshold_matches_solved_values() {
    let config = SolverConfig::new(1, 10, 10, CostParams::uniform(1, 1.0, 0.0, 50.0));
    let solution = solve(config, DemandModel::point_mass(4));
    // Below demand the gap is bought at unit cost: V[0][I] = 4 - I, then 0.
    assert_eq!(solution.values.row(0)[..6], [4.0, 3.0, 2.0, 1.0, 0.0, 0.0]);
    assert_eq!(reorder_threshold(&solution.values, 0, 1.0), Some(0));
    assert_eq!(reorder_threshold(&solution.values, 0, 0.5), Some(4));
}

#[test]
fn optimal_policy_is_no_worse_than_heuristics_in_simulation() {
    let config = SolverConfig::new(6, 30, 15, CostParams::uniform(6, 2.0, 1.0, 12.0));
    let demand = DemandModel::truncated_poisson(4.0, 12).unwrap();
    let solution = solve(config.clone(), demand.clone());

    let sim_config = SimulationConfig {
        runs: 5_000,
        initial_inventory: 0,
        seed: Some(2024),
    };
    let sim = PolicySimulation::new(sim_config, config.clone(), demand.clone()).unwrap();

    let optimal = sim
        .run(&mut OptimalPolicy::new(solution.policy.clone()))
        .unwrap();
    let newsvendor = sim
        .run(&mut NewsvendorPolicy::with_optimal_target(&config, &demand))
        .unwrap();
    assert!(optimal.mean_cost <= newsvendor.mean_cost * 1.02);

    if let Some(mut s_s) = ReorderPointPolicy::from_solved(&solution.policy, 0, &config) {
        let heuristic = sim.run(&mut s_s).unwrap();
        assert!(optimal.mean_cost <= heuristic.mean_cost * 1.02);
    }

    let var95 = optimal.value_at_risk(0.95).unwrap();
    assert!(var95 >= optimal.mean_cost);
    assert!(var95 <= optimal.max_cost);
}

#[test]
fn problem_file_drives_a_full_solve() {
    let text = r#"{
        "solver": {"horizon": 2, "max_inventory": 5, "max_order": 5,
                   "costs": {"unit_costs": [1, 1], "holding": 0, "shortage": 100}},
        "demand": {"kind": "constant", "demand": 1}
    }"#;
    let problem: ProblemFile = serde_json::from_str(text).unwrap();
    let solution = solve(problem.solver.clone(), problem.demand_model().unwrap());
    assert_eq!(solution.expected_cost(0), Some(2.0));
}

fn expected_evaluations(horizon: usize, max_inventory: usize, max_order: usize, support: usize) -> u64 {
    let orders: usize = (0..=max_inventory)
        .map(|level| max_order.min(max_inventory - level) + 1)
        .sum();
    (horizon * orders * support) as u64
}

#[test]
fn work_grows_linearly_in_horizon_and_support() {
    let costs = |t| CostParams::uniform(t, 1.0, 1.0, 8.0);
    let narrow = DemandModel::uniform(0, 3).unwrap();
    let wide = DemandModel::uniform(0, 7).unwrap();

    let base = solve(SolverConfig::new(4, 12, 6, costs(4)), narrow.clone());
    assert_eq!(base.evaluations, expected_evaluations(4, 12, 6, 4));

    let longer = solve(SolverConfig::new(8, 12, 6, costs(8)), narrow.clone());
    assert_eq!(longer.evaluations, 2 * base.evaluations);

    let wider = solve(SolverConfig::new(4, 12, 6, costs(4)), wide);
    assert_eq!(wider.evaluations, 2 * base.evaluations);

    // Inventory and order caps enter through the feasible-order count only.
    let roomier = solve(SolverConfig::new(4, 24, 6, costs(4)), narrow.clone());
    assert_eq!(roomier.evaluations, expected_evaluations(4, 24, 6, 4));
    let bigger_orders = solve(SolverConfig::new(4, 12, 12, costs(4)), narrow);
    assert_eq!(bigger_orders.evaluations, expected_evaluations(4, 12, 12, 4));
    assert!(bigger_orders.evaluations > base.evaluations);
}

#[test]
#[ignore = "wall-clock timing; run with --ignored on a quiet machine"]
fn solve_time_scales_roughly_linearly_in_horizon() {
    let demand = DemandModel::truncated_poisson(20.0, 60).unwrap();
    let timed = |horizon| {
        let config = SolverConfig::new(horizon, 200, 80, CostParams::uniform(horizon, 1.0, 1.0, 8.0));
        solve(config, demand.clone()).elapsed.as_secs_f64()
    };

    // Warm up allocator and caches before measuring.
    timed(5);
    let short = timed(20);
    let long = timed(80);
    let ratio = long / short;
    assert!(ratio > 1.5 && ratio < 12.0, "4x horizon took {:.2}x as long", ratio);
}
