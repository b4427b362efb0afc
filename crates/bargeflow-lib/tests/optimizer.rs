mod common;

use bargeflow_lib::{
    optimize_design_and_operation, simulate_year, OperatingPlan, OptimizerConfig, Scenario,
};

use common::{assert_close, scenario_with_depths};

fn sequential() -> OptimizerConfig {
    OptimizerConfig {
        parallel: false,
        ..OptimizerConfig::default()
    }
}

#[test]
fn reference_scenario_has_a_winner() {
    let result = optimize_design_and_operation(&Scenario::reference(), &OptimizerConfig::default())
        .expect("optimises");

    let best = result.best_design.as_ref().expect("viable design");
    assert_eq!(result.monthly_table.len(), 12);
    assert_eq!(best.operating_points.len(), 12);
    assert_eq!(result.design_speed_curve.len(), 61);
    assert!(result.infeasible_design_speeds.is_empty());

    assert_eq!(best.design_speed_knots, 4.8);
    assert_close(best.objective, 61.6313, 1e-5);

    let lowest = result
        .design_speed_curve
        .iter()
        .map(|point| point.objective)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(best.objective, lowest);
}

#[test]
fn winner_beats_constant_cruise_speed() {
    let scenario = Scenario::reference();
    let optimised =
        optimize_design_and_operation(&scenario, &sequential()).expect("optimises");
    let cruise = simulate_year(&scenario, &OperatingPlan::default()).expect("simulates");
    let best = optimised.best_design.expect("viable design");
    assert!(best.objective < cruise.unit_cost);
}

#[test]
fn chosen_months_fit_the_installed_power() {
    let result = optimize_design_and_operation(&Scenario::reference(), &sequential())
        .expect("optimises");
    let best = result.best_design.expect("viable design");

    for (month, point) in result.monthly_table.iter().zip(&best.operating_points) {
        let required = month.required_power_hp.expect("feasible month has power");
        assert!(required <= best.installed_power_hp * 1.001);
        assert!(month.cargo_t > 0.0);
        assert!(point.speed_knots >= 3.0);
        assert!(point.speed_knots < best.design_speed_knots + 2.0);
        assert_eq!(point.draft_m, month.draft_m);
    }
}

#[test]
fn simulating_the_winner_reproduces_its_objective() {
    let scenario = Scenario::reference();
    let result = optimize_design_and_operation(&scenario, &sequential()).expect("optimises");
    let best = result.best_design.expect("viable design");

    let plan = OperatingPlan {
        monthly_speeds: Some(best.operating_points.iter().map(|p| p.speed_knots).collect()),
        forced_power: Some(best.installed_power_hp),
    };
    let replay = simulate_year(&scenario, &plan).expect("simulates");

    assert_close(replay.unit_cost, best.objective, 1e-9);
    assert_close(replay.total_cargo_t, best.total_cargo_t, 1e-9);
    assert!(replay.months.iter().all(|month| month.within_installed_power));
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let scenario = Scenario::reference();
    let in_order = optimize_design_and_operation(&scenario, &sequential()).expect("sequential");
    let parallel =
        optimize_design_and_operation(&scenario, &OptimizerConfig::default()).expect("parallel");
    let pooled = optimize_design_and_operation(
        &scenario,
        &OptimizerConfig {
            workers: 2,
            ..OptimizerConfig::default()
        },
    )
    .expect("dedicated pool");

    assert_eq!(in_order, parallel);
    assert_eq!(in_order, pooled);
}

#[test]
fn tight_keel_clearance_rules_out_slow_designs() {
    let mut scenario = Scenario::reference();
    scenario.keel_clearance_m = 0.2;

    let result = optimize_design_and_operation(&scenario, &OptimizerConfig::default())
        .expect("optimises without aborting");

    assert!(!result.infeasible_design_speeds.is_empty());
    assert!(result.best_design.is_some());
    assert_eq!(
        result.infeasible_design_speeds.len() + result.design_speed_curve.len(),
        61
    );

    let slowest_feasible = result
        .design_speed_curve
        .iter()
        .map(|point| point.design_speed_knots)
        .fold(f64::INFINITY, f64::min);
    let fastest_infeasible = result
        .infeasible_design_speeds
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(fastest_infeasible < slowest_feasible);
}

#[test]
fn unloadable_month_means_no_viable_design() {
    let scenario = scenario_with_depths([
        7.72, 9.87, 10.86, 10.98, 8.43, 6.35, 5.12, 3.89, 3.30, 0.60, 3.65, 5.23,
    ]);

    let result = optimize_design_and_operation(&scenario, &OptimizerConfig::default())
        .expect("no viable design is not an error");

    assert!(!result.is_viable());
    assert!(result.best_design.is_none());
    assert!(result.monthly_table.is_empty());
    assert!(result.design_speed_curve.is_empty());
    assert_eq!(result.infeasible_design_speeds.len(), 61);
}

#[test]
fn channel_narrower_than_one_hull_means_no_viable_design() {
    let mut scenario = Scenario::reference();
    scenario.params.channel.width_m = 9.0;

    let result = optimize_design_and_operation(&scenario, &sequential())
        .expect("narrow channel is not an error");

    assert!(!result.is_viable());
    assert!(result.monthly_table.is_empty());
    assert!(result.design_speed_curve.is_empty());
    assert_eq!(result.infeasible_design_speeds.len(), 61);
}

#[test]
fn zero_keel_clearance_grounds_shallow_months() {
    let mut scenario = Scenario::reference();
    scenario.keel_clearance_m = 0.0;

    let result = optimize_design_and_operation(&scenario, &sequential())
        .expect("zero clearance is not an error");

    assert!(result.best_design.is_none());
    assert_eq!(result.infeasible_design_speeds.len(), 61);
}

#[test]
fn every_design_converges() {
    let config = OptimizerConfig {
        min_design_speed: 5.0,
        max_design_speed: 7.0,
        design_step: 0.5,
        ..sequential()
    };
    let result = optimize_design_and_operation(&Scenario::reference(), &config).expect("optimises");

    let speeds: Vec<f64> = result
        .design_speed_curve
        .iter()
        .map(|point| point.design_speed_knots)
        .collect();
    assert_eq!(speeds, vec![5.0, 5.5, 6.0, 6.5, 7.0]);
    assert!(result.design_speed_curve.iter().all(|point| point.sweeps >= 1));
    assert!(result
        .design_speed_curve
        .iter()
        .all(|point| point.objective.is_finite()));
}

#[test]
fn invalid_config_is_rejected() {
    let config = OptimizerConfig {
        design_step: 0.0,
        ..OptimizerConfig::default()
    };
    assert!(optimize_design_and_operation(&Scenario::reference(), &config).is_err());
}
