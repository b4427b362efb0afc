use bargeflow_lib::optimizer::{coordinate_descent, FeasibleOptions};
use bargeflow_lib::{
    optimize_design_and_operation, simulate_year, ConvoyDesign, OperatingPlan, OptimizerConfig,
    Scenario,
};
use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/reference_scenario.json")
}

static SCENARIO: Lazy<Scenario> =
    Lazy::new(|| Scenario::from_path(&fixture_path()).expect("fixture loads"));
static SEQUENTIAL: Lazy<OptimizerConfig> = Lazy::new(|| OptimizerConfig {
    parallel: false,
    ..OptimizerConfig::default()
});
static OPTIONS: Lazy<(f64, FeasibleOptions)> = Lazy::new(|| {
    let design = ConvoyDesign::sized_for(&SCENARIO, 6.0).expect("design sizes");
    let speeds = OptimizerConfig::default().operating_speeds(6.0);
    let options =
        FeasibleOptions::build(&SCENARIO, &design, &speeds, 0.001).expect("feasible design");
    (design.fixed_annual_cost(), options)
});

fn benchmark_simulation(c: &mut Criterion) {
    let scenario = &*SCENARIO;

    c.bench_function("simulate_year_cruise", |b| {
        let plan = OperatingPlan::default();
        b.iter(|| {
            let result = simulate_year(scenario, &plan).expect("simulates");
            black_box(result.unit_cost)
        });
    });

    c.bench_function("coordinate_descent_6kn", |b| {
        let (fixed, options) = &*OPTIONS;
        let table = options.values();
        b.iter(|| {
            let outcome = coordinate_descent(*fixed, &table).expect("options");
            black_box(outcome.objective)
        });
    });

    c.bench_function("optimize_sequential", |b| {
        let config = &*SEQUENTIAL;
        b.iter(|| {
            let result = optimize_design_and_operation(scenario, config).expect("optimises");
            black_box(result.design_speed_curve.len())
        });
    });

    c.bench_function("optimize_parallel", |b| {
        let config = OptimizerConfig::default();
        b.iter(|| {
            let result = optimize_design_and_operation(scenario, &config).expect("optimises");
            black_box(result.design_speed_curve.len())
        });
    });
}

criterion_group!(benches, benchmark_simulation);
criterion_main!(benches);
