//! Shared fixtures for the integration tests.

use std::path::PathBuf;

use bargeflow_lib::{RiverDepthProfile, Scenario};

/// Path to the fixtures directory shared with the CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// The reference scenario loaded from its JSON fixture.
#[allow(dead_code)]
pub fn reference_scenario() -> Scenario {
    Scenario::from_path(&fixtures_dir().join("reference_scenario.json"))
        .expect("load fixture reference_scenario.json")
}

/// Reference scenario with a custom depth profile.
#[allow(dead_code)]
pub fn scenario_with_depths(depths: [f64; 12]) -> Scenario {
    let mut scenario = Scenario::reference();
    scenario.depth_profile = RiverDepthProfile::new(depths).expect("valid depth profile");
    scenario
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64, relative: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= relative * scale,
        "expected {expected}, got {actual}"
    );
}
