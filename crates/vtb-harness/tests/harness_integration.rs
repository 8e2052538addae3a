//! ---
//! vtb_section: "02-test-harness"
//! vtb_subsection: "module"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Vehicle scenarios, result recording and improvements."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
use std::fs;

use anyhow::Result;
use tempfile::tempdir;
use vtb_common::{AppConfig, ImprovementPolicy};
use vtb_harness::{
    load_database, run_scenarios, ScenarioKind, TestResultManager, TestScenario, Vehicle, Verdict,
};
use vtb_sim::{PredictiveSimulation, DURABILITY_RANGE, LOAD_RANGE, TERRAIN_POOL};

fn sample_vehicle() -> Vehicle {
    Vehicle::new("TestVehicle", 1000, ["Off-road", "Highway"], 5000)
}

#[test]
fn sample_run_matches_documented_example() -> Result<()> {
    let dir = tempdir()?;
    let db_path = dir.path().join("test_results.txt");

    let config = AppConfig::default();
    let mut vehicle = Vehicle::from(&config.vehicle);
    let scenarios = TestScenario::standard_suite(&config.scenarios);
    let outcomes = run_scenarios(&vehicle, &scenarios);

    let verdicts: Vec<_> = outcomes.iter().map(|o| o.passed()).collect();
    assert_eq!(verdicts, vec![false, false, true]);

    let mut manager = TestResultManager::from_config(&config.improvements);
    for outcome in &outcomes {
        manager.record_outcome(outcome);
    }
    assert_eq!(manager.save_to_database(&db_path)?, 3);

    manager.process_improvements(&mut vehicle, &outcomes);
    assert_eq!(vehicle.max_load(), 1100);
    assert_eq!(vehicle.durability(), 5500);
    assert_eq!(
        vehicle.terrain_capability(),
        ["Off-road", "Highway", "Mountain"]
    );

    let contents = fs::read_to_string(&db_path)?;
    assert_eq!(
        contents,
        "Load Test,1200,Fail\nTerrain Test,Mountain,Fail\nDurability Test,4500,Pass\n"
    );
    Ok(())
}

#[test]
fn repeated_saves_append_without_deduplication() -> Result<()> {
    let dir = tempdir()?;
    let db_path = dir.path().join("results.txt");
    let vehicle = sample_vehicle();

    let mut manager = TestResultManager::new();
    for outcome in run_scenarios(&vehicle, &[TestScenario::load(1000)]) {
        manager.record_outcome(&outcome);
    }
    manager.save_to_database(&db_path)?;
    manager.save_to_database(&db_path)?;

    let rows = load_database(&db_path)?;
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .all(|row| row.scenario == ScenarioKind::Load && row.verdict == Verdict::Pass));
    Ok(())
}

#[test]
fn unwritable_database_surfaces_an_error() -> Result<()> {
    let dir = tempdir()?;
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "")?;

    let mut manager = TestResultManager::new();
    manager.record_outcome(&TestScenario::load(1).perform_test(&sample_vehicle()));
    assert!(manager.save_to_database(&blocker.join("results.txt")).is_err());
    Ok(())
}

#[test]
fn improved_vehicle_passes_previously_failing_terrain() {
    let mut vehicle = sample_vehicle();
    let scenarios = [TestScenario::terrain("Mountain")];
    let before = run_scenarios(&vehicle, &scenarios);
    assert!(!before[0].passed());

    TestResultManager::new()
        .with_policy(ImprovementPolicy::OnFailure)
        .process_improvements(&mut vehicle, &before);

    let after = run_scenarios(&vehicle, &scenarios);
    assert!(after[0].passed());
}

#[test]
fn seeded_simulation_is_reproducible_and_bounded() {
    let manager = TestResultManager::new();
    let first = manager.predictive_testing_simulation(&mut PredictiveSimulation::seeded(2024));
    let second = manager.predictive_testing_simulation(&mut PredictiveSimulation::seeded(2024));
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
    for case in &first {
        assert!(LOAD_RANGE.contains(&case.load));
        assert!(DURABILITY_RANGE.contains(&case.durability));
        assert!(TERRAIN_POOL.contains(&case.terrain.as_str()));
    }
}
