//! ---
//! vtb_section: "02-test-harness"
//! vtb_subsection: "module"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Vehicle scenarios, result recording and improvements."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
//! Vehicle test harness: a vehicle model, three canned scenarios, a result
//! manager that persists rows to an append-only file, and the improvement pass.

pub mod database;
pub mod errors;
pub mod manager;
pub mod record;
pub mod scenario;
pub mod vehicle;

use tracing::info;

pub use database::{append_records, load_database};
pub use errors::{HarnessError, Result};
pub use manager::{Improvement, TestResultManager};
pub use record::{ResultRecord, ScenarioKind, Verdict};
pub use scenario::{TestOutcome, TestScenario, SEPARATOR};
pub use vehicle::Vehicle;

/// Run each scenario against `vehicle` in order.
pub fn run_scenarios(vehicle: &Vehicle, scenarios: &[TestScenario]) -> Vec<TestOutcome> {
    let outcomes: Vec<_> = scenarios
        .iter()
        .map(|scenario| scenario.perform_test(vehicle))
        .collect();
    info!(
        vehicle = %vehicle.name(),
        scenarios = outcomes.len(),
        passed = outcomes.iter().filter(|outcome| outcome.passed()).count(),
        "scenario suite complete"
    );
    outcomes
}
