//! ---
//! vtb_section: "02-test-harness"
//! vtb_subsection: "module"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Vehicle scenarios, result recording and improvements."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
use std::fmt;

use tracing::debug;
use vtb_common::ScenarioConfig;

use crate::record::{ResultRecord, ScenarioKind, Verdict};
use crate::vehicle::Vehicle;

/// Fixed-width rule printed after every scenario report.
pub const SEPARATOR: &str = "----------------------------------------";

/// Canned test scenarios, each carrying its own parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestScenario {
    Load { load: u32 },
    Terrain { terrain: String },
    Durability { iterations: u32 },
}

impl TestScenario {
    pub fn load(load: u32) -> Self {
        TestScenario::Load { load }
    }

    pub fn terrain(terrain: impl Into<String>) -> Self {
        TestScenario::Terrain {
            terrain: terrain.into(),
        }
    }

    pub fn durability(iterations: u32) -> Self {
        TestScenario::Durability { iterations }
    }

    /// Load, terrain and durability scenarios in that order.
    pub fn standard_suite(config: &ScenarioConfig) -> Vec<Self> {
        vec![
            Self::load(config.load),
            Self::terrain(config.terrain.clone()),
            Self::durability(config.durability_iterations),
        ]
    }

    pub fn kind(&self) -> ScenarioKind {
        match self {
            TestScenario::Load { .. } => ScenarioKind::Load,
            TestScenario::Terrain { .. } => ScenarioKind::Terrain,
            TestScenario::Durability { .. } => ScenarioKind::Durability,
        }
    }

    pub fn parameter(&self) -> String {
        match self {
            TestScenario::Load { load } => load.to_string(),
            TestScenario::Terrain { terrain } => terrain.clone(),
            TestScenario::Durability { iterations } => iterations.to_string(),
        }
    }

    pub fn perform_test(&self, vehicle: &Vehicle) -> TestOutcome {
        let (passed, report) = match self {
            TestScenario::Load { load } => {
                let passed = *load <= vehicle.max_load();
                let report = if passed {
                    format!(
                        "Load Test Passed: {} can carry {} units.",
                        vehicle.name(),
                        load
                    )
                } else {
                    format!(
                        "Load Test Failed: {} units exceeded capacity of {} for {}.",
                        load,
                        vehicle.max_load(),
                        vehicle.name()
                    )
                };
                (passed, report)
            }
            TestScenario::Terrain { terrain } => {
                let passed = vehicle.supports_terrain(terrain);
                let report = if passed {
                    format!(
                        "Terrain Test Passed: {} can handle {} terrain.",
                        vehicle.name(),
                        terrain
                    )
                } else {
                    format!(
                        "Terrain Test Failed: {} cannot handle {} terrain.",
                        vehicle.name(),
                        terrain
                    )
                };
                (passed, report)
            }
            TestScenario::Durability { iterations } => {
                let passed = *iterations <= vehicle.durability();
                let report = if passed {
                    format!(
                        "Durability Test Passed: {} survived {} iterations.",
                        vehicle.name(),
                        iterations
                    )
                } else {
                    format!(
                        "Durability Test Failed: {} cannot withstand {} iterations (rated {}).",
                        vehicle.name(),
                        iterations,
                        vehicle.durability()
                    )
                };
                (passed, report)
            }
        };
        debug!(scenario = %self.kind(), parameter = %self.parameter(), passed, "scenario evaluated");
        TestOutcome {
            scenario: self.clone(),
            passed,
            report,
        }
    }

    /// Human-readable hint; improvements are driven by [`TestOutcome`], not this text.
    pub fn improvement_suggestion(&self) -> String {
        match self {
            TestScenario::Load { .. } => {
                "Consider increasing the vehicle's max load capacity.".to_owned()
            }
            TestScenario::Terrain { terrain } => {
                format!("Consider adding terrain capability: {}", terrain)
            }
            TestScenario::Durability { .. } => {
                "Consider improving the vehicle's durability.".to_owned()
            }
        }
    }

    pub fn result_for_database(&self, passed: bool) -> ResultRecord {
        ResultRecord::new(self.kind(), self.parameter(), Verdict::from_passed(passed))
    }
}

/// Structured result of running one scenario against a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    scenario: TestScenario,
    passed: bool,
    report: String,
}

impl TestOutcome {
    pub fn scenario(&self) -> &TestScenario {
        &self.scenario
    }

    pub fn kind(&self) -> ScenarioKind {
        self.scenario.kind()
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn suggestion(&self) -> String {
        self.scenario.improvement_suggestion()
    }

    pub fn record(&self) -> ResultRecord {
        self.scenario.result_for_database(self.passed)
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.report)?;
        write!(f, "{}", SEPARATOR)
    }
}
