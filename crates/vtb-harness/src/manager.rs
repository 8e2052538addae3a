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
use std::path::Path;

use rand::Rng;
use tracing::{debug, info};
use vtb_common::{ImprovementConfig, ImprovementPolicy};
use vtb_sim::{PredictiveSimulation, SimulatedCase};

use crate::database;
use crate::errors::Result;
use crate::record::ResultRecord;
use crate::scenario::{TestOutcome, TestScenario};
use crate::vehicle::Vehicle;

/// A single change applied to the vehicle by the improvement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Improvement {
    MaxLoad { increment: u32 },
    Durability { increment: u32 },
    Terrain { terrain: String },
}

impl Improvement {
    fn apply(&self, vehicle: &mut Vehicle) {
        match self {
            Improvement::MaxLoad { increment } => vehicle.increase_max_load(*increment),
            Improvement::Durability { increment } => vehicle.increase_durability(*increment),
            Improvement::Terrain { terrain } => vehicle.add_terrain_capability(terrain.clone()),
        }
    }
}

impl fmt::Display for Improvement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Improvement::MaxLoad { increment } => write!(f, "max load increased by {}", increment),
            Improvement::Durability { increment } => {
                write!(f, "durability increased by {}", increment)
            }
            Improvement::Terrain { terrain } => write!(f, "terrain capability added: {}", terrain),
        }
    }
}

/// Collects result rows, persists them, and owns the vehicle improvement pass.
#[derive(Debug, Clone)]
pub struct TestResultManager {
    results: Vec<ResultRecord>,
    policy: ImprovementPolicy,
    load_increment: u32,
    durability_increment: u32,
}

impl Default for TestResultManager {
    fn default() -> Self {
        Self::from_config(&ImprovementConfig::default())
    }
}

impl TestResultManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ImprovementConfig) -> Self {
        Self {
            results: Vec::new(),
            policy: config.policy,
            load_increment: config.load_increment,
            durability_increment: config.durability_increment,
        }
    }

    pub fn with_policy(mut self, policy: ImprovementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ImprovementPolicy {
        self.policy
    }

    pub fn add_result(&mut self, record: ResultRecord) {
        self.results.push(record);
    }

    pub fn record_outcome(&mut self, outcome: &TestOutcome) {
        self.add_result(outcome.record());
    }

    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    /// Append every stored row to `path`. Rows stay in memory, so saving twice
    /// writes them twice.
    pub fn save_to_database(&self, path: &Path) -> Result<usize> {
        let written = database::append_records(path, &self.results)?;
        info!(path = %path.display(), rows = written, "results saved");
        Ok(written)
    }

    /// Apply one improvement per outcome according to the configured policy.
    ///
    /// Under [`ImprovementPolicy::Always`] passing scenarios are improved too.
    pub fn process_improvements(
        &self,
        vehicle: &mut Vehicle,
        outcomes: &[TestOutcome],
    ) -> Vec<Improvement> {
        let mut applied = Vec::new();
        for outcome in outcomes {
            if self.policy == ImprovementPolicy::OnFailure && outcome.passed() {
                debug!(scenario = %outcome.kind(), "scenario passed, improvement skipped");
                continue;
            }
            let improvement = self.improvement_for(outcome.scenario());
            improvement.apply(vehicle);
            debug!(scenario = %outcome.kind(), %improvement, "improvement applied");
            applied.push(improvement);
        }
        info!(vehicle = %vehicle, applied = applied.len(), "improvement pass complete");
        applied
    }

    /// Draw a batch of illustrative cases. Unrelated to the vehicle or recorded results.
    pub fn predictive_testing_simulation<R: Rng>(
        &self,
        simulation: &mut PredictiveSimulation<R>,
    ) -> Vec<SimulatedCase> {
        simulation.run()
    }

    fn improvement_for(&self, scenario: &TestScenario) -> Improvement {
        match scenario {
            TestScenario::Load { .. } => Improvement::MaxLoad {
                increment: self.load_increment,
            },
            TestScenario::Durability { .. } => Improvement::Durability {
                increment: self.durability_increment,
            },
            TestScenario::Terrain { terrain } => Improvement::Terrain {
                terrain: terrain.clone(),
            },
        }
    }
}
