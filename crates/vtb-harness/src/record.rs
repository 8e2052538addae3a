//! ---
//! vtb_section: "02-test-harness"
//! vtb_subsection: "module"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Vehicle scenarios, result recording and improvements."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
//! Result rows as stored in the results file.
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Scenario kinds; the serialized names are the first column of a result row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ScenarioKind {
    #[serde(rename = "Load Test")]
    #[strum(to_string = "Load Test")]
    Load,
    #[serde(rename = "Terrain Test")]
    #[strum(to_string = "Terrain Test")]
    Terrain,
    #[serde(rename = "Durability Test")]
    #[strum(to_string = "Durability Test")]
    Durability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// One `<Kind> Test,<parameter>,<Pass|Fail>` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub scenario: ScenarioKind,
    pub parameter: String,
    pub verdict: Verdict,
}

impl ResultRecord {
    pub fn new(scenario: ScenarioKind, parameter: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            scenario,
            parameter: parameter.into(),
            verdict,
        }
    }
}

/// Unescaped form, used for console output.
impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.scenario, self.parameter, self.verdict)
    }
}
