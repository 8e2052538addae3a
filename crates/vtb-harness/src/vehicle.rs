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

use vtb_common::VehicleConfig;

/// Vehicle under test.
///
/// Scenarios only ever borrow a vehicle immutably; the improvement pass in
/// [`crate::manager::TestResultManager`] is the one place that mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    name: String,
    max_load: u32,
    terrain_capability: Vec<String>,
    durability: u32,
}

impl Vehicle {
    pub fn new<I, S>(name: impl Into<String>, max_load: u32, terrains: I, durability: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            max_load,
            terrain_capability: terrains.into_iter().map(Into::into).collect(),
            durability,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_load(&self) -> u32 {
        self.max_load
    }

    pub fn terrain_capability(&self) -> &[String] {
        &self.terrain_capability
    }

    pub fn durability(&self) -> u32 {
        self.durability
    }

    /// Case-sensitive exact match against the terrain list.
    pub fn supports_terrain(&self, terrain: &str) -> bool {
        self.terrain_capability.iter().any(|known| known == terrain)
    }

    pub fn increase_max_load(&mut self, increment: u32) {
        self.max_load = self.max_load.saturating_add(increment);
    }

    pub fn increase_durability(&mut self, increment: u32) {
        self.durability = self.durability.saturating_add(increment);
    }

    /// Duplicates are kept; the list is ordered by insertion.
    pub fn add_terrain_capability(&mut self, terrain: impl Into<String>) {
        self.terrain_capability.push(terrain.into());
    }
}

impl From<&VehicleConfig> for Vehicle {
    fn from(config: &VehicleConfig) -> Self {
        Self::new(
            config.name.clone(),
            config.max_load,
            config.terrain_capability.iter().cloned(),
            config.durability,
        )
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (max load {}, durability {}, terrain [{}])",
            self.name,
            self.max_load,
            self.durability,
            self.terrain_capability.join(", ")
        )
    }
}
