//! ---
//! vtb_section: "11-simulation"
//! vtb_subsection: "module"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Predictive simulation engine."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
use std::fmt;
use std::ops::RangeInclusive;

use rand::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Terrains a simulated case may be drawn from.
pub const TERRAIN_POOL: [&str; 4] = ["Off-road", "Highway", "Mountain", "Desert"];
/// Inclusive load range for simulated cases.
pub const LOAD_RANGE: RangeInclusive<u32> = 500..=1500;
/// Inclusive durability range for simulated cases.
pub const DURABILITY_RANGE: RangeInclusive<u32> = 3000..=7000;
pub const DEFAULT_SAMPLES: usize = 5;

/// One fabricated test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulatedCase {
    /// 1-based position within the run.
    pub index: usize,
    pub load: u32,
    pub durability: u32,
    pub terrain: String,
}

impl fmt::Display for SimulatedCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Test Case {}: Load = {}, Terrain = {}, Durability = {}",
            self.index, self.load, self.terrain, self.durability
        )
    }
}

/// Draws independent uniform samples for load, durability and terrain.
#[derive(Debug)]
pub struct PredictiveSimulation<R: Rng = StdRng> {
    rng: R,
    samples: usize,
}

impl PredictiveSimulation<StdRng> {
    /// Deterministic generator for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> PredictiveSimulation<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            samples: DEFAULT_SAMPLES,
        }
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Produce a full batch of cases. Each call draws fresh samples.
    pub fn run(&mut self) -> Vec<SimulatedCase> {
        let cases: Vec<_> = (1..=self.samples).map(|index| self.next_case(index)).collect();
        debug!(samples = cases.len(), "predictive simulation complete");
        cases
    }

    fn next_case(&mut self, index: usize) -> SimulatedCase {
        let load = self.rng.gen_range(LOAD_RANGE);
        let durability = self.rng.gen_range(DURABILITY_RANGE);
        let terrain = TERRAIN_POOL[self.rng.gen_range(0..TERRAIN_POOL.len())];
        SimulatedCase {
            index,
            load,
            durability,
            terrain: terrain.to_owned(),
        }
    }
}
