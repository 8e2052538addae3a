//! ---
//! vtb_section: "11-simulation"
//! vtb_subsection: "01-bootstrap"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Simulation module exports and shared types."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
//! Predictive test-case generation for the vehicle test bench.
//!
//! The generator is detached from any vehicle: it fabricates illustrative
//! cases from fixed ranges, driven by an injectable random source.

pub mod generator;

pub use generator::{
    PredictiveSimulation, SimulatedCase, DEFAULT_SAMPLES, DURABILITY_RANGE, LOAD_RANGE,
    TERRAIN_POOL,
};
