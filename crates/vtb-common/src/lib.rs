//! ---
//! vtb_section: "01-core-functionality"
//! vtb_subsection: "module"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Shared primitives and utilities for the test bench runtime."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
//! Shared primitives for the vehicle test bench workspace.
//! This crate exposes configuration loading and tracing setup consumed by the
//! harness crates and the `vtb-run` driver.

pub mod config;
pub mod logging;

pub use config::{
    AppConfig, DatabaseConfig, ImprovementConfig, ImprovementPolicy, LoadedAppConfig,
    LoggingConfig, ScenarioConfig, SimulationConfig, VehicleConfig,
};
pub use logging::{init_tracing, LogFormat, LogTarget};
