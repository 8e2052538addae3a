//! ---
//! vtb_section: "01-core-functionality"
//! vtb_subsection: "module"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Shared primitives and utilities for the test bench runtime."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

fn default_vehicle_name() -> String {
    "TestVehicle".to_owned()
}

fn default_max_load() -> u32 {
    1000
}

fn default_terrain_capability() -> Vec<String> {
    vec!["Off-road".to_owned(), "Highway".to_owned()]
}

fn default_durability() -> u32 {
    5000
}

fn default_scenario_load() -> u32 {
    1200
}

fn default_scenario_terrain() -> String {
    "Mountain".to_owned()
}

fn default_durability_iterations() -> u32 {
    4500
}

fn default_database_path() -> PathBuf {
    PathBuf::from("test_results.txt")
}

fn default_load_increment() -> u32 {
    100
}

fn default_durability_increment() -> u32 {
    500
}

fn default_simulation_samples() -> usize {
    5
}

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Primary configuration object for a test bench run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub scenarios: ScenarioConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub improvements: ImprovementConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
///
/// `source` is `None` when no file was found and the built-in sample run is used.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &str = "VTB_CONFIG";

    /// Load configuration, falling back to built-in defaults when no file exists.
    ///
    /// Lookup order: the `VTB_CONFIG` environment variable, the explicit path,
    /// then each candidate in turn. An explicit path that does not exist is an error.
    pub fn load_with_source<P: AsRef<Path>>(
        explicit: Option<&Path>,
        candidates: &[P],
    ) -> Result<LoadedAppConfig> {
        let env_override = std::env::var_os(Self::ENV_CONFIG_PATH).map(PathBuf::from);
        Self::resolve(env_override.as_deref(), explicit, candidates)
    }

    /// Same lookup as [`AppConfig::load_with_source`] with the environment value passed in.
    pub fn resolve<P: AsRef<Path>>(
        env_override: Option<&Path>,
        explicit: Option<&Path>,
        candidates: &[P],
    ) -> Result<LoadedAppConfig> {
        if let Some(path) = env_override.filter(|p| !p.as_os_str().is_empty()) {
            let config = Self::from_path(path)?;
            return Ok(LoadedAppConfig {
                config,
                source: Some(path.to_path_buf()),
            });
        }

        if let Some(path) = explicit {
            let config = Self::from_path(path)?;
            return Ok(LoadedAppConfig {
                config,
                source: Some(path.to_path_buf()),
            });
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!("no configuration file found, using built-in sample run");
        Ok(LoadedAppConfig {
            config: Self::default(),
            source: None,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.vehicle.name.trim().is_empty() {
            return Err(anyhow!("vehicle name must not be empty"));
        }
        if self.simulation.samples == 0 {
            return Err(anyhow!("simulation samples must be greater than zero"));
        }
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Vehicle under test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    #[serde(default = "default_vehicle_name")]
    pub name: String,
    #[serde(default = "default_max_load")]
    pub max_load: u32,
    #[serde(default = "default_terrain_capability")]
    pub terrain_capability: Vec<String>,
    #[serde(default = "default_durability")]
    pub durability: u32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            name: default_vehicle_name(),
            max_load: default_max_load(),
            terrain_capability: default_terrain_capability(),
            durability: default_durability(),
        }
    }
}

/// Parameters for the three canned scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_scenario_load")]
    pub load: u32,
    #[serde(default = "default_scenario_terrain")]
    pub terrain: String,
    #[serde(default = "default_durability_iterations")]
    pub durability_iterations: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            load: default_scenario_load(),
            terrain: default_scenario_terrain(),
            durability_iterations: default_durability_iterations(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// When the improvement pass mutates the vehicle.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImprovementPolicy {
    /// Apply every scenario's improvement regardless of its outcome.
    #[default]
    Always,
    /// Apply improvements only for scenarios that failed.
    OnFailure,
}

impl std::str::FromStr for ImprovementPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(ImprovementPolicy::Always),
            "on-failure" | "on_failure" => Ok(ImprovementPolicy::OnFailure),
            other => Err(anyhow!("unknown improvement policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementConfig {
    #[serde(default)]
    pub policy: ImprovementPolicy,
    #[serde(default = "default_load_increment")]
    pub load_increment: u32,
    #[serde(default = "default_durability_increment")]
    pub durability_increment: u32,
}

impl Default for ImprovementConfig {
    fn default() -> Self {
        Self {
            policy: ImprovementPolicy::default(),
            load_increment: default_load_increment(),
            durability_increment: default_durability_increment(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_simulation_samples")]
    pub samples: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            samples: default_simulation_samples(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
        }
    }
}
