//! ---
//! vtb_section: "05-external-interfaces"
//! vtb_subsection: "binary"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Driver CLI executing one test bench run."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
//! Runs the linear test bench flow: scenarios, results file, improvements,
//! then the predictive simulation. With no arguments the built-in sample
//! vehicle and parameters are used.
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use vtb_common::{init_tracing, AppConfig, ImprovementPolicy};
use vtb_harness::{run_scenarios, TestResultManager, TestScenario, Vehicle};
use vtb_sim::{PredictiveSimulation, SimulatedCase};

const SERVICE_NAME: &str = "vtb-run";
const DEFAULT_CONFIG: &str = "vtb.toml";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Run the vehicle test bench scenarios and predictive simulation",
    long_about = None
)]
struct Cli {
    /// Configuration file (TOML). Falls back to ./vtb.toml, then built-in defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Results file to append to
    #[arg(long, value_name = "FILE")]
    database: Option<PathBuf>,

    /// Seed for the predictive simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Number of simulated cases to print
    #[arg(long)]
    samples: Option<usize>,

    /// When improvements apply: always, on-failure
    #[arg(long)]
    policy: Option<ImprovementPolicy>,

    /// Do not append results to the results file
    #[arg(long)]
    skip_save: bool,
}

/// What a run left behind, for callers that want more than console output.
#[derive(Debug)]
struct RunSummary {
    vehicle: Vehicle,
    rows_saved: Option<usize>,
    simulated: Vec<SimulatedCase>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = AppConfig::load_with_source(cli.config.as_deref(), &[DEFAULT_CONFIG])?;
    let mut config = loaded.config;
    apply_overrides(&cli, &mut config);
    config.validate()?;

    // falls back to console-only output when the log directory is unusable
    init_tracing(SERVICE_NAME, &config.logging);
    match &loaded.source {
        Some(path) => info!(config = %path.display(), "configuration loaded"),
        None => info!("using built-in sample configuration"),
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = run(&config, !cli.skip_save, &mut out)?;
    info!(
        vehicle = %summary.vehicle,
        rows_saved = ?summary.rows_saved,
        simulated = summary.simulated.len(),
        "run complete"
    );
    Ok(())
}

fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(path) = &cli.database {
        config.database.path = path.clone();
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(samples) = cli.samples {
        config.simulation.samples = samples;
    }
    if let Some(policy) = cli.policy {
        config.improvements.policy = policy;
    }
}

fn run<W: Write>(config: &AppConfig, save: bool, out: &mut W) -> Result<RunSummary> {
    let mut vehicle = Vehicle::from(&config.vehicle);
    let scenarios = TestScenario::standard_suite(&config.scenarios);
    writeln!(out, "Testing vehicle: {}", vehicle)?;

    let outcomes = run_scenarios(&vehicle, &scenarios);
    for outcome in &outcomes {
        writeln!(out, "{}", outcome)?;
    }

    let mut manager = TestResultManager::from_config(&config.improvements);
    for outcome in &outcomes {
        manager.record_outcome(outcome);
    }

    let rows_saved = if save {
        match manager.save_to_database(&config.database.path) {
            Ok(rows) => Some(rows),
            Err(err) => {
                warn!(path = %config.database.path.display(), error = %err, "unable to save results");
                None
            }
        }
    } else {
        None
    };

    writeln!(out, "Applying improvements:")?;
    for improvement in manager.process_improvements(&mut vehicle, &outcomes) {
        writeln!(out, "  - {}", improvement)?;
    }
    writeln!(out, "Improved vehicle: {}", vehicle)?;

    let mut simulation = PredictiveSimulation::from_seed_option(config.simulation.seed)
        .with_samples(config.simulation.samples);
    writeln!(out, "Predictive testing simulation:")?;
    let simulated = manager.predictive_testing_simulation(&mut simulation);
    for case in &simulated {
        writeln!(out, "{}", case)?;
    }
    out.flush()?;

    Ok(RunSummary {
        vehicle,
        rows_saved,
        simulated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn base_cli() -> Cli {
        Cli {
            config: None,
            database: None,
            seed: None,
            samples: None,
            policy: None,
            skip_save: false,
        }
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut cli = base_cli();
        cli.database = Some(PathBuf::from("other.txt"));
        cli.seed = Some(9);
        cli.samples = Some(2);
        cli.policy = Some(ImprovementPolicy::OnFailure);
        let mut config = AppConfig::default();
        apply_overrides(&cli, &mut config);
        assert_eq!(config.database.path, PathBuf::from("other.txt"));
        assert_eq!(config.simulation.seed, Some(9));
        assert_eq!(config.simulation.samples, 2);
        assert_eq!(config.improvements.policy, ImprovementPolicy::OnFailure);
    }

    #[test]
    fn no_overrides_keep_sample_run() {
        let mut config = AppConfig::default();
        apply_overrides(&base_cli(), &mut config);
        assert_eq!(config.database.path, PathBuf::from("test_results.txt"));
        assert!(config.simulation.seed.is_none());
    }

    #[test]
    fn cli_parses_policy_flag() {
        let cli = Cli::try_parse_from(["vtb-run", "--policy", "on-failure", "--skip-save"]).unwrap();
        assert_eq!(cli.policy, Some(ImprovementPolicy::OnFailure));
        assert!(cli.skip_save);
        assert!(Cli::try_parse_from(["vtb-run", "--policy", "never"]).is_err());
    }

    #[test]
    fn sample_run_saves_improves_and_simulates() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.database.path = dir.path().join("results.txt");
        config.simulation.seed = Some(42);

        let mut out = Vec::new();
        let summary = run(&config, true, &mut out).unwrap();

        assert_eq!(summary.rows_saved, Some(3));
        assert_eq!(summary.vehicle.max_load(), 1100);
        assert_eq!(summary.vehicle.durability(), 5500);
        assert_eq!(summary.simulated.len(), 5);

        let console = String::from_utf8(out).unwrap();
        assert!(console.contains("Load Test Failed"));
        assert!(console.contains("Terrain Test Failed"));
        assert!(console.contains("Durability Test Passed"));
        assert!(console.contains("terrain capability added: Mountain"));
        assert_eq!(console.matches("Test Case ").count(), 5);

        let rows = fs::read_to_string(&config.database.path).unwrap();
        assert_eq!(rows.lines().count(), 3);
    }

    #[test]
    fn skip_save_leaves_no_file() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.database.path = dir.path().join("results.txt");
        let mut out = Vec::new();
        let summary = run(&config, false, &mut out).unwrap();
        assert!(summary.rows_saved.is_none());
        assert!(!config.database.path.exists());
    }

    #[test]
    fn failed_save_does_not_abort_run() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let mut config = AppConfig::default();
        config.database.path = blocker.join("results.txt");
        let mut out = Vec::new();
        let summary = run(&config, true, &mut out).unwrap();
        assert!(summary.rows_saved.is_none());
        assert_eq!(summary.simulated.len(), 5);
    }
}
