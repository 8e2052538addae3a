//! ---
//! vtb_section: "01-core-functionality"
//! vtb_subsection: "module"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Shared primitives and utilities for the test bench runtime."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
//! Tracing setup for the test bench.
//!
//! Console events go to stderr so the report on stdout stays readable. A daily
//! JSON log file is added when the log directory is usable; otherwise the run
//! continues with console logging only.
use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const LOG_ENV: &str = "VTB_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();
static CONSOLE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Available console log formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    StructuredJson,
    #[default]
    Pretty,
}

/// Where events end up after [`init_tracing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Console plus the rolling file in this directory.
    ConsoleAndFile(PathBuf),
    /// The log directory was unusable.
    ConsoleOnly,
}

/// Install the global subscriber. Never fails: a log directory that cannot be
/// created or opened downgrades to console-only output with a warning.
///
/// `VTB_LOG` overrides the filter, then `RUST_LOG`, then `info`.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> LogTarget {
    let (console_writer, console_guard) = tracing_appender::non_blocking(std::io::stderr());
    let _ = CONSOLE_GUARD.set(console_guard);

    let console_layer = match config.format {
        LogFormat::StructuredJson => fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .with_writer(console_writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(console_writer)
            .boxed(),
    };

    let file_writer = open_log_file(service_name, config);
    let file_layer = file_writer.as_ref().ok().cloned().map(|writer| {
        fmt::layer()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .with_writer(writer)
            .boxed()
    });

    tracing_subscriber::registry()
        .with(log_filter())
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .ok();

    match file_writer {
        Ok(_) => {
            info!(service = %service_name, log_dir = %config.directory.display(), format = ?config.format, "tracing initialised");
            LogTarget::ConsoleAndFile(config.directory.clone())
        }
        Err(err) => {
            warn!(service = %service_name, error = %format!("{err:#}"), "file logging disabled, continuing with console only");
            LogTarget::ConsoleOnly
        }
    }
}

fn open_log_file(service_name: &str, config: &LoggingConfig) -> Result<NonBlocking> {
    std::fs::create_dir_all(&config.directory).with_context(|| {
        format!(
            "unable to create log directory {}",
            config.directory.display()
        )
    })?;
    let prefix = config.file_prefix.as_deref().unwrap_or(service_name);
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(&config.directory)
        .with_context(|| {
            format!(
                "unable to open log file in {}",
                config.directory.display()
            )
        })?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = FILE_GUARD.set(guard);
    Ok(writer)
}

fn log_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!(
                "invalid {} directive ({}); defaulting to {} logging",
                LOG_ENV, err, DEFAULT_DIRECTIVE
            );
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }),
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn logging_in(directory: PathBuf) -> LoggingConfig {
        LoggingConfig {
            directory,
            format: LogFormat::StructuredJson,
            file_prefix: Some("unit".into()),
        }
    }

    #[test]
    fn usable_directory_gets_file_output() {
        let dir = tempdir().unwrap();
        let config = logging_in(dir.path().join("nested/logs"));
        let target = init_tracing("vtb-test", &config);
        assert_eq!(target, LogTarget::ConsoleAndFile(config.directory.clone()));
        assert!(config.directory.is_dir());
    }

    #[test]
    fn blocked_directory_falls_back_to_console() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("target");
        std::fs::write(&blocker, "").unwrap();
        let config = logging_in(blocker.join("logs"));
        assert_eq!(init_tracing("vtb-test", &config), LogTarget::ConsoleOnly);
    }

    #[test]
    fn open_error_names_the_directory() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let config = logging_in(blocker.join("logs"));
        let err = open_log_file("vtb-test", &config).unwrap_err();
        assert!(format!("{err:#}").contains("unable to create log directory"));
        assert!(err.to_string().contains("logs"));
    }

    #[test]
    fn log_format_uses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: LogFormat,
        }
        let parsed: Wrapper = toml::from_str("format = \"structured-json\"").unwrap();
        assert_eq!(parsed.format, LogFormat::StructuredJson);
    }
}
