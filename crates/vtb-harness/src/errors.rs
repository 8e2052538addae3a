//! ---
//! vtb_section: "02-test-harness"
//! vtb_subsection: "module"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Vehicle scenarios, result recording and improvements."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("results file error: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed result row at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
}
