//! ---
//! vtb_section: "02-test-harness"
//! vtb_subsection: "module"
//! vtb_type: "source"
//! vtb_scope: "code"
//! vtb_description: "Vehicle scenarios, result recording and improvements."
//! vtb_version: "v0.1.0"
//! vtb_owner: "tbd"
//! ---
//! Append-only results file.
//!
//! One row per line, no header. Rows are written through `csv` so values that
//! contain a delimiter or quote are quoted; plain rows stay `Kind,param,Verdict`.
use std::fs::{self, File, OpenOptions};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::errors::{HarnessError, Result};
use crate::record::ResultRecord;

/// Append `records` to the file at `path`, creating it (and its parent) if needed.
///
/// Returns the number of rows written. The handle is dropped before returning.
pub fn append_records(path: &Path, records: &[ResultRecord]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows = records.len(), "results appended");
    Ok(records.len())
}

/// Read every row back, in file order.
pub fn load_database(path: &Path) -> Result<Vec<ResultRecord>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(file);
    let mut records = Vec::new();
    for row in reader.deserialize::<ResultRecord>() {
        let record = row.map_err(|err| HarnessError::MalformedRecord {
            line: err.position().map(|pos| pos.line()).unwrap_or_default(),
            reason: err.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}
