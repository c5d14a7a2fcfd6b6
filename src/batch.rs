//! Batch extraction driver
//!
//! Walks an input directory of beatmap files, extracts one record per file,
//! and persists the feature table once after the whole batch. A file that
//! fails to parse is logged with its identifier and skipped; no per-file
//! failure aborts the batch. Directory entries are processed in
//! filesystem-listing order, which is not guaranteed stable across runs.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::export::CsvExporter;
use crate::pipeline;

/// A map that failed extraction and was left out of the table.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedMap {
    pub file: String,
    pub reason: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Rows written to the output table
    pub processed: usize,
    /// Files skipped with their failure reasons
    pub skipped: Vec<SkippedMap>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Extract every map under `input_dir` into a CSV at `output_path` using
/// the default column preset.
pub fn extract_directory(input_dir: &Path, output_path: &Path) -> Result<BatchReport> {
    extract_directory_with(input_dir, output_path, &CsvExporter::new())
}

/// Extract every map under `input_dir` with an explicit exporter.
///
/// Only failure to read the directory itself or to write the final table is
/// fatal; everything per-file is contained.
pub fn extract_directory_with(
    input_dir: &Path,
    output_path: &Path,
    exporter: &CsvExporter,
) -> Result<BatchReport> {
    let started_at = Utc::now();
    let mut analyses = Vec::new();
    let mut skipped = Vec::new();

    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        match pipeline::analyze_path(&path) {
            Ok(analysis) => analyses.push(analysis),
            Err(err) => {
                let file = entry.file_name().to_string_lossy().into_owned();
                warn!(file = %file, error = %err, "skipping map");
                skipped.push(SkippedMap {
                    file,
                    reason: err.to_string(),
                });
            }
        }
    }

    exporter.write(&analyses, output_path)?;

    let report = BatchReport {
        processed: analyses.len(),
        skipped,
        started_at,
        finished_at: Utc::now(),
    };
    info!(
        processed = report.processed,
        skipped = report.skipped.len(),
        output = %output_path.display(),
        "batch complete"
    );
    Ok(report)
}
