// src/ingest/mod.rs
mod filter;

pub use filter::{filter_antidepressants, ConsumptionRecord, ATC_ANTIDEPRESSANT_CLASS};

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Columns the consumption CSV must carry. Anything else in the file is
/// ignored.
const REQUIRED_COLUMNS: &[&str] = &["PHARMACEUTICAL", "Reference area", "TIME_PERIOD", "OBS_VALUE"];

/// One row of the consumption CSV, as the file spells it.
///
/// `PHARMACEUTICAL` and `OBS_VALUE` may be empty in the wild; both come
/// through as `None` and are dealt with during filtering, never as a load
/// error.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    #[serde(rename = "PHARMACEUTICAL")]
    pub pharmaceutical: Option<String>,
    #[serde(rename = "Reference area")]
    pub reference_area: String,
    #[serde(rename = "TIME_PERIOD")]
    pub time_period: String,
    #[serde(rename = "OBS_VALUE")]
    pub obs_value: Option<f64>,
}

/// Read the full consumption CSV into memory.
///
/// Fails if the file is missing, a required column is absent, or a record
/// cannot be parsed. The error carries the path and, for record errors, the
/// record index.
pub fn load_consumption<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open consumption CSV {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("failed to read CSV header from {}", path.display()))?
        .clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *col) {
            anyhow::bail!(
                "consumption CSV {} is missing required column `{}`",
                path.display(),
                col
            );
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        let row: RawRow = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        rows.push(row);
    }

    info!(path = %path.display(), rows = rows.len(), "loaded consumption CSV");
    debug!(headers = ?headers, "consumption CSV columns");
    Ok(rows)
}
