// src/ingest/filter.rs

use super::RawRow;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

/// ATC class prefix identifying antidepressant medications.
pub const ATC_ANTIDEPRESSANT_CLASS: &str = "N06A";

/// A normalized consumption observation: country, 4-digit year, dose value
/// (DDD). Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionRecord {
    pub country: String,
    pub year: i32,
    pub value: f64,
}

/// Keep antidepressant rows and normalize them.
///
/// A row survives iff its pharmaceutical code contains `N06A`; a missing or
/// empty code never matches and never errors. The year field must be numeric
/// or the whole load fails. Rows without an observed value are dropped with a
/// warning rather than failing the run.
pub fn filter_antidepressants(rows: &[RawRow]) -> Result<Vec<ConsumptionRecord>> {
    let mut records = Vec::new();
    let mut missing_value = 0usize;

    for row in rows {
        let is_antidepressant = row
            .pharmaceutical
            .as_deref()
            .map_or(false, |code| code.contains(ATC_ANTIDEPRESSANT_CLASS));
        if !is_antidepressant {
            continue;
        }

        let year: i32 = row
            .time_period
            .trim()
            .parse()
            .with_context(|| format!("non-numeric TIME_PERIOD `{}`", row.time_period))?;

        let Some(value) = row.obs_value else {
            missing_value += 1;
            continue;
        };

        records.push(ConsumptionRecord {
            country: row.reference_area.clone(),
            year,
            value,
        });
    }

    if missing_value > 0 {
        warn!(missing_value, "dropped antidepressant rows without OBS_VALUE");
    }
    info!(
        total = rows.len(),
        kept = records.len(),
        "filtered consumption rows to ATC class {}",
        ATC_ANTIDEPRESSANT_CLASS
    );
    Ok(records)
}
