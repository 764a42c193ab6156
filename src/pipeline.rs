// src/pipeline.rs

use crate::config::DashConfig;
use crate::ingest::{self, ConsumptionRecord};
use crate::join::{self, JoinedRecord};
use crate::synth;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Run one full render cycle's data work: load → filter → generate → join.
///
/// Everything is recomputed from scratch; the pseudorandom stream is seeded
/// here, once per run, and handed into generation explicitly, so repeated runs
/// over the same file produce an identical joined table.
pub fn run(config: &DashConfig) -> Result<Vec<JoinedRecord>> {
    let raw = ingest::load_consumption(&config.csv_path).context("loading consumption data")?;
    let records = ingest::filter_antidepressants(&raw).context("normalizing consumption data")?;
    anyhow::ensure!(
        !records.is_empty(),
        "no antidepressant ({}) records found in {}",
        ingest::ATC_ANTIDEPRESSANT_CLASS,
        config.csv_path.display()
    );

    let countries = countries_in_order(&records);
    let years = years_sorted(&records);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let prevalence = synth::generate_prevalence(&countries, &years, &mut rng);

    let joined = join::join_on_country_year(&records, &prevalence);
    info!(
        countries = countries.len(),
        years = years.len(),
        joined = joined.len(),
        seed = config.seed,
        "pipeline run complete"
    );
    Ok(joined)
}

/// Distinct countries in first-appearance order. Generation order feeds the
/// shared random stream, so the order must be a deterministic function of the
/// input file.
fn countries_in_order(records: &[ConsumptionRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for record in records {
        if seen.insert(record.country.as_str()) {
            out.push(record.country.clone());
        }
    }
    out
}

/// Distinct years, ascending.
fn years_sorted(records: &[ConsumptionRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}
