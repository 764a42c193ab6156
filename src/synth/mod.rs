// src/synth/mod.rs

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::info;

/// Lower bound of the per-country base prevalence draw.
const BASE_MIN: f64 = 4.5;
/// Upper bound (exclusive) of the per-country base prevalence draw.
const BASE_MAX: f64 = 6.5;
/// Linear trend added per year elapsed since the first observed year.
const TREND_PER_YEAR: f64 = 0.05;
/// Half-width of the uniform noise added to every sample.
const NOISE_HALF_WIDTH: f64 = 0.05;

/// A simulated disease-prevalence observation for one country-year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrevalenceRecord {
    pub country: String,
    pub year: i32,
    pub prevalence_pct: f64,
}

/// Fabricate one prevalence record per (country, year) pair.
///
/// Per country a base is drawn from [4.5, 6.5), then per year the sample is
/// `base + 0.05 × (year − min_year) + noise` with noise from [−0.05, 0.05),
/// rounded to 2 decimals. Output is country-major, year-minor, in the order
/// the inputs are given.
///
/// Draws come sequentially from the single `rng` stream, so the same seed and
/// the same ordered inputs reproduce the table exactly. The caller owns the
/// generator and seeds it once per pipeline run.
pub fn generate_prevalence(
    countries: &[String],
    years: &[i32],
    rng: &mut StdRng,
) -> Vec<PrevalenceRecord> {
    let Some(min_year) = years.iter().copied().min() else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(countries.len() * years.len());
    for country in countries {
        let base: f64 = rng.gen_range(BASE_MIN..BASE_MAX);
        for &year in years {
            let trend = f64::from(year - min_year) * TREND_PER_YEAR;
            let noise: f64 = rng.gen_range(-NOISE_HALF_WIDTH..NOISE_HALF_WIDTH);
            let prevalence = round2(base + trend + noise);
            records.push(PrevalenceRecord {
                country: country.clone(),
                year,
                prevalence_pct: prevalence,
            });
        }
    }

    info!(
        countries = countries.len(),
        years = years.len(),
        records = records.len(),
        "generated synthetic prevalence table"
    );
    records
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
