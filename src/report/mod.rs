// src/report/mod.rs

use crate::join::JoinedRecord;
use anyhow::{ensure, Result};
use serde::Serialize;

/// Outcome of comparing consumption growth against prevalence growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Consumption grew more than `escalation_ratio` times faster than the
    /// simulated prevalence.
    DisproportionateEscalation,
    /// Consumption growth stayed within the allowed multiple of prevalence
    /// growth.
    AlignedTrend,
    /// At least one growth figure is undefined (zero first-year baseline), so
    /// no comparison is possible.
    Indeterminate,
}

/// Growth comparison for one country. Growth figures are `None` when the
/// first-year baseline is exactly zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthReport {
    pub country: String,
    pub consumption_growth_pct: Option<f64>,
    pub prevalence_growth_pct: Option<f64>,
    pub verdict: Verdict,
}

/// First-to-last percentage growth. Undefined (`None`) when the baseline is
/// exactly zero; a division there would only yield ±inf or NaN.
pub fn growth_pct(first: f64, last: f64) -> Option<f64> {
    if first == 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

/// Compare first-to-last growth of both series for one country.
///
/// `series` must be that country's rows sorted ascending by year; with a
/// single year first == last and both growths are zero. The escalation
/// threshold is a policy knob supplied by the caller.
pub fn assess(country: &str, series: &[JoinedRecord], escalation_ratio: f64) -> Result<GrowthReport> {
    ensure!(!series.is_empty(), "no joined records for country `{country}`");

    let first = &series[0];
    let last = &series[series.len() - 1];
    let consumption_growth_pct = growth_pct(first.consumption, last.consumption);
    let prevalence_growth_pct = growth_pct(first.prevalence_pct, last.prevalence_pct);

    let verdict = match (consumption_growth_pct, prevalence_growth_pct) {
        (Some(consumption), Some(prevalence)) => {
            if consumption > escalation_ratio * prevalence {
                Verdict::DisproportionateEscalation
            } else {
                Verdict::AlignedTrend
            }
        }
        _ => Verdict::Indeterminate,
    };

    Ok(GrowthReport {
        country: country.to_string(),
        consumption_growth_pct,
        prevalence_growth_pct,
        verdict,
    })
}

/// `+50.0%` / `-3.2%` style, or `n/d` when the growth is undefined.
pub fn format_growth(growth: Option<f64>) -> String {
    match growth {
        Some(pct) => format!("{pct:+.1}%"),
        None => "n/d".to_string(),
    }
}

impl GrowthReport {
    /// One-sentence verdict shown under the metrics.
    pub fn headline(&self) -> String {
        match self.verdict {
            Verdict::DisproportionateEscalation => format!(
                "Disproportionate escalation: in {}, antidepressant sales are growing \
                 far faster than the simulated clinical prevalence. The gap is widening.",
                self.country
            ),
            Verdict::AlignedTrend => {
                "Drug consumption follows a trend aligned with clinical diagnoses.".to_string()
            }
            Verdict::Indeterminate => format!(
                "Growth is undefined for {} (zero first-year baseline); no comparison possible.",
                self.country
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i32, f64, f64)]) -> Vec<JoinedRecord> {
        points
            .iter()
            .map(|&(year, consumption, prevalence_pct)| JoinedRecord {
                country: "Italy".to_string(),
                year,
                consumption,
                prevalence_pct,
            })
            .collect()
    }

    #[test]
    fn growth_vectors_from_the_acceptance_table() {
        assert_eq!(growth_pct(100.0, 150.0), Some(50.0));
        let prevalence = growth_pct(5.0, 5.5).unwrap();
        assert!((prevalence - 10.0).abs() < 1e-9);
    }

    #[test]
    fn fifty_vs_ten_percent_is_escalation() -> Result<()> {
        let s = series(&[(2015, 100.0, 5.0), (2020, 150.0, 5.5)]);
        let report = assess("Italy", &s, 2.0)?;
        assert_eq!(format_growth(report.consumption_growth_pct), "+50.0%");
        assert_eq!(format_growth(report.prevalence_growth_pct), "+10.0%");
        assert_eq!(report.verdict, Verdict::DisproportionateEscalation);
        Ok(())
    }

    #[test]
    fn fifteen_vs_ten_percent_is_aligned() -> Result<()> {
        let s = series(&[(2015, 100.0, 5.0), (2020, 115.0, 5.5)]);
        let report = assess("Italy", &s, 2.0)?;
        assert_eq!(report.verdict, Verdict::AlignedTrend);
        Ok(())
    }

    #[test]
    fn raising_the_ratio_flips_the_verdict() -> Result<()> {
        let s = series(&[(2015, 100.0, 5.0), (2020, 150.0, 5.5)]);
        let report = assess("Italy", &s, 6.0)?;
        assert_eq!(report.verdict, Verdict::AlignedTrend);
        Ok(())
    }

    #[test]
    fn single_year_series_has_zero_growth() -> Result<()> {
        let s = series(&[(2015, 100.0, 5.0)]);
        let report = assess("Italy", &s, 2.0)?;
        assert_eq!(report.consumption_growth_pct, Some(0.0));
        assert_eq!(report.prevalence_growth_pct, Some(0.0));
        assert_eq!(report.verdict, Verdict::AlignedTrend);
        Ok(())
    }

    #[test]
    fn zero_baseline_is_indeterminate() -> Result<()> {
        let s = series(&[(2015, 0.0, 5.0), (2020, 150.0, 5.5)]);
        let report = assess("Italy", &s, 2.0)?;
        assert_eq!(report.consumption_growth_pct, None);
        assert_eq!(report.verdict, Verdict::Indeterminate);
        assert_eq!(format_growth(report.consumption_growth_pct), "n/d");
        Ok(())
    }

    #[test]
    fn empty_series_is_an_error() {
        assert!(assess("Italy", &[], 2.0).is_err());
    }

    #[test]
    fn headline_names_the_country_on_escalation() -> Result<()> {
        let s = series(&[(2015, 100.0, 5.0), (2020, 150.0, 5.5)]);
        let report = assess("Italy", &s, 2.0)?;
        assert!(report.headline().contains("Italy"));
        Ok(())
    }
}
