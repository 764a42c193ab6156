// src/join/mod.rs

use crate::ingest::ConsumptionRecord;
use crate::synth::PrevalenceRecord;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// The natural inner join of consumption and prevalence on (country, year).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRecord {
    pub country: String,
    pub year: i32,
    pub consumption: f64,
    pub prevalence_pct: f64,
}

/// Inner-join consumption and prevalence on (country, year).
///
/// Each side is expected to carry at most one record per key; the output is
/// exactly the key intersection, in consumption order.
pub fn join_on_country_year(
    consumption: &[ConsumptionRecord],
    prevalence: &[PrevalenceRecord],
) -> Vec<JoinedRecord> {
    let by_key: HashMap<(&str, i32), f64> = prevalence
        .iter()
        .map(|p| ((p.country.as_str(), p.year), p.prevalence_pct))
        .collect();

    let joined: Vec<JoinedRecord> = consumption
        .iter()
        .filter_map(|c| {
            by_key
                .get(&(c.country.as_str(), c.year))
                .map(|&prevalence_pct| JoinedRecord {
                    country: c.country.clone(),
                    year: c.year,
                    consumption: c.value,
                    prevalence_pct,
                })
        })
        .collect();

    debug!(
        consumption = consumption.len(),
        prevalence = prevalence.len(),
        joined = joined.len(),
        "joined consumption with prevalence"
    );
    joined
}

/// Distinct countries in the joined set, ascending lexicographic. These are
/// the only values the dropdown may offer.
pub fn distinct_countries(joined: &[JoinedRecord]) -> Vec<String> {
    let set: BTreeSet<&str> = joined.iter().map(|r| r.country.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// The preferred country when present, otherwise the first alphabetically.
pub fn default_country<'a>(countries: &'a [String], preferred: &str) -> Option<&'a str> {
    countries
        .iter()
        .find(|c| c.as_str() == preferred)
        .or_else(|| countries.first())
        .map(String::as_str)
}

/// One country's joined rows, sorted ascending by year. This is the x-domain
/// shared by the chart and the report.
pub fn series_for_country(joined: &[JoinedRecord], country: &str) -> Vec<JoinedRecord> {
    let mut series: Vec<JoinedRecord> = joined
        .iter()
        .filter(|r| r.country == country)
        .cloned()
        .collect();
    series.sort_by_key(|r| r.year);
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consumption(country: &str, year: i32, value: f64) -> ConsumptionRecord {
        ConsumptionRecord {
            country: country.to_string(),
            year,
            value,
        }
    }

    fn prevalence(country: &str, year: i32, pct: f64) -> PrevalenceRecord {
        PrevalenceRecord {
            country: country.to_string(),
            year,
            prevalence_pct: pct,
        }
    }

    #[test]
    fn join_is_the_key_intersection() {
        let left = vec![
            consumption("Italy", 2015, 40.0),
            consumption("Italy", 2016, 45.0),
            consumption("France", 2015, 30.0),
        ];
        let right = vec![
            prevalence("Italy", 2015, 5.0),
            prevalence("France", 2015, 4.8),
            prevalence("Spain", 2015, 5.2),
        ];
        let joined = join_on_country_year(&left, &right);
        assert_eq!(joined.len(), 2);
        assert!(joined.len() <= left.len().min(right.len()));
        assert!(joined
            .iter()
            .any(|r| r.country == "Italy" && r.year == 2015 && r.prevalence_pct == 5.0));
        assert!(!joined.iter().any(|r| r.country == "Spain"));
    }

    #[test]
    fn countries_are_sorted_and_deduplicated() {
        let joined = vec![
            JoinedRecord {
                country: "Italy".into(),
                year: 2015,
                consumption: 40.0,
                prevalence_pct: 5.0,
            },
            JoinedRecord {
                country: "France".into(),
                year: 2015,
                consumption: 30.0,
                prevalence_pct: 4.8,
            },
            JoinedRecord {
                country: "Italy".into(),
                year: 2016,
                consumption: 45.0,
                prevalence_pct: 5.1,
            },
        ];
        assert_eq!(distinct_countries(&joined), vec!["France", "Italy"]);
    }

    #[test]
    fn default_is_preferred_when_present_else_first() {
        let countries = vec!["France".to_string(), "Italy".to_string()];
        assert_eq!(default_country(&countries, "Italy"), Some("Italy"));
        let without = vec!["France".to_string(), "Germany".to_string()];
        assert_eq!(default_country(&without, "Italy"), Some("France"));
        assert_eq!(default_country(&[], "Italy"), None);
    }

    #[test]
    fn series_is_sorted_by_year() {
        let joined = vec![
            JoinedRecord {
                country: "Italy".into(),
                year: 2017,
                consumption: 50.0,
                prevalence_pct: 5.2,
            },
            JoinedRecord {
                country: "France".into(),
                year: 2015,
                consumption: 30.0,
                prevalence_pct: 4.8,
            },
            JoinedRecord {
                country: "Italy".into(),
                year: 2015,
                consumption: 40.0,
                prevalence_pct: 5.0,
            },
        ];
        let series = series_for_country(&joined, "Italy");
        let years: Vec<i32> = series.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2015, 2017]);
    }
}
