// src/bin/print_report.rs
//
// Runs the dashboard pipeline once and prints the growth report for every
// country (or a single country given as the first argument) to stdout.
// Handy for eyeballing the data without a browser.

use anyhow::{bail, Result};
use rxdash::{config::DashConfig, join, pipeline, report};

fn main() -> Result<()> {
    let config = DashConfig::default();
    let joined = pipeline::run(&config)?;

    let countries = join::distinct_countries(&joined);
    let wanted: Vec<String> = match std::env::args().nth(1) {
        Some(name) => {
            if !countries.contains(&name) {
                bail!(
                    "country `{}` not in the joined dataset ({} available)",
                    name,
                    countries.len()
                );
            }
            vec![name]
        }
        None => countries,
    };

    println!("==========================================");
    println!("   CONSUMPTION vs PREVALENCE GROWTH");
    println!("==========================================");

    for country in &wanted {
        let series = join::series_for_country(&joined, country);
        let growth = report::assess(country, &series, config.escalation_ratio)?;

        println!("\n--- {} ({} years) ---", country, series.len());
        println!(
            "Doses sold:         {}",
            report::format_growth(growth.consumption_growth_pct)
        );
        println!(
            "Prevalence:         {}",
            report::format_growth(growth.prevalence_growth_pct)
        );
        println!("Verdict:            {}", growth.headline());
    }

    Ok(())
}
