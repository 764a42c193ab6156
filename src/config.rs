// src/config.rs

use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for the dashboard.
///
/// Everything the pipeline needs is carried here explicitly so a run is fully
/// determined by its config: the same file and the same seed give the same
/// tables, charts and reports.
#[derive(Debug, Clone)]
pub struct DashConfig {
    /// Path to the consumption CSV.
    pub csv_path: PathBuf,
    /// Seed for the per-run pseudorandom stream used by the prevalence
    /// generator.
    pub seed: u64,
    /// The report flags "disproportionate escalation" when consumption growth
    /// exceeds this multiple of prevalence growth. Policy choice, not a
    /// derived constant.
    pub escalation_ratio: f64,
    /// Country preselected in the dropdown when present in the data.
    pub preferred_country: String,
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("consumo_antidepressivi.csv"),
            seed: 42,
            escalation_ratio: 2.0,
            preferred_country: "Italy".to_string(),
            listen_addr: ([0, 0, 0, 0], 8080).into(),
        }
    }
}

impl DashConfig {
    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = path.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_escalation_ratio(mut self, ratio: f64) -> Self {
        self.escalation_ratio = ratio;
        self
    }
}
