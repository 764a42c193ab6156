pub mod chart;
pub mod config;
pub mod ingest;
pub mod join;
pub mod pipeline;
pub mod report;
pub mod synth;
pub mod web;
