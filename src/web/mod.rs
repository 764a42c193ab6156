// src/web/mod.rs

use crate::chart;
use crate::config::DashConfig;
use crate::join::{self, JoinedRecord};
use crate::pipeline;
use crate::report::{self, GrowthReport, Verdict};
use anyhow::anyhow;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    config: Arc<DashConfig>,
}

#[derive(Debug, Deserialize)]
struct DashQuery {
    country: Option<String>,
}

/// Build the application router.
pub fn router(config: DashConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };
    Router::new()
        .route("/", get(dashboard))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

/// One render cycle: run the whole pipeline from scratch, resolve the selected
/// country, draw chart and report. Any failure anywhere surfaces as the single
/// technical-error page; the process itself keeps serving.
async fn dashboard(State(state): State<AppState>, Query(query): Query<DashQuery>) -> Response {
    let config = state.config.clone();

    // File I/O and table work are synchronous; keep them off the async workers.
    let run = tokio::task::spawn_blocking(move || pipeline::run(&config)).await;

    let joined = match run {
        Ok(Ok(joined)) => joined,
        Ok(Err(err)) => return error_response(&err),
        Err(err) => return error_response(&anyhow!("render task failed: {err}")),
    };

    match render_dashboard(&state.config, &joined, query.country.as_deref()) {
        Ok(page) => Html(page).into_response(),
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &anyhow::Error) -> Response {
    error!("render failed: {err:#}");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(error_page(err))).into_response()
}

/// The country shown for this render: the requested one when it is actually in
/// the joined set, otherwise the default (preferred country when present, else
/// first alphabetically). The dropdown only offers valid choices, so the
/// fallback matters only for hand-edited URLs.
pub fn resolve_selection<'a>(
    countries: &'a [String],
    requested: Option<&str>,
    preferred: &str,
) -> Option<&'a str> {
    requested
        .and_then(|name| countries.iter().find(|c| c.as_str() == name))
        .map(String::as_str)
        .or_else(|| join::default_country(countries, preferred))
}

fn render_dashboard(
    config: &DashConfig,
    joined: &[JoinedRecord],
    requested: Option<&str>,
) -> anyhow::Result<String> {
    let countries = join::distinct_countries(joined);
    let selected = resolve_selection(&countries, requested, &config.preferred_country)
        .ok_or_else(|| anyhow!("joined dataset is empty; nothing to select"))?
        .to_string();

    let series = join::series_for_country(joined, &selected);
    let growth = report::assess(&selected, &series, config.escalation_ratio)?;
    let chart_html = chart::dual_axis_chart(&series);

    info!(country = %selected, points = series.len(), "rendered dashboard");
    Ok(dashboard_page(&countries, &selected, &chart_html, &growth))
}

const PAGE_STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
               max-width: 960px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
        .container { background: white; padding: 30px; border-radius: 8px;
                     box-shadow: 0 2px 4px rgba(0,0,0,0.1); margin-bottom: 20px; }
        h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }
        .metrics { display: flex; gap: 40px; margin: 20px 0; }
        .metric .label { color: #7f8c8d; font-size: 0.9em; }
        .metric .value { font-size: 1.8em; font-weight: bold; color: #2c3e50; }
        .banner { padding: 14px 18px; border-radius: 6px; margin-top: 10px; }
        .banner-warning { background: #fdecea; color: #b71c1c; border: 1px solid #f5c6cb; }
        .banner-info { background: #e8f4f8; color: #0c5460; border: 1px solid #bee5eb; }
        .banner-muted { background: #f0f0f0; color: #555; border: 1px solid #ddd; }
        select { font-size: 1em; padding: 6px 10px; }
        .timestamp { color: #95a5a6; font-size: 0.9em; }
"#;

/// Assemble the full dashboard page.
fn dashboard_page(
    countries: &[String],
    selected: &str,
    chart_html: &str,
    growth: &GrowthReport,
) -> String {
    let options: String = countries
        .iter()
        .map(|country| {
            let marker = if country == selected { " selected" } else { "" };
            format!(
                r#"<option value="{0}"{marker}>{0}</option>"#,
                escape_html(country)
            )
        })
        .collect();

    let banner_class = match growth.verdict {
        Verdict::DisproportionateEscalation => "banner banner-warning",
        Verdict::AlignedTrend => "banner banner-info",
        Verdict::Indeterminate => "banner banner-muted",
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Medicalization Escalation Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.12.1.min.js"></script>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>Medicalization Escalation</h1>
        <p>Comparative analysis: antidepressant consumption vs. simulated disease prevalence.</p>

        <form method="get" action="/">
            <label for="country">Country:</label>
            <select id="country" name="country" onchange="this.form.submit()">{options}</select>
            <noscript><button type="submit">Show</button></noscript>
        </form>

        {chart_html}

        <h2>Analytical report: {country}</h2>
        <div class="metrics">
            <div class="metric">
                <div class="label">Prevalence increase (anxiety/depression)</div>
                <div class="value">{prevalence_growth}</div>
            </div>
            <div class="metric">
                <div class="label">Increase in doses sold</div>
                <div class="value">{consumption_growth}</div>
            </div>
        </div>
        <div class="{banner_class}">{headline}</div>

        <p class="timestamp">Generated: {generated}</p>
    </div>
</body>
</html>"#,
        country = escape_html(selected),
        prevalence_growth = report::format_growth(growth.prevalence_growth_pct),
        consumption_growth = report::format_growth(growth.consumption_growth_pct),
        headline = escape_html(&growth.headline()),
        generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// The single generic failure page. No chart, no report; just the underlying
/// error's description.
pub fn error_page(err: &anyhow::Error) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Medicalization Escalation Dashboard</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>Medicalization Escalation</h1>
        <div class="banner banner-warning">Technical error: {}</div>
    </div>
</body>
</html>"#,
        escape_html(&format!("{err:#}"))
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
