// src/chart/mod.rs

use crate::join::JoinedRecord;
use serde_json::json;

const CONSUMPTION_COLOR: &str = "#d62828";
const PREVALENCE_COLOR: &str = "#003049";

/// Render one country's series as a dual-axis Plotly line chart fragment.
///
/// Consumption is drawn on the primary y-axis, prevalence on a secondary axis
/// overlaying it, both over the identical x-domain (the series' sorted years).
/// The merged legend sits upper-left. The caller embeds the fragment in a page
/// that loads the Plotly runtime.
pub fn dual_axis_chart(series: &[JoinedRecord]) -> String {
    let years: Vec<i32> = series.iter().map(|r| r.year).collect();
    let consumption: Vec<f64> = series.iter().map(|r| r.consumption).collect();
    let prevalence: Vec<f64> = series.iter().map(|r| r.prevalence_pct).collect();

    let consumption_trace = json!({
        "type": "scatter",
        "mode": "lines+markers",
        "x": years,
        "y": consumption,
        "name": "Antidepressant consumption (DDD)",
        "line": {"color": CONSUMPTION_COLOR, "width": 3},
        "marker": {"symbol": "circle", "size": 8},
    });
    let prevalence_trace = json!({
        "type": "scatter",
        "mode": "lines+markers",
        "x": years,
        "y": prevalence,
        "yaxis": "y2",
        "name": "Simulated prevalence (%)",
        "line": {"color": PREVALENCE_COLOR, "width": 3, "dash": "dashdot"},
        "marker": {"symbol": "square", "size": 8},
    });
    let layout = json!({
        "xaxis": {"title": "Year", "tickformat": "d", "showgrid": true, "gridcolor": "#ddd"},
        "yaxis": {
            "title": "Antidepressant doses",
            "color": CONSUMPTION_COLOR,
        },
        "yaxis2": {
            "title": "Clinical prevalence (%)",
            "color": PREVALENCE_COLOR,
            "overlaying": "y",
            "side": "right",
        },
        "legend": {"x": 0.01, "y": 0.99},
        "margin": {"t": 30, "r": 60},
    });

    format!(
        r#"<div id="trend-chart" style="width:100%;height:420px;"></div>
<script>
    Plotly.newPlot('trend-chart', [{consumption_trace}, {prevalence_trace}], {layout});
</script>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<JoinedRecord> {
        vec![
            JoinedRecord {
                country: "Italy".into(),
                year: 2015,
                consumption: 40.0,
                prevalence_pct: 5.0,
            },
            JoinedRecord {
                country: "Italy".into(),
                year: 2016,
                consumption: 45.0,
                prevalence_pct: 5.1,
            },
        ]
    }

    #[test]
    fn fragment_carries_both_traces_and_the_secondary_axis() {
        let html = dual_axis_chart(&series());
        assert!(html.contains("Antidepressant consumption (DDD)"));
        assert!(html.contains("Simulated prevalence (%)"));
        assert!(html.contains("\"yaxis\":\"y2\""));
        assert!(html.contains("\"overlaying\":\"y\""));
    }

    #[test]
    fn both_traces_share_the_x_domain() {
        let html = dual_axis_chart(&series());
        assert_eq!(html.matches("[2015,2016]").count(), 2);
    }

    #[test]
    fn legend_is_anchored_upper_left() {
        let html = dual_axis_chart(&series());
        assert!(html.contains("\"legend\":{\"x\":0.01,\"y\":0.99}"));
    }
}
