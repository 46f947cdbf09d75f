//! `GET /metrics` scrape endpoint

use axum::{extract::State, http::header, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Router state for the scrape endpoint
#[derive(Clone)]
pub struct MetricsExporter {
    pub handle: PrometheusHandle,
}

/// Render booking, payment and API series in Prometheus text format. Public.
pub async fn render_metrics(State(exporter): State<MetricsExporter>) -> impl IntoResponse {
    exporter.handle.run_upkeep();
    (
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        exporter.handle.render(),
    )
}
