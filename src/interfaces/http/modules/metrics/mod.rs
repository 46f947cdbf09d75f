//! Prometheus scrape endpoint and per-call API metrics

pub mod handlers;
pub mod middleware;

pub use handlers::{render_metrics, MetricsExporter};
pub use middleware::api_metrics_middleware;
