//! Per-call API metrics
//!
//! `eventhub_api_calls_total{method, route, outcome}` counts calls and
//! `eventhub_api_call_duration_seconds{route, outcome}` times them. `route`
//! is the matched template (`/api/v1/hotels/{hotel_id}`), never the raw path.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

/// Outcome label for a response status.
///
/// 402 and 403 are the business-rule refusals (no paid ticket, room full,
/// not the owner) and get their own bucket apart from other 4xx.
pub(crate) fn outcome(status: StatusCode) -> &'static str {
    match status.as_u16() {
        402 | 403 => "refused",
        401 => "unauthenticated",
        404 => "not_found",
        s if s >= 500 => "error",
        s if s >= 400 => "invalid",
        _ => "ok",
    }
}

pub async fn api_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().as_str().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed().as_secs_f64();

    let outcome = outcome(response.status());
    metrics::counter!(
        "eventhub_api_calls_total",
        "method" => method,
        "route" => route.clone(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "eventhub_api_call_duration_seconds",
        "route" => route,
        "outcome" => outcome
    )
    .record(elapsed);

    response
}
