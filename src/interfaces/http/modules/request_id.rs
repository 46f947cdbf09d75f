//! Correlation ids for API calls
//!
//! Every call runs inside an `api_call` span keyed by a correlation id. A
//! well-formed `X-Request-Id` from the caller is kept; anything else is
//! replaced by a fresh UUID. The id is echoed on the response, and the auth
//! middleware fills in the span's `user_id` once the caller is known.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is kept as-is
const MAX_REQUEST_ID_LEN: usize = 64;

/// Correlation id of the current call, stored in request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Keep a caller id made of `[A-Za-z0-9._-]` up to 64 chars, else mint one
fn correlation_id(incoming: Option<&str>) -> String {
    match incoming {
        Some(id)
            if !id.is_empty()
                && id.len() <= MAX_REQUEST_ID_LEN
                && id
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.')) =>
        {
            id.to_string()
        }
        _ => Uuid::new_v4().to_string(),
    }
}

pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let request_id = correlation_id(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let span = tracing::info_span!(
        "api_call",
        request_id = %request_id,
        method = %request.method(),
        route = %route,
        user_id = tracing::field::Empty,
    );
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
