//! Authentication middleware for Axum
//!
//! Verifies `Authorization: Bearer <jwt>` and stores the caller as an
//! [`AuthenticatedUser`] request extension.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::common::ApiResponse;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    InvalidSubject,
}

#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// The caller, as established by the auth middleware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| auth_error_response(AuthError::MissingToken))
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Rejected bearer token");
            return auth_error_response(AuthError::InvalidToken);
        }
    };

    let Ok(user_id) = claims.user_id() else {
        return auth_error_response(AuthError::InvalidSubject);
    };

    tracing::Span::current().record("user_id", user_id);
    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });
    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let message = match error {
        AuthError::MissingToken => "You must be signed in to continue",
        AuthError::InvalidToken => "Invalid authentication token",
        AuthError::InvalidSubject => "Token subject is not a user id",
    };

    let body = ApiResponse::<()>::error(message).with_code("UnauthorizedError");
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
