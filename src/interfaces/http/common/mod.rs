//! Shared HTTP types: response envelope, error mapping, validated JSON

mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BlockedAction, DomainError};

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Standard API response wrapper.
///
/// Success: `{"success": true, "data": {...}}`.
/// Failure: `{"success": false, "data": null, "error": "...", "code": "CannotBookingError"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    /// Human readable error message. `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stable error name, e.g. `NotFoundError`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Error half of every handler result
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

/// HTTP status for a domain failure
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::BadRequest(_) => StatusCode::BAD_REQUEST,
        DomainError::Blocked {
            action: BlockedAction::ListHotels,
            ..
        } => StatusCode::PAYMENT_REQUIRED,
        DomainError::Blocked { .. } => StatusCode::FORBIDDEN,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain failure to the error response. Storage details stay in logs.
pub fn domain_error<T>(error: DomainError) -> ApiError<T> {
    let status = status_for(&error);
    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    }
    let body = ApiResponse::error(error.message()).with_code(error.name());
    (status, Json(body))
}

/// Plain 400 for malformed input caught before the domain layer
pub fn bad_request<T>(message: impl Into<String>) -> ApiError<T> {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(message).with_code("BadRequestError")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BlockReason;

    #[test]
    fn status_mapping_covers_every_kind() {
        let cases = [
            (DomainError::not_found("Room", "id", 1), StatusCode::NOT_FOUND),
            (DomainError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::blocked(BlockedAction::ListHotels, BlockReason::TicketNotPaid),
                StatusCode::PAYMENT_REQUIRED,
            ),
            (
                DomainError::blocked(BlockedAction::Book, BlockReason::RoomFull),
                StatusCode::FORBIDDEN,
            ),
            (
                DomainError::blocked(BlockedAction::Proceed, BlockReason::NoTicket),
                StatusCode::FORBIDDEN,
            ),
            (DomainError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(status_for(&error), status, "{error:?}");
        }
    }

    #[test]
    fn error_body_carries_name_and_message() {
        let (status, Json(body)) = domain_error::<()>(DomainError::blocked(
            BlockedAction::Book,
            BlockReason::RoomFull,
        ));
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(!body.success);
        assert_eq!(body.code.as_deref(), Some("CannotBookingError"));
        assert_eq!(
            body.error.as_deref(),
            Some("Cannot booking this room! Overcapacity!")
        );
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let (_, Json(body)) = domain_error::<()>(DomainError::Storage("disk on fire".into()));
        assert!(!body.error.unwrap_or_default().contains("disk"));
    }
}
