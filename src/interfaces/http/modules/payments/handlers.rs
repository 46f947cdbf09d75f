//! Payment HTTP handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use super::dto::*;
use crate::application::PaymentService;
use crate::domain::CardData;
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiError, ApiResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct PaymentAppState {
    pub payments: Arc<PaymentService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(PaymentQuery),
    responses(
        (status = 200, description = "Payment of the ticket", body = ApiResponse<PaymentDto>),
        (status = 400, description = "Missing ticket_id"),
        (status = 401, description = "Ticket belongs to another user"),
        (status = 404, description = "Ticket or payment not found")
    )
)]
pub async fn get_payment(
    State(state): State<PaymentAppState>,
    user: AuthenticatedUser,
    Query(query): Query<PaymentQuery>,
) -> Result<Json<ApiResponse<PaymentDto>>, ApiError<PaymentDto>> {
    let Some(ticket_id) = query.ticket_id else {
        return Err(bad_request("ticket_id is required"));
    };
    let payment = state
        .payments
        .get_payment_by_ticket_id(user.user_id, ticket_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(payment.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/process",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = ProcessPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded, ticket paid", body = ApiResponse<PaymentDto>),
        (status = 401, description = "Ticket belongs to another user"),
        (status = 404, description = "Ticket not found"),
        (status = 422, description = "Invalid body")
    )
)]
pub async fn process_payment(
    State(state): State<PaymentAppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ProcessPaymentRequest>,
) -> Result<Json<ApiResponse<PaymentDto>>, ApiError<PaymentDto>> {
    let card = CardData::from(request.card_data);
    let payment = state
        .payments
        .process_payment(user.user_id, request.ticket_id, &card)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(payment.into())))
}
