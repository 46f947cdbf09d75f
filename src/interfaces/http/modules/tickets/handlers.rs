//! Ticket HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::application::TicketService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct TicketAppState {
    pub tickets: Arc<TicketService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets/types",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ticket type catalog", body = ApiResponse<Vec<TicketTypeDto>>),
        (status = 404, description = "No ticket types")
    )
)]
pub async fn get_ticket_types(
    State(state): State<TicketAppState>,
) -> Result<Json<ApiResponse<Vec<TicketTypeDto>>>, ApiError<Vec<TicketTypeDto>>> {
    let types = state.tickets.get_ticket_types().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        types.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's ticket", body = ApiResponse<TicketDto>),
        (status = 404, description = "No enrollment or no ticket")
    )
)]
pub async fn get_ticket(
    State(state): State<TicketAppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<TicketDto>>, ApiError<TicketDto>> {
    let ticket = state
        .tickets
        .get_ticket_by_user_id(user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(ticket.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket reserved", body = ApiResponse<TicketDto>),
        (status = 403, description = "Enrollment already holds a ticket"),
        (status = 404, description = "No enrollment or unknown ticket type"),
        (status = 422, description = "Invalid body")
    )
)]
pub async fn create_ticket(
    State(state): State<TicketAppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateTicketRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TicketDto>>), ApiError<TicketDto>> {
    let ticket = state
        .tickets
        .create_ticket(user.user_id, request.ticket_type_id)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(ticket.into()))))
}
