//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::dto::*;
use crate::application::BookingService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/booking",
    tag = "Booking",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's booking with its room", body = ApiResponse<BookingDto>),
        (status = 404, description = "No booking")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError<BookingDto>> {
    let booking = state
        .bookings
        .get_booking(user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/booking",
    tag = "Booking",
    security(("bearer_auth" = [])),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Room booked", body = ApiResponse<BookingIdResponse>),
        (status = 400, description = "Invalid room id"),
        (status = 403, description = "Not eligible, room full or already booked"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn book_room(
    State(state): State<BookingAppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> Result<Json<ApiResponse<BookingIdResponse>>, ApiError<BookingIdResponse>> {
    let booking = state
        .bookings
        .book_room(user.user_id, request.room_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(BookingIdResponse {
        booking_id: booking.id,
    })))
}

#[utoipa::path(
    put,
    path = "/api/v1/booking",
    tag = "Booking",
    security(("bearer_auth" = [])),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking moved", body = ApiResponse<BookingIdResponse>),
        (status = 400, description = "Invalid room id"),
        (status = 403, description = "Room full"),
        (status = 404, description = "Room or booking not found")
    )
)]
pub async fn change_booking(
    State(state): State<BookingAppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> Result<Json<ApiResponse<BookingIdResponse>>, ApiError<BookingIdResponse>> {
    let booking = state
        .bookings
        .change_booking_room(user.user_id, request.room_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(BookingIdResponse {
        booking_id: booking.id,
    })))
}
