//! Hotel HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use super::dto::*;
use crate::application::HotelService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct HotelAppState {
    pub hotels: Arc<HotelService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels",
    tag = "Hotels",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All hotels", body = ApiResponse<Vec<HotelDto>>),
        (status = 402, description = "Ticket does not allow hotel access"),
        (status = 404, description = "No enrollment or no hotels")
    )
)]
pub async fn list_hotels(
    State(state): State<HotelAppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<HotelDto>>>, ApiError<Vec<HotelDto>>> {
    let hotels = state
        .hotels
        .get_hotels(user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        hotels.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{hotel_id}",
    tag = "Hotels",
    security(("bearer_auth" = [])),
    params(("hotel_id" = i32, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel with its rooms", body = ApiResponse<HotelWithRoomsDto>),
        (status = 402, description = "Ticket does not allow hotel access"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn get_hotel(
    State(state): State<HotelAppState>,
    user: AuthenticatedUser,
    Path(hotel_id): Path<i32>,
) -> Result<Json<ApiResponse<HotelWithRoomsDto>>, ApiError<HotelWithRoomsDto>> {
    let hotel = state
        .hotels
        .get_hotel_with_rooms(user.user_id, hotel_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(hotel.into())))
}
