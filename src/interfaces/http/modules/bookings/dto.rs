//! Booking DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::BookingWithRoom;
use crate::interfaces::http::modules::hotels::RoomDto;

/// Room choice for booking or moving. Non-positive ids are rejected with 400.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookingRequest {
    pub room_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingIdResponse {
    pub booking_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub room: RoomDto,
}

impl From<BookingWithRoom> for BookingDto {
    fn from(b: BookingWithRoom) -> Self {
        Self {
            id: b.booking.id,
            room: b.room.into(),
        }
    }
}
