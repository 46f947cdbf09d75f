//! Hotel DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Hotel, HotelWithRooms, Room};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HotelDto {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Hotel> for HotelDto {
    fn from(h: Hotel) -> Self {
        Self {
            id: h.id,
            name: h.name,
            image: h.image,
            created_at: h.created_at.to_rfc3339(),
            updated_at: h.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            name: r.name,
            capacity: r.capacity,
            hotel_id: r.hotel_id,
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HotelWithRoomsDto {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub created_at: String,
    pub updated_at: String,
    pub rooms: Vec<RoomDto>,
}

impl From<HotelWithRooms> for HotelWithRoomsDto {
    fn from(h: HotelWithRooms) -> Self {
        let hotel = HotelDto::from(h.hotel);
        Self {
            id: hotel.id,
            name: hotel.name,
            image: hotel.image,
            created_at: hotel.created_at,
            updated_at: hotel.updated_at,
            rooms: h.rooms.into_iter().map(Into::into).collect(),
        }
    }
}
